//! Console report printed after seeding.

use revenue::{RevenueRecord, YearlyTotal};

/// Column widths of the preview table: branch, name, date, revenue.
const WIDTHS: [usize; 4] = [6, 15, 12, 20];
const RULE_WIDTH: usize = WIDTHS[0] + WIDTHS[1] + WIDTHS[2] + WIDTHS[3] + 3;

/// What was read back from the table after the seeding transaction committed.
#[derive(Debug, Clone)]
pub struct SeedSummary {
    pub row_count: i64,
    /// Leading records in insertion order.
    pub head: Vec<RevenueRecord>,
    /// Trailing records in insertion order; empty when `head` already covers the table.
    pub tail: Vec<RevenueRecord>,
    pub yearly: Vec<YearlyTotal>,
}

impl SeedSummary {
    pub fn render(&self) -> String {
        let preview: Vec<RevenueRecord> = self.head.iter().chain(&self.tail).cloned().collect();

        let mut out = format!("Rows in table: {}\n\n", self.row_count);
        if self.tail.is_empty() {
            out.push_str(&format!("Sample Data (all {} records):\n\n", self.head.len()));
        } else {
            out.push_str(&format!(
                "Sample Data (first and last {} records):\n\n",
                self.head.len()
            ));
        }
        out.push_str(&render_preview(&preview));
        out.push('\n');
        out.push_str(&"-".repeat(RULE_WIDTH));
        out.push_str("\n\n");
        out.push_str(&render_summary(&self.yearly));
        out
    }
}

/// Formats an amount with comma thousands separators: `14235000000` -> `14,235,000,000`.
pub fn format_vnd(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if amount < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// Percentage change from `previous` to `current`; `None` when there is no baseline.
pub fn growth_percent(previous: i64, current: i64) -> Option<f64> {
    if previous == 0 {
        return None;
    }
    Some((current - previous) as f64 / previous as f64 * 100.0)
}

/// Renders records as a fixed-width table with a header and rule.
pub fn render_preview(records: &[RevenueRecord]) -> String {
    let [w_code, w_name, w_date, w_revenue] = WIDTHS;

    let mut out = String::new();
    out.push_str(&format!(
        "{:<w_code$} {:<w_name$} {:<w_date$} {:>w_revenue$}\n",
        "Branch", "Name", "Date", "Revenue (VND)"
    ));
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');

    for r in records {
        out.push_str(&format!(
            "{:<w_code$} {:<w_name$} {:<w_date$} {:>w_revenue$}\n",
            r.branch_code,
            r.branch_name,
            r.report_date.to_string(),
            format_vnd(r.revenue_vnd)
        ));
    }

    out
}

/// Renders per-year totals followed by the growth between consecutive years.
pub fn render_summary(totals: &[YearlyTotal]) -> String {
    let mut out = String::from("Summary:\n");

    for t in totals {
        out.push_str(&format!(
            "   Total {}: {} VND\n",
            t.year,
            format_vnd(t.total_vnd)
        ));
    }

    for pair in totals.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);
        let label = if totals.len() == 2 {
            "YoY Growth".to_string()
        } else {
            format!("YoY Growth {}", cur.year)
        };
        let line = match growth_percent(prev.total_vnd, cur.total_vnd) {
            Some(g) => format!("   {label}: {g:.1}%\n"),
            None => format!("   {label}: n/a (no {} revenue)\n", prev.year),
        };
        out.push_str(&line);
    }

    out
}
