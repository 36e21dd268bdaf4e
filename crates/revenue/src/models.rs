use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, PrimitiveDateTime};

use crate::errors::RevenueError;

/// Maximum length of `branch_code` (`VARCHAR(3)`).
pub const BRANCH_CODE_MAX_LEN: usize = 3;

/// Maximum length of `branch_name` (`VARCHAR(50)`).
pub const BRANCH_NAME_MAX_LEN: usize = 50;

/// One branch's total revenue for one reporting period, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct RevenueRecord {
    pub id: i32,
    pub branch_code: String,
    pub branch_name: String,
    /// Last day of the reporting month.
    pub report_date: Date,
    pub revenue_vnd: i64,
    pub created_at: Option<PrimitiveDateTime>,
}

/// A revenue record ready for insertion. `id` and `created_at` are assigned by the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRevenueRecord {
    pub branch_code: String,
    pub branch_name: String,
    pub report_date: Date,
    pub revenue_vnd: i64,
}

impl NewRevenueRecord {
    pub fn new(
        branch_code: impl Into<String>,
        branch_name: impl Into<String>,
        report_date: Date,
        revenue_vnd: i64,
    ) -> Self {
        Self {
            branch_code: branch_code.into(),
            branch_name: branch_name.into(),
            report_date,
            revenue_vnd,
        }
    }

    /// Checks the column limits before anything is sent to the database.
    pub fn validate(&self) -> Result<(), RevenueError> {
        let code_len = self.branch_code.chars().count();
        if code_len == 0 || code_len > BRANCH_CODE_MAX_LEN {
            return Err(RevenueError::InvalidInput(format!(
                "branch_code must be 1-{BRANCH_CODE_MAX_LEN} characters, got {:?}",
                self.branch_code
            )));
        }

        let name_len = self.branch_name.chars().count();
        if name_len == 0 || name_len > BRANCH_NAME_MAX_LEN {
            return Err(RevenueError::InvalidInput(format!(
                "branch_name must be 1-{BRANCH_NAME_MAX_LEN} characters, got {name_len}"
            )));
        }

        if self.revenue_vnd < 0 {
            return Err(RevenueError::InvalidInput(format!(
                "revenue_vnd must be non-negative, got {}",
                self.revenue_vnd
            )));
        }

        Ok(())
    }
}

/// Revenue summed over one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct YearlyTotal {
    pub year: i32,
    pub total_vnd: i64,
    pub record_count: i64,
}
