//! Queries against `branch_revenue`.
//!
//! Every function takes a `&mut PgConnection` so callers can run it on a
//! pooled connection or inside an open transaction (`&mut *tx`).

use sqlx::PgConnection;
use time::Date;

use crate::errors::RevenueError;
use crate::models::{NewRevenueRecord, RevenueRecord, YearlyTotal};

const RECORD_COLUMNS: &str = "id, branch_code, branch_name, report_date, revenue_vnd, created_at";

/// Inserts a record and returns its assigned `id`.
///
/// Fails with [`RevenueError::DuplicateRecord`] when the branch already has a
/// record for `report_date`; the existing row is left unchanged.
pub async fn insert_record(
    conn: &mut PgConnection,
    record: &NewRevenueRecord,
) -> Result<i32, RevenueError> {
    record.validate()?;

    let id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO branch_revenue (branch_code, branch_name, report_date, revenue_vnd)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(&record.branch_code)
    .bind(&record.branch_name)
    .bind(record.report_date)
    .bind(record.revenue_vnd)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => RevenueError::DuplicateRecord {
            branch_code: record.branch_code.clone(),
            report_date: record.report_date,
        },
        other => RevenueError::Database(other),
    })?;

    Ok(id)
}

/// Looks up the record for one branch and reporting period.
pub async fn find_by_key(
    conn: &mut PgConnection,
    branch_code: &str,
    report_date: Date,
) -> Result<Option<RevenueRecord>, RevenueError> {
    let record = sqlx::query_as(&format!(
        "SELECT {RECORD_COLUMNS} FROM branch_revenue WHERE branch_code = $1 AND report_date = $2"
    ))
    .bind(branch_code)
    .bind(report_date)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(record)
}

/// Returns records with `from <= report_date <= to`, ordered by date then insertion.
pub async fn list_between(
    conn: &mut PgConnection,
    from: Date,
    to: Date,
) -> Result<Vec<RevenueRecord>, RevenueError> {
    if from > to {
        return Err(RevenueError::InvalidInput(format!(
            "date range start {from} is after end {to}"
        )));
    }

    let records = sqlx::query_as(&format!(
        r#"
        SELECT {RECORD_COLUMNS}
        FROM branch_revenue
        WHERE report_date BETWEEN $1 AND $2
        ORDER BY report_date, id
        "#
    ))
    .bind(from)
    .bind(to)
    .fetch_all(&mut *conn)
    .await?;

    Ok(records)
}

/// Returns every record for a branch, oldest period first.
pub async fn list_by_branch(
    conn: &mut PgConnection,
    branch_code: &str,
) -> Result<Vec<RevenueRecord>, RevenueError> {
    let records = sqlx::query_as(&format!(
        "SELECT {RECORD_COLUMNS} FROM branch_revenue WHERE branch_code = $1 ORDER BY report_date"
    ))
    .bind(branch_code)
    .fetch_all(&mut *conn)
    .await?;

    Ok(records)
}

pub async fn count(conn: &mut PgConnection) -> Result<i64, RevenueError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM branch_revenue")
        .fetch_one(&mut *conn)
        .await?;

    Ok(count)
}

/// First `limit` records in insertion order.
pub async fn first_records(
    conn: &mut PgConnection,
    limit: i64,
) -> Result<Vec<RevenueRecord>, RevenueError> {
    let records = sqlx::query_as(&format!(
        "SELECT {RECORD_COLUMNS} FROM branch_revenue ORDER BY id LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(&mut *conn)
    .await?;

    Ok(records)
}

/// Last `limit` records, returned in insertion order.
pub async fn last_records(
    conn: &mut PgConnection,
    limit: i64,
) -> Result<Vec<RevenueRecord>, RevenueError> {
    let records = sqlx::query_as(&format!(
        r#"
        SELECT {RECORD_COLUMNS}
        FROM (
            SELECT {RECORD_COLUMNS} FROM branch_revenue ORDER BY id DESC LIMIT $1
        ) tail
        ORDER BY id
        "#
    ))
    .bind(limit)
    .fetch_all(&mut *conn)
    .await?;

    Ok(records)
}

/// Revenue totals per calendar year, ascending by year.
pub async fn yearly_totals(conn: &mut PgConnection) -> Result<Vec<YearlyTotal>, RevenueError> {
    let totals = sqlx::query_as(
        r#"
        SELECT EXTRACT(YEAR FROM report_date)::INT4 AS year,
               SUM(revenue_vnd)::INT8 AS total_vnd,
               COUNT(*) AS record_count
        FROM branch_revenue
        GROUP BY 1
        ORDER BY 1
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(totals)
}
