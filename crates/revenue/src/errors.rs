use thiserror::Error;
use time::Date;

#[derive(Error, Debug)]
pub enum RevenueError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Revenue record for branch {branch_code} on {report_date} already exists")]
    DuplicateRecord {
        branch_code: String,
        report_date: Date,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl RevenueError {
    /// True when the error came from the `(branch_code, report_date)` uniqueness constraint.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, RevenueError::DuplicateRecord { .. })
    }
}
