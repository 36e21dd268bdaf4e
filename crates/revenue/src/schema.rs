//! DDL for the `branch_revenue` table.
//!
//! The statements run on a caller-supplied connection so they can share a
//! transaction with the inserts that follow. Postgres DDL is transactional,
//! so a failure part-way through leaves the previous table untouched.

use sqlx::PgConnection;
use tracing::{debug, info};

pub const TABLE_NAME: &str = "branch_revenue";
pub const DATE_INDEX: &str = "idx_branch_revenue_date";
pub const BRANCH_INDEX: &str = "idx_branch_revenue_branch";

const DROP_TABLE: &str = "DROP TABLE IF EXISTS branch_revenue";

const CREATE_TABLE: &str = r#"
    CREATE TABLE branch_revenue (
        id SERIAL PRIMARY KEY,
        branch_code VARCHAR(3) NOT NULL,
        branch_name VARCHAR(50) NOT NULL,
        report_date DATE NOT NULL,
        revenue_vnd BIGINT NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        UNIQUE (branch_code, report_date)
    )
"#;

const CREATE_DATE_INDEX: &str =
    "CREATE INDEX idx_branch_revenue_date ON branch_revenue(report_date)";

const CREATE_BRANCH_INDEX: &str =
    "CREATE INDEX idx_branch_revenue_branch ON branch_revenue(branch_code)";

/// Statements executed by [`create`], in order.
pub const CREATE_STATEMENTS: [&str; 4] = [
    DROP_TABLE,
    CREATE_TABLE,
    CREATE_DATE_INDEX,
    CREATE_BRANCH_INDEX,
];

/// Drops any existing `branch_revenue` table and recreates it with its indexes.
///
/// **WARNING**: existing rows are discarded, including rows written by other tools.
pub async fn create(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    for statement in CREATE_STATEMENTS {
        debug!(statement = statement.trim(), "executing DDL");
        sqlx::query(statement).execute(&mut *conn).await?;
    }

    info!("Table '{TABLE_NAME}' created");
    Ok(())
}

/// Drops the `branch_revenue` table if it exists.
pub async fn drop_table(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    sqlx::query(DROP_TABLE).execute(&mut *conn).await?;
    info!("Table '{TABLE_NAME}' dropped");
    Ok(())
}
