//! Database seeding utilities.

use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, PgConnection};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::generators::GenerateError;
use crate::report::SeedSummary;
use revenue::{NewRevenueRecord, RevenueError, database, schema};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Revenue(#[from] RevenueError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error("No records to seed")]
    EmptyDataset,
}

/// Opens the single connection a seeding run uses.
///
/// One attempt only: a refused or unreachable server is reported immediately
/// with the underlying I/O error.
pub async fn connect(options: &PgConnectOptions) -> Result<PgConnection, sqlx::Error> {
    let conn = PgConnection::connect_with(options).await?;
    info!(
        "Connected to {}:{}",
        options.get_host(),
        options.get_port()
    );
    Ok(conn)
}

/// Database seeder for the `branch_revenue` table.
pub struct Seeder {
    conn: PgConnection,
    batch_size: usize,
}

impl Seeder {
    /// Creates a new seeder that owns `conn` until [`Seeder::close`].
    pub fn new(conn: PgConnection) -> Self {
        Self {
            conn,
            batch_size: 24,
        }
    }

    /// Sets how many inserts run between progress log lines.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Recreates the table and inserts `records` in a single transaction.
    ///
    /// Either every record is committed or nothing is: on any failure the
    /// transaction is rolled back, which also restores the previous table.
    ///
    /// **WARNING**: on success the previous contents of `branch_revenue` are gone.
    pub async fn seed(&mut self, records: &[NewRevenueRecord]) -> Result<usize, SeedError> {
        if records.is_empty() {
            return Err(SeedError::EmptyDataset);
        }

        let mut tx = self.conn.begin().await?;

        match seed_in(&mut tx, records, self.batch_size).await {
            Ok(()) => {
                tx.commit().await?;
                info!("Committed {} revenue records", records.len());
                Ok(records.len())
            }
            Err(e) => {
                warn!("Seeding failed, rolling back: {e}");
                if let Err(rollback_err) = tx.rollback().await {
                    error!("Rollback failed: {rollback_err}");
                }
                Err(e)
            }
        }
    }

    /// Reads back row count, preview rows and yearly totals. Read-only.
    ///
    /// `preview_len` records are taken from each end of the table; when the
    /// table is too small for the two ends to be disjoint, only `head` is filled.
    pub async fn summarize(&mut self, preview_len: i64) -> Result<SeedSummary, SeedError> {
        let conn = &mut self.conn;

        let row_count = database::count(conn).await?;
        let (head, tail) = if row_count <= preview_len * 2 {
            (database::first_records(conn, row_count).await?, Vec::new())
        } else {
            (
                database::first_records(conn, preview_len).await?,
                database::last_records(conn, preview_len).await?,
            )
        };
        let yearly = database::yearly_totals(conn).await?;

        Ok(SeedSummary {
            row_count,
            head,
            tail,
            yearly,
        })
    }

    /// Closes the connection, telling the server the session is over.
    pub async fn close(self) -> Result<(), sqlx::Error> {
        self.conn.close().await
    }
}

async fn seed_in(
    conn: &mut PgConnection,
    records: &[NewRevenueRecord],
    batch_size: usize,
) -> Result<(), SeedError> {
    schema::create(&mut *conn).await?;

    info!("Seeding {} revenue records...", records.len());

    let mut inserted = 0;
    for chunk in records.chunks(batch_size) {
        for record in chunk {
            database::insert_record(&mut *conn, record).await?;
        }
        inserted += chunk.len();
        info!("  Seeded {}/{} records", inserted, records.len());
    }

    Ok(())
}
