//! Sample data for the `branch_revenue` table.
//!
//! This crate generates a deterministic monthly revenue dataset for every
//! branch, loads it in a single transaction and renders the console report
//! printed by the `seed` binary.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use revenue_seed::prelude::*;
//!
//! let records = RevenueGenerator::new().generate()?;
//! let mut seeder = Seeder::new(connect(&options).await?);
//! seeder.seed(&records).await?;
//! println!("{}", seeder.summarize(PREVIEW_ROWS).await?.render());
//! seeder.close().await?;
//! ```

pub mod config;
pub mod db;
pub mod generators;
pub mod report;

/// Records shown from each end of the table in the console preview.
pub const PREVIEW_ROWS: i64 = 3;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::PREVIEW_ROWS;
    pub use crate::config::{BranchSpec, DbConfig, SeedArgs, SeedConfig, YearSpec};
    pub use crate::db::{SeedError, Seeder, connect};
    pub use crate::generators::RevenueGenerator;
    pub use crate::report::SeedSummary;
    pub use revenue::{NewRevenueRecord, RevenueRecord, YearlyTotal};
}
