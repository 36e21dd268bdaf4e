//! Storage for monthly branch revenue figures.
//!
//! The crate owns the `branch_revenue` table: its DDL ([`schema`]), the row
//! types ([`models`]) and the filtered queries reporting consumers run
//! against it ([`database`]).

pub mod database;
pub mod errors;
pub mod models;
pub mod schema;

pub use errors::RevenueError;
pub use models::{NewRevenueRecord, RevenueRecord, YearlyTotal};
