//! Record generators for seed data.
//!
//! - [`RevenueGenerator`]: monthly revenue per branch with size, seasonal,
//!   year-over-year and noise factors applied

pub mod monthly;

pub use monthly::{GenerateError, RevenueGenerator, last_day_of_month, quarter_of};
