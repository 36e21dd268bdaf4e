//! Database integration for seeding revenue data.
//!
//! The [`Seeder`] recreates the table, inserts a generated dataset in one
//! transaction and reads back the summary shown after a run.

mod seeder;

pub use seeder::{SeedError, Seeder, connect};
