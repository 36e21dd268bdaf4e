//! Configuration types for revenue seeding.

use clap::{Args, Parser};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgConnectOptions;

/// RNG seed that produces the published sample dataset.
pub const DEFAULT_RNG_SEED: u64 = 20_240_131;

/// A branch and its size relative to the largest branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchSpec {
    pub code: String,
    pub name: String,
    /// Size factor applied to the base revenue (largest branch = 1.0).
    pub multiplier: f64,
}

impl BranchSpec {
    pub fn new(code: &str, name: &str, multiplier: f64) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            multiplier,
        }
    }
}

/// A reporting year and its growth factor relative to the baseline year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearSpec {
    pub year: i32,
    pub multiplier: f64,
}

/// The embedded dataset description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Branches in insertion order.
    pub branches: Vec<BranchSpec>,

    /// Reporting years in insertion order; every month of each is generated.
    pub years: Vec<YearSpec>,

    /// Seasonal factors for Q1..Q4.
    pub quarterly_multipliers: [f64; 4],

    /// Lower bound of the uniform base revenue draw (VND).
    pub base_revenue_min: f64,

    /// Upper bound of the uniform base revenue draw (VND).
    pub base_revenue_max: f64,

    /// Relative noise applied after the multipliers (0.10 = ±10%).
    pub noise_range: f64,

    /// Seed for the deterministic RNG.
    pub rng_seed: u64,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            branches: vec![
                BranchSpec::new("HCM", "Ho Chi Minh", 1.0),
                BranchSpec::new("HN", "Ha Noi", 0.85),
                BranchSpec::new("DN", "Da Nang", 0.6),
            ],
            years: vec![
                YearSpec {
                    year: 2024,
                    multiplier: 1.0,
                },
                YearSpec {
                    year: 2025,
                    multiplier: 1.08,
                },
            ],
            // Post-holiday slowdown, normal, mid-year push, holiday season
            quarterly_multipliers: [0.90, 1.00, 1.05, 1.15],
            base_revenue_min: 12_000_000_000.0,
            base_revenue_max: 20_000_000_000.0,
            noise_range: 0.10,
            rng_seed: DEFAULT_RNG_SEED,
        }
    }
}

impl SeedConfig {
    /// Number of records the configuration produces.
    pub fn record_count(&self) -> usize {
        self.branches.len() * self.years.len() * 12
    }
}

/// PostgreSQL connection parameters.
#[derive(Debug, Clone, Args)]
pub struct DbConfig {
    /// Database host
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub host: String,

    /// Database port
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub port: u16,

    /// Database user
    #[arg(long, env = "DB_USER", default_value = "postgres")]
    pub user: String,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Database name
    #[arg(long, env = "DB_NAME", default_value = "postgres")]
    pub dbname: String,

    /// Full connection URL; overrides the individual fields when set
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

impl DbConfig {
    /// Builds connect options from the URL if present, otherwise from the individual fields.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.database_url {
            return url.parse();
        }

        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.dbname);

        Ok(if self.password.is_empty() {
            options
        } else {
            options.password(&self.password)
        })
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            dbname: "postgres".to_string(),
            database_url: None,
        }
    }
}

/// Seeds the branch_revenue table with deterministic sample data.
#[derive(Parser, Debug, Clone)]
#[command(name = "seed")]
#[command(author, version, about, long_about = None)]
pub struct SeedArgs {
    #[command(flatten)]
    pub db: DbConfig,

    /// Seed for the revenue generator
    #[arg(long, env = "SEED_RNG", default_value_t = DEFAULT_RNG_SEED)]
    pub rng_seed: u64,
}

impl SeedArgs {
    /// The embedded dataset with the requested RNG seed.
    pub fn seed_config(&self) -> SeedConfig {
        SeedConfig {
            rng_seed: self.rng_seed,
            ..SeedConfig::default()
        }
    }
}
