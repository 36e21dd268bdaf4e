//! Monthly branch revenue generation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Uniform};
use thiserror::Error;
use time::{Date, Month};

use crate::config::SeedConfig;
use revenue::NewRevenueRecord;

const MILLION: f64 = 1_000_000.0;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Invalid seed configuration: {0}")]
    InvalidConfig(String),
    #[error("Invalid calendar date: {0}")]
    Calendar(#[from] time::error::ComponentRange),
}

/// Quarter (1-4) containing `month`.
pub fn quarter_of(month: Month) -> u8 {
    (u8::from(month) - 1) / 3 + 1
}

/// Last calendar day of the month, which is the reporting date for that period.
pub fn last_day_of_month(year: i32, month: Month) -> Result<Date, GenerateError> {
    let (next_year, next_month) = match month {
        Month::December => (year + 1, Month::January),
        _ => (year, month.next()),
    };

    let first_of_next = Date::from_calendar_date(next_year, next_month, 1)?;
    first_of_next
        .previous_day()
        .ok_or_else(|| GenerateError::InvalidConfig(format!("no day before {first_of_next}")))
}

/// Generates revenue records for every branch and month in a [`SeedConfig`].
pub struct RevenueGenerator {
    config: SeedConfig,
}

impl RevenueGenerator {
    /// Creates a generator for the embedded sample dataset.
    pub fn new() -> Self {
        Self {
            config: SeedConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: SeedConfig) -> Self {
        Self { config }
    }

    /// Generates the dataset from the configured RNG seed.
    ///
    /// The same configuration always yields the same records.
    pub fn generate(&self) -> Result<Vec<NewRevenueRecord>, GenerateError> {
        let mut rng = StdRng::seed_from_u64(self.config.rng_seed);
        self.generate_with_rng(&mut rng)
    }

    /// Generates the dataset, ordered by year, then month, then branch.
    pub fn generate_with_rng(
        &self,
        rng: &mut impl rand::Rng,
    ) -> Result<Vec<NewRevenueRecord>, GenerateError> {
        self.validate()?;

        let base = Uniform::new(self.config.base_revenue_min, self.config.base_revenue_max);
        let noise = Uniform::new_inclusive(
            1.0 - self.config.noise_range,
            1.0 + self.config.noise_range,
        );

        let mut records = Vec::with_capacity(self.config.record_count());

        for year in &self.config.years {
            let mut month = Month::January;
            for _ in 0..12 {
                let seasonal = self.config.quarterly_multipliers[usize::from(quarter_of(month)) - 1];
                let report_date = last_day_of_month(year.year, month)?;

                for branch in &self.config.branches {
                    let revenue = base.sample(rng)
                        * branch.multiplier
                        * seasonal
                        * year.multiplier
                        * noise.sample(rng);

                    records.push(NewRevenueRecord::new(
                        branch.code.as_str(),
                        branch.name.as_str(),
                        report_date,
                        round_to_million(revenue),
                    ));
                }

                month = month.next();
            }
        }

        Ok(records)
    }

    fn validate(&self) -> Result<(), GenerateError> {
        let config = &self.config;

        if config.branches.is_empty() || config.years.is_empty() {
            return Err(GenerateError::InvalidConfig(
                "at least one branch and one year are required".to_string(),
            ));
        }

        if !(config.base_revenue_min >= 0.0
            && config.base_revenue_min < config.base_revenue_max
            && config.base_revenue_max.is_finite())
        {
            return Err(GenerateError::InvalidConfig(format!(
                "base revenue range {}..{} is empty or negative",
                config.base_revenue_min, config.base_revenue_max
            )));
        }

        if !(0.0..1.0).contains(&config.noise_range) {
            return Err(GenerateError::InvalidConfig(format!(
                "noise range must be in [0, 1), got {}",
                config.noise_range
            )));
        }

        let multipliers = config
            .branches
            .iter()
            .map(|b| b.multiplier)
            .chain(config.years.iter().map(|y| y.multiplier))
            .chain(config.quarterly_multipliers);
        for m in multipliers {
            if !m.is_finite() || m < 0.0 {
                return Err(GenerateError::InvalidConfig(format!(
                    "multipliers must be finite and non-negative, got {m}"
                )));
            }
        }

        let mut seen = std::collections::HashSet::new();
        for branch in &config.branches {
            if !seen.insert(branch.code.as_str()) {
                return Err(GenerateError::InvalidConfig(format!(
                    "branch {} listed twice",
                    branch.code
                )));
            }
        }

        Ok(())
    }
}

impl Default for RevenueGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Rounds to the nearest million VND.
fn round_to_million(revenue: f64) -> i64 {
    (revenue / MILLION).round() as i64 * 1_000_000
}
