//! Seeds branch_revenue with the sample dataset and prints a summary.
//!
//! Run with:
//! ```
//! cargo run -p revenue-seed --bin seed
//! ```
//!
//! Connection settings come from flags or DB_HOST / DB_PORT / DB_USER /
//! DB_PASSWORD / DB_NAME (or DATABASE_URL), read from `.env` when present.

use anyhow::Context;
use clap::Parser;
use revenue::schema::TABLE_NAME;
use revenue_seed::PREVIEW_ROWS;
use revenue_seed::config::SeedArgs;
use revenue_seed::db::{Seeder, connect};
use revenue_seed::generators::RevenueGenerator;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = SeedArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("Branch Revenue Data Seeder\n");

    let options = args
        .db
        .connect_options()
        .context("invalid database configuration")?;
    let target = format!("{}:{}", options.get_host(), options.get_port());

    println!("Connecting to PostgreSQL at {target}...");
    let conn = connect(&options)
        .await
        .with_context(|| format!("failed to connect to PostgreSQL at {target}"))?;
    println!("✓ Connected to database\n");

    let mut seeder = Seeder::new(conn);
    let result = run(&mut seeder, &args).await;
    if let Err(e) = seeder.close().await {
        tracing::warn!("Failed to close database connection: {e}");
    }

    match result {
        Ok(()) => {
            println!("\n✓ Done! Database seeded successfully.");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Seeding failed: {e:#}");
            Err(e)
        }
    }
}

async fn run(seeder: &mut Seeder, args: &SeedArgs) -> anyhow::Result<()> {
    let records = RevenueGenerator::with_config(args.seed_config())
        .generate()
        .context("failed to generate revenue records")?;

    let inserted = seeder
        .seed(&records)
        .await
        .context("seeding rolled back")?;

    println!("✓ Table '{TABLE_NAME}' created");
    println!("✓ Inserted {inserted} revenue records");
    println!("✓ Changes committed\n");

    let summary = seeder.summarize(PREVIEW_ROWS).await?;
    print!("{}", summary.render());

    Ok(())
}
