//! Integration tests for the revenue seeder.
//!
//! To run these tests, you need:
//! 1. A PostgreSQL database the test user may create tables in
//! 2. DATABASE_URL environment variable set
//!
//! Run with: `DATABASE_URL=postgres://... cargo nextest run -p revenue-seed`
//!
//! Note: these tests drop and recreate `branch_revenue` in the target
//! database, so point them at a scratch database.

use revenue::database;
use revenue::errors::RevenueError;
use revenue_seed::prelude::*;
use sqlx::PgConnection;
use sqlx::postgres::PgConnectOptions;
use std::env;
use time::macros::date;
use tokio::sync::Mutex;

/// Every test here rewrites the same table.
static TABLE_LOCK: Mutex<()> = Mutex::const_new(());

/// Open a connection, skipping tests if DATABASE_URL is not set.
async fn get_test_conn() -> Option<PgConnection> {
    let database_url = match env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: DATABASE_URL not set");
            return None;
        }
    };

    let options: PgConnectOptions = database_url.parse().expect("invalid DATABASE_URL");
    match connect(&options).await {
        Ok(conn) => Some(conn),
        Err(e) => {
            eprintln!("Skipping test: Failed to connect to database: {e}");
            None
        }
    }
}

/// Table contents without the write timestamp.
async fn snapshot(conn: &mut PgConnection) -> Vec<(i32, String, String, time::Date, i64)> {
    database::list_between(conn, date!(1900 - 01 - 01), date!(2999 - 12 - 31))
        .await
        .unwrap()
        .into_iter()
        .map(|r| (r.id, r.branch_code, r.branch_name, r.report_date, r.revenue_vnd))
        .collect()
}

#[tokio::test]
async fn test_seed_inserts_full_dataset() {
    let _guard = TABLE_LOCK.lock().await;
    let Some(conn) = get_test_conn().await else {
        return;
    };
    let Some(mut reader) = get_test_conn().await else {
        return;
    };

    let records = RevenueGenerator::new().generate().unwrap();
    let mut seeder = Seeder::new(conn);
    assert_eq!(seeder.seed(&records).await.unwrap(), 72);

    assert_eq!(database::count(&mut reader).await.unwrap(), 72);

    let year_2024 =
        database::list_between(&mut reader, date!(2024 - 01 - 01), date!(2024 - 12 - 31))
            .await
            .unwrap();
    assert_eq!(year_2024.len(), 36);
    assert!(year_2024.iter().all(|r| r.revenue_vnd >= 0));

    let hcm = database::find_by_key(&mut reader, "HCM", date!(2024 - 01 - 31))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(hcm.revenue_vnd, records[0].revenue_vnd);

    let summary = seeder.summarize(PREVIEW_ROWS).await.unwrap();
    assert_eq!(summary.row_count, 72);
    assert_eq!(summary.head.len(), 3);
    assert_eq!(summary.tail.len(), 3);
    assert_eq!(summary.head[0].branch_code, "HCM");
    assert_eq!(summary.tail[2].report_date, date!(2025 - 12 - 31));

    let total_2024: i64 = year_2024.iter().map(|r| r.revenue_vnd).sum();
    let reported_2024 = summary.yearly.iter().find(|t| t.year == 2024).unwrap();
    assert_eq!(reported_2024.total_vnd, total_2024);
    assert!(summary.render().contains("Total 2024"));

    seeder.close().await.unwrap();
}

#[tokio::test]
async fn test_reseeding_reproduces_table() {
    let _guard = TABLE_LOCK.lock().await;
    let Some(conn) = get_test_conn().await else {
        return;
    };
    let Some(mut reader) = get_test_conn().await else {
        return;
    };

    let records = RevenueGenerator::new().generate().unwrap();
    let mut seeder = Seeder::new(conn).with_batch_size(5);

    seeder.seed(&records).await.unwrap();
    let first = snapshot(&mut reader).await;

    let regenerated = RevenueGenerator::new().generate().unwrap();
    seeder.seed(&regenerated).await.unwrap();
    let second = snapshot(&mut reader).await;

    assert_eq!(first.len(), 72);
    assert_eq!(first, second);

    seeder.close().await.unwrap();
}

#[tokio::test]
async fn test_failed_seed_rolls_back_everything() {
    let _guard = TABLE_LOCK.lock().await;
    let Some(conn) = get_test_conn().await else {
        return;
    };
    let Some(mut reader) = get_test_conn().await else {
        return;
    };

    let mut seeder = Seeder::new(conn);
    let good = RevenueGenerator::new().generate().unwrap();
    seeder.seed(&good).await.unwrap();
    let before = snapshot(&mut reader).await;

    // Last record repeats the first key, so the batch fails after 72 inserts
    let mut bad = good.clone();
    let mut duplicate = good[0].clone();
    duplicate.revenue_vnd += 1_000_000;
    bad.push(duplicate);

    let err = seeder.seed(&bad).await.unwrap_err();
    assert!(matches!(
        err,
        SeedError::Revenue(RevenueError::DuplicateRecord { .. })
    ));

    // The drop/create ran in the same transaction, so the previous table survives
    let after = snapshot(&mut reader).await;
    assert_eq!(before, after);

    // The seeder's connection is usable again after the rollback
    let summary = seeder.summarize(PREVIEW_ROWS).await.unwrap();
    assert_eq!(summary.row_count, 72);

    seeder.close().await.unwrap();
}

#[tokio::test]
async fn test_empty_dataset_rejected_before_touching_table() {
    let _guard = TABLE_LOCK.lock().await;
    let Some(conn) = get_test_conn().await else {
        return;
    };

    let mut seeder = Seeder::new(conn);
    let err = seeder.seed(&[]).await.unwrap_err();
    assert!(matches!(err, SeedError::EmptyDataset));

    seeder.close().await.unwrap();
}
