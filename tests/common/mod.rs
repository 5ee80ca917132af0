// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::Result;
use tally::application::LedgerStore;
use tally::storage::Repository;
use tempfile::TempDir;

/// Helper to create a test store with a temporary database
pub async fn test_store() -> Result<(LedgerStore, TempDir)> {
    let temp_dir = TempDir::new()?;
    let store = LedgerStore::open(db_path(&temp_dir).to_str().unwrap()).await?;
    Ok((store, temp_dir))
}

/// Path of the database file inside a test directory
pub fn db_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("test.db")
}

/// Open the raw key-value repository behind a test database
pub async fn raw_repository(temp_dir: &TempDir) -> Result<Repository> {
    let url = format!("sqlite:{}?mode=rwc", db_path(temp_dir).display());
    Ok(Repository::init(&url).await?)
}

/// Reopen the store from the same database file
pub async fn reopen(temp_dir: &TempDir) -> Result<LedgerStore> {
    Ok(LedgerStore::open(db_path(temp_dir).to_str().unwrap()).await?)
}

/// Make every later storage access fail by dropping the key-value table
/// behind the store's back
pub async fn drop_kv_table(temp_dir: &TempDir) -> Result<()> {
    let url = format!("sqlite:{}", db_path(temp_dir).display());
    let pool = sqlx::SqlitePool::connect(&url).await?;
    sqlx::query("DROP TABLE kv_store").execute(&pool).await?;
    pool.close().await;
    Ok(())
}
