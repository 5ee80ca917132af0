mod common;

use anyhow::Result;
use common::{drop_kv_table, raw_repository, reopen, test_store};
use tally::application::{CLEAR_ALL_PROMPT, LedgerStore};
use tally::domain::{Category, Entry, EntryId};
use tempfile::TempDir;

#[tokio::test]
async fn test_round_trip_through_storage() -> Result<()> {
    let (mut store, temp) = test_store().await?;
    store.add_entry(Category::Income, "Salary", "1000").await?;
    store.add_entry(Category::Income, "Bonus", "200.5").await?;
    store.add_entry(Category::Expense, "Rent", "500").await?;

    let income = store.income_entries().to_vec();
    let expense = store.expense_entries().to_vec();
    drop(store);

    let reloaded = reopen(&temp).await?;
    assert_eq!(reloaded.income_entries(), income.as_slice());
    assert_eq!(reloaded.expense_entries(), expense.as_slice());
    assert_eq!(reloaded.totals().net, 700.5);

    Ok(())
}

#[tokio::test]
async fn test_every_mutation_writes_snapshot() -> Result<()> {
    let (mut store, _temp) = test_store().await?;

    let entry = store
        .add_entry(Category::Expense, "Rent", "500")
        .await?
        .unwrap();
    let raw = store.repository().get_item("expenseItems").await?.unwrap();
    let stored: Vec<Entry> = serde_json::from_str(&raw)?;
    assert_eq!(stored, vec![entry.clone()]);

    store.remove_entry(Category::Expense, entry.id).await?;
    let raw = store.repository().get_item("expenseItems").await?;
    assert_eq!(raw.as_deref(), Some("[]"));

    // Untouched category was never written
    assert_eq!(store.repository().get_item("incomeItems").await?, None);

    Ok(())
}

#[tokio::test]
async fn test_missing_keys_load_empty() -> Result<()> {
    let (store, _temp) = test_store().await?;

    assert!(store.income_entries().is_empty());
    assert!(store.expense_entries().is_empty());
    assert_eq!(store.totals().net, 0.0);

    Ok(())
}

#[tokio::test]
async fn test_corrupt_income_snapshot_loads_empty() -> Result<()> {
    let temp = TempDir::new()?;
    let repo = raw_repository(&temp).await?;
    repo.set_item("incomeItems", "this is not json").await?;
    repo.set_item(
        "expenseItems",
        r#"[{"id":1700000000000,"description":"Rent","amount":500}]"#,
    )
    .await?;

    let store = LedgerStore::load(repo).await?;

    assert!(store.income_entries().is_empty());
    assert_eq!(
        store.expense_entries(),
        &[Entry::new(1700000000000, "Rent", 500.0)]
    );

    Ok(())
}

#[tokio::test]
async fn test_schema_mismatch_loads_empty() -> Result<()> {
    for raw in [r#"{"a":1}"#, "null", r#"[{"id":"x"}]"#, "42"] {
        let temp = TempDir::new()?;
        let repo = raw_repository(&temp).await?;
        repo.set_item("expenseItems", raw).await?;

        let store = LedgerStore::load(repo).await?;
        assert!(store.expense_entries().is_empty(), "{} should load empty", raw);
    }

    Ok(())
}

#[tokio::test]
async fn test_new_ids_follow_loaded_ids() -> Result<()> {
    let temp = TempDir::new()?;
    let repo = raw_repository(&temp).await?;
    // An id far in the future must not be reissued
    let future = 32503680000000_i64;
    repo.set_item(
        "incomeItems",
        &format!(r#"[{{"id":{},"description":"Later","amount":1}}]"#, future),
    )
    .await?;

    let mut store = LedgerStore::load(repo).await?;
    let entry = store
        .add_entry(Category::Expense, "Now", "1")
        .await?
        .unwrap();

    assert!(entry.id > future);

    Ok(())
}

#[tokio::test]
async fn test_clear_all_removes_keys() -> Result<()> {
    let (mut store, temp) = test_store().await?;
    store.add_entry(Category::Income, "Salary", "1000").await?;
    store.add_entry(Category::Expense, "Rent", "500").await?;

    let mut shown_prompt = String::new();
    let cleared = store
        .clear_all(|prompt| {
            shown_prompt = prompt.to_string();
            true
        })
        .await?;

    assert!(cleared);
    assert_eq!(shown_prompt, CLEAR_ALL_PROMPT);
    assert!(store.income_entries().is_empty());
    assert!(store.expense_entries().is_empty());

    // Keys are gone, not present-with-empty-list
    assert_eq!(store.repository().get_item("incomeItems").await?, None);
    assert_eq!(store.repository().get_item("expenseItems").await?, None);
    assert!(store.repository().keys().await?.is_empty());
    drop(store);

    let reloaded = reopen(&temp).await?;
    assert!(reloaded.income_entries().is_empty());
    assert!(reloaded.expense_entries().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_declined_clear_changes_nothing() -> Result<()> {
    let (mut store, _temp) = test_store().await?;
    store.add_entry(Category::Income, "Salary", "1000").await?;

    let cleared = store.clear_all(|_| false).await?;

    assert!(!cleared);
    assert_eq!(store.income_entries().len(), 1);
    assert!(store.repository().get_item("incomeItems").await?.is_some());

    Ok(())
}

#[tokio::test]
async fn test_loads_browser_written_snapshot() -> Result<()> {
    let temp = TempDir::new()?;
    let repo = raw_repository(&temp).await?;
    repo.set_item(
        "incomeItems",
        r#"[{"id":1700000000000,"description":"Salary","amount":1000},{"id":1700000000500,"description":"Bonus","amount":200}]"#,
    )
    .await?;

    let store = LedgerStore::load(repo).await?;

    assert_eq!(store.income_entries().len(), 2);
    assert_eq!(store.totals().income, 1200.0);

    Ok(())
}

#[tokio::test]
async fn test_failed_write_leaves_memory_unchanged() -> Result<()> {
    let (mut store, temp) = test_store().await?;
    let salary = store
        .add_entry(Category::Income, "Salary", "1000")
        .await?
        .unwrap();
    store.add_entry(Category::Expense, "Rent", "500").await?;
    let income = store.income_entries().to_vec();
    let expense = store.expense_entries().to_vec();

    drop_kv_table(&temp).await?;

    assert!(store.add_entry(Category::Income, "Bonus", "200").await.is_err());
    assert!(store.remove_entry(Category::Income, salary.id).await.is_err());
    assert!(store.clear_all(|_| true).await.is_err());

    assert_eq!(store.income_entries(), income.as_slice());
    assert_eq!(store.expense_entries(), expense.as_slice());
    assert_eq!(store.totals().net, 500.0);

    Ok(())
}

#[tokio::test]
async fn test_max_id_snapshot_does_not_break_adds() -> Result<()> {
    let temp = TempDir::new()?;
    let repo = raw_repository(&temp).await?;
    repo.set_item(
        "incomeItems",
        &format!(r#"[{{"id":{},"description":"X","amount":1}}]"#, EntryId::MAX),
    )
    .await?;

    let mut store = LedgerStore::load(repo).await?;
    let first = store
        .add_entry(Category::Income, "Salary", "1000")
        .await?
        .unwrap();
    let second = store
        .add_entry(Category::Expense, "Rent", "500")
        .await?
        .unwrap();

    let ids = [EntryId::MAX, first.id, second.id];
    assert!(ids[0] != ids[1] && ids[0] != ids[2] && ids[1] != ids[2]);
    assert_eq!(store.income_entries().len(), 2);
    assert_eq!(store.totals().net, 501.0);

    Ok(())
}
