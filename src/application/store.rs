use tracing::{debug, info, warn};

use crate::domain::{
    compute_totals, parse_entry_input, Category, Entry, EntryId, IdGenerator, Totals,
};
use crate::storage::Repository;

use super::AppError;

/// Prompt shown before wiping every entry.
pub const CLEAR_ALL_PROMPT: &str =
    "Are you sure you want to clear all data? This action cannot be undone.";

/// In-memory income and expense entries mirrored to durable storage.
///
/// Every mutation writes the affected category's full snapshot first and only
/// then updates memory, so a failed write leaves both sides unchanged.
pub struct LedgerStore {
    repo: Repository,
    income: Vec<Entry>,
    expense: Vec<Entry>,
    ids: IdGenerator,
}

impl LedgerStore {
    /// Open (or create) the database at the given path and load the ledger.
    pub async fn open(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Self::load(repo).await
    }

    /// Rehydrate both categories from storage.
    ///
    /// A missing key yields an empty list. A value that does not decode as a
    /// list of entries is logged and also yields an empty list.
    pub async fn load(repo: Repository) -> Result<Self, AppError> {
        let income = load_category(&repo, Category::Income).await?;
        let expense = load_category(&repo, Category::Expense).await?;
        let ids = IdGenerator::seeded(income.iter().chain(expense.iter()));

        Ok(Self {
            repo,
            income,
            expense,
            ids,
        })
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    pub fn entries(&self, category: Category) -> &[Entry] {
        match category {
            Category::Income => &self.income,
            Category::Expense => &self.expense,
        }
    }

    pub fn income_entries(&self) -> &[Entry] {
        &self.income
    }

    pub fn expense_entries(&self) -> &[Entry] {
        &self.expense
    }

    /// Current totals, computed from scratch.
    pub fn totals(&self) -> Totals {
        compute_totals(&self.income, &self.expense)
    }

    /// Add an entry from raw form input.
    ///
    /// Invalid input (blank description, non-numeric or non-positive amount)
    /// is silently rejected: `Ok(None)`, nothing changes and nothing is written.
    pub async fn add_entry(
        &mut self,
        category: Category,
        description: &str,
        amount_text: &str,
    ) -> Result<Option<Entry>, AppError> {
        let Some(input) = parse_entry_input(description, amount_text) else {
            debug!(%category, "rejected invalid entry input");
            return Ok(None);
        };

        let (income, expense) = (&self.income, &self.expense);
        let id = self
            .ids
            .next_id(|id| income.iter().chain(expense).any(|e| e.id == id));
        let entry = Entry::new(id, input.description, input.amount);

        let mut updated = self.entries(category).to_vec();
        updated.push(entry.clone());
        self.persist(category, &updated).await?;
        *self.entries_mut(category) = updated;

        debug!(%category, id = entry.id, amount = entry.amount, "added entry");
        Ok(Some(entry))
    }

    /// Remove the entry with the given id. Returns whether one was removed;
    /// an unknown id is not an error.
    pub async fn remove_entry(&mut self, category: Category, id: EntryId) -> Result<bool, AppError> {
        let current = self.entries(category);
        let updated: Vec<Entry> = current.iter().filter(|e| e.id != id).cloned().collect();
        let removed = updated.len() != current.len();

        self.persist(category, &updated).await?;
        *self.entries_mut(category) = updated;

        debug!(%category, id, removed, "remove entry");
        Ok(removed)
    }

    /// Wipe both categories after `confirm` approves `CLEAR_ALL_PROMPT`.
    ///
    /// Both storage keys are deleted, not overwritten with empty lists.
    /// Returns `Ok(false)` without touching anything when declined.
    pub async fn clear_all<F>(&mut self, confirm: F) -> Result<bool, AppError>
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(CLEAR_ALL_PROMPT) {
            debug!("clear all declined");
            return Ok(false);
        }

        let keys = Category::ALL.map(|c| c.storage_key());
        self.repo.remove_items(&keys).await?;
        self.income.clear();
        self.expense.clear();

        info!("cleared all ledger data");
        Ok(true)
    }

    fn entries_mut(&mut self, category: Category) -> &mut Vec<Entry> {
        match category {
            Category::Income => &mut self.income,
            Category::Expense => &mut self.expense,
        }
    }

    /// Write the full snapshot of one category.
    async fn persist(&self, category: Category, entries: &[Entry]) -> Result<(), AppError> {
        let json = serde_json::to_string(entries)?;
        self.repo.set_item(category.storage_key(), &json).await?;
        debug!(%category, count = entries.len(), "persisted snapshot");
        Ok(())
    }
}

async fn load_category(repo: &Repository, category: Category) -> Result<Vec<Entry>, AppError> {
    let key = category.storage_key();
    let Some(raw) = repo.get_item(key).await? else {
        return Ok(Vec::new());
    };

    match serde_json::from_str::<Vec<Entry>>(&raw) {
        Ok(entries) => {
            debug!(key, count = entries.len(), "loaded snapshot");
            Ok(entries)
        }
        Err(e) => {
            warn!(key, error = %e, "error loading {} items, starting empty", category);
            Ok(Vec::new())
        }
    }
}
