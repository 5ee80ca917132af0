use crate::application::{AppError, LedgerStore};
use crate::domain::{Category, Entry};

/// The two input fields for adding an entry to one category.
///
/// Fields are reset only after a successful submit; rejected input stays
/// as typed so it can be corrected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    pub description: String,
    pub amount: String,
}

impl EntryForm {
    pub fn new(description: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
        }
    }

    pub fn clear(&mut self) {
        self.description.clear();
        self.amount.clear();
    }

    /// Submit the form to the store.
    pub async fn submit(
        &mut self,
        store: &mut LedgerStore,
        category: Category,
    ) -> Result<Option<Entry>, AppError> {
        let added = store
            .add_entry(category, &self.description, &self.amount)
            .await?;
        if added.is_some() {
            self.clear();
        }
        Ok(added)
    }
}
