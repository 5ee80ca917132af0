use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Entry ids are creation timestamps in milliseconds since the Unix epoch.
pub type EntryId = i64;

/// Which side of the ledger an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Money coming in (salary, bonus, refunds)
    Income,
    /// Money going out (rent, groceries, bills)
    Expense,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Income, Category::Expense];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Income => "income",
            Category::Expense => "expense",
        }
    }

    /// Key under which this category's snapshot lives in durable storage.
    pub fn storage_key(&self) -> &'static str {
        match self {
            Category::Income => "incomeItems",
            Category::Expense => "expenseItems",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" => Some(Category::Income),
            "expense" | "expenses" => Some(Category::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_str(s).ok_or_else(|| format!("unknown category: {}", s))
    }
}

/// A single income or expense line item.
/// Entries are immutable: they are only ever created or removed, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    /// Trimmed, non-empty description
    pub description: String,
    /// Strictly positive amount
    pub amount: f64,
}

impl Entry {
    pub fn new(id: EntryId, description: impl Into<String>, amount: f64) -> Self {
        Self {
            id,
            description: description.into(),
            amount,
        }
    }
}

/// Issues time-based entry ids.
///
/// Ids are the current time in milliseconds, bumped past the last issued id
/// when the clock has not advanced, so two entries created within the same
/// millisecond (or after the clock stepped back) still get distinct ids.
/// Once the last id reaches `EntryId::MAX` there is nothing left above it, so
/// the generator walks down from the clock to the first id not in use.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: EntryId,
}

impl IdGenerator {
    /// Seed the generator so it never reissues any of the given ids.
    pub fn seeded<'a>(existing: impl IntoIterator<Item = &'a Entry>) -> Self {
        let last = existing.into_iter().map(|e| e.id).max().unwrap_or(0);
        Self { last }
    }

    /// Issue the next id. `in_use` is only consulted when the id range above
    /// the last issued id is exhausted.
    pub fn next_id(&mut self, in_use: impl Fn(EntryId) -> bool) -> EntryId {
        self.next_id_at(Utc::now().timestamp_millis(), in_use)
    }

    fn next_id_at(&mut self, now_millis: EntryId, in_use: impl Fn(EntryId) -> bool) -> EntryId {
        match self.last.checked_add(1) {
            Some(next) => {
                let id = now_millis.max(next);
                self.last = id;
                id
            }
            None => {
                let mut id = now_millis;
                while in_use(id) {
                    id = id.wrapping_sub(1);
                }
                id
            }
        }
    }
}
