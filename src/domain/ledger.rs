use super::Entry;

/// Derived totals for the whole ledger.
/// Always recomputed from the current entries, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub net: f64,
}

impl Totals {
    /// True when income covers expenses.
    pub fn is_surplus(&self) -> bool {
        self.net >= 0.0
    }
}

/// Sum of amounts for a list of entries.
pub fn compute_total(entries: &[Entry]) -> f64 {
    entries.iter().map(|e| e.amount).sum()
}

/// Compute income, expense and net totals.
/// Net = total income - total expense
pub fn compute_totals(income: &[Entry], expense: &[Entry]) -> Totals {
    let income = compute_total(income);
    let expense = compute_total(expense);
    Totals {
        income,
        expense,
        net: income - expense,
    }
}
