use super::parse_amount;

/// Validated add-entry input: trimmed description plus parsed amount.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryInput {
    pub description: String,
    pub amount: f64,
}

/// Validate raw form input for a new entry.
/// Returns `None` when the description is blank or the amount is not a
/// finite number strictly greater than zero.
pub fn parse_entry_input(description: &str, amount_text: &str) -> Option<EntryInput> {
    let description = description.trim();
    if description.is_empty() {
        return None;
    }

    let amount = parse_amount(amount_text).ok()?;
    if amount <= 0.0 {
        return None;
    }

    Some(EntryInput {
        description: description.to_string(),
        amount,
    })
}

/// True if `parse_entry_input` would accept this input.
pub fn is_valid_entry_input(description: &str, amount_text: &str) -> bool {
    parse_entry_input(description, amount_text).is_some()
}
