use std::fmt;

/// Parse user-typed amount text into a number.
/// Example: "50.00" -> 50.0, "12.5" -> 12.5, " 100 " -> 100.0
///
/// Reads the longest leading decimal number and ignores whatever follows,
/// so "10 USD" -> 10.0 and "1,000" -> 1.0. Only finite values are accepted;
/// "Infinity", "NaN" and overflowing exponents are rejected.
/// Sign is preserved, positivity is checked by the entry validator.
pub fn parse_amount(input: &str) -> Result<f64, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    let number = leading_number(input);
    if number.is_empty() {
        return Err(ParseAmountError::InvalidFormat);
    }

    let value: f64 = number
        .parse()
        .map_err(|_| ParseAmountError::InvalidFormat)?;
    if !value.is_finite() {
        return Err(ParseAmountError::NotFinite);
    }
    Ok(value)
}

/// The longest prefix of `input` shaped like `[+-]digits[.digits][e[+-]digits]`.
/// Empty if there is no digit before the exponent.
fn leading_number(input: &str) -> &str {
    let bytes = input.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        let frac_digits = frac_end - (end + 1);
        if mantissa_digits + frac_digits > 0 {
            mantissa_digits += frac_digits;
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_start = end + 1;
        if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    &input[..end]
}

/// Format an amount as a dollar string with two decimals.
/// Example: 1200.0 -> "$1200.00", -50.5 -> "-$50.50"
pub fn format_amount(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    // Tiny negatives round to -0.0, and -0.0 < 0.0 is false, so no "-$0.00"
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}${:.2}", sign, rounded.abs())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat,
    NotFinite,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "amount is empty"),
            ParseAmountError::InvalidFormat => write!(f, "invalid amount format"),
            ParseAmountError::NotFinite => write!(f, "amount is not a finite number"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
