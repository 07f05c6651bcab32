// input.rs
// Lenient parsing of locale-formatted amounts typed into the forms.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Parses a grouped amount such as `1.200.000` or `150,000`.
///
/// Grouping characters and whitespace are stripped, then the leading run of
/// digits is read. Anything unparseable, empty or negative yields zero.
pub fn parse_amount(raw: &str) -> Decimal {
    let digits: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '.' | ',') && !c.is_whitespace())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&digits).unwrap_or(Decimal::ZERO)
}

/// Whole-unit amount with `.` thousands separators, as the amount inputs show it.
pub fn format_grouped(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

pub fn clean_opt(input: Option<String>) -> Option<String> {
    input.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Even-split preview shown while the form is being filled in.
pub fn preview_monthly_amount(raw_amount: &str, months: Option<u32>) -> Decimal {
    let months = months.filter(|m| *m > 0).unwrap_or(1);
    parse_amount(raw_amount) / Decimal::from(months)
}
