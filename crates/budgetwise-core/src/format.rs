//! Number formatting for user-facing text

use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount with thousands separators and at most three fraction
/// digits, trailing zeros dropped (`12500` -> `12,500`, `1234.5` -> `1,234.5`)
pub fn format_amount(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    if rounded.is_zero() {
        return "0".to_string();
    }

    let text = rounded.abs().to_string();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3 + 2);
    if rounded.is_sign_negative() {
        grouped.push('-');
    }
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

/// Format a percentage with exactly one fraction digit (`91` -> `91.0`)
pub fn format_percent(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(1);
    if rounded.is_zero() {
        return "0.0".to_string();
    }
    rounded.to_string()
}

/// Format an amount prefixed with a currency label (`PKR 12,500`)
pub fn format_money(currency: &str, value: Decimal) -> String {
    format!("{} {}", currency, format_amount(value))
}
