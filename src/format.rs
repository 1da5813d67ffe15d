//! Display formatting for prices, ratios and percentages
//!
//! Formatting never fails: anything that cannot be shown as a price is
//! shown as `$0.00`.

use crate::Money;

/// Rendered for NaN, missing or negative amounts
pub const ZERO_PRICE: &str = "$0.00";

/// Format a price as `$x.xx`.
///
/// NaN, infinite and negative values render as [`ZERO_PRICE`].
pub fn format_price(value: f64) -> String {
    if value.is_nan() || value < 0.0 {
        return ZERO_PRICE.to_string();
    }
    format_money(Money::from_f64(value))
}

/// Same as [`format_price`], treating a missing value as zero
pub fn format_optional_price(value: Option<f64>) -> String {
    value.map_or_else(|| ZERO_PRICE.to_string(), format_price)
}

/// Format a decimal amount as `$x.xx`, rounding halves away from zero
pub fn format_money(value: Money) -> String {
    if value.is_negative() {
        return ZERO_PRICE.to_string();
    }
    format!("${:.2}", value.round_dp(2).inner())
}

/// Two-decimal ratio, e.g. `2.67`
pub fn format_ratio(ratio: f64) -> String {
    if !ratio.is_finite() {
        return "n/a".to_string();
    }
    format!("{:.2}", ratio)
}

/// Percentage with a fixed number of decimals, e.g. `72.73%`
pub fn format_percent(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    format!("{:.*}%", decimals, value)
}

/// Integer percentage with an explicit sign, e.g. `+48%` or `-12%`
pub fn format_signed_percent(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    let rounded = value.round();
    // -0.4 rounds to -0.0, which would print as "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:+.0}%", rounded)
}

/// Signed percentage-point difference, e.g. `+12.27 pts`
pub fn format_points(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    format!("{:+.2} pts", value)
}

/// Percentage as the user typed it: `75`, `62.5`
pub fn format_plain_percent(value: f64) -> String {
    format!("{}%", value)
}
