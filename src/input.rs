//! Input coercion boundary
//!
//! Raw form text becomes [`SpreadInputs`] here, and only here. Unparsable
//! or missing text falls back to the field default, and so does an exact
//! zero: a take-profit of `0` would otherwise divide by zero in the
//! ratio and win-rate formulas, and the same falsy-zero rule is applied
//! to every field. Values beyond the range a [`Money`] amount can hold
//! count as unparsable.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::{
    Money, SpreadInputs, DEFAULT_BUY_PRICE, DEFAULT_SELL_PRICE, DEFAULT_STOP_LOSS_PERCENT,
    DEFAULT_TAKE_PROFIT_PERCENT,
};

/// The four form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Sell,
    Buy,
    #[serde(rename = "tp")]
    TakeProfit,
    #[serde(rename = "sl")]
    StopLoss,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Sell, Field::Buy, Field::TakeProfit, Field::StopLoss];

    /// Query parameter name
    pub fn key(self) -> &'static str {
        match self {
            Field::Sell => "sell",
            Field::Buy => "buy",
            Field::TakeProfit => "tp",
            Field::StopLoss => "sl",
        }
    }

    /// Value used when the raw text is missing, unparsable or zero
    pub fn default_value(self) -> f64 {
        match self {
            Field::Sell => DEFAULT_SELL_PRICE,
            Field::Buy => DEFAULT_BUY_PRICE,
            Field::TakeProfit => DEFAULT_TAKE_PROFIT_PERCENT,
            Field::StopLoss => DEFAULT_STOP_LOSS_PERCENT,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "sell" | "sellPrice" => Ok(Field::Sell),
            "buy" | "buyPrice" => Ok(Field::Buy),
            "tp" | "takeProfitPercent" => Ok(Field::TakeProfit),
            "sl" | "stopLossPercent" => Ok(Field::StopLoss),
            other => Err(CalcError::UnknownField(other.to_string())),
        }
    }
}

/// Parse the leading number of `raw`, ignoring any trailing text.
///
/// `" 2.5"`, `"2.5abc"`, `".5"` and `"1e2"` all parse; `""`, `"abc"` and
/// values that overflow to infinity do not.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut digit_count = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        digit_count += frac_end - (end + 1);
        end = frac_end;
    }
    if digit_count == 0 {
        return None;
    }

    // Exponent only counts when it has digits
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

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Coerce raw text for `field`, applying the default on a failed parse,
/// an out-of-range magnitude or zero
pub fn coerce(field: Field, raw: Option<&str>) -> f64 {
    match raw.and_then(parse_number) {
        Some(value) if value != 0.0 && Money::is_representable(value) => value,
        _ => field.default_value(),
    }
}

impl SpreadInputs {
    /// Build inputs from raw text, one optional string per field
    pub fn from_raw(
        sell: Option<&str>,
        buy: Option<&str>,
        take_profit: Option<&str>,
        stop_loss: Option<&str>,
    ) -> Self {
        SpreadInputs {
            sell_price: coerce(Field::Sell, sell),
            buy_price: coerce(Field::Buy, buy),
            take_profit_percent: coerce(Field::TakeProfit, take_profit),
            stop_loss_percent: coerce(Field::StopLoss, stop_loss),
        }
    }
}

/// Raw text of the four form fields, exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    values: HashMap<Field, String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-populated from a query string such as `?sell=2&buy=0.5`
    pub fn from_query(query: &str) -> Self {
        let mut form = Self::new();
        form.apply_query(query);
        form
    }

    /// Restore the fields present in `query`; absent ones keep their value.
    ///
    /// Unknown keys are ignored. A repeated key uses its first occurrence.
    pub fn apply_query(&mut self, query: &str) {
        let query = query.trim().trim_start_matches('?');
        let mut seen = Vec::with_capacity(Field::ALL.len());
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let Some(field) = Field::ALL.iter().copied().find(|f| f.key() == key) else {
                continue;
            };
            if seen.contains(&field) {
                continue;
            }
            seen.push(field);
            self.set(field, value.into_owned());
        }
    }

    /// Query string for the fields that have a value, in form order
    pub fn to_query(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for field in Field::ALL {
            if let Some(value) = self.get(field) {
                serializer.append_pair(field.key(), value);
            }
        }
        serializer.finish()
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Coerce the current text into calculator inputs
    pub fn to_inputs(&self) -> SpreadInputs {
        SpreadInputs::from_raw(
            self.get(Field::Sell),
            self.get(Field::Buy),
            self.get(Field::TakeProfit),
            self.get(Field::StopLoss),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_leading_prefix() {
        assert_eq!(parse_number("2.5"), Some(2.5));
        assert_eq!(parse_number("  2.5"), Some(2.5));
        assert_eq!(parse_number("2.5abc"), Some(2.5));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("5."), Some(5.0));
        assert_eq!(parse_number("-1.25"), Some(-1.25));
        assert_eq!(parse_number("+3"), Some(3.0));
        assert_eq!(parse_number("1e2"), Some(100.0));
        assert_eq!(parse_number("1e"), Some(1.0));
        assert_eq!(parse_number("1.5e-1x"), Some(0.15));
    }

    #[test]
    fn test_parse_number_rejects_garbage() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("."), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("1e999"), None);
    }

    #[test]
    fn test_coerce_defaults() {
        assert_eq!(coerce(Field::TakeProfit, None), 75.0);
        assert_eq!(coerce(Field::TakeProfit, Some("abc")), 75.0);
        assert_eq!(coerce(Field::StopLoss, Some("")), 200.0);
        assert_eq!(coerce(Field::Sell, Some("x")), 0.0);
        assert_eq!(coerce(Field::TakeProfit, Some("50")), 50.0);
    }

    #[test]
    fn test_zero_take_profit_falls_back_to_default() {
        assert_eq!(coerce(Field::TakeProfit, Some("0")), 75.0);
        assert_eq!(coerce(Field::TakeProfit, Some("-0")), 75.0);
        assert_eq!(coerce(Field::StopLoss, Some("0.0")), 200.0);
    }

    #[test]
    fn test_out_of_range_magnitude_falls_back_to_default() {
        assert_eq!(coerce(Field::Sell, Some("1e30")), 0.0);
        assert_eq!(coerce(Field::Buy, Some("-1e30")), 0.0);
        assert_eq!(coerce(Field::StopLoss, Some("1e29")), 200.0);
        // Large but representable values are kept
        assert_eq!(coerce(Field::Sell, Some("5e28")), 5e28);
        assert_eq!(coerce(Field::StopLoss, Some("1e15")), 1e15);
    }

    #[test]
    fn test_negative_values_are_kept() {
        assert_eq!(coerce(Field::StopLoss, Some("-50")), -50.0);
        assert_eq!(coerce(Field::Buy, Some("-1")), -1.0);
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("tp".parse::<Field>().unwrap(), Field::TakeProfit);
        assert_eq!("stopLossPercent".parse::<Field>().unwrap(), Field::StopLoss);
        assert!(matches!(
            "delta".parse::<Field>(),
            Err(CalcError::UnknownField(name)) if name == "delta"
        ));
    }

    #[test]
    fn test_form_from_query() {
        let form = FormState::from_query("?sell=2.00&buy=0.5&tp=75&sl=200&theme=dark");
        assert_eq!(form.get(Field::Sell), Some("2.00"));
        assert_eq!(form.to_inputs(), SpreadInputs::new(2.0, 0.5, 75.0, 200.0));
    }

    #[test]
    fn test_query_keeps_absent_fields() {
        let mut form = FormState::new();
        form.set(Field::TakeProfit, "50");
        form.apply_query("sell=3&sell=9");
        assert_eq!(form.get(Field::Sell), Some("3"));
        assert_eq!(form.get(Field::TakeProfit), Some("50"));
        assert_eq!(form.get(Field::Buy), None);
        assert_eq!(form.to_inputs(), SpreadInputs::new(3.0, 0.0, 50.0, 200.0));
    }

    #[test]
    fn test_query_round_trip_order() {
        let form = FormState::from_query("sl=300&sell=1.2");
        assert_eq!(form.to_query(), "sell=1.2&sl=300");
    }
}
