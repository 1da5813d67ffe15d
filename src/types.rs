//! Core value types shared by the calculator pipeline
//!
//! Every record here is an immutable snapshot rebuilt from the current
//! form inputs on each recomputation; nothing is persisted or mutated in
//! place.

use serde::{Deserialize, Serialize};

// ============================================================================
// Money Type - Precise Decimal Arithmetic for Option Prices
// ============================================================================

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::ops::{Mul, Neg, Sub};

/// Money type for option premiums and trigger prices.
///
/// Wraps `rust_decimal::Decimal` so that `1.5 * 0.25` is exactly `0.375`
/// and rounds to `$0.38`, instead of depending on the binary expansion of
/// an `f64`.
///
/// # Example
/// ```
/// use credit_spread_calculator::Money;
/// let credit = Money::from_f64(2.0) - Money::from_f64(0.5);
/// assert_eq!(credit.scale(0.25).to_f64(), 0.375);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(#[serde(with = "rust_decimal::serde::str")] Decimal);

impl Money {
    /// Zero value
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Largest representable amount; overflowing results saturate here
    pub const MAX: Money = Money(Decimal::MAX);

    /// Most negative representable amount
    pub const MIN: Money = Money(Decimal::MIN);

    /// `Decimal::MAX` as an f64, rounded down
    const MAX_F64: f64 = 7.922_816_251_426_433e28;

    /// True for finite values inside the `Decimal` range
    pub fn is_representable(value: f64) -> bool {
        value.is_finite() && value.abs() <= Self::MAX_F64
    }

    /// Create from f64. NaN and infinities become zero; finite values
    /// beyond the `Decimal` range saturate to [`Money::MAX`] / [`Money::MIN`].
    pub fn from_f64(value: f64) -> Self {
        if !value.is_finite() {
            return Money::ZERO;
        }
        if !Self::is_representable(value) {
            return Self::saturated(value > 0.0);
        }
        Money(Decimal::try_from(value).unwrap_or_else(|_| {
            Decimal::from_f64_retain(value).unwrap_or(Decimal::ZERO)
        }))
    }

    fn saturated(positive: bool) -> Self {
        if positive {
            Money::MAX
        } else {
            Money::MIN
        }
    }

    /// Create from a decimal value
    pub const fn from_decimal(value: Decimal) -> Self {
        Money(value)
    }

    /// Convert to f64
    pub fn to_f64(self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    /// Multiply by a dimensionless factor such as `1 - tp/100`
    pub fn scale(self, factor: f64) -> Self {
        self * Money::from_f64(factor)
    }

    /// Percentage of this amount, e.g. `credit.percent(75.0)`
    pub fn percent(self, pct: f64) -> Self {
        let fraction = Money::from_f64(pct)
            .0
            .checked_div(Decimal::ONE_HUNDRED)
            .unwrap_or(Decimal::ZERO);
        self * Money(fraction)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Strictly below zero (a negative zero does not count)
    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// Round to `dp` places, halves away from zero
    pub fn round_dp(self, dp: u32) -> Self {
        Money(
            self.0
                .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Get the underlying Decimal
    pub fn inner(self) -> Decimal {
        self.0
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        match self.0.checked_sub(rhs.0) {
            Some(value) => Money(value),
            None => Money::saturated(self.0 > rhs.0),
        }
    }
}

impl Mul for Money {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        match self.0.checked_mul(rhs.0) {
            Some(value) => Money(value),
            None => Money::saturated(self.0.is_sign_negative() == rhs.0.is_sign_negative()),
        }
    }
}

impl Neg for Money {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl From<f64> for Money {
    fn from(value: f64) -> Self {
        Money::from_f64(value)
    }
}

impl From<Money> for f64 {
    fn from(value: Money) -> Self {
        value.to_f64()
    }
}

// ============================================================================
// Spread Inputs and Results
// ============================================================================

/// Default sell (short leg) price
pub const DEFAULT_SELL_PRICE: f64 = 0.0;
/// Default buy (long leg) price
pub const DEFAULT_BUY_PRICE: f64 = 0.0;
/// Default take-profit, as a percentage of the net credit
pub const DEFAULT_TAKE_PROFIT_PERCENT: f64 = 75.0;
/// Default stop-loss, as a percentage of the net credit
pub const DEFAULT_STOP_LOSS_PERCENT: f64 = 200.0;

/// The four numbers the form supplies, already coerced to their defaults.
///
/// `take_profit_percent` is never zero once it has passed through the
/// input boundary (see [`crate::input`]), which keeps the ratio and
/// win-rate formulas free of a division by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadInputs {
    pub sell_price: f64,
    pub buy_price: f64,
    pub take_profit_percent: f64,
    pub stop_loss_percent: f64,
}

impl Default for SpreadInputs {
    fn default() -> Self {
        SpreadInputs {
            sell_price: DEFAULT_SELL_PRICE,
            buy_price: DEFAULT_BUY_PRICE,
            take_profit_percent: DEFAULT_TAKE_PROFIT_PERCENT,
            stop_loss_percent: DEFAULT_STOP_LOSS_PERCENT,
        }
    }
}

impl SpreadInputs {
    pub fn new(
        sell_price: f64,
        buy_price: f64,
        take_profit_percent: f64,
        stop_loss_percent: f64,
    ) -> Self {
        SpreadInputs {
            sell_price,
            buy_price,
            take_profit_percent,
            stop_loss_percent,
        }
    }
}

/// Everything derived from one [`SpreadInputs`] snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadResult {
    /// Sell price minus buy price. Negative for a net debit; never clamped.
    pub net_credit: Money,
    pub profit_amount: Money,
    pub loss_amount: Money,
    /// Buy back the short leg at or below this price
    pub short_take_profit_price: Money,
    /// Buy back the short leg at or above this price
    pub short_stop_loss_price: Money,
    pub long_take_profit_price: Money,
    pub long_stop_loss_price: Money,
    /// stop-loss % / take-profit %
    pub risk_reward_ratio: f64,
    /// Break-even win rate in percent
    pub required_win_rate: f64,
}

// ============================================================================
// Delta Advisory
// ============================================================================

/// One row of the static delta lookup table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeltaTableEntry {
    /// Short strike delta, in (0, 1]
    pub delta: f64,
    /// Approximate probability (percent) that the short strike expires worthless
    pub win_rate_threshold: f64,
    pub label: &'static str,
    pub description: &'static str,
}

/// Delta suggestion for a given break-even win rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeltaRecommendation {
    pub delta: f64,
    pub label: String,
    pub win_rate_threshold: f64,
    /// Threshold minus required win rate. Negative means the suggested
    /// delta cannot cover the required win rate.
    pub margin_percentage_points: f64,
    pub description: String,
    /// True when no table entry satisfied the safety margin
    pub is_fallback: bool,
}

// ============================================================================
// Comparison Table
// ============================================================================

/// A fixed (take-profit %, stop-loss %) pair shown in the reference table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonPreset {
    pub take_profit_percent: f64,
    pub stop_loss_percent: f64,
}

impl ComparisonPreset {
    pub const fn new(take_profit_percent: f64, stop_loss_percent: f64) -> Self {
        ComparisonPreset {
            take_profit_percent,
            stop_loss_percent,
        }
    }
}

/// One evaluated preset, with both raw numbers and display text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub preset: ComparisonPreset,
    pub ratio: f64,
    pub required_win_rate: f64,
    /// Expected value (percent of credit) at a 90% win rate
    pub expected_value_90: f64,
    /// Expected value (percent of credit) at an 85% win rate
    pub expected_value_85: f64,
    /// Exactly equal to the caller's current (tp, sl)
    pub is_current: bool,
    pub label: String,
    pub ratio_text: String,
    pub required_win_rate_text: String,
    pub expected_value_90_text: String,
    pub expected_value_85_text: String,
}

#[cfg(test)]
mod money_tests {
    use super::*;

    #[test]
    fn test_money_exact_quarter_of_credit() {
        let credit = Money::from_f64(2.0) - Money::from_f64(0.5);
        assert_eq!(credit.scale(0.25), Money::from_f64(0.375));
    }

    #[test]
    fn test_money_non_finite_is_zero() {
        assert_eq!(Money::from_f64(f64::NAN), Money::ZERO);
        assert_eq!(Money::from_f64(f64::INFINITY), Money::ZERO);
    }

    #[test]
    fn test_money_out_of_range_saturates() {
        assert!(Money::is_representable(5e28));
        assert!(!Money::is_representable(1e30));
        assert!(!Money::is_representable(f64::NAN));
        assert_eq!(Money::from_f64(1e30), Money::MAX);
        assert_eq!(Money::from_f64(-1e30), Money::MIN);
    }

    #[test]
    fn test_money_overflow_saturates() {
        let big = Money::from_f64(5e28);
        assert_eq!(big - (-big), Money::MAX);
        assert_eq!((-big) - big, Money::MIN);
        assert_eq!(big * big, Money::MAX);
        assert_eq!(big * (-big), Money::MIN);
        assert_eq!(Money::from_f64(1e20).percent(1e15), Money::MAX);
        // In-range arithmetic is unchanged
        assert_eq!(big - big, Money::ZERO);
    }

    #[test]
    fn test_money_round_half_away_from_zero() {
        assert_eq!(Money::from_f64(0.375).round_dp(2), Money::from_f64(0.38));
        assert_eq!(Money::from_f64(0.125).round_dp(2), Money::from_f64(0.13));
    }

    #[test]
    fn test_money_percent() {
        let credit = Money::from_f64(1.5);
        assert_eq!(credit.percent(200.0), Money::from_f64(3.0));
        assert_eq!(credit.percent(75.0), Money::from_f64(1.125));
    }

    #[test]
    fn test_money_negative_checks() {
        assert!(Money::from_f64(-0.01).is_negative());
        assert!(!Money::ZERO.is_negative());
        assert!(!(-Money::ZERO).is_negative());
    }

    #[test]
    fn test_money_serde() {
        let money = Money::from_f64(4.5);
        let json = serde_json::to_string(&money).unwrap();
        assert_eq!(json, "\"4.5\"");
        let parsed: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(money, parsed);
    }
}
