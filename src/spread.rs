//! Credit spread target prices
//!
//! A vertical credit spread sells one option (short leg) and buys a
//! further out-of-the-money option (long leg). Exits are set on each leg
//! separately as conditional orders, so the spread-level take-profit and
//! stop-loss percentages have to be translated into per-leg trigger
//! prices.
//!
//! Spread-level targets, with `credit = sell - buy`:
//! ```text
//! take-profit spread = credit * (1 - tp/100)   e.g. 75% -> credit * 0.25
//! stop-loss spread   = credit * (1 + sl/100)   e.g. 200% -> credit * 3
//! ```
//! The short leg carries almost all of the spread value near those
//! targets, so its triggers are the spread targets themselves.

use crate::{Money, SpreadInputs, SpreadResult};
use rust_decimal_macros::dec;

/// Long leg take-profit trigger: sell it once it is nearly worthless
pub const LONG_TAKE_PROFIT_PRICE: Money = Money::from_decimal(dec!(0.01));

/// Rough share of the long leg's premium still recoverable on a stop-out
pub const LONG_STOP_LOSS_FACTOR: f64 = 0.5;

/// Compute net credit, profit/loss amounts and per-leg trigger prices
pub fn compute(inputs: &SpreadInputs) -> SpreadResult {
    let tp = inputs.take_profit_percent;
    let sl = inputs.stop_loss_percent;

    let net_credit = Money::from_f64(inputs.sell_price) - Money::from_f64(inputs.buy_price);

    let profit_amount = net_credit.percent(tp);
    let loss_amount = net_credit.percent(sl);

    let take_profit_spread = net_credit.scale(1.0 - tp / 100.0);
    let stop_loss_spread = net_credit.scale(1.0 + sl / 100.0);

    // An option price cannot go below zero; the stop side is reported as-is
    let short_take_profit_price = take_profit_spread.max(Money::ZERO);
    let short_stop_loss_price = stop_loss_spread;

    let long_stop_loss_price = if inputs.buy_price > 0.0 {
        Money::from_f64(inputs.buy_price)
            .scale(LONG_STOP_LOSS_FACTOR)
            .max(LONG_TAKE_PROFIT_PRICE)
    } else {
        LONG_TAKE_PROFIT_PRICE
    };

    SpreadResult {
        net_credit,
        profit_amount,
        loss_amount,
        short_take_profit_price,
        short_stop_loss_price,
        long_take_profit_price: LONG_TAKE_PROFIT_PRICE,
        long_stop_loss_price,
        risk_reward_ratio: risk_reward_ratio(tp, sl),
        required_win_rate: required_win_rate(tp, sl),
    }
}

/// Risk per unit of reward: `sl / tp`
pub fn risk_reward_ratio(take_profit_percent: f64, stop_loss_percent: f64) -> f64 {
    stop_loss_percent / take_profit_percent
}

/// Break-even win rate (percent) for a take-profit / stop-loss pair.
///
/// Solves `w * tp = (1 - w) * sl` for `w`:
/// ```text
/// w = sl / (tp + sl)
/// ```
pub fn required_win_rate(take_profit_percent: f64, stop_loss_percent: f64) -> f64 {
    stop_loss_percent / (take_profit_percent + stop_loss_percent) * 100.0
}

/// Expected value per trade, in percent of the credit received
pub fn expected_value(win_rate: f64, take_profit_percent: f64, stop_loss_percent: f64) -> f64 {
    (win_rate / 100.0) * take_profit_percent - ((100.0 - win_rate) / 100.0) * stop_loss_percent
}
