//! Delta recommendation from the break-even win rate
//!
//! A short strike's delta is roughly its probability of finishing in the
//! money, so `1 - delta` approximates the win rate of holding the spread
//! to expiry. The advisor adds a safety margin to the break-even win rate
//! and picks the largest delta whose approximate win rate still covers it.

use crate::{DeltaRecommendation, DeltaTableEntry};

/// Percentage points added on top of the break-even win rate
pub const SAFETY_MARGIN: f64 = 10.0;

/// Static delta lookup table.
///
/// Sorted ascending by `win_rate_threshold`. [`recommend`] returns the
/// first entry whose threshold covers the target, so the order is what
/// makes the result the least conservative sufficient delta.
pub const DELTA_TABLE: [DeltaTableEntry; 6] = [
    DeltaTableEntry {
        delta: 0.30,
        win_rate_threshold: 70.0,
        label: "Delta 0.30",
        description: "Aggressive strike: about 70% win rate, richest premium, little room for the underlying to move against you.",
    },
    DeltaTableEntry {
        delta: 0.25,
        win_rate_threshold: 75.0,
        label: "Delta 0.25",
        description: "Moderately aggressive strike: about 75% win rate with a solid premium.",
    },
    DeltaTableEntry {
        delta: 0.20,
        win_rate_threshold: 80.0,
        label: "Delta 0.20",
        description: "Balanced strike: about 80% win rate, a common default for credit spreads.",
    },
    DeltaTableEntry {
        delta: 0.15,
        win_rate_threshold: 85.0,
        label: "Delta 0.15",
        description: "Conservative strike: about 85% win rate at the cost of a thinner premium.",
    },
    DeltaTableEntry {
        delta: 0.10,
        win_rate_threshold: 90.0,
        label: "Delta 0.10",
        description: "Very conservative strike: about 90% win rate, small premium per spread.",
    },
    DeltaTableEntry {
        delta: 0.05,
        win_rate_threshold: 95.0,
        label: "Delta 0.05",
        description: "Far out-of-the-money strike: about 95% win rate, premium is often barely worth the commissions.",
    },
];

const FALLBACK_DESCRIPTION: &str = "Even a 0.05 delta strike (about 95% win rate) cannot cover the required win rate plus a 10 point safety margin. Adjust the profit/loss ratio: take profit later or stop out sooner.";

/// Recommend a short strike delta for a break-even win rate (percent).
///
/// The margin of the returned recommendation is negative when only the
/// fallback applies; callers must not assume it is non-negative.
pub fn recommend(required_win_rate: f64) -> DeltaRecommendation {
    let target_win_rate = required_win_rate + SAFETY_MARGIN;

    match DELTA_TABLE
        .iter()
        .find(|entry| entry.win_rate_threshold >= target_win_rate)
    {
        Some(entry) => DeltaRecommendation {
            delta: entry.delta,
            label: entry.label.to_string(),
            win_rate_threshold: entry.win_rate_threshold,
            margin_percentage_points: entry.win_rate_threshold - required_win_rate,
            description: entry.description.to_string(),
            is_fallback: false,
        },
        None => fallback(required_win_rate),
    }
}

fn fallback(required_win_rate: f64) -> DeltaRecommendation {
    let entry = &DELTA_TABLE[DELTA_TABLE.len() - 1];
    DeltaRecommendation {
        delta: entry.delta,
        label: entry.label.to_string(),
        win_rate_threshold: entry.win_rate_threshold,
        margin_percentage_points: entry.win_rate_threshold - required_win_rate,
        description: FALLBACK_DESCRIPTION.to_string(),
        is_fallback: true,
    }
}
