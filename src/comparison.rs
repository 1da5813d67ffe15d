//! Reference table of common take-profit / stop-loss presets

use crate::format::{format_percent, format_plain_percent, format_ratio, format_signed_percent};
use crate::spread::{expected_value, required_win_rate, risk_reward_ratio};
use crate::{ComparisonPreset, ComparisonRow};

/// Presets shown in the table, in display order
pub const PRESETS: [ComparisonPreset; 8] = [
    ComparisonPreset::new(50.0, 100.0),
    ComparisonPreset::new(50.0, 150.0),
    ComparisonPreset::new(50.0, 200.0),
    ComparisonPreset::new(60.0, 200.0),
    ComparisonPreset::new(75.0, 150.0),
    ComparisonPreset::new(75.0, 200.0),
    ComparisonPreset::new(75.0, 300.0),
    ComparisonPreset::new(90.0, 300.0),
];

/// Win rate of a 0.10 delta short strike
pub const WIN_RATE_DELTA_10: f64 = 90.0;
/// Win rate of a 0.15 delta short strike
pub const WIN_RATE_DELTA_15: f64 = 85.0;

/// Evaluate every preset against the current take-profit / stop-loss.
///
/// Always returns one row per preset in [`PRESETS`] order. A row is
/// marked current only on exact equality with the caller's pair.
pub fn generate(current_take_profit_percent: f64, current_stop_loss_percent: f64) -> Vec<ComparisonRow> {
    PRESETS
        .iter()
        .map(|preset| {
            let is_current = preset.take_profit_percent == current_take_profit_percent
                && preset.stop_loss_percent == current_stop_loss_percent;
            evaluate_preset(*preset, is_current)
        })
        .collect()
}

fn evaluate_preset(preset: ComparisonPreset, is_current: bool) -> ComparisonRow {
    let tp = preset.take_profit_percent;
    let sl = preset.stop_loss_percent;

    let ratio = risk_reward_ratio(tp, sl);
    let win_rate = required_win_rate(tp, sl);
    let ev_90 = expected_value(WIN_RATE_DELTA_10, tp, sl);
    let ev_85 = expected_value(WIN_RATE_DELTA_15, tp, sl);

    ComparisonRow {
        preset,
        ratio,
        required_win_rate: win_rate,
        expected_value_90: ev_90,
        expected_value_85: ev_85,
        is_current,
        label: format!("{} / {}", format_plain_percent(tp), format_plain_percent(sl)),
        ratio_text: format_ratio(ratio),
        required_win_rate_text: format_percent(win_rate, 0),
        expected_value_90_text: format_signed_percent(ev_90),
        expected_value_85_text: format_signed_percent(ev_85),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_always_eight_rows_in_preset_order() {
        for &(tp, sl) in &[(75.0, 200.0), (33.0, 99.0), (0.5, 1e6)] {
            let rows = generate(tp, sl);
            assert_eq!(rows.len(), PRESETS.len());
            for (row, preset) in rows.iter().zip(PRESETS.iter()) {
                assert_eq!(row.preset, *preset);
            }
        }
    }

    #[test]
    fn test_current_row_marked_on_exact_match() {
        let rows = generate(75.0, 200.0);
        let current: Vec<_> = rows.iter().filter(|r| r.is_current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].label, "75% / 200%");

        let rows = generate(75.0, 200.0001);
        assert!(rows.iter().all(|r| !r.is_current));
    }

    #[test]
    fn test_default_preset_values() {
        let rows = generate(75.0, 200.0);
        let row = rows
            .iter()
            .find(|r| r.preset == ComparisonPreset::new(75.0, 200.0))
            .unwrap();

        assert_relative_eq!(row.expected_value_90, 47.5, epsilon = 1e-9);
        assert_relative_eq!(row.expected_value_85, 33.75, epsilon = 1e-9);
        assert_eq!(row.ratio_text, "2.67");
        assert_eq!(row.required_win_rate_text, "73%");
        assert_eq!(row.expected_value_90_text, "+48%");
        assert_eq!(row.expected_value_85_text, "+34%");
    }

    #[test]
    fn test_negative_expected_value_has_minus_sign() {
        // 18 - 30 and 17 - 45
        let row = evaluate_preset(ComparisonPreset::new(20.0, 300.0), false);
        assert_eq!(row.expected_value_90_text, "-12%");
        assert_eq!(row.expected_value_85_text, "-28%");
    }
}
