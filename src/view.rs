//! Render model handed to the output collaborator
//!
//! Runs the whole pipeline (spread targets, delta advisory, comparison
//! table) for one input snapshot and turns the numbers into display text.
//! The view says nothing about styling beyond whether the spread is a
//! credit or a debit.

use std::fmt;

use itertools::Itertools;
use serde::Serialize;

use crate::format::{
    format_money, format_percent, format_plain_percent, format_points, format_ratio,
    format_signed_percent,
};
use crate::spread::expected_value;
use crate::{
    advisor, comparison, spread, ComparisonRow, DeltaRecommendation, SpreadInputs, SpreadResult,
};

/// Raw pipeline output for one input snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub inputs: SpreadInputs,
    pub result: SpreadResult,
    pub recommendation: DeltaRecommendation,
    /// Expected value (percent of credit) at the recommended delta's win rate
    pub expected_value: f64,
    pub comparison: Vec<ComparisonRow>,
}

/// Spread calculator, then delta advisor, then comparison table
pub fn evaluate(inputs: &SpreadInputs) -> Evaluation {
    let result = spread::compute(inputs);
    let recommendation = advisor::recommend(result.required_win_rate);
    let expected_value = expected_value(
        recommendation.win_rate_threshold,
        inputs.take_profit_percent,
        inputs.stop_loss_percent,
    );
    let comparison = comparison::generate(inputs.take_profit_percent, inputs.stop_loss_percent);

    Evaluation {
        inputs: *inputs,
        result,
        recommendation,
        expected_value,
        comparison,
    }
}

/// Whether the spread collects or pays premium
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditKind {
    Credit,
    Debit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortLegView {
    pub take_profit_price: String,
    pub stop_loss_price: String,
    pub profit_badge: String,
    pub loss_badge: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongLegView {
    pub take_profit_price: String,
    pub stop_loss_price: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    pub credit: String,
    pub profit: String,
    pub loss: String,
    pub risk_reward: String,
    pub required_win_rate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdvisoryView {
    pub label: String,
    pub description: String,
    pub win_rate: String,
    /// Signed, e.g. `+12.27 pts`; negative when the margin is insufficient
    pub margin: String,
    pub expected_value: String,
    pub is_fallback: bool,
}

/// Every string the render target shows for one computation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorView {
    pub net_credit: String,
    pub credit_kind: CreditKind,
    pub short_leg: ShortLegView,
    pub long_leg: LongLegView,
    pub summary: SummaryView,
    pub advisory: AdvisoryView,
    pub comparison: Vec<ComparisonRow>,
}

impl CalculatorView {
    /// Evaluate `inputs` and format the result
    pub fn build(inputs: &SpreadInputs) -> Self {
        Self::from_evaluation(evaluate(inputs))
    }

    pub fn from_evaluation(evaluation: Evaluation) -> Self {
        let Evaluation {
            inputs,
            result,
            recommendation,
            expected_value,
            comparison,
        } = evaluation;

        let credit_kind = if result.net_credit.is_negative() {
            CreditKind::Debit
        } else {
            CreditKind::Credit
        };
        let profit = format_money(result.profit_amount);
        let loss = format_money(result.loss_amount);

        CalculatorView {
            net_credit: format_money(result.net_credit),
            credit_kind,
            short_leg: ShortLegView {
                take_profit_price: format_money(result.short_take_profit_price),
                stop_loss_price: format_money(result.short_stop_loss_price),
                profit_badge: format!("Profit {}", profit),
                loss_badge: format!("Loss {}", loss),
            },
            long_leg: LongLegView {
                take_profit_price: format_money(result.long_take_profit_price),
                stop_loss_price: format_money(result.long_stop_loss_price),
            },
            summary: SummaryView {
                credit: format_money(result.net_credit),
                profit: format!(
                    "+{} ({})",
                    profit,
                    format_plain_percent(inputs.take_profit_percent)
                ),
                loss: format!("-{} ({})", loss, format_plain_percent(inputs.stop_loss_percent)),
                risk_reward: format!("1:{}", format_ratio(result.risk_reward_ratio)),
                required_win_rate: format_percent(result.required_win_rate, 2),
            },
            advisory: AdvisoryView {
                label: recommendation.label,
                description: recommendation.description,
                win_rate: format_percent(recommendation.win_rate_threshold, 0),
                margin: format_points(recommendation.margin_percentage_points),
                expected_value: format_signed_percent(expected_value),
                is_fallback: recommendation.is_fallback,
            },
            comparison,
        }
    }

    /// Row matching the current take-profit / stop-loss, if any
    pub fn current_row(&self) -> Option<&ComparisonRow> {
        self.comparison.iter().find(|row| row.is_current)
    }
}

/// Plain-text comparison table, current row marked with `>`
pub fn comparison_table_text(rows: &[ComparisonRow]) -> String {
    let header = format!(
        "  {:<12} {:>6} {:>9} {:>8} {:>8}",
        "TP / SL", "Ratio", "Win rate", "EV@90%", "EV@85%"
    );
    let body = rows
        .iter()
        .map(|row| {
            format!(
                "{} {:<12} {:>6} {:>9} {:>8} {:>8}",
                if row.is_current { ">" } else { " " },
                row.label,
                row.ratio_text,
                row.required_win_rate_text,
                row.expected_value_90_text,
                row.expected_value_85_text,
            )
        })
        .join("\n");
    format!("{}\n{}", header, body)
}

impl fmt::Display for CalculatorView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(60);
        writeln!(f, "{}", rule)?;
        writeln!(f, "CREDIT SPREAD TARGETS")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Net Credit:         {} ({:?})", self.net_credit, self.credit_kind)?;
        writeln!(f)?;
        writeln!(f, "Short Leg (buy to close)")?;
        writeln!(
            f,
            "  Take Profit <=    {}   [{}]",
            self.short_leg.take_profit_price, self.short_leg.profit_badge
        )?;
        writeln!(
            f,
            "  Stop Loss   >=    {}   [{}]",
            self.short_leg.stop_loss_price, self.short_leg.loss_badge
        )?;
        writeln!(f, "Long Leg (sell to close)")?;
        writeln!(f, "  Take Profit       {}", self.long_leg.take_profit_price)?;
        writeln!(f, "  Stop Loss         {}", self.long_leg.stop_loss_price)?;
        writeln!(f)?;
        writeln!(f, "Credit:             {}", self.summary.credit)?;
        writeln!(f, "Max Profit Target:  {}", self.summary.profit)?;
        writeln!(f, "Max Loss Target:    {}", self.summary.loss)?;
        writeln!(f, "Risk:Reward:        {}", self.summary.risk_reward)?;
        writeln!(f, "Required Win Rate:  {}", self.summary.required_win_rate)?;
        writeln!(f)?;
        writeln!(
            f,
            "Recommended:        {} (~{} win rate, margin {})",
            self.advisory.label, self.advisory.win_rate, self.advisory.margin
        )?;
        writeln!(f, "                    {}", self.advisory.description)?;
        writeln!(f, "Expected Value:     {} of credit", self.advisory.expected_value)?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "{}", comparison_table_text(&self.comparison))?;
        write!(f, "{}", rule)
    }
}
