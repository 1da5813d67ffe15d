//! Adapter between a form and the calculator
//!
//! The session owns the raw form text and the render target. Each
//! recomputation reads a fresh snapshot of the four fields, runs the
//! stateless pipeline and hands the resulting view to the target.

use tracing::{debug, warn};

use crate::input::{Field, FormState};
use crate::view::{CalculatorView, CreditKind};

/// Receives every rendered view
pub trait RenderTarget {
    fn render(&mut self, view: &CalculatorView);
}

impl<F> RenderTarget for F
where
    F: FnMut(&CalculatorView),
{
    fn render(&mut self, view: &CalculatorView) {
        self(view)
    }
}

pub struct CalculatorSession<R> {
    form: FormState,
    target: R,
    render_count: u64,
}

impl<R: RenderTarget> CalculatorSession<R> {
    pub fn new(target: R) -> Self {
        Self::with_form(FormState::new(), target)
    }

    pub fn with_form(form: FormState, target: R) -> Self {
        CalculatorSession {
            form,
            target,
            render_count: 0,
        }
    }

    /// Session whose form is restored from `sell`, `buy`, `tp`, `sl` query parameters
    pub fn from_query(query: &str, target: R) -> Self {
        Self::with_form(FormState::from_query(query), target)
    }

    /// Store new raw text for a field without recomputing
    pub fn apply(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        debug!(field = %field, value = %value, "Form field updated");
        self.form.set(field, value);
    }

    /// Recompute from the current form and render the result
    pub fn recalculate(&mut self) -> CalculatorView {
        let inputs = self.form.to_inputs();
        let view = CalculatorView::build(&inputs);

        if view.credit_kind == CreditKind::Debit {
            warn!(
                sell = inputs.sell_price,
                buy = inputs.buy_price,
                "Buy price exceeds sell price: this is a net debit, not a credit spread"
            );
        }
        if inputs.take_profit_percent + inputs.stop_loss_percent <= 0.0 {
            warn!(
                tp = inputs.take_profit_percent,
                sl = inputs.stop_loss_percent,
                "Take-profit plus stop-loss is not positive; win rate figures are meaningless"
            );
        }

        self.target.render(&view);
        self.render_count += 1;
        debug!(
            renders = self.render_count,
            required_win_rate = %view.summary.required_win_rate,
            recommendation = %view.advisory.label,
            "Recalculated"
        );
        view
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    pub fn into_target(self) -> R {
        self.target
    }
}
