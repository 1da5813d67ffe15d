//! Calc command implementation

use anyhow::{Context, Result};
use credit_spread_calculator::session::CalculatorSession;
use credit_spread_calculator::{CalculatorView, Field, FormState};
use tracing::{debug, info};

pub fn run(
    sell: Option<String>,
    buy: Option<String>,
    tp: Option<String>,
    sl: Option<String>,
    query: Option<String>,
    json: bool,
) -> Result<()> {
    let mut form = match query.as_deref() {
        Some(query) => {
            info!("Restoring inputs from query: {}", query);
            FormState::from_query(query)
        }
        None => FormState::new(),
    };

    // Flags win over the query string
    for (field, value) in [
        (Field::Sell, sell),
        (Field::Buy, buy),
        (Field::TakeProfit, tp),
        (Field::StopLoss, sl),
    ] {
        if let Some(value) = value {
            form.set(field, value);
        }
    }
    debug!("Inputs: {:?}", form.to_inputs());

    let mut rendered = None;
    let mut session = CalculatorSession::with_form(form, |view: &CalculatorView| {
        rendered = Some(view.clone())
    });
    session.recalculate();
    let share = session.form().to_query();
    drop(session);

    let view = rendered.context("Calculator produced no output")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", view);
        if !share.is_empty() {
            println!("Share: ?{}", share);
        }
    }

    Ok(())
}
