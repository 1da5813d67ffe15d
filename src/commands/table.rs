//! Table command implementation

use anyhow::Result;
use credit_spread_calculator::comparison;
use credit_spread_calculator::view::comparison_table_text;
use credit_spread_calculator::SpreadInputs;
use tracing::info;

pub fn run(tp: Option<String>, sl: Option<String>, json: bool) -> Result<()> {
    let inputs = SpreadInputs::from_raw(None, None, tp.as_deref(), sl.as_deref());
    info!(
        "Comparing presets against TP {}% / SL {}%",
        inputs.take_profit_percent, inputs.stop_loss_percent
    );

    let rows = comparison::generate(inputs.take_profit_percent, inputs.stop_loss_percent);
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!("{}", comparison_table_text(&rows));
        if !rows.iter().any(|row| row.is_current) {
            println!("(current TP / SL is not one of the presets)");
        }
    }

    Ok(())
}
