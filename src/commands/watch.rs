//! Watch command implementation
//!
//! Each stdin line is one form event: `sell=2.05` is an edit and is
//! debounced, `!sell=2.05` is a commit and renders immediately.

use anyhow::{Context, Result};
use credit_spread_calculator::scheduler::{FormEvent, RecalcScheduler};
use credit_spread_calculator::session::CalculatorSession;
use credit_spread_calculator::{CalculatorView, Config, FormState};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

pub fn run(
    config: &Config,
    query: Option<String>,
    debounce_override: Option<u64>,
    json: bool,
) -> Result<()> {
    let debounce = match debounce_override {
        Some(0) => anyhow::bail!("--debounce-ms must be greater than zero"),
        Some(ms) => Duration::from_millis(ms),
        None => config.watch.debounce(),
    };
    let form = query.as_deref().map(FormState::from_query).unwrap_or_default();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(async move {
        let (tx, rx) = mpsc::channel(64);
        let session = CalculatorSession::with_form(form, move |view: &CalculatorView| {
            print_view(view, json)
        });
        let scheduler = RecalcScheduler::new(debounce);
        let driver = tokio::spawn(async move { scheduler.run(rx, session).await });

        info!("Reading form events from stdin (field=value, !field=value)");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            match line.parse::<FormEvent>() {
                Ok(event) => {
                    if tx.send(event).await.is_err() {
                        break;
                    }
                }
                Err(e) => warn!("Skipping line: {}", e),
            }
        }
        drop(tx);

        let session = driver.await.context("Recalculation task failed")?;
        info!("Rendered {} times", session.render_count());
        Ok::<(), anyhow::Error>(())
    })
}

fn print_view(view: &CalculatorView, json: bool) {
    if json {
        match serde_json::to_string(view) {
            Ok(line) => println!("{}", line),
            Err(e) => warn!("Failed to serialize view: {}", e),
        }
    } else {
        println!("{}", view);
    }
}
