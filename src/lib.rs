//! Credit Spread Calculator
//!
//! Turns the premiums of a vertical credit spread and spread-level
//! take-profit / stop-loss percentages into per-leg trigger prices, a
//! break-even win rate, a short strike delta recommendation and a preset
//! comparison table.
//!
//! The calculation modules (`spread`, `advisor`, `comparison`, `format`)
//! are pure functions. `session` and `scheduler` wrap them for callers
//! that feed form edits and need debounced re-rendering.

pub mod advisor;
pub mod comparison;
pub mod config;
pub mod error;
pub mod format;
pub mod input;
pub mod scheduler;
pub mod session;
pub mod spread;
pub mod types;
pub mod view;

pub use config::Config;
pub use error::{CalcError, CalcResult};
pub use input::{Field, FormState};
pub use types::*;
pub use view::{evaluate, CalculatorView, Evaluation};
