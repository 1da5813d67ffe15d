//! Errors raised by the adapter surfaces (CLI, config, event stream)
//!
//! The calculation core itself never fails.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalcError {
    #[error("unknown input field '{0}' (expected sell, buy, tp or sl)")]
    UnknownField(String),

    #[error("malformed event '{0}': expected field=value or !field=value")]
    MalformedEvent(String),

    #[error("invalid config value for {key}: {reason}")]
    InvalidConfig { key: &'static str, reason: String },
}

pub type CalcResult<T> = Result<T, CalcError>;
