//! Subcommand implementations

pub mod calc;
pub mod table;
pub mod watch;
