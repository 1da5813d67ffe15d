//! Recalculation scheduling for a stream of form events
//!
//! Two kinds of events arrive from the form:
//! - `Input`: a keystroke. Recomputation is debounced so a burst of edits
//!   costs one computation; each new edit supersedes the pending one.
//! - `Change`: the user committed the field. Recomputation happens
//!   immediately and any pending debounced run is dropped, so the view is
//!   never stale once editing stops.

use std::str::FromStr;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

use crate::error::CalcError;
use crate::input::Field;
use crate::session::{CalculatorSession, RenderTarget};

/// Default debounce window
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// One event from the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// Field edited; recompute after the debounce window
    Input { field: Field, value: String },
    /// Field committed; recompute now
    Change { field: Field, value: String },
}

impl FormEvent {
    pub fn field(&self) -> Field {
        match self {
            FormEvent::Input { field, .. } | FormEvent::Change { field, .. } => *field,
        }
    }
}

/// Parses `field=value` as an edit and `!field=value` as a commit
impl FromStr for FormEvent {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (commit, body) = match line.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, line),
        };
        let (name, value) = body
            .split_once('=')
            .ok_or_else(|| CalcError::MalformedEvent(line.to_string()))?;
        let field = name.parse::<Field>()?;
        let value = value.trim().to_string();

        Ok(if commit {
            FormEvent::Change { field, value }
        } else {
            FormEvent::Input { field, value }
        })
    }
}

/// Debounce-or-commit scheduler driving a [`CalculatorSession`]
#[derive(Debug, Clone, Copy)]
pub struct RecalcScheduler {
    debounce: Duration,
}

impl Default for RecalcScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl RecalcScheduler {
    pub fn new(debounce: Duration) -> Self {
        RecalcScheduler { debounce }
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Drive `session` until the event stream closes, then hand it back.
    ///
    /// Renders once on start. A recomputation still pending when the
    /// stream closes is flushed before returning.
    pub async fn run<R: RenderTarget>(
        &self,
        mut events: mpsc::Receiver<FormEvent>,
        mut session: CalculatorSession<R>,
    ) -> CalculatorSession<R> {
        info!(debounce_ms = self.debounce.as_millis() as u64, "Starting recalculation loop");
        session.recalculate();

        let timer = sleep_until(Instant::now());
        tokio::pin!(timer);
        let mut pending = false;

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(FormEvent::Input { field, value }) => {
                        session.apply(field, value);
                        timer.as_mut().reset(Instant::now() + self.debounce);
                        pending = true;
                    }
                    Some(FormEvent::Change { field, value }) => {
                        session.apply(field, value);
                        if pending {
                            debug!("Commit supersedes pending recalculation");
                        }
                        pending = false;
                        session.recalculate();
                    }
                    None => break,
                },
                () = &mut timer, if pending => {
                    pending = false;
                    session.recalculate();
                }
            }
        }

        if pending {
            debug!("Flushing pending recalculation");
            session.recalculate();
        }
        info!(renders = session.render_count(), "Recalculation loop stopped");
        session
    }
}
