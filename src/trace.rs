//! Execution trace records and the observer hook
//!
//! Every effect the interpreter applies to the grid is recorded as a
//! [`TraceEntry`]. Callers replay the trace to animate a run. Interpreters can
//! also be given a [`TraceObserver`] that sees each entry as it is produced.

use crate::grid::Cell;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Move,
    Paint,
}

/// One applied effect; `x`/`y` is the robot cell after the effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub action: Action,
    pub x: i32,
    pub y: i32,
}

impl TraceEntry {
    pub fn moved(cell: Cell) -> Self {
        TraceEntry {
            action: Action::Move,
            x: cell.x,
            y: cell.y,
        }
    }

    pub fn painted(cell: Cell) -> Self {
        TraceEntry {
            action: Action::Paint,
            x: cell.x,
            y: cell.y,
        }
    }
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.action {
            Action::Move => write!(f, "move({}, {})", self.x, self.y),
            Action::Paint => write!(f, "paint({}, {})", self.x, self.y),
        }
    }
}

/// Receives trace entries as the interpreter produces them
pub trait TraceObserver {
    fn on_entry(&mut self, step: u64, entry: &TraceEntry);

    /// Called once when a run stops, successfully or not
    fn on_finish(&mut self, _steps: u64, _entries: usize) {}
}

/// Observer that forwards entries to the `log` facade
#[derive(Debug, Default)]
pub struct LoggingObserver;

impl TraceObserver for LoggingObserver {
    fn on_entry(&mut self, step: u64, entry: &TraceEntry) {
        debug!("step {}: {}", step, entry);
    }

    fn on_finish(&mut self, steps: u64, entries: usize) {
        debug!("run finished after {} steps, {} trace entries", steps, entries);
    }
}
