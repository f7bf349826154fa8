#![crate_name = "robogrid"]

pub mod config;
pub mod error;
pub mod grid;
pub mod interpreter;
pub mod robot_lang;
pub mod trace;

use std::fmt;

pub use error::RobotError;
pub use grid::{Cell, Direction, Grid, GridState, Wall};
pub use interpreter::Interpreter;
pub use robot_lang::compile;
pub use trace::{Action, LoggingObserver, TraceEntry, TraceObserver};

/// A failed run together with the effects applied before the failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFailure {
    pub error: RobotError,
    pub trace: Vec<TraceEntry>,
}

impl fmt::Display for RunFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (after {} actions)", self.error, self.trace.len())
    }
}

impl std::error::Error for RunFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Parse `source` and run it against `grid`, logging each action.
///
/// Parse errors leave the grid untouched. Execution errors keep every move
/// and paint applied before the failing instruction.
pub fn parse_and_execute(source: &str, grid: &mut Grid) -> Result<Vec<TraceEntry>, RunFailure> {
    run_program(source, grid, None)
}

/// Like [`parse_and_execute`], with an optional budget of executed instructions
pub fn run_program(
    source: &str,
    grid: &mut Grid,
    max_steps: Option<u64>,
) -> Result<Vec<TraceEntry>, RunFailure> {
    let program = compile(source).map_err(|error| RunFailure {
        error,
        trace: Vec::new(),
    })?;

    let mut interpreter = Interpreter::new(grid).with_observer(Box::new(LoggingObserver));
    match interpreter.run_with_limit(&program, max_steps) {
        Ok(()) => Ok(interpreter.into_trace()),
        Err(error) => Err(RunFailure {
            error,
            trace: interpreter.into_trace(),
        }),
    }
}
