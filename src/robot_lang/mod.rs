// Robot Language Module
// Front end for the grid robot's command language

pub mod condition;
pub mod instruction;
pub mod lexer;
pub mod parser;

#[cfg(test)]
mod lexer_tests;

pub use condition::Condition;
pub use instruction::{Instruction, Program};

use crate::error::RobotError;

/// Compile program text into a jump-resolved instruction sequence
pub fn compile(source: &str) -> Result<Program, RobotError> {
    // Phase 1: classify lines
    let tokens = lexer::Lexer::new(source).tokenize()?;

    // Phase 2: build instructions and resolve block ends
    parser::Parser::new(tokens).parse()
}
