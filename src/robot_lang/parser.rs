// Robot Language Parser
// Turns line tokens into a flat instruction sequence with resolved jump targets

use crate::error::RobotError;
use crate::robot_lang::condition::Condition;
use crate::robot_lang::instruction::{Instruction, Program};
use crate::robot_lang::lexer::{Token, TokenKind};
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Loop,
    If,
}

/// A block head still waiting for its closing line
#[derive(Debug, Clone, Copy)]
struct OpenBlock {
    kind: BlockKind,
    head: usize,
    line: usize,
}

pub struct Parser {
    tokens: Vec<Token>,
    program: Program,
    open_blocks: Vec<OpenBlock>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            program: Program::default(),
            open_blocks: Vec::new(),
        }
    }

    pub fn parse(mut self) -> Result<Program, RobotError> {
        let tokens = std::mem::take(&mut self.tokens);

        for token in tokens {
            let line = token.line;
            match token.kind {
                TokenKind::Move(direction) => {
                    self.program.push(Instruction::Move(direction), line);
                }
                TokenKind::Paint => {
                    self.program.push(Instruction::Paint, line);
                }
                TokenKind::LoopOpen(clause) => {
                    let condition = Condition::parse(&clause)?;
                    self.open(BlockKind::Loop, Instruction::LoopStart { condition, end: 0 }, line);
                }
                TokenKind::IfOpen(clause) => {
                    let condition = Condition::parse(&clause)?;
                    self.open(BlockKind::If, Instruction::IfStart { condition, end: 0 }, line);
                }
                TokenKind::LoopClose => {
                    self.close(BlockKind::Loop, Instruction::LoopEnd, line)?;
                }
                TokenKind::IfClose => {
                    self.close(BlockKind::If, Instruction::IfEnd, line)?;
                }
                TokenKind::Begin | TokenKind::End => {
                    debug!("Ignoring program bracket at line {}", line);
                }
            }
        }

        if let Some(block) = self.open_blocks.last() {
            return Err(unbalanced(block.kind, block.line));
        }

        debug!("Parsed {} instructions", self.program.len());
        Ok(self.program)
    }

    fn open(&mut self, kind: BlockKind, head: Instruction, line: usize) {
        let head = self.program.push(head, line);
        self.open_blocks.push(OpenBlock { kind, head, line });
    }

    fn close(&mut self, kind: BlockKind, closer: Instruction, line: usize) -> Result<(), RobotError> {
        let block = match self.open_blocks.pop() {
            Some(block) if block.kind == kind => block,
            _ => return Err(unbalanced(kind, line)),
        };

        self.program.push(closer, line);
        let target = self.program.len();

        if let Instruction::LoopStart { end, .. } | Instruction::IfStart { end, .. } =
            &mut self.program.instructions[block.head]
        {
            *end = target;
        }
        Ok(())
    }
}

fn unbalanced(kind: BlockKind, line: usize) -> RobotError {
    match kind {
        BlockKind::Loop => RobotError::UnbalancedLoop(line),
        BlockKind::If => RobotError::UnbalancedIf(line),
    }
}
