// Executable instruction set

use crate::grid::Direction;
use crate::robot_lang::condition::Condition;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Move(Direction),
    Paint,
    /// `end` is one past the matching `LoopEnd`
    LoopStart { condition: Condition, end: usize },
    LoopEnd,
    /// `end` is one past the matching `IfEnd`
    IfStart { condition: Condition, end: usize },
    IfEnd,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Instruction::Move(direction) => write!(f, "move {}", direction),
            Instruction::Paint => write!(f, "paint"),
            Instruction::LoopStart { condition, end } => {
                write!(f, "loop while {} else -> {}", condition, end)
            }
            Instruction::LoopEnd => write!(f, "end loop"),
            Instruction::IfStart { condition, end } => {
                write!(f, "if {} else -> {}", condition, end)
            }
            Instruction::IfEnd => write!(f, "end if"),
        }
    }
}

/// A parsed, jump-resolved program
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub instructions: Vec<Instruction>,
    /// Source line (1-based) each instruction came from
    pub lines: Vec<usize>,
}

impl Program {
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, pc: usize) -> Option<&Instruction> {
        self.instructions.get(pc)
    }

    pub fn line_of(&self, pc: usize) -> Option<usize> {
        self.lines.get(pc).copied()
    }

    pub(crate) fn push(&mut self, instruction: Instruction, line: usize) -> usize {
        self.instructions.push(instruction);
        self.lines.push(line);
        self.instructions.len() - 1
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (pc, (instruction, line)) in self.instructions.iter().zip(&self.lines).enumerate() {
            writeln!(f, "{:04} [line {:3}] {}", pc, line, instruction)?;
        }
        Ok(())
    }
}
