// Interpreter Error Handling

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RobotError {
    // Parse errors
    UnknownCommand(usize, String), // line number, line text
    MalformedCondition(String),
    UnbalancedLoop(usize),
    UnbalancedIf(usize),

    // Execution errors
    UnmatchedLoopEnd(usize), // pc
    BlockedMove(i32, i32),
    StepLimitExceeded(u64),

    // State errors
    InvalidRobotPlacement(i32, i32),

    // Runner errors
    ConfigError(String),
    IOError(String),
}

impl RobotError {
    /// True for errors raised before any instruction ran
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            RobotError::UnknownCommand(..)
                | RobotError::MalformedCondition(_)
                | RobotError::UnbalancedLoop(_)
                | RobotError::UnbalancedIf(_)
        )
    }
}

impl fmt::Display for RobotError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RobotError::UnknownCommand(line, text) => {
                write!(f, "Unknown command at line {}: '{}'", line, text)
            }
            RobotError::MalformedCondition(clause) => {
                write!(f, "Malformed condition: '{}'", clause)
            }
            RobotError::UnbalancedLoop(line) => {
                write!(f, "Unbalanced loop at line {}", line)
            }
            RobotError::UnbalancedIf(line) => {
                write!(f, "Unbalanced conditional at line {}", line)
            }
            RobotError::UnmatchedLoopEnd(pc) => {
                write!(f, "Loop end at instruction {} has no open loop", pc)
            }
            RobotError::BlockedMove(x, y) => {
                write!(f, "Move blocked: cell ({}, {}) is a wall or outside the field", x, y)
            }
            RobotError::StepLimitExceeded(limit) => {
                write!(f, "Step limit of {} instructions exceeded", limit)
            }
            RobotError::InvalidRobotPlacement(x, y) => {
                write!(f, "Robot cannot be placed at ({}, {})", x, y)
            }
            RobotError::ConfigError(msg) => {
                write!(f, "Configuration error: {}", msg)
            }
            RobotError::IOError(msg) => {
                write!(f, "IO error: {}", msg)
            }
        }
    }
}

impl std::error::Error for RobotError {}

impl From<std::io::Error> for RobotError {
    fn from(error: std::io::Error) -> Self {
        RobotError::IOError(error.to_string())
    }
}

impl From<toml::de::Error> for RobotError {
    fn from(error: toml::de::Error) -> Self {
        RobotError::ConfigError(error.to_string())
    }
}

impl From<toml::ser::Error> for RobotError {
    fn from(error: toml::ser::Error) -> Self {
        RobotError::ConfigError(error.to_string())
    }
}
