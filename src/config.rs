//! Runner configuration loaded from TOML
//!
//! ```toml
//! step_limit = 5000
//!
//! [field]
//! width = 10
//! height = 10
//! robot = { x = 0, y = 0 }
//! walls = [{ from = { x = 1, y = 0 }, to = { x = 1, y = 1 } }]
//! painted = []
//! ```

use crate::error::RobotError;
use crate::grid::GridState;
use crate::trace::TraceEntry;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_STEP_LIMIT: u64 = 100_000;

/// Environment variable overriding `step_limit`; `0` or `none` disables it
pub const STEP_LIMIT_ENV: &str = "ROBOGRID_STEP_LIMIT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub step_limit: Option<u64>,
    pub field: GridState,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            step_limit: Some(DEFAULT_STEP_LIMIT),
            field: GridState::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self, RobotError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RobotError> {
        let path = path.as_ref();
        debug!("Loading config from {}", path.display());
        let text = fs::read_to_string(path)
            .map_err(|e| RobotError::IOError(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Step budget for a run; a limit of 0 means unbounded
    pub fn effective_step_limit(&self) -> Option<u64> {
        self.step_limit.filter(|&limit| limit > 0)
    }

    /// Apply `ROBOGRID_STEP_LIMIT` if it is set
    pub fn apply_env(mut self) -> Result<Self, RobotError> {
        if let Ok(value) = std::env::var(STEP_LIMIT_ENV) {
            self.step_limit = parse_step_limit(&value)?;
        }
        Ok(self)
    }
}

pub fn parse_step_limit(value: &str) -> Result<Option<u64>, RobotError> {
    match value.trim() {
        "0" | "none" => Ok(None),
        other => other.parse::<u64>().map(Some).map_err(|_| {
            RobotError::ConfigError(format!("invalid {} value '{}'", STEP_LIMIT_ENV, other))
        }),
    }
}

/// What the runner prints after a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub trace: Vec<TraceEntry>,
    pub field: GridState,
}

impl RunReport {
    pub fn to_toml(&self) -> Result<String, RobotError> {
        Ok(toml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Cell, Wall};
    use crate::trace::Action;
    use test_log::test;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.field.width, 10);
        assert_eq!(config.field.robot, Cell::new(0, 0));
    }

    #[test]
    fn test_field_table() {
        let config = Config::from_toml_str(
            r#"
            step_limit = 50

            [field]
            width = 5
            height = 3
            robot = { x = 2, y = 1 }
            walls = [{ from = { x = 1, y = 0 }, to = { x = 1, y = 1 } }]
            "#,
        )
        .unwrap();

        assert_eq!(config.step_limit, Some(50));
        assert_eq!(config.effective_step_limit(), Some(50));
        assert_eq!(config.field.width, 5);
        assert_eq!(config.field.robot, Cell::new(2, 1));
        assert_eq!(config.field.walls, vec![Wall::new(1, 0, 1, 1)]);
        assert!(config.field.painted.is_empty());
    }

    #[test]
    fn test_zero_step_limit_is_unbounded() {
        let config = Config::from_toml_str("step_limit = 0").unwrap();
        assert_eq!(config.effective_step_limit(), None);
    }

    #[test]
    fn test_bad_config_is_reported() {
        let err = Config::from_toml_str("step_limit = \"lots\"").unwrap_err();
        assert!(matches!(err, RobotError::ConfigError(_)));
    }

    #[test]
    fn test_parse_step_limit() {
        assert_eq!(parse_step_limit("0").unwrap(), None);
        assert_eq!(parse_step_limit("none").unwrap(), None);
        assert_eq!(parse_step_limit(" 250 ").unwrap(), Some(250));
        assert!(parse_step_limit("-1").is_err());
    }

    #[test]
    fn test_report_serializes_actions_lowercase() {
        let report = RunReport {
            error: None,
            trace: vec![TraceEntry {
                action: Action::Move,
                x: 1,
                y: 0,
            }],
            field: GridState::default(),
        };
        let text = report.to_toml().unwrap();
        assert!(text.contains("action = \"move\""), "{}", text);
        assert!(!text.contains("error"));

        let back: RunReport = toml::from_str(&text).unwrap();
        assert_eq!(back, report);
    }
}
