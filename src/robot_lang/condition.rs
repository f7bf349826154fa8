// Directional conditions used by loop and conditional heads

use crate::error::RobotError;
use crate::grid::{Direction, Grid};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;
use unicode_normalization::UnicodeNormalization;

pub const NEGATION: &str = "не";
pub const FREE: &str = "свободно";

lazy_static! {
    static ref SIDES: HashMap<&'static str, Direction> = {
        let mut m = HashMap::new();
        m.insert("справа", Direction::Right);
        m.insert("слева", Direction::Left);
        m.insert("сверху", Direction::Up);
        m.insert("снизу", Direction::Down);
        m
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub direction: Direction,
    pub expect_free: bool,
}

impl Condition {
    pub fn new(direction: Direction, expect_free: bool) -> Self {
        Condition {
            direction,
            expect_free,
        }
    }

    /// Parse `<side> [не] свободно`.
    ///
    /// The clause is NFC-normalized and lowercased, then everything that is
    /// not a letter or whitespace is dropped before splitting into words.
    pub fn parse(raw: &str) -> Result<Self, RobotError> {
        let words = clause_words(raw);
        let words: Vec<&str> = words.iter().map(String::as_str).collect();

        let malformed = || RobotError::MalformedCondition(raw.trim().to_string());

        let (side, expect_free) = match words.as_slice() {
            [side, free] if *free == FREE => (*side, true),
            [side, not, free] if *not == NEGATION && *free == FREE => (*side, false),
            _ => return Err(malformed()),
        };

        let direction = *SIDES.get(side).ok_or_else(malformed)?;
        Ok(Condition::new(direction, expect_free))
    }

    /// Evaluate against the robot's current surroundings
    pub fn evaluate(&self, grid: &Grid) -> bool {
        let (dx, dy) = self.direction.delta();
        grid.check_direction(dx, dy) == self.expect_free
    }
}

/// Words of a clause after NFC, lowercasing and dropping non-letters.
/// Normalization runs first so decomposed letters compose instead of losing
/// their marks.
pub(crate) fn clause_words(raw: &str) -> Vec<String> {
    let cleaned: String = raw
        .nfc()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect();
    cleaned.split_whitespace().map(str::to_string).collect()
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.expect_free {
            write!(f, "{} free", self.direction)
        } else {
            write!(f, "{} not free", self.direction)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Wall;
    use test_log::test;

    #[test]
    fn test_parse_plain_and_negated() {
        assert_eq!(
            Condition::parse("справа свободно").unwrap(),
            Condition::new(Direction::Right, true)
        );
        assert_eq!(
            Condition::parse("снизу не свободно").unwrap(),
            Condition::new(Direction::Down, false)
        );
        assert_eq!(
            Condition::parse("СВЕРХУ Свободно").unwrap(),
            Condition::new(Direction::Up, true)
        );
    }

    #[test]
    fn test_punctuation_is_ignored() {
        let canonical = Condition::parse("слева не свободно").unwrap();
        assert_eq!(Condition::parse("слева, не свободно!").unwrap(), canonical);
        assert_eq!(Condition::parse("(слева) не; свободно.").unwrap(), canonical);
        assert_eq!(Condition::parse("«слева»   не  свободно").unwrap(), canonical);
    }

    #[test]
    fn test_alternate_composition_parses_identically() {
        let canonical = Condition::parse("сверху не свободно").unwrap();

        // Noise marks the letters cannot compose with are dropped
        assert_eq!(
            Condition::parse("све\u{0301}рху не\u{0301} свободно").unwrap(),
            canonical
        );
    }

    #[test]
    fn test_composed_and_decomposed_letters_agree() {
        // "й" typed as one code point and as "и" + combining breve
        let composed = "справа\u{0439} свободно";
        let decomposed = "справа\u{0438}\u{0306} свободно";
        assert_ne!(composed, decomposed);
        assert_eq!(clause_words(composed), clause_words(decomposed));
        assert_eq!(clause_words(decomposed), vec!["справай", "свободно"]);

        // Both spellings are rejected the same way
        assert!(matches!(
            Condition::parse(composed),
            Err(RobotError::MalformedCondition(_))
        ));
        assert!(matches!(
            Condition::parse(decomposed),
            Err(RobotError::MalformedCondition(_))
        ));

        // "ё" as "е" + combining diaeresis composes to the same negation token
        assert_eq!(
            clause_words("сверху н\u{0435}\u{0308} свободно"),
            clause_words("сверху н\u{0451} свободно")
        );
    }

    #[test]
    fn test_error_keeps_raw_clause() {
        assert_eq!(
            Condition::parse("  слева  не-свободно? ").unwrap_err(),
            RobotError::MalformedCondition("слева  не-свободно?".to_string())
        );
    }

    #[test]
    fn test_malformed_clauses() {
        for clause in [
            "",
            "справа",
            "справа занято",
            "справа да свободно",
            "впереди свободно",
            "справа не не свободно",
            "не свободно",
        ] {
            assert!(
                matches!(Condition::parse(clause), Err(RobotError::MalformedCondition(_))),
                "'{}' should be rejected",
                clause
            );
        }
    }

    #[test]
    fn test_evaluate_uses_current_position() {
        let mut grid = Grid::new(3, 1).unwrap();
        let right_free = Condition::new(Direction::Right, true);
        let right_blocked = Condition::new(Direction::Right, false);
        let left_free = Condition::new(Direction::Left, true);

        assert!(right_free.evaluate(&grid));
        assert!(!right_blocked.evaluate(&grid));
        assert!(!left_free.evaluate(&grid));

        grid.add_wall(Wall::new(1, 0, 1, 0)).unwrap();
        assert!(!right_free.evaluate(&grid));
        assert!(right_blocked.evaluate(&grid));
    }
}
