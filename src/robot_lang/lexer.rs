// Robot Language Lexer
// Classifies each source line into a single command token

use crate::error::RobotError;
use crate::grid::Direction;
use lazy_static::lazy_static;
use log::trace;
use std::collections::HashMap;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Commands
    Move(Direction),
    Paint,

    // Blocks, carrying the raw condition clause
    LoopOpen(String),
    LoopClose,
    IfOpen(String),
    IfClose,

    // Program brackets
    Begin,
    End,
}

#[derive(Debug, Clone)]
enum Keyword {
    Simple(TokenKind),
    Loop,
    If,
}

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, Keyword> = {
        let mut m: HashMap<&'static str, Keyword> = HashMap::new();
        m.insert("вправо", Keyword::Simple(TokenKind::Move(Direction::Right)));
        m.insert("влево", Keyword::Simple(TokenKind::Move(Direction::Left)));
        m.insert("вверх", Keyword::Simple(TokenKind::Move(Direction::Up)));
        m.insert("вниз", Keyword::Simple(TokenKind::Move(Direction::Down)));
        m.insert("закрасить", Keyword::Simple(TokenKind::Paint));
        m.insert("кц", Keyword::Simple(TokenKind::LoopClose));
        m.insert("все", Keyword::Simple(TokenKind::IfClose));
        m.insert("всё", Keyword::Simple(TokenKind::IfClose));
        m.insert("нач", Keyword::Simple(TokenKind::Begin));
        m.insert("кон", Keyword::Simple(TokenKind::End));
        m.insert("нц", Keyword::Loop);
        m.insert("если", Keyword::If);
        m
    };
}

const WHILE: &str = "пока";
const THEN: &str = "то";

pub struct Lexer<'a> {
    input: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input }
    }

    /// Tokenize the whole program; blank lines produce no token
    pub fn tokenize(&mut self) -> Result<Vec<Token>, RobotError> {
        let mut tokens = Vec::new();

        for (index, raw) in self.input.lines().enumerate() {
            let line = index + 1;
            if let Some(kind) = Self::classify(raw, line)? {
                trace!("line {}: {:?}", line, kind);
                tokens.push(Token { kind, line });
            }
        }

        Ok(tokens)
    }

    fn classify(raw: &str, line: usize) -> Result<Option<TokenKind>, RobotError> {
        let text = raw.trim();
        if text.is_empty() {
            return Ok(None);
        }

        // Keywords are matched normalized; clauses are passed on as typed
        let (head, rest) = split_first_word(text);
        let word = normalize(head);

        let unknown = || RobotError::UnknownCommand(line, text.to_string());

        match KEYWORDS.get(word.as_str()) {
            Some(Keyword::Simple(kind)) if rest.is_empty() => Ok(Some(kind.clone())),
            Some(Keyword::Loop) => {
                let clause = strip_leading_word(rest, WHILE);
                Ok(Some(TokenKind::LoopOpen(clause.to_string())))
            }
            Some(Keyword::If) => {
                let clause = strip_trailing_word(rest, THEN);
                Ok(Some(TokenKind::IfOpen(clause.to_string())))
            }
            _ => Err(unknown()),
        }
    }
}

/// NFC plus lowercase
fn normalize(word: &str) -> String {
    word.nfc().flat_map(char::to_lowercase).collect()
}

fn letters(word: &str) -> String {
    normalize(word).chars().filter(|c| c.is_alphabetic()).collect()
}

fn split_first_word(text: &str) -> (&str, &str) {
    match text.find(char::is_whitespace) {
        Some(split) => (&text[..split], text[split..].trim_start()),
        None => (text, ""),
    }
}

fn strip_leading_word<'t>(text: &'t str, word: &str) -> &'t str {
    let (head, rest) = split_first_word(text);
    if letters(head) == word {
        rest
    } else {
        text
    }
}

fn strip_trailing_word<'t>(text: &'t str, word: &str) -> &'t str {
    match text.rfind(char::is_whitespace) {
        Some(split) if letters(&text[split..]) == word => text[..split].trim_end(),
        None if letters(text) == word => "",
        _ => text,
    }
}
