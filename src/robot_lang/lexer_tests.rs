// Lexer tests

#[cfg(test)]
mod tests {
    use crate::error::RobotError;
    use crate::grid::Direction;
    use crate::robot_lang::lexer::{Lexer, TokenKind};

    fn tokenize_input(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize_input("").is_empty());
        assert!(tokenize_input("\n   \n\t\n").is_empty());
    }

    #[test]
    fn test_commands() {
        let tokens = tokenize_input("вправо\nвлево\nвверх\nвниз\nзакрасить");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Move(Direction::Right),
                TokenKind::Move(Direction::Left),
                TokenKind::Move(Direction::Up),
                TokenKind::Move(Direction::Down),
                TokenKind::Paint,
            ]
        );
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let tokens = tokenize_input("  ВПРАВО  \r\nЗакрасить\n\tвНиЗ");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Move(Direction::Right),
                TokenKind::Paint,
                TokenKind::Move(Direction::Down),
            ]
        );
    }

    #[test]
    fn test_line_numbers_count_blank_lines() {
        let tokens = Lexer::new("\nвправо\n\n\nкц").tokenize().unwrap();
        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![2, 5]);
    }

    #[test]
    fn test_loop_open_keeps_clause() {
        assert_eq!(
            tokenize_input("нц пока справа свободно"),
            vec![TokenKind::LoopOpen("справа свободно".to_string())]
        );
        // "пока" may be omitted
        assert_eq!(
            tokenize_input("нц снизу не свободно"),
            vec![TokenKind::LoopOpen("снизу не свободно".to_string())]
        );
        // A word that merely starts with "пока" is left alone
        assert_eq!(
            tokenize_input("нц покажи"),
            vec![TokenKind::LoopOpen("покажи".to_string())]
        );
    }

    #[test]
    fn test_if_open_drops_then() {
        assert_eq!(
            tokenize_input("если слева свободно то"),
            vec![TokenKind::IfOpen("слева свободно".to_string())]
        );
        assert_eq!(
            tokenize_input("если слева свободно"),
            vec![TokenKind::IfOpen("слева свободно".to_string())]
        );
    }

    #[test]
    fn test_block_closers_and_brackets() {
        assert_eq!(
            tokenize_input("нач\nкц\nвсе\nкон"),
            vec![
                TokenKind::Begin,
                TokenKind::LoopClose,
                TokenKind::IfClose,
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn test_decomposed_keyword_matches_composed() {
        // "всё" with "ё" typed as "е" + combining diaeresis
        let decomposed = "вс\u{0435}\u{0308}";
        assert_ne!(decomposed, "всё");
        assert_eq!(tokenize_input(decomposed), vec![TokenKind::IfClose]);
        assert_eq!(tokenize_input("всё"), vec![TokenKind::IfClose]);
        assert_eq!(tokenize_input("ВСЁ"), vec![TokenKind::IfClose]);
    }

    #[test]
    fn test_punctuation_around_while_and_then() {
        assert_eq!(
            tokenize_input("нц пока, справа свободно"),
            vec![TokenKind::LoopOpen("справа свободно".to_string())]
        );
        assert_eq!(
            tokenize_input("если справа свободно то."),
            vec![TokenKind::IfOpen("справа свободно".to_string())]
        );
        assert_eq!(
            tokenize_input("если справа свободно, то:"),
            vec![TokenKind::IfOpen("справа свободно,".to_string())]
        );
    }

    #[test]
    fn test_clause_keeps_typed_text() {
        assert_eq!(
            tokenize_input("НЦ ПОКА Справа Свободно"),
            vec![TokenKind::LoopOpen("Справа Свободно".to_string())]
        );
        assert_eq!(
            tokenize_input("Если Снизу НЕ свободно ТО"),
            vec![TokenKind::IfOpen("Снизу НЕ свободно".to_string())]
        );
    }

    #[test]
    fn test_unknown_command() {
        let err = Lexer::new("вправо\nпрыгнуть").tokenize().unwrap_err();
        assert_eq!(err, RobotError::UnknownCommand(2, "прыгнуть".to_string()));
    }

    #[test]
    fn test_trailing_words_are_unknown() {
        let err = Lexer::new("  вправо 3 ").tokenize().unwrap_err();
        assert_eq!(err, RobotError::UnknownCommand(1, "вправо 3".to_string()));

        // Prefix matches are not commands either
        let err = Lexer::new("вправоо").tokenize().unwrap_err();
        assert_eq!(err, RobotError::UnknownCommand(1, "вправоо".to_string()));
    }
}
