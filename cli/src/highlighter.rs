use logos::Logos;
use nu_ansi_term::{Color, Style};
use reedline::{StyledText, ValidationResult, Validator};

use crate::lexer::{Token, calculate_depth};

const PLAIN: Color = Color::White;
const NUMBER: Color = Color::Cyan;
const FUNCTION: Color = Color::Blue;
const IDENT: Color = Color::Red;
const PUNCTUATION: Color = Color::DarkGray;
const INVALID: Color = Color::LightRed;

/// Token-based syntax highlighting for the REPL.
pub struct Highlighter;

impl reedline::Highlighter for Highlighter {
    fn highlight(&self, line: &str, _: usize) -> StyledText {
        let mut output = StyledText::new();
        let tokens: Vec<_> = Token::lexer(line).spanned().collect();

        let mut curr_end = 0;
        for (index, (token, span)) in tokens.iter().enumerate() {
            if span.start > curr_end {
                output.push((Style::new().fg(PLAIN), line[curr_end..span.start].to_string()));
            }
            let fg = match token {
                Ok(Token::Number) => NUMBER,
                Ok(Token::Ident) => match tokens.get(index + 1) {
                    Some((Ok(Token::LParen), _)) => FUNCTION,
                    _ => IDENT,
                },
                Ok(Token::Operator) => PLAIN,
                Ok(Token::LParen | Token::RParen | Token::Comma) => PUNCTUATION,
                Err(_) => INVALID,
            };
            output.push((Style::new().fg(fg), line[span.clone()].to_string()));
            curr_end = span.end;
        }
        if curr_end < line.len() {
            output.push((Style::new().fg(PLAIN), line[curr_end..].to_string()));
        }

        output
    }
}

/// Keeps reading lines while parentheses are open.
pub struct ParenValidator;

impl Validator for ParenValidator {
    fn validate(&self, line: &str) -> ValidationResult {
        match calculate_depth(line) {
            Some(depth) if depth > 0 => ValidationResult::Incomplete,
            _ => ValidationResult::Complete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reedline::Highlighter as _;

    fn colors(line: &str) -> Vec<(Option<Color>, String)> {
        Highlighter
            .highlight(line, 0)
            .buffer
            .into_iter()
            .map(|(style, text)| (style.foreground, text))
            .collect()
    }

    #[test]
    fn test_function_names_differ_from_identifiers() {
        let spans = colors("sin(x)");
        assert_eq!(spans[0], (Some(FUNCTION), "sin".to_string()));
        assert_eq!(spans[2], (Some(IDENT), "x".to_string()));
    }

    #[test]
    fn test_highlight_preserves_text() {
        let line = "  1 +  sqrt( 2 ) $ ";
        let text: String = colors(line).into_iter().map(|(_, text)| text).collect();
        assert_eq!(text, line);
    }

    #[test]
    fn test_validator() {
        assert!(matches!(
            ParenValidator.validate("add(1,"),
            ValidationResult::Incomplete
        ));
        assert!(matches!(
            ParenValidator.validate("add(1, 2)"),
            ValidationResult::Complete
        ));
    }
}
