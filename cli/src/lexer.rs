use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(",")]
    Comma,

    #[token("+")]
    #[token("-")]
    #[token("*")]
    #[token("/")]
    Operator,

    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r"[A-Za-z_][A-Za-z0-9_.]*")]
    Ident,
}

/// Number of parentheses left open at the end of `buffer`.
///
/// Returns `None` when the buffer contains a character the language never
/// accepts, so the caller can submit it and let the parser report it.
pub fn calculate_depth(buffer: &str) -> Option<usize> {
    let mut depth: isize = 0;

    for token in Token::lexer(buffer) {
        match token {
            Ok(Token::LParen) => depth += 1,
            Ok(Token::RParen) => depth -= 1,
            Ok(_) => {}
            Err(_) => return None,
        }
    }

    Some(depth.max(0) as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens() {
        let tokens: Vec<_> = Token::lexer("math.sin(1.5e3, -x)")
            .map(|token| token.unwrap())
            .collect();
        assert_eq!(
            tokens,
            vec![
                Token::Ident,
                Token::LParen,
                Token::Number,
                Token::Comma,
                Token::Operator,
                Token::Ident,
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_identifiers_follow_the_grammar() {
        for source in ["a.", "a..b", "math.sin", "x_1.y2"] {
            let mut lexer = Token::lexer(source);
            assert_eq!(lexer.next(), Some(Ok(Token::Ident)), "{}", source);
            assert_eq!(lexer.slice(), source);
            assert_eq!(lexer.next(), None);
        }
    }

    #[test]
    fn test_calculate_depth() {
        assert_eq!(calculate_depth("1 + 2"), Some(0));
        assert_eq!(calculate_depth("sin((1 + 2)"), Some(1));
        assert_eq!(calculate_depth("(("), Some(2));
        assert_eq!(calculate_depth("1)"), Some(0));
        assert_eq!(calculate_depth("1 $ 2"), None);
    }
}
