use logos::Logos;
use std::fmt;

use crate::error::{MechError, MechResult};

/// Token type for derived-value formulas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// Non-negative integer literal.
    Integer(i64),
    /// Attribute reference (letters, CJK, digits after the first char).
    Name(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Integer(n) => write!(f, "{n}"),
            Token::Name(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Logos, Debug)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r"[\p{L}_][\p{L}\p{N}_]*")]
    Name,
}

/// Lex a formula into tokens. Unlike a source-file lexer this stops at the
/// first bad character: formulas are short and come from configuration.
pub fn lex(source: &str) -> MechResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let slice = lexer.slice();
        let token = match result {
            Ok(RawToken::Plus) => Token::Plus,
            Ok(RawToken::Minus) => Token::Minus,
            Ok(RawToken::Star) => Token::Star,
            Ok(RawToken::Slash) => Token::Slash,
            Ok(RawToken::LParen) => Token::LParen,
            Ok(RawToken::RParen) => Token::RParen,
            Ok(RawToken::Integer) => {
                let n = slice.parse::<i64>().map_err(|_| MechError::InvalidExpression {
                    expr: source.to_string(),
                    message: format!("integer out of range: {slice}"),
                })?;
                Token::Integer(n)
            }
            Ok(RawToken::Name) => Token::Name(slice.to_string()),
            Err(()) => {
                return Err(MechError::InvalidExpression {
                    expr: source.to_string(),
                    message: format!("unexpected character: {slice:?}"),
                });
            }
        };
        tokens.push(token);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_arithmetic() {
        let tokens = lex("(体型 + con) / 10").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LParen,
                Token::Name("体型".to_string()),
                Token::Plus,
                Token::Name("con".to_string()),
                Token::RParen,
                Token::Slash,
                Token::Integer(10),
            ]
        );
    }

    #[test]
    fn lex_rejects_unknown_characters() {
        assert!(lex("str % 2").is_err());
    }

    #[test]
    fn token_display() {
        assert_eq!(Token::Name("意志".to_string()).to_string(), "意志");
        assert_eq!(Token::Integer(99).to_string(), "99");
    }
}
