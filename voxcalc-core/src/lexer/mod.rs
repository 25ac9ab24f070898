mod token;

use std::iter::FusedIterator;
use std::str::FromStr;

use thiserror::Error;

pub use self::token::*;

/// When the expression is malformed, the lexer stops and returns this error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexerError {
    /// A run of digits and dots that does not spell a number, like `1.2.3`.
    #[error("'{text}' is not a valid number")]
    IllegalNumber { text: String, index: usize },
    /// A word that is not a known function name.
    #[error("unknown function or variable '{name}'")]
    UnknownIdent { name: String, index: usize },
    /// A character no token can start with.
    #[error("unrecognized character at position {index}")]
    UnknownToken { index: usize },
}

/// A lexer reads a mathematical expression and returns a list of tokens in the
/// expression.
/// This allows us to read the expression in a simpler way later when we want
/// to parse it.
pub struct Lexer<'a> {
    expr: &'a [u8],
    index: usize,
    has_failed: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer from an expression.
    pub fn new(expr: &str) -> Lexer {
        Lexer {
            expr: expr.as_bytes(),
            index: 0,
            has_failed: false,
        }
    }

    fn consume_whitespace(&mut self) {
        while self.index < self.expr.len() {
            match self.expr[self.index] as char {
                ' ' | '\n' | '\r' | '\t' => {}
                _ => break,
            }

            self.index += 1;
        }
    }

    fn try_consume_single_char_token(&mut self) -> Option<Token> {
        if self.index < self.expr.len() {
            let original_index = self.index;
            let c = self.expr[self.index] as char;

            if let Some(kind) = TokenKind::from_single_char(c) {
                // consume the character
                self.index += 1;

                return Some(Token {
                    kind,
                    index: original_index,
                });
            }
        }

        None
    }

    fn try_consume_num(&mut self) -> Option<Result<Token, LexerError>> {
        let original_index = self.index;
        let mut text = String::new();

        while self.index < self.expr.len() {
            let c = self.expr[self.index] as char;

            if !c.is_ascii_digit() && c != '.' {
                break;
            }

            text.push(c);
            self.index += 1;
        }

        if text.is_empty() {
            return None;
        }

        Some(match text.parse::<f64>() {
            Ok(val) => Ok(Token {
                kind: TokenKind::Num(val),
                index: original_index,
            }),
            Err(_) => Err(LexerError::IllegalNumber {
                text,
                index: original_index,
            }),
        })
    }

    fn try_consume_ident(&mut self) -> Option<Result<Token, LexerError>> {
        let original_index = self.index;
        let mut ident = String::new();

        while self.index < self.expr.len() {
            let c = self.expr[self.index] as char;

            // every letter in an identifier is alphabetic
            if !c.is_ascii_alphabetic() {
                break;
            }

            ident.push(c);
            self.index += 1;
        }

        if ident.is_empty() {
            return None;
        }

        Some(match IdentKind::from_str(&ident) {
            Ok(kind) => Ok(Token {
                kind: TokenKind::Ident(kind),
                index: original_index,
            }),
            Err(_) => Err(LexerError::UnknownIdent {
                name: ident,
                index: original_index,
            }),
        })
    }
}

// This means that when it returns a none option, then it will keep returning
// none options.
impl<'a> FusedIterator for Lexer<'a> {}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, LexerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.has_failed {
            return None;
        }

        self.consume_whitespace();

        // is there anything left?
        if self.index >= self.expr.len() {
            return None;
        }

        let original_index = self.index;
        let result = self
            .try_consume_single_char_token()
            .map(Ok)
            .or_else(|| self.try_consume_num())
            .or_else(|| self.try_consume_ident())
            .unwrap_or(Err(LexerError::UnknownToken {
                index: original_index,
            }));

        if result.is_err() {
            // do not try another token if this didn't work
            self.has_failed = true;
        }

        Some(result)
    }
}
