use thiserror::Error;

use crate::lexer::{IdentKind, Token, TokenKind};
use crate::node::Node;

#[derive(PartialEq, Eq)]
enum StopPolicy {
    IfWeaker(Power),
    IfWeakerOrEqual(Power),
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum Power {
    CloseParen,
    Add,
    Mul,
    Exp,
}

/// A parser converts a list of tokens into an AST (abstract syntax tree).
pub struct Parser<'a> {
    tokens: &'a [Token],
    index: usize,
}

#[derive(Debug, PartialEq, Eq, Clone, Error)]
pub enum ParseError {
    /// There were no tokens at all.
    #[error("Expression can not be empty")]
    EmptyExpression,
    /// The expression ended where an operand was expected.
    #[error("unexpected end of expression")]
    EarlyEof,
    /// An operand or operator in a position it cannot appear in.
    #[error("misplaced token at position {index}")]
    UnexpectedToken { index: usize },
    /// Parentheses that do not pair up.
    #[error("mismatched parentheses")]
    UnmatchedParen,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &[Token]) -> Parser {
        Parser { tokens, index: 0 }
    }

    fn parse_nud(&mut self) -> Result<Node, ParseError> {
        if self.index >= self.tokens.len() {
            return Err(ParseError::EarlyEof);
        }

        let token = self.tokens[self.index].clone();
        self.index += 1;

        Ok(match token.kind {
            TokenKind::Num(val) => Node::Num(val),
            TokenKind::Ident(IdentKind::Sqrt) => {
                let param = self.parse_nud()?;
                param.sqrt()
            }

            // unary signs bind tighter than multiplication but weaker than
            // exponentiation, so -2^2 is -(2^2)
            TokenKind::Minus => -self.parse_range(&StopPolicy::IfWeakerOrEqual(Power::Mul))?,
            TokenKind::Plus => self.parse_range(&StopPolicy::IfWeakerOrEqual(Power::Mul))?,

            TokenKind::OpenParen => {
                let expr = self.parse_range(&StopPolicy::IfWeakerOrEqual(Power::CloseParen))?;

                match self.tokens.get(self.index) {
                    Some(t) if t.kind == TokenKind::CloseParen => {
                        // consume the parenthesis
                        self.index += 1;
                        expr
                    }
                    Some(t) => return Err(ParseError::UnexpectedToken { index: t.index }),
                    None => return Err(ParseError::UnmatchedParen),
                }
            }

            _ => return Err(ParseError::UnexpectedToken { index: token.index }),
        })
    }

    fn parse_led(&mut self, left: Node) -> Result<Node, ParseError> {
        if self.index >= self.tokens.len() {
            return Err(ParseError::EarlyEof);
        }

        let token = self.tokens[self.index].clone();
        self.index += 1;

        Ok(match token.kind {
            // left associativity
            TokenKind::Plus => left + self.parse_range(&StopPolicy::IfWeakerOrEqual(Power::Add))?,
            TokenKind::Minus => {
                left - self.parse_range(&StopPolicy::IfWeakerOrEqual(Power::Add))?
            }
            TokenKind::Times => {
                left * self.parse_range(&StopPolicy::IfWeakerOrEqual(Power::Mul))?
            }
            TokenKind::Slash => {
                left / self.parse_range(&StopPolicy::IfWeakerOrEqual(Power::Mul))?
            }
            TokenKind::Percent => {
                left % self.parse_range(&StopPolicy::IfWeakerOrEqual(Power::Mul))?
            }

            // right associativity: 1^2^3 is parsed as exp(1, exp(2, 3)), not exp(exp(1, 2), 3)
            TokenKind::Hat => Node::Exp(
                Box::new(left),
                Box::new(self.parse_range(&StopPolicy::IfWeaker(Power::Exp))?),
            ),

            _ => return Err(ParseError::UnexpectedToken { index: token.index }),
        })
    }

    fn parse_range(&mut self, policy: &StopPolicy) -> Result<Node, ParseError> {
        let mut node = self.parse_nud()?;

        'parse: while self.index < self.tokens.len() {
            let peek = self.tokens[self.index].clone();

            let power = match peek.kind {
                TokenKind::CloseParen => Power::CloseParen,
                TokenKind::Plus | TokenKind::Minus => Power::Add,
                TokenKind::Times | TokenKind::Slash | TokenKind::Percent => Power::Mul,
                TokenKind::Hat => Power::Exp,

                // an operand in operator position: stop here and let the
                // caller report the leftover token
                _ => break 'parse,
            };

            let (min_power, stop_if_equal) = match policy {
                StopPolicy::IfWeaker(val) => (val, false),
                StopPolicy::IfWeakerOrEqual(val) => (val, true),
            };

            if &power < min_power || (stop_if_equal && &power == min_power) {
                break 'parse;
            }

            node = self.parse_led(node)?;
        }

        Ok(node)
    }

    pub fn parse(mut self) -> Result<Node, ParseError> {
        if self.tokens.is_empty() {
            return Err(ParseError::EmptyExpression);
        }

        let node = self.parse_range(&StopPolicy::IfWeakerOrEqual(Power::CloseParen))?;

        // every token must now be consumed
        match self.tokens.get(self.index) {
            None => Ok(node),
            Some(t) if t.kind == TokenKind::CloseParen => Err(ParseError::UnmatchedParen),
            Some(t) => Err(ParseError::UnexpectedToken { index: t.index }),
        }
    }
}
