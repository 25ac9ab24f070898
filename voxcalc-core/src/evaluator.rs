//! The evaluation pipeline: glyph rewriting, lexing, parsing, tree
//! evaluation, finiteness check, display formatting.

use thiserror::Error;

use crate::glyph;
use crate::lexer::{Lexer, LexerError, Token};
use crate::node::EvalError;
use crate::parser::{ParseError, Parser};

/// An evaluation failure, from whichever stage rejected the expression.
///
/// The `Display` text of the inner error is what the user ends up seeing
/// in the failure notification.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("{0}")]
    Lex(#[from] LexerError),
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Eval(#[from] EvalError),
    /// The tree evaluated to NaN or an infinity.
    #[error("result is not a finite number")]
    NonFinite,
}

/// Evaluates the buffered expression and formats the value for display.
///
/// The expression may contain keypad glyphs; they are rewritten before
/// lexing. The displayed result never carries a sign on zero.
pub fn evaluate(expr: &str) -> Result<String, CalcError> {
    let normalized = glyph::normalize(expr);

    let mut tokens: Vec<Token> = Vec::new();
    for token in Lexer::new(&normalized) {
        tokens.push(token?);
    }

    let root_node = Parser::new(&tokens).parse()?;
    let val = root_node.eval()?;
    if !val.is_finite() {
        return Err(CalcError::NonFinite);
    }

    tracing::debug!("evaluated '{}' to {}", normalized, val);
    Ok(format_value(val))
}

/// Formats a finite value: whole numbers render bare, everything else is
/// rounded to two decimal places, halves away from zero.
fn format_value(val: f64) -> String {
    // drop the sign of negative zero
    let val = if val == 0.0 { 0.0 } else { val };

    if val % 1.0 == 0.0 {
        format!("{:.0}", val)
    } else {
        format!("{:.2}", (val * 100.0).round() / 100.0)
    }
}
