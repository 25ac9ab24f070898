use thiserror::Error;

use super::Node;

/// A description of the error that occurred while evaluating a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Division or modulo where the right hand side evaluates to zero.
    #[error("Division by zero!")]
    DivisionByZero,
}

/// Approximates the value of the node.
pub fn eval(node: &Node) -> Result<f64, EvalError> {
    Ok(match node {
        Node::Num(val) => *val,
        Node::Neg(inner) => -eval(inner)?,
        Node::Add(a, b) => eval(a)? + eval(b)?,
        Node::Sub(a, b) => eval(a)? - eval(b)?,
        Node::Mul(a, b) => eval(a)? * eval(b)?,
        Node::Div(a, b) => {
            let numer = eval(a)?;
            let denom = eval(b)?;
            if denom == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            numer / denom
        }
        Node::Rem(a, b) => {
            let numer = eval(a)?;
            let denom = eval(b)?;
            if denom == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            numer % denom
        }
        Node::Exp(a, b) => eval(a)?.powf(eval(b)?),
        Node::Sqrt(inner) => eval(inner)?.sqrt(),
    })
}
