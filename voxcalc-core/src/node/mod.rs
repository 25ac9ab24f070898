mod eval;

use std::ops::*;

pub use self::eval::EvalError;

use self::eval::eval;

/// A node is an operation in the AST (abstract syntax tree).
#[derive(Debug, PartialEq, Clone)]
pub enum Node {
    Num(f64),
    Neg(Box<Node>),
    Add(Box<Node>, Box<Node>),
    Sub(Box<Node>, Box<Node>),
    Mul(Box<Node>, Box<Node>),
    Div(Box<Node>, Box<Node>),
    Rem(Box<Node>, Box<Node>),
    Exp(Box<Node>, Box<Node>),
    Sqrt(Box<Node>),
}

impl Node {
    /// Approximates the node value.
    pub fn eval(&self) -> Result<f64, EvalError> {
        eval(self)
    }

    pub fn sqrt(self) -> Node {
        Node::Sqrt(Box::new(self))
    }
}

impl Add for Node {
    type Output = Node;

    fn add(self, rhs: Self) -> Self::Output {
        Node::Add(Box::new(self), Box::new(rhs))
    }
}

impl Neg for Node {
    type Output = Node;

    fn neg(self) -> Self::Output {
        Node::Neg(Box::new(self))
    }
}

impl Sub for Node {
    type Output = Node;

    fn sub(self, rhs: Self) -> Self::Output {
        Node::Sub(Box::new(self), Box::new(rhs))
    }
}

impl Mul for Node {
    type Output = Node;

    fn mul(self, rhs: Self) -> Self::Output {
        Node::Mul(Box::new(self), Box::new(rhs))
    }
}

impl Div for Node {
    type Output = Node;

    fn div(self, rhs: Self) -> Self::Output {
        Node::Div(Box::new(self), Box::new(rhs))
    }
}

impl Rem for Node {
    type Output = Node;

    fn rem(self, rhs: Self) -> Self::Output {
        Node::Rem(Box::new(self), Box::new(rhs))
    }
}
