use std::str::FromStr;

/// A list of all possible identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentKind {
    Sqrt,
}

impl FromStr for IdentKind {
    type Err = ();

    fn from_str(s: &str) -> Result<IdentKind, ()> {
        Ok(match &*s.to_ascii_lowercase() {
            "sqrt" => IdentKind::Sqrt,
            _ => return Err(()),
        })
    }
}

/// Tokens are simple things like numbers, operators, parentheses, and so on.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Num(f64),
    Ident(IdentKind),
    Plus,
    Minus,
    Times,
    Slash,
    Percent,
    Hat,
    OpenParen,
    CloseParen,
}

impl TokenKind {
    pub fn from_single_char(c: char) -> Option<TokenKind> {
        Some(match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Times,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Hat,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,

    /// The index of the first character of the token
    pub index: usize,
}
