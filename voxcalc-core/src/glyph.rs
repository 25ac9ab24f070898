//! Keypad glyphs and their arithmetic spellings.
//!
//! The keypad writes pretty glyphs into the expression (`÷`, `✕`, an em
//! dash for minus, `⁺∕₋`, `√`). The grammar only understands ASCII
//! operators and the `sqrt` function, so the whole expression goes through
//! [`normalize`] once before lexing.

/// Glyph appended by the divide key.
pub const DIVIDE: &str = "÷";
/// Glyph appended by the multiply key.
pub const MULTIPLY: &str = "✕";
/// Glyph appended by the minus key. This is an em dash, not the ASCII
/// hyphen-minus.
pub const MINUS: &str = "—";
/// Glyph appended by the plus key.
pub const PLUS: &str = "+";
/// Glyph appended by the sign toggle key.
pub const PLUS_MINUS: &str = "⁺∕₋";
/// Glyph prepended by the square root key.
pub const SQRT: &str = "√";

/// Glyph to arithmetic text, applied in this order.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    (DIVIDE, "/"),
    (MULTIPLY, "*"),
    (MINUS, "-"),
    (PLUS_MINUS, "-"),
    (SQRT, "sqrt"),
];

/// The four binary operator keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Plus,
    Minus,
    Multiply,
    Divide,
}

impl Operator {
    /// The glyph the key appends to the expression.
    pub fn glyph(self) -> &'static str {
        match self {
            Operator::Plus => PLUS,
            Operator::Minus => MINUS,
            Operator::Multiply => MULTIPLY,
            Operator::Divide => DIVIDE,
        }
    }
}

/// Rewrites keypad glyphs into the plain syntax the lexer understands.
/// Text that contains no glyphs passes through unchanged.
pub fn normalize(expr: &str) -> String {
    let mut out = expr.to_string();
    for (glyph, replacement) in SUBSTITUTIONS {
        if out.contains(glyph) {
            out = out.replace(glyph, replacement);
        }
    }
    out
}
