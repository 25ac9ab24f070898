//! The editable expression and the last displayed result.
//!
//! Edits are plain text operations. Nothing here validates the expression;
//! a malformed buffer only surfaces when it is evaluated.

use crate::glyph;

/// Result text shown when the reciprocal key is pressed on an empty
/// expression.
const EMPTY_RECIPROCAL_MESSAGE: &str = "Cannot divide by zero";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpressionBuffer {
    expression: String,
    result: String,
}

impl ExpressionBuffer {
    pub fn new() -> ExpressionBuffer {
        ExpressionBuffer::default()
    }

    /// The formula as entered so far.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The last displayed result.
    pub fn result(&self) -> &str {
        &self.result
    }

    /// Appends a key's text to the expression.
    pub fn append(&mut self, token: &str) {
        self.expression.push_str(token);
    }

    /// Appends a digit key's value. Digits 1 to 9 also overwrite the
    /// displayed result with the digit itself; 0 does not.
    pub fn digit(&mut self, digit: u8) {
        debug_assert!(digit < 10);

        let c = (b'0' + digit) as char;
        self.expression.push(c);
        if digit != 0 {
            self.result = c.to_string();
        }
    }

    /// Removes the last character of the expression. Does nothing when the
    /// expression is empty.
    pub fn backspace(&mut self) {
        self.expression.pop();
    }

    /// The CE key: clears the expression and keeps the displayed result.
    pub fn clear_entry(&mut self) {
        self.expression.clear();
    }

    /// The C key: clears both the expression and the displayed result.
    pub fn clear_all(&mut self) {
        self.expression.clear();
        self.result.clear();
    }

    /// The 1/x key: builds `1/(<result>)` from the last displayed result.
    /// The fragment is appended when a basic operator is already present,
    /// and replaces the expression otherwise. On an empty expression only
    /// the result text changes, to a fixed message.
    pub fn reciprocal(&mut self) {
        if self.expression.is_empty() {
            self.result = EMPTY_RECIPROCAL_MESSAGE.to_string();
            return;
        }

        let wrapped = format!("1/({})", self.result);
        if self.contains_basic_operator() {
            self.expression.push_str(&wrapped);
        } else {
            self.expression = wrapped;
        }
    }

    /// The x² key: appends `^2`, seeding an empty expression with `0`.
    pub fn square(&mut self) {
        if self.expression.is_empty() {
            self.expression.push('0');
        }
        self.expression.push_str("^2");
    }

    /// The √ key: wraps the whole expression, seeding an empty one with `0`.
    pub fn sqrt(&mut self) {
        if self.expression.is_empty() {
            self.expression.push('0');
        }
        let wrapped = format!("{}({})", glyph::SQRT, self.expression);
        self.expression = wrapped;
    }

    /// Replaces the whole expression, as the transcript path does.
    pub fn set_expression(&mut self, text: String) {
        self.expression = text;
    }

    /// Overwrites the displayed result.
    pub fn set_result(&mut self, result: String) {
        self.result = result;
    }

    // The divide glyph does not count as a basic operator here.
    fn contains_basic_operator(&self) -> bool {
        [glyph::PLUS, glyph::MINUS, glyph::MULTIPLY]
            .iter()
            .any(|op| self.expression.contains(op))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_append_in_press_order() {
        let mut buffer = ExpressionBuffer::new();
        buffer.digit(1);
        buffer.append(glyph::PLUS);
        buffer.digit(2);
        buffer.append(".");
        buffer.digit(5);
        assert_eq!(buffer.expression(), "1+2.5");
    }

    #[test]
    fn digits_mirror_into_the_result_except_zero() {
        let mut buffer = ExpressionBuffer::new();
        buffer.digit(7);
        assert_eq!(buffer.result(), "7");

        buffer.digit(3);
        assert_eq!(buffer.result(), "3");

        buffer.digit(0);
        assert_eq!(buffer.expression(), "730");
        assert_eq!(buffer.result(), "3");
    }

    #[test]
    fn backspace_removes_one_character() {
        let mut buffer = ExpressionBuffer::new();
        buffer.digit(1);
        buffer.append(glyph::DIVIDE);
        buffer.backspace();
        assert_eq!(buffer.expression(), "1");

        buffer.backspace();
        buffer.backspace();
        assert_eq!(buffer.expression(), "");
    }

    #[test]
    fn clear_entry_keeps_the_result() {
        let mut buffer = ExpressionBuffer::new();
        buffer.digit(5);
        buffer.set_result("5".to_string());
        buffer.clear_entry();
        assert_eq!(buffer.expression(), "");
        assert_eq!(buffer.result(), "5");
    }

    #[test]
    fn clear_all_resets_everything() {
        let mut buffer = ExpressionBuffer::new();
        buffer.digit(5);
        buffer.set_result("5".to_string());
        buffer.clear_all();
        assert_eq!(buffer.expression(), "");
        assert_eq!(buffer.result(), "");
    }

    #[test]
    fn reciprocal_on_empty_only_sets_the_message() {
        let mut buffer = ExpressionBuffer::new();
        buffer.reciprocal();
        assert_eq!(buffer.expression(), "");
        assert_eq!(buffer.result(), "Cannot divide by zero");
    }

    #[test]
    fn reciprocal_replaces_a_plain_expression() {
        let mut buffer = ExpressionBuffer::new();
        buffer.digit(5);
        buffer.set_result("5".to_string());
        buffer.reciprocal();
        assert_eq!(buffer.expression(), "1/(5)");
    }

    #[test]
    fn reciprocal_appends_after_a_basic_operator() {
        let mut buffer = ExpressionBuffer::new();
        buffer.digit(5);
        buffer.append(glyph::PLUS);
        buffer.set_result("5".to_string());
        buffer.reciprocal();
        assert_eq!(buffer.expression(), "5+1/(5)");
    }

    #[test]
    fn reciprocal_treats_division_as_plain() {
        // only +, the minus glyph and the multiply glyph count as basic
        let mut buffer = ExpressionBuffer::new();
        buffer.digit(8);
        buffer.append(glyph::DIVIDE);
        buffer.digit(2);
        buffer.set_result("4".to_string());
        buffer.reciprocal();
        assert_eq!(buffer.expression(), "1/(4)");
    }

    #[test]
    fn square_seeds_an_empty_expression_with_zero() {
        let mut buffer = ExpressionBuffer::new();
        buffer.square();
        assert_eq!(buffer.expression(), "0^2");
    }

    #[test]
    fn square_appends_to_what_was_typed() {
        let mut buffer = ExpressionBuffer::new();
        buffer.digit(1);
        buffer.digit(2);
        buffer.square();
        assert_eq!(buffer.expression(), "12^2");
    }

    #[test]
    fn sqrt_wraps_the_whole_expression() {
        let mut buffer = ExpressionBuffer::new();
        buffer.digit(1);
        buffer.append(glyph::PLUS);
        buffer.digit(8);
        buffer.sqrt();
        assert_eq!(buffer.expression(), "√(1+8)");

        buffer.sqrt();
        assert_eq!(buffer.expression(), "√(√(1+8))");
    }

    #[test]
    fn sqrt_seeds_an_empty_expression_with_zero() {
        let mut buffer = ExpressionBuffer::new();
        buffer.sqrt();
        assert_eq!(buffer.expression(), "√(0)");
    }

    #[test]
    fn set_expression_replaces_previous_input() {
        let mut buffer = ExpressionBuffer::new();
        buffer.digit(9);
        buffer.set_expression("what is 2 plus 2".to_string());
        assert_eq!(buffer.expression(), "what is 2 plus 2");
    }
}
