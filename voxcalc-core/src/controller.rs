//! The calculator itself: one mutable state owner that maps key presses
//! and recognizer callbacks onto the expression buffer and the evaluation
//! pipeline.

use crate::buffer::ExpressionBuffer;
use crate::evaluator::{self, CalcError};
use crate::glyph::{self, Operator};
use crate::speech::{self, SpeechEvent, SpeechRecognizer, SpeechSession};

/// Handler for the transient failure notification, a toast or equivalent.
type NotificationHandler = Box<dyn FnMut(&str)>;

/// A copy of everything the rendering layer shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub expression: String,
    pub result: String,
    pub listening: bool,
}

/// Owns the calculator state. All mutation goes through the key and
/// recognizer methods; the host renders from the accessors or
/// [`Calculator::snapshot`].
pub struct Calculator {
    buffer: ExpressionBuffer,
    listening: bool,
    session: Option<SpeechSession>,
    recognizer: Option<Box<dyn SpeechRecognizer>>,
    on_notification: Option<NotificationHandler>,
}

impl Calculator {
    pub fn new() -> Calculator {
        Calculator {
            buffer: ExpressionBuffer::new(),
            listening: false,
            session: None,
            recognizer: None,
            on_notification: None,
        }
    }

    /// Installs the platform recognizer the microphone key drives.
    pub fn set_recognizer(&mut self, recognizer: Box<dyn SpeechRecognizer>) {
        self.recognizer = Some(recognizer);
    }

    /// Installs the handler for transient failure notifications.
    pub fn set_notification_handler<F>(&mut self, handler: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.on_notification = Some(Box::new(handler));
    }

    /// A digit key, 0 to 9.
    pub fn digit(&mut self, digit: u8) {
        self.buffer.digit(digit);
    }

    /// One of the four binary operator keys.
    pub fn operator(&mut self, op: Operator) {
        self.buffer.append(op.glyph());
    }

    /// The % key.
    pub fn percent(&mut self) {
        self.buffer.append("%");
    }

    /// The decimal point key.
    pub fn decimal_point(&mut self) {
        self.buffer.append(".");
    }

    /// The sign toggle key.
    pub fn plus_minus(&mut self) {
        self.buffer.append(glyph::PLUS_MINUS);
    }

    /// The backspace key.
    pub fn backspace(&mut self) {
        self.buffer.backspace();
    }

    /// The CE key.
    pub fn clear_entry(&mut self) {
        self.buffer.clear_entry();
    }

    /// The C key.
    pub fn clear_all(&mut self) {
        self.buffer.clear_all();
    }

    /// The 1/x key.
    pub fn reciprocal(&mut self) {
        self.buffer.reciprocal();
    }

    /// The x² key.
    pub fn square(&mut self) {
        self.buffer.square();
    }

    /// The √ key.
    pub fn sqrt(&mut self) {
        self.buffer.sqrt();
    }

    /// The = key: evaluates the buffered expression.
    ///
    /// On success the displayed result is replaced. On failure the buffer
    /// is left untouched and the notification handler fires once with the
    /// failure text.
    pub fn evaluate(&mut self) -> Result<(), CalcError> {
        match evaluator::evaluate(self.buffer.expression()) {
            Ok(value) => {
                self.buffer.set_result(value);
                Ok(())
            }
            Err(err) => {
                tracing::error!("evaluation failed: {}", err);
                self.notify(&format!("Error: {}", err));
                Err(err)
            }
        }
    }

    /// The microphone key: asks the recognizer to stop while a session is
    /// live, and starts a fresh session otherwise.
    pub fn toggle_listening(&mut self) {
        if self.listening {
            if let Some(recognizer) = self.recognizer.as_mut() {
                recognizer.stop_listening();
            }
        } else {
            self.session = Some(SpeechSession::new());
            if let Some(recognizer) = self.recognizer.as_mut() {
                recognizer.start_listening();
            }
        }
    }

    /// Delivers one recognizer callback.
    ///
    /// The first terminal event of a session wins; later transcripts or
    /// failures from the same session are dropped.
    pub fn speech_event(&mut self, event: SpeechEvent) {
        match event {
            SpeechEvent::Began => {
                self.listening = true;
            }
            SpeechEvent::Ended => {
                self.listening = false;
            }
            SpeechEvent::Transcript(text) => {
                if !self.take_terminal() {
                    return;
                }

                let text = if text.is_empty() {
                    speech::NO_COMMAND.to_string()
                } else {
                    text
                };
                tracing::debug!("transcript received: {}", text);
                self.buffer.set_expression(text);
            }
            SpeechEvent::Failed(err) => {
                if !self.take_terminal() {
                    return;
                }

                tracing::debug!("session ended without a transcript: {}", err);
                self.listening = false;
            }
        }
    }

    /// Replaces the expression with final transcript text.
    pub fn transcript_received(&mut self, text: String) {
        self.speech_event(SpeechEvent::Transcript(text));
    }

    /// The formula as entered so far.
    pub fn expression(&self) -> &str {
        self.buffer.expression()
    }

    /// The last displayed result.
    pub fn display_result(&self) -> &str {
        self.buffer.result()
    }

    /// Whether the user is currently being listened to.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// A copy of the visible state for the rendering layer.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            expression: self.buffer.expression().to_string(),
            result: self.buffer.result().to_string(),
            listening: self.listening,
        }
    }

    fn notify(&mut self, message: &str) {
        if let Some(handler) = self.on_notification.as_mut() {
            handler(message);
        }
    }

    // a session started by the microphone key allows one terminal event;
    // without one, the host is driving the recognizer itself and every
    // terminal event counts
    fn take_terminal(&mut self) -> bool {
        match self.session.as_mut() {
            Some(session) => session.take_terminal(),
            None => true,
        }
    }
}

impl Default for Calculator {
    fn default() -> Calculator {
        Calculator::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use crate::speech::SpeechError;

    fn capture_notifications(calc: &mut Calculator) -> Rc<RefCell<Vec<String>>> {
        let notifications = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&notifications);
        calc.set_notification_handler(move |message| {
            sink.borrow_mut().push(message.to_string());
        });
        notifications
    }

    struct FakeRecognizer {
        starts: Rc<Cell<usize>>,
        stops: Rc<Cell<usize>>,
    }

    impl SpeechRecognizer for FakeRecognizer {
        fn start_listening(&mut self) {
            self.starts.set(self.starts.get() + 1);
        }

        fn stop_listening(&mut self) {
            self.stops.set(self.stops.get() + 1);
        }
    }

    fn fake_recognizer(calc: &mut Calculator) -> (Rc<Cell<usize>>, Rc<Cell<usize>>) {
        let starts = Rc::new(Cell::new(0));
        let stops = Rc::new(Cell::new(0));
        calc.set_recognizer(Box::new(FakeRecognizer {
            starts: Rc::clone(&starts),
            stops: Rc::clone(&stops),
        }));
        (starts, stops)
    }

    #[test]
    fn key_presses_build_the_expression() {
        let mut calc = Calculator::new();
        calc.digit(1);
        calc.operator(Operator::Plus);
        calc.digit(2);
        calc.decimal_point();
        calc.digit(5);
        assert_eq!(calc.expression(), "1+2.5");

        calc.operator(Operator::Divide);
        calc.digit(7);
        assert_eq!(calc.expression(), "1+2.5÷7");
    }

    #[test]
    fn evaluate_replaces_the_displayed_result() {
        let mut calc = Calculator::new();
        calc.digit(7);
        calc.operator(Operator::Divide);
        calc.digit(2);
        assert!(calc.evaluate().is_ok());
        assert_eq!(calc.display_result(), "3.50");
        // the formula stays on screen
        assert_eq!(calc.expression(), "7÷2");
    }

    #[test]
    fn failed_evaluate_keeps_the_result_and_notifies_once() {
        let mut calc = Calculator::new();
        let notifications = capture_notifications(&mut calc);

        calc.digit(2);
        calc.operator(Operator::Plus);
        assert!(calc.evaluate().is_err());

        assert_eq!(calc.display_result(), "2");
        assert_eq!(
            *notifications.borrow(),
            vec!["Error: unexpected end of expression".to_string()]
        );
    }

    #[test]
    fn division_by_zero_notifies_with_its_message() {
        let mut calc = Calculator::new();
        let notifications = capture_notifications(&mut calc);

        calc.digit(1);
        calc.operator(Operator::Divide);
        calc.digit(0);
        assert!(calc.evaluate().is_err());

        assert_eq!(calc.display_result(), "1");
        assert_eq!(
            *notifications.borrow(),
            vec!["Error: Division by zero!".to_string()]
        );
    }

    #[test]
    fn square_on_an_empty_expression_evaluates_to_zero() {
        let mut calc = Calculator::new();
        calc.square();
        assert_eq!(calc.expression(), "0^2");
        assert!(calc.evaluate().is_ok());
        assert_eq!(calc.display_result(), "0");
    }

    #[test]
    fn reciprocal_round_trip() {
        let mut calc = Calculator::new();
        calc.digit(5);
        assert!(calc.evaluate().is_ok());
        assert_eq!(calc.display_result(), "5");

        calc.reciprocal();
        assert_eq!(calc.expression(), "1/(5)");
        assert!(calc.evaluate().is_ok());
        assert_eq!(calc.display_result(), "0.20");
    }

    #[test]
    fn clear_keys() {
        let mut calc = Calculator::new();
        calc.digit(9);
        assert!(calc.evaluate().is_ok());

        calc.clear_entry();
        assert_eq!(
            calc.snapshot(),
            Snapshot {
                expression: String::new(),
                result: "9".to_string(),
                listening: false,
            }
        );

        calc.digit(9);
        calc.clear_all();
        assert_eq!(calc.snapshot(), Snapshot::default());
    }

    #[test]
    fn the_microphone_key_drives_the_recognizer() {
        let mut calc = Calculator::new();
        let (starts, stops) = fake_recognizer(&mut calc);

        calc.toggle_listening();
        assert_eq!(starts.get(), 1);
        assert_eq!(stops.get(), 0);

        calc.speech_event(SpeechEvent::Began);
        assert!(calc.is_listening());

        calc.toggle_listening();
        assert_eq!(starts.get(), 1);
        assert_eq!(stops.get(), 1);

        calc.speech_event(SpeechEvent::Ended);
        assert!(!calc.is_listening());
    }

    #[test]
    fn a_session_honors_only_its_first_transcript() {
        let mut calc = Calculator::new();
        fake_recognizer(&mut calc);

        calc.toggle_listening();
        calc.speech_event(SpeechEvent::Began);
        calc.speech_event(SpeechEvent::Ended);
        calc.speech_event(SpeechEvent::Transcript("2+2".to_string()));
        assert_eq!(calc.expression(), "2+2");

        // a duplicate from the same session changes nothing
        calc.speech_event(SpeechEvent::Transcript("999".to_string()));
        assert_eq!(calc.expression(), "2+2");
    }

    #[test]
    fn an_empty_transcript_becomes_no_command() {
        let mut calc = Calculator::new();
        calc.transcript_received(String::new());
        assert_eq!(calc.expression(), "No Command");
    }

    #[test]
    fn a_failed_session_resets_listening_and_eats_later_events() {
        let mut calc = Calculator::new();
        fake_recognizer(&mut calc);

        calc.toggle_listening();
        calc.speech_event(SpeechEvent::Began);
        calc.speech_event(SpeechEvent::Failed(SpeechError::Recognition(3)));
        assert!(!calc.is_listening());

        calc.speech_event(SpeechEvent::Transcript("1+1".to_string()));
        assert_eq!(calc.expression(), "");
    }

    #[test]
    fn a_new_session_accepts_a_transcript_again() {
        let mut calc = Calculator::new();
        fake_recognizer(&mut calc);

        calc.toggle_listening();
        calc.speech_event(SpeechEvent::Transcript("1".to_string()));
        calc.toggle_listening();
        calc.speech_event(SpeechEvent::Transcript("2".to_string()));
        assert_eq!(calc.expression(), "2");
    }

    #[test]
    fn transcripts_overwrite_typed_input() {
        let mut calc = Calculator::new();
        calc.digit(9);
        calc.operator(Operator::Multiply);
        calc.transcript_received("8—3".to_string());
        assert_eq!(calc.expression(), "8—3");
        assert!(calc.evaluate().is_ok());
        assert_eq!(calc.display_result(), "5");
    }
}
