//! Speech input plumbing between the platform recognizer and the
//! calculator.
//!
//! The platform owns the actual recognizer. The calculator drives it
//! through [`SpeechRecognizer`] when the microphone key is pressed, and the
//! platform reports back with [`SpeechEvent`]s.

use thiserror::Error;

/// Transcript text used when a session ends with nothing recognized.
pub(crate) const NO_COMMAND: &str = "No Command";

/// Why a recognition session ended without usable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpeechError {
    /// The recognizer reported a platform error code.
    #[error("speech recognition failed (code {0})")]
    Recognition(i32),
    /// The session was torn down before it produced a transcript.
    #[error("speech recognition was cancelled")]
    Cancelled,
}

/// One callback from the platform recognizer.
///
/// `Transcript` and `Failed` are terminal: the first one ends the session
/// and later ones in the same session are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    /// The user started speaking.
    Began,
    /// The user stopped speaking. A terminal event may still follow.
    Ended,
    /// The final transcript of the session.
    Transcript(String),
    /// The session failed or was cancelled.
    Failed(SpeechError),
}

/// The platform speech recognizer, driven by the microphone key.
pub trait SpeechRecognizer {
    /// Begins a recognition session. Events flow back through
    /// [`crate::Calculator::speech_event`].
    fn start_listening(&mut self);

    /// Asks the recognizer to wrap up the current session early.
    fn stop_listening(&mut self);
}

/// Bookkeeping for one recognition session: at most one terminal event is
/// honored.
#[derive(Debug, Default)]
pub(crate) struct SpeechSession {
    finished: bool,
}

impl SpeechSession {
    pub(crate) fn new() -> SpeechSession {
        SpeechSession::default()
    }

    /// Claims the session's terminal event. Returns false when one was
    /// already claimed.
    pub(crate) fn take_terminal(&mut self) -> bool {
        if self.finished {
            return false;
        }
        self.finished = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_first_terminal_event_is_claimed() {
        let mut session = SpeechSession::new();
        assert!(session.take_terminal());
        assert!(!session.take_terminal());
        assert!(!session.take_terminal());
    }

    #[test]
    fn errors_carry_the_platform_code() {
        assert_eq!(
            SpeechError::Recognition(7).to_string(),
            "speech recognition failed (code 7)"
        );
    }
}
