//! Core logic for a single screen, voice enabled calculator.
//!
//! The crate owns the expression buffer the keypad edits and the pipeline
//! that turns the buffered text into a displayable result. The host UI
//! renders state, forwards key presses and runs the platform speech
//! recognizer; everything else happens behind [`Calculator`].

pub mod buffer;
pub mod controller;
pub mod evaluator;
pub mod glyph;
pub mod lexer;
pub mod node;
pub mod parser;
pub mod speech;

pub use self::controller::{Calculator, Snapshot};
pub use self::evaluator::CalcError;
pub use self::glyph::Operator;
pub use self::speech::{SpeechError, SpeechEvent, SpeechRecognizer};
