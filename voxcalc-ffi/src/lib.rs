//! C ABI over the calculator for host UIs in other languages.
//!
//! Every function takes the handle returned by [`voxcalc_new`]. Strings
//! returned from here are heap allocated and must be given back to
//! [`voxcalc_string_free`].

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::ptr;

use voxcalc_core::{Calculator, Operator, SpeechError, SpeechEvent, SpeechRecognizer};

fn alloc_c_str(s: &str) -> *mut c_char {
    // expressions never contain NUL, but a transcript could
    match CString::new(s) {
        Ok(val) => val.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

struct HookRecognizer {
    start: extern "C" fn(),
    stop: extern "C" fn(),
}

impl SpeechRecognizer for HookRecognizer {
    fn start_listening(&mut self) {
        (self.start)();
    }

    fn stop_listening(&mut self) {
        (self.stop)();
    }
}

#[no_mangle]
pub extern "C" fn voxcalc_new() -> *mut Calculator {
    Box::into_raw(Box::new(Calculator::new()))
}

#[no_mangle]
pub unsafe extern "C" fn voxcalc_free(calc: *mut Calculator) {
    // let the compiler drop the box
    let _ = Box::from_raw(calc);
}

/// `digit` is the key's value, 0 to 9.
#[no_mangle]
pub unsafe extern "C" fn voxcalc_digit(calc: *mut Calculator, digit: u8) {
    if digit > 9 {
        return;
    }
    (*calc).digit(digit);
}

/// `op` is 0 for plus, 1 for minus, 2 for multiply and 3 for divide.
#[no_mangle]
pub unsafe extern "C" fn voxcalc_operator(calc: *mut Calculator, op: c_int) {
    let op = match op {
        0 => Operator::Plus,
        1 => Operator::Minus,
        2 => Operator::Multiply,
        3 => Operator::Divide,
        _ => return,
    };
    (*calc).operator(op);
}

#[no_mangle]
pub unsafe extern "C" fn voxcalc_percent(calc: *mut Calculator) {
    (*calc).percent();
}

#[no_mangle]
pub unsafe extern "C" fn voxcalc_decimal_point(calc: *mut Calculator) {
    (*calc).decimal_point();
}

#[no_mangle]
pub unsafe extern "C" fn voxcalc_plus_minus(calc: *mut Calculator) {
    (*calc).plus_minus();
}

#[no_mangle]
pub unsafe extern "C" fn voxcalc_backspace(calc: *mut Calculator) {
    (*calc).backspace();
}

#[no_mangle]
pub unsafe extern "C" fn voxcalc_clear_entry(calc: *mut Calculator) {
    (*calc).clear_entry();
}

#[no_mangle]
pub unsafe extern "C" fn voxcalc_clear_all(calc: *mut Calculator) {
    (*calc).clear_all();
}

#[no_mangle]
pub unsafe extern "C" fn voxcalc_reciprocal(calc: *mut Calculator) {
    (*calc).reciprocal();
}

#[no_mangle]
pub unsafe extern "C" fn voxcalc_square(calc: *mut Calculator) {
    (*calc).square();
}

#[no_mangle]
pub unsafe extern "C" fn voxcalc_sqrt(calc: *mut Calculator) {
    (*calc).sqrt();
}

/// Runs the `=` key. Returns null on success, or the notification text to
/// show the user on failure.
#[no_mangle]
pub unsafe extern "C" fn voxcalc_evaluate(calc: *mut Calculator) -> *mut c_char {
    match (*calc).evaluate() {
        Ok(()) => ptr::null_mut(),
        Err(err) => alloc_c_str(&format!("Error: {}", err)),
    }
}

#[no_mangle]
pub unsafe extern "C" fn voxcalc_expression(calc: *mut Calculator) -> *mut c_char {
    alloc_c_str((*calc).expression())
}

#[no_mangle]
pub unsafe extern "C" fn voxcalc_result(calc: *mut Calculator) -> *mut c_char {
    alloc_c_str((*calc).display_result())
}

#[no_mangle]
pub unsafe extern "C" fn voxcalc_is_listening(calc: *mut Calculator) -> bool {
    (*calc).is_listening()
}

/// Installs the host's recognizer hooks; the microphone key calls them.
#[no_mangle]
pub unsafe extern "C" fn voxcalc_set_recognizer(
    calc: *mut Calculator,
    start: extern "C" fn(),
    stop: extern "C" fn(),
) {
    (*calc).set_recognizer(Box::new(HookRecognizer { start, stop }));
}

#[no_mangle]
pub unsafe extern "C" fn voxcalc_toggle_listening(calc: *mut Calculator) {
    (*calc).toggle_listening();
}

#[no_mangle]
pub unsafe extern "C" fn voxcalc_speech_began(calc: *mut Calculator) {
    (*calc).speech_event(SpeechEvent::Began);
}

#[no_mangle]
pub unsafe extern "C" fn voxcalc_speech_ended(calc: *mut Calculator) {
    (*calc).speech_event(SpeechEvent::Ended);
}

#[no_mangle]
pub unsafe extern "C" fn voxcalc_speech_failed(calc: *mut Calculator, code: c_int) {
    (*calc).speech_event(SpeechEvent::Failed(SpeechError::Recognition(code)));
}

#[no_mangle]
pub unsafe extern "C" fn voxcalc_speech_cancelled(calc: *mut Calculator) {
    (*calc).speech_event(SpeechEvent::Failed(SpeechError::Cancelled));
}

/// Delivers the final transcript of a recognition session.
#[no_mangle]
pub unsafe extern "C" fn voxcalc_transcript(calc: *mut Calculator, text: *const c_char) {
    let text = match CStr::from_ptr(text).to_str() {
        Ok(val) => val,
        Err(_) => return,
    };
    (*calc).transcript_received(text.to_string());
}

#[no_mangle]
pub unsafe extern "C" fn voxcalc_string_free(s: *mut c_char) {
    if !s.is_null() {
        let _ = CString::from_raw(s);
    }
}
