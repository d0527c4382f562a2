//! Browser console logging.
//!
//! Lines are prefixed with the game name. An optional payload is appended
//! as compact JSON. Off wasm32 (native unit tests) every call is a no-op.

use serde::Serialize;

const PREFIX: &str = "Cookie Clicker Workshop";

/// Render one log line. Serialization failures degrade to the bare message.
pub fn format_line<T: Serialize>(message: &str, payload: Option<&T>) -> String {
    match payload.map(serde_json::to_string) {
        Some(Ok(json)) => format!("{PREFIX}: {message} {json}"),
        _ => format!("{PREFIX}: {message}"),
    }
}

pub fn info(message: &str) {
    emit(Level::Info, &format_line::<()>(message, None));
}

pub fn info_with<T: Serialize>(message: &str, payload: &T) {
    emit(Level::Info, &format_line(message, Some(payload)));
}

pub fn warn_with<T: Serialize>(message: &str, payload: &T) {
    emit(Level::Warn, &format_line(message, Some(payload)));
}

enum Level {
    Info,
    Warn,
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    match level {
        Level::Info => web_sys::console::log_1(&line.into()),
        Level::Warn => web_sys::console::warn_1(&line.into()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, _line: &str) {}
