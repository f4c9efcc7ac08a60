//! Terminal control-sequence stripping for captured pane text.
//!
//! Handles:
//! - CSI sequences: `ESC [ <params> <letter>` (cursor movement, SGR colors)
//! - OSC sequences: `ESC ] ... ST` where ST is BEL or `ESC \`
//! - Character-set selection: `ESC ( X` / `ESC ) X` for X in `AB012`
//! - Keypad mode: `ESC =` / `ESC >`
//! - DEC line attributes: `ESC # <digit>`
//!
//! Everything else, including newlines, carriage returns and whitespace,
//! passes through untouched.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static CONTROL_SEQUENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\x1b(?:",
        r"\[[0-9;?]*[A-Za-z]",
        r"|\].*?(?:\x07|\x1b\\)",
        r"|[()][AB012]",
        r"|[>=]",
        r"|#[0-9]",
        r")",
    ))
    .expect("control sequence pattern is valid")
});

/// Remove terminal control sequences from `text`. Total: never fails.
pub fn strip_control_sequences(text: &str) -> Cow<'_, str> {
    if !text.contains('\x1b') {
        return Cow::Borrowed(text);
    }
    CONTROL_SEQUENCE.replace_all(text, "")
}
