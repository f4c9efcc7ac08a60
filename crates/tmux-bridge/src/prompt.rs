//! Prompt-pattern fallback helpers.
//!
//! The fallback diffs captures by position: whatever follows the length of
//! the pre-command capture is treated as new. This assumes scroll-back only
//! grows, which stops holding once the pane hits its history limit.

use regex::Regex;

use crate::markers::trim_blank_lines;

/// Suffix of `current` beyond the length of `before`.
pub fn positional_suffix<'a>(before: &str, current: &'a str) -> &'a str {
    let mut at = before.len();
    if at >= current.len() {
        return "";
    }
    while !current.is_char_boundary(at) {
        at += 1;
    }
    &current[at..]
}

/// Lines of `text` without the blank rows tmux pads the screen with.
fn content_lines(text: &str) -> Vec<&str> {
    let lines: Vec<&str> = text.lines().collect();
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].to_vec()
}

/// Last non-blank line of a capture.
pub fn last_content_line(text: &str) -> Option<&str> {
    text.lines().rev().find(|l| !l.trim().is_empty())
}

/// If the last line of `new_content` is a prompt, the output between the
/// echoed command (first line) and that prompt.
pub fn completed_output(new_content: &str, prompt: &Regex) -> Option<String> {
    let lines = content_lines(new_content);
    let last = lines.last()?;
    if !prompt.is_match(last) {
        return None;
    }
    if lines.len() <= 1 {
        return Some(String::new());
    }
    Some(lines[1..lines.len() - 1].join("\n"))
}

/// Output once the visible screen already shows a prompt: drop the echoed
/// command, and the trailing prompt if `new_content` has caught up to it.
pub fn strip_echo_and_prompt(new_content: &str, prompt: &Regex) -> String {
    let lines = content_lines(new_content);
    let mut body: &[&str] = lines.get(1..).unwrap_or(&[]);
    if let Some((last, rest)) = body.split_last() {
        if prompt.is_match(last) {
            body = rest;
        }
    }
    trim_blank_lines(body).join("\n")
}
