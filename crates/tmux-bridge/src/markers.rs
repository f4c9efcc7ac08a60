//! Marker pairs bounding a command's output region, extraction of that
//! region from a capture, and cleanup of shell framing inside it.

use std::sync::LazyLock;

use regex::Regex;

/// Every marker starts with this; lines still containing it are artifacts.
pub const MARKER_PREFIX: &str = "__BRIDGE_";

/// How a marker echo looks when the shell echoes the typed command back.
const MARKER_ECHO_PREFIX: &str = "echo '__BRIDGE_";

/// Leading `$`, `#` or `>` shell prompt, stripped for comparisons only.
static PROMPT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[$#>]\s*").expect("prompt prefix pattern is valid"));

const TOKEN_LEN: usize = 12;

/// Start/end sentinels for one `execute_and_wait` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPair {
    pub start: String,
    pub end: String,
}

impl MarkerPair {
    /// Fresh pair with a random 12-hex-digit token.
    pub fn generate() -> Self {
        let token = uuid::Uuid::new_v4().simple().to_string();
        Self::with_token(&token[..TOKEN_LEN])
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            start: format!("{MARKER_PREFIX}START_{token}__"),
            end: format!("{MARKER_PREFIX}END_{token}__"),
        }
    }

    pub fn start_echo(&self) -> String {
        echo_command(&self.start)
    }

    pub fn end_echo(&self) -> String {
        echo_command(&self.end)
    }

    /// Raw text strictly between the last rendered start marker and the
    /// last rendered end marker, if the end follows the start.
    pub fn extract<'a>(&self, buffer: &'a str) -> Option<&'a str> {
        let start = rfind_rendered(buffer, &self.start)?;
        let end = rfind_rendered(buffer, &self.end)?;
        let body_start = start + self.start.len();
        if end < body_start {
            return None;
        }
        Some(&buffer[body_start..end])
    }

    /// True once the start marker shows up as echo output on its own line.
    pub fn start_rendered(&self, buffer: &str) -> bool {
        buffer.lines().any(|line| line.trim() == self.start)
    }
}

fn echo_command(marker: &str) -> String {
    format!("echo '{marker}'")
}

/// Last occurrence of `marker` that is not the argument of its own echo
/// command. Typed-ahead input is echoed by the tty before the shell runs it,
/// so the command text can appear long before its output does. The closing
/// quote is checked too, since a wrapped echo line can split `echo '` from
/// the marker.
fn rfind_rendered(buffer: &str, marker: &str) -> Option<usize> {
    buffer
        .rmatch_indices(marker)
        .map(|(idx, _)| idx)
        .find(|&idx| {
            !buffer[..idx].ends_with("echo '") && !buffer[idx + marker.len()..].starts_with('\'')
        })
}

/// Strip marker echoes, the echoed command and residual marker artifacts
/// from the text between the markers.
pub fn clean_marker_output(raw: &str, command: &str) -> String {
    let command = command.trim();
    let kept: Vec<&str> = raw
        .lines()
        .filter(|line| {
            let stripped = line.trim();
            let without_prompt = PROMPT_PREFIX.replace(stripped, "");
            !(without_prompt.starts_with(MARKER_ECHO_PREFIX)
                || is_command_echo(stripped, &without_prompt, command)
                || stripped.contains(MARKER_PREFIX))
        })
        .collect();
    trim_blank_lines(&kept).join("\n")
}

/// The submitted command echoed back, either after a bare prompt character
/// (`$ ls`) or after a full prompt (`user@host:~$ ls`).
fn is_command_echo(stripped: &str, without_prompt: &str, command: &str) -> bool {
    if command.is_empty() {
        return false;
    }
    without_prompt == command
        || stripped
            .strip_suffix(command)
            .is_some_and(|before| before.trim_end().ends_with(['$', '#', '>']))
}

/// Drop leading and trailing whitespace-only lines.
pub(crate) fn trim_blank_lines<'a, 'b>(lines: &'b [&'a str]) -> &'b [&'a str] {
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());
    match (first, last) {
        (Some(first), Some(last)) => &lines[first..=last],
        _ => &[],
    }
}
