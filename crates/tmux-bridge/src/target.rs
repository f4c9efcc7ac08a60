//! Pane targets: `session`, `session:window` or
//! `session:window.pane`.

use std::fmt;
use std::str::FromStr;

use crate::error::BridgeError;

/// Opaque tmux target, immutable once a session handle holds it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    raw: String,
    session_len: usize,
}

impl Target {
    pub fn parse(raw: &str) -> Result<Self, BridgeError> {
        let raw = raw.trim();
        let session_len = raw.find(':').unwrap_or(raw.len());
        if session_len == 0 {
            return Err(BridgeError::InvalidTarget(raw.to_string()));
        }
        Ok(Self {
            raw: raw.to_string(),
            session_len,
        })
    }

    /// The full target as passed to `-t`.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The session part, used for the existence check.
    pub fn session(&self) -> &str {
        &self.raw[..self.session_len]
    }

    /// The `window[.pane]` part, if any.
    pub fn window_pane(&self) -> Option<&str> {
        self.raw
            .get(self.session_len + 1..)
            .filter(|rest| !rest.is_empty())
    }
}

impl FromStr for Target {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_session() {
        let t = Target::parse("myserver").expect("valid");
        assert_eq!(t.as_str(), "myserver");
        assert_eq!(t.session(), "myserver");
        assert_eq!(t.window_pane(), None);
    }

    #[test]
    fn full_pane_target() {
        let t: Target = "work:2.1".parse().expect("valid");
        assert_eq!(t.session(), "work");
        assert_eq!(t.window_pane(), Some("2.1"));
        assert_eq!(t.to_string(), "work:2.1");
    }

    #[test]
    fn trailing_colon_has_no_window() {
        let t = Target::parse("work:").expect("valid");
        assert_eq!(t.session(), "work");
        assert_eq!(t.window_pane(), None);
    }

    #[test]
    fn empty_session_rejected() {
        assert!(matches!(
            Target::parse(":1.0"),
            Err(BridgeError::InvalidTarget(_))
        ));
        assert!(matches!(
            Target::parse("  "),
            Err(BridgeError::InvalidTarget(_))
        ));
    }
}
