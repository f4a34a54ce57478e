//! Status messages attached to a list view.

use console::Style;
use serde::{Deserialize, Serialize};

/// Severity level for status messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    /// Neutral note, such as an empty result
    Info,
    /// An operation went through
    Success,
    /// Worth a look, such as a page clamped back into range
    Warning,
    /// The command could not do what was asked
    Error,
}

impl MessageLevel {
    /// Terminal style for this level.
    ///
    /// Errors are bold so they stand out in a long listing.
    pub fn style(&self) -> Style {
        match self {
            MessageLevel::Info => Style::new().cyan(),
            MessageLevel::Success => Style::new().green(),
            MessageLevel::Warning => Style::new().yellow(),
            MessageLevel::Error => Style::new().red().bold(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageLevel::Info => "info",
            MessageLevel::Success => "success",
            MessageLevel::Warning => "warning",
            MessageLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for MessageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status message with severity level.
///
/// Messages are printed after the table (or listed under `messages` in
/// structured output) and styled according to their level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The severity level
    pub level: MessageLevel,
    /// The message text
    pub text: String,
}

impl Message {
    /// Create a new message.
    pub fn new(level: MessageLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }

    /// Create an info message.
    pub fn info(text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Info, text)
    }

    /// Create a success message.
    pub fn success(text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Success, text)
    }

    /// Create a warning message.
    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Warning, text)
    }

    /// Create an error message.
    pub fn error(text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Error, text)
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.level, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_shortcuts() {
        assert_eq!(Message::info("test").level, MessageLevel::Info);
        assert_eq!(Message::success("test").level, MessageLevel::Success);
        assert_eq!(Message::warning("test").level, MessageLevel::Warning);
        assert_eq!(Message::error("test").level, MessageLevel::Error);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Message::warning("page 9 is out of range").to_string(),
            "warning: page 9 is out of range"
        );
    }

    #[test]
    fn test_serialization() {
        let msg = Message::warning("Test warning");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"level\":\"warning\""));
        assert!(json.contains("\"text\":\"Test warning\""));
    }
}
