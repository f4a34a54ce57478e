//! Output mode control.
//!
//! [`OutputMode`] is the user-facing `--output` flag; [`TextMode`] tells the
//! table renderer whether to emit ANSI styling.

use clap::ValueEnum;
use console::Term;

/// Controls how a list view is rendered.
///
/// - `Auto` - Detect terminal capabilities (TTY → Term, pipe → Text)
/// - `Term` - Always apply terminal styling
/// - `Text` - Never apply styling
/// - `Json`, `Yaml` - Serialize the list view directly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputMode {
    #[default]
    Auto,
    Term,
    Text,
    Json,
    Yaml,
}

impl OutputMode {
    /// Returns true for the modes that serialize data instead of drawing a
    /// table.
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputMode::Json | OutputMode::Yaml)
    }

    /// Resolves Auto mode to Term or Text based on whether stdout is a
    /// terminal. Other modes are returned unchanged.
    pub fn resolve_auto(&self) -> OutputMode {
        match self {
            OutputMode::Auto => {
                if Term::stdout().is_term() {
                    OutputMode::Term
                } else {
                    OutputMode::Text
                }
            }
            other => *other,
        }
    }

    /// The text mode for table rendering; `None` for structured modes.
    pub fn to_text_mode(&self) -> Option<TextMode> {
        match self.resolve_auto() {
            OutputMode::Term => Some(TextMode::Styled),
            OutputMode::Text => Some(TextMode::Plain),
            _ => None,
        }
    }
}

/// Whether rendered text carries ANSI styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMode {
    Styled,
    Plain,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_modes() {
        assert!(OutputMode::Json.is_structured());
        assert!(OutputMode::Yaml.is_structured());
        assert!(!OutputMode::Term.is_structured());
        assert!(!OutputMode::Auto.is_structured());
    }

    #[test]
    fn test_explicit_modes_resolve_to_themselves() {
        assert_eq!(OutputMode::Text.resolve_auto(), OutputMode::Text);
        assert_eq!(OutputMode::Json.resolve_auto(), OutputMode::Json);
    }

    #[test]
    fn test_text_modes() {
        assert_eq!(OutputMode::Term.to_text_mode(), Some(TextMode::Styled));
        assert_eq!(OutputMode::Text.to_text_mode(), Some(TextMode::Plain));
        assert_eq!(OutputMode::Yaml.to_text_mode(), None);
        assert!(OutputMode::Auto.to_text_mode().is_some());
    }
}
