//! Colon-command parsing for the TUI
//!
//! A handful of vim-style commands are available from the `:` prompt.
//! Parsing is case-insensitive and tolerant of surrounding whitespace.

use crate::error::QuestaError;

/// Commands reachable from the `:` prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Exit the application
    Quit,

    /// Return to the quest board from any other view
    Back,

    /// Toggle the help popup
    Help,
}

impl Command {
    /// Parse the text typed at the `:` prompt (without the leading colon)
    pub fn parse(input: &str) -> Result<Command, QuestaError> {
        match input.trim().to_lowercase().as_str() {
            "quit" | "q" => Ok(Command::Quit),
            "back" | "b" => Ok(Command::Back),
            "help" | "h" => Ok(Command::Help),
            "" => Err(QuestaError::InvalidArgument("empty command".to_string())),
            other => Err(QuestaError::InvalidArgument(format!(
                "unknown command ':{other}' (try :help)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_and_short_forms() {
        assert_eq!(Command::parse("quit").unwrap(), Command::Quit);
        assert_eq!(Command::parse("q").unwrap(), Command::Quit);
        assert_eq!(Command::parse("back").unwrap(), Command::Back);
        assert_eq!(Command::parse("b").unwrap(), Command::Back);
        assert_eq!(Command::parse("help").unwrap(), Command::Help);
        assert_eq!(Command::parse("h").unwrap(), Command::Help);
    }

    #[test]
    fn ignores_case_and_whitespace() {
        assert_eq!(Command::parse("  QUIT ").unwrap(), Command::Quit);
        assert_eq!(Command::parse("Help").unwrap(), Command::Help);
    }

    #[test]
    fn rejects_unknown_and_empty() {
        assert!(Command::parse("frobnicate").is_err());
        assert!(Command::parse("").is_err());
        assert!(Command::parse("   ").is_err());
    }
}
