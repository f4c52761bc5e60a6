//! Input validation for quest fields

use crate::error::QuestaError;

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_NOTES_LENGTH: usize = 1000;

/// Validate and normalize a quest title.
///
/// Titles are trimmed, must be non-empty, at most 200 characters, and must
/// start with an alphanumeric character.
pub fn validate_title(title: &str) -> Result<String, QuestaError> {
    let trimmed = title.trim();

    if trimmed.is_empty() {
        return Err(QuestaError::InvalidArgument(
            "quest title cannot be empty".into(),
        ));
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(QuestaError::InvalidArgument(format!(
            "quest title cannot exceed {MAX_TITLE_LENGTH} characters"
        )));
    }
    if !trimmed.chars().next().is_some_and(|c| c.is_alphanumeric()) {
        return Err(QuestaError::InvalidArgument(
            "quest title cannot start with a special character".into(),
        ));
    }

    Ok(trimmed.to_string())
}

/// Validate quest notes; blank notes collapse to `None`
pub fn validate_notes(notes: Option<String>) -> Result<Option<String>, QuestaError> {
    let Some(notes) = notes else {
        return Ok(None);
    };

    let trimmed = notes.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MAX_NOTES_LENGTH {
        return Err(QuestaError::InvalidArgument(format!(
            "quest notes cannot exceed {MAX_NOTES_LENGTH} characters"
        )));
    }

    Ok(Some(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_are_trimmed() {
        assert_eq!(validate_title("  hello  ").unwrap(), "hello");
    }

    #[test]
    fn empty_and_whitespace_titles_fail() {
        assert!(validate_title("").is_err());
        assert!(validate_title("   \t ").is_err());
    }

    #[test]
    fn overlong_title_fails() {
        let long = "x".repeat(MAX_TITLE_LENGTH + 1);
        assert!(validate_title(&long).is_err());
        let ok = "x".repeat(MAX_TITLE_LENGTH);
        assert!(validate_title(&ok).is_ok());
    }

    #[test]
    fn title_must_start_alphanumeric() {
        assert!(validate_title("!important").is_err());
        assert!(validate_title("#1 priority").is_err());
        assert!(validate_title("42 things").is_ok());
    }

    #[test]
    fn blank_notes_collapse_to_none() {
        assert_eq!(validate_notes(Some("   ".into())).unwrap(), None);
        assert_eq!(validate_notes(None).unwrap(), None);
        assert_eq!(
            validate_notes(Some(" keep me ".into())).unwrap().as_deref(),
            Some("keep me")
        );
    }

    #[test]
    fn overlong_notes_fail() {
        let long = "n".repeat(MAX_NOTES_LENGTH + 1);
        assert!(validate_notes(Some(long)).is_err());
    }
}
