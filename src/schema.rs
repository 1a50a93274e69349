//! Validation rules for user-submitted todo fields.
//!
//! One declarative rule set, shared by every submission path: the command
//! layer validates authoritatively, and any client may run the same checks
//! pre-flight. Pure functions of their input, no side effects.

use serde::Deserialize;
use thiserror::Error;

pub const TITLE_MAX: usize = 50;
pub const CONTENT_MAX: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field} must be between 1 and {max} characters")]
    Length { field: &'static str, max: usize },
}

/// A raw todo submission, before any checking. Absent fields stay `None`.
#[derive(Debug, Clone, Deserialize)]
pub struct TodoDraft {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// A submission that passed validation; the only shape persistence accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoInput {
    pub title: String,
    pub content: String,
}

impl TodoDraft {
    /// Checks fields in declaration order; the first failure wins.
    pub fn validate(self) -> Result<TodoInput, ValidationError> {
        let title = require_bounded(self.title, "title", TITLE_MAX)?;
        let content = require_bounded(self.content, "content", CONTENT_MAX)?;
        Ok(TodoInput { title, content })
    }
}

fn require_bounded(
    value: Option<String>,
    field: &'static str,
    max: usize,
) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::MissingField(field))?;
    let len = value.chars().count();
    if len == 0 || len > max {
        return Err(ValidationError::Length { field, max });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, content: &str) -> TodoDraft {
        TodoDraft {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
        }
    }

    #[test]
    fn accepts_fields_within_bounds() {
        let input = draft("Buy milk", "2%, 1 gallon").validate().unwrap();
        assert_eq!(input.title, "Buy milk");
        assert_eq!(input.content, "2%, 1 gallon");
    }

    #[test]
    fn accepts_exact_boundary_lengths() {
        assert!(draft(&"t".repeat(TITLE_MAX), "x").validate().is_ok());
        assert!(draft("x", &"c".repeat(CONTENT_MAX)).validate().is_ok());
    }

    #[test]
    fn rejects_missing_title() {
        let draft = TodoDraft {
            title: None,
            content: Some("x".to_string()),
        };
        assert_eq!(
            draft.validate().unwrap_err(),
            ValidationError::MissingField("title")
        );
    }

    #[test]
    fn rejects_missing_content() {
        let draft = TodoDraft {
            title: Some("x".to_string()),
            content: None,
        };
        assert_eq!(
            draft.validate().unwrap_err(),
            ValidationError::MissingField("content")
        );
    }

    #[test]
    fn rejects_empty_title() {
        assert_eq!(
            draft("", "x").validate().unwrap_err(),
            ValidationError::Length {
                field: "title",
                max: TITLE_MAX
            }
        );
    }

    #[test]
    fn rejects_overlong_fields() {
        assert_eq!(
            draft(&"t".repeat(TITLE_MAX + 1), "x").validate().unwrap_err(),
            ValidationError::Length {
                field: "title",
                max: TITLE_MAX
            }
        );
        assert_eq!(
            draft("x", &"c".repeat(CONTENT_MAX + 1))
                .validate()
                .unwrap_err(),
            ValidationError::Length {
                field: "content",
                max: CONTENT_MAX
            }
        );
    }

    #[test]
    fn first_failing_field_wins() {
        let draft = TodoDraft {
            title: None,
            content: None,
        };
        assert_eq!(
            draft.validate().unwrap_err(),
            ValidationError::MissingField("title")
        );
    }

    #[test]
    fn bounds_count_characters_not_bytes() {
        // 50 multibyte characters are within bounds even though the byte
        // length is far over 50.
        assert!(draft(&"ü".repeat(TITLE_MAX), "x").validate().is_ok());
    }
}
