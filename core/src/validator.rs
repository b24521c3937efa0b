use std::collections::BTreeMap;

use crate::models::NoteDraft;

pub const TITLE_MAX_CHARS: usize = 150;
pub const CONTENT_MAX_CHARS: usize = 5000;

pub const MSG_REQUIRED: &str = "must be provided";
pub const MSG_TITLE_TOO_LONG: &str = "must not be more than 150 characters long";
pub const MSG_CONTENT_TOO_LONG: &str = "must not be more than 5000 characters long";

/// Field-level validation result, keyed by field name.
///
/// Only the first failure recorded for a field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validator {
    errors: BTreeMap<String, String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no field has an error
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record `message` for `field` unless the field already has one
    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    /// Record `message` for `field` when `ok` is false
    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.add_error(field, message);
        }
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }
}

/// Non-empty after trimming leading/trailing whitespace
pub fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// At least `n` characters (codepoints, not bytes)
pub fn min_length(value: &str, n: usize) -> bool {
    value.chars().count() >= n
}

/// At most `n` characters (codepoints, not bytes)
pub fn max_length(value: &str, n: usize) -> bool {
    value.chars().count() <= n
}

/// Run the note field rules. Blank checks run before length checks.
pub fn validate_note(note: &NoteDraft) -> Validator {
    let mut v = Validator::new();

    v.check(not_blank(&note.title), "title", MSG_REQUIRED);
    v.check(not_blank(&note.content), "content", MSG_REQUIRED);
    v.check(
        max_length(&note.title, TITLE_MAX_CHARS),
        "title",
        MSG_TITLE_TOO_LONG,
    );
    v.check(
        max_length(&note.content, CONTENT_MAX_CHARS),
        "content",
        MSG_CONTENT_TOO_LONG,
    );

    v
}
