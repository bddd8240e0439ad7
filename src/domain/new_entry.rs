//! Validation and sanitization of submitted guestbook fields.
//!
//! A [`NewEntry`] can only be built through [`NewEntry::from_fields`], so any
//! value handed to a store has already been checked and cleaned.

use serde_json::Value;

use crate::error::{FIELDS_REQUIRED, GuestbookError};

/// Maximum length of a display name, in characters.
pub const NAME_MAX_CHARS: usize = 50;

/// Maximum length of a message, in characters.
pub const MESSAGE_MAX_CHARS: usize = 500;

/// A validated, sanitized submission ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    name: String,
    message: String,
}

impl NewEntry {
    /// Validates and sanitizes raw JSON fields.
    ///
    /// A field is present when it is a non-empty string, a non-zero number,
    /// or `true`; numbers and booleans are coerced to their string form.
    /// Each value is truncated to its maximum length and then has every `<`
    /// and `>` removed. Truncation runs first, so a value at the limit that
    /// contains brackets comes out shorter than the limit.
    ///
    /// # Errors
    ///
    /// Returns [`GuestbookError::Validation`] if either field is missing,
    /// `null`, empty, `0`, `false`, an array, or an object.
    pub fn from_fields(name: Option<&Value>, message: Option<&Value>) -> Result<Self, GuestbookError> {
        let (Some(name), Some(message)) = (name.and_then(coerce), message.and_then(coerce)) else {
            return Err(GuestbookError::Validation(FIELDS_REQUIRED.to_string()));
        };
        Ok(Self {
            name: sanitize(&name, NAME_MAX_CHARS),
            message: sanitize(&message, MESSAGE_MAX_CHARS),
        })
    }

    /// Sanitized display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sanitized message body.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Consumes the entry, returning `(name, message)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.name, self.message)
    }
}

/// Coerces a present JSON value to text; absent values yield `None`.
fn coerce(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(number_text(n)),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Renders a number the way a browser would for integral values: `1.0`
/// becomes `"1"`. Magnitudes from 1e21 up keep serde's exponent form.
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}

/// Truncates to `max_chars` characters, then strips angle brackets.
fn sanitize(raw: &str, max_chars: usize) -> String {
    raw.chars()
        .take(max_chars)
        .filter(|c| !matches!(c, '<' | '>'))
        .collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    fn build(name: Value, message: Value) -> Result<NewEntry, GuestbookError> {
        NewEntry::from_fields(Some(&name), Some(&message))
    }

    #[test]
    fn strips_tags_from_name() {
        let Ok(entry) = build(json!("<script>"), json!("hi")) else {
            panic!("valid entry");
        };
        assert_eq!(entry.name(), "script");
        assert_eq!(entry.message(), "hi");
    }

    #[test]
    fn empty_name_is_rejected() {
        let result = build(json!(""), json!("hi"));
        let Err(GuestbookError::Validation(msg)) = result else {
            panic!("expected validation error");
        };
        assert_eq!(msg, "Name and message are required");
    }

    #[test]
    fn missing_and_null_fields_are_rejected() {
        assert!(NewEntry::from_fields(None, Some(&json!("hi"))).is_err());
        assert!(NewEntry::from_fields(Some(&json!("bob")), None).is_err());
        assert!(build(json!(null), json!("hi")).is_err());
        assert!(build(json!("bob"), json!(null)).is_err());
    }

    #[test]
    fn falsy_scalars_are_rejected() {
        assert!(build(json!(0), json!("hi")).is_err());
        assert!(build(json!(false), json!("hi")).is_err());
        assert!(build(json!("bob"), json!(0.0)).is_err());
    }

    #[test]
    fn containers_are_rejected() {
        assert!(build(json!(["a"]), json!("hi")).is_err());
        assert!(build(json!("bob"), json!({"text": "hi"})).is_err());
    }

    #[test]
    fn scalars_are_coerced_to_text() {
        let Ok(entry) = build(json!(1337), json!(true)) else {
            panic!("valid entry");
        };
        assert_eq!(entry.name(), "1337");
        assert_eq!(entry.message(), "true");
    }

    #[test]
    fn integral_floats_drop_the_fraction() {
        let Ok(entry) = build(json!(1.0), json!(-42.0)) else {
            panic!("valid entry");
        };
        assert_eq!(entry.name(), "1");
        assert_eq!(entry.message(), "-42");

        let Ok(entry) = build(json!(2.5), json!(123_456_789_012.0)) else {
            panic!("valid entry");
        };
        assert_eq!(entry.name(), "2.5");
        assert_eq!(entry.message(), "123456789012");
    }

    #[test]
    fn whitespace_only_is_accepted_verbatim() {
        let Ok(entry) = build(json!("   "), json!(" ")) else {
            panic!("valid entry");
        };
        assert_eq!(entry.name(), "   ");
    }

    #[test]
    fn truncates_to_field_limits() {
        let Ok(entry) = build(json!("n".repeat(80)), json!("m".repeat(900))) else {
            panic!("valid entry");
        };
        assert_eq!(entry.name().chars().count(), NAME_MAX_CHARS);
        assert_eq!(entry.message().chars().count(), MESSAGE_MAX_CHARS);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let Ok(entry) = build(json!("é".repeat(60)), json!("🎮".repeat(501))) else {
            panic!("valid entry");
        };
        assert_eq!(entry.name(), "é".repeat(50));
        assert_eq!(entry.message(), "🎮".repeat(500));
    }

    #[test]
    fn truncation_happens_before_stripping() {
        // 49 letters then "<b>": truncation keeps "<", stripping then drops it.
        let raw = format!("{}<b>", "a".repeat(49));
        let Ok(entry) = build(json!(raw), json!("hi")) else {
            panic!("valid entry");
        };
        assert_eq!(entry.name(), "a".repeat(49));
    }

    #[test]
    fn brackets_past_the_limit_do_not_pull_in_extra_text() {
        let raw = format!("<<{}", "z".repeat(60));
        let Ok(entry) = build(json!(raw), json!("hi")) else {
            panic!("valid entry");
        };
        assert_eq!(entry.name(), "z".repeat(48));
    }
}
