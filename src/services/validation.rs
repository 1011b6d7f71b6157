//! Form validation
//!
//! Field rules are plain functions run in order against a [`FormData`];
//! every failing rule adds one message to the field's list. Fields without
//! failures do not appear in the result.

use crate::models::{FormData, FormValue};
use std::collections::BTreeMap;

/// Field name -> ordered failure messages
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// A single field rule. Returns a message when the value is rejected.
pub type Validator = fn(field: &str, value: Option<&FormValue>) -> Option<String>;

/// Rule set: each field with the validators applied to it, in order
pub type Rules = [(&'static str, &'static [Validator])];

/// Why a field could not be read as text
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldTypeError {
    #[error("is required")]
    Missing,

    #[error("must be a string")]
    NotText,
}

/// Rejects absent fields and blank text
pub fn presence_validator(field: &str, value: Option<&FormValue>) -> Option<String> {
    let blank = match value {
        None => true,
        Some(FormValue::Text(text)) => text.trim().is_empty(),
        Some(FormValue::File { .. }) => false,
    };

    blank.then(|| format!("{} {}", field, FieldTypeError::Missing))
}

/// Rejects values that are not text. Absence is left to `presence_validator`.
pub fn string_validator(field: &str, value: Option<&FormValue>) -> Option<String> {
    match value {
        Some(FormValue::File { .. }) => Some(format!("{} {}", field, FieldTypeError::NotText)),
        _ => None,
    }
}

/// Run `rules` against `form`, collecting messages per failing field
pub fn validate(rules: &Rules, form: &FormData) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for &(field, validators) in rules {
        let value = form.get(field);
        let messages: Vec<String> = validators
            .iter()
            .filter_map(|validator| validator(field, value))
            .collect();

        if !messages.is_empty() {
            errors.insert(field.to_string(), messages);
        }
    }

    errors
}

/// Read a field as non-blank text
pub fn require_text(form: &FormData, field: &str) -> Result<String, FieldTypeError> {
    match form.get(field) {
        Some(FormValue::Text(text)) if !text.trim().is_empty() => Ok(text.clone()),
        Some(FormValue::File { .. }) => Err(FieldTypeError::NotText),
        _ => Err(FieldTypeError::Missing),
    }
}

/// Submitted news article form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsForm {
    pub title: String,
    pub content: String,
    /// Checkbox state; only the literal `"on"` counts as checked
    pub published: bool,
}

impl NewsForm {
    pub const RULES: &'static Rules = &[
        (
            "title",
            &[presence_validator as Validator, string_validator as Validator],
        ),
        (
            "content",
            &[presence_validator as Validator, string_validator as Validator],
        ),
    ];

    /// Validate and extract the form.
    ///
    /// # Panics
    ///
    /// If a field that passed validation still cannot be read as text. That is
    /// a bug in the rule set, not bad input.
    pub fn parse(form: &FormData) -> Result<Self, FieldErrors> {
        let errors = validate(Self::RULES, form);
        if !errors.is_empty() {
            return Err(errors);
        }

        let title = match require_text(form, "title") {
            Ok(title) => title,
            Err(err) => unreachable!("title passed validation but {}", err),
        };
        let content = match require_text(form, "content") {
            Ok(content) => content,
            Err(err) => unreachable!("content passed validation but {}", err),
        };

        Ok(Self {
            title,
            content,
            published: form.text("published") == Some("on"),
        })
    }
}
