//! Field validation building blocks.
//!
//! The versioned request types declare their rules by calling these
//! helpers; failures collect into a per-field message map rendered in
//! the 422 error envelope.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

/// Wire format for `publish_date` fields.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Collected per-field validation messages.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }

    /// `Ok(())` when no rule failed, otherwise the collected messages.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Require a non-empty string; returns the value for chaining further rules.
pub fn required<'a>(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&'a str>,
) -> Option<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            errors.add(field, format!("The {field} field is required."));
            None
        }
    }
}

pub fn max_len(errors: &mut ValidationErrors, field: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.add(
            field,
            format!("The {field} may not be greater than {max} characters."),
        );
    }
}

/// Minimal well-formedness check: local part, `@`, domain with a dot.
pub fn email_format(errors: &mut ValidationErrors, field: &str, value: &str) {
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    };
    if !valid {
        errors.add(field, format!("The {field} must be a valid email address."));
    }
}

/// Registration password policy: at least 8 characters, mixed case, a
/// digit and a symbol.
pub fn password_policy(errors: &mut ValidationErrors, field: &str, value: &str) {
    if value.chars().count() < 8 {
        errors.add(field, format!("The {field} must be at least 8 characters."));
    }
    if !(value.chars().any(|c| c.is_uppercase()) && value.chars().any(|c| c.is_lowercase())) {
        errors.add(
            field,
            format!("The {field} must contain at least one uppercase and one lowercase letter."),
        );
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        errors.add(field, format!("The {field} must contain at least one number."));
    }
    if !value.chars().any(|c| !c.is_alphanumeric()) {
        errors.add(field, format!("The {field} must contain at least one symbol."));
    }
}

/// Parse a datetime in the wire format, recording a failure otherwise.
pub fn datetime(
    errors: &mut ValidationErrors,
    field: &str,
    value: &str,
) -> Option<NaiveDateTime> {
    match NaiveDateTime::parse_from_str(value, DATETIME_FORMAT) {
        Ok(dt) => Some(dt),
        Err(_) => {
            errors.add(
                field,
                format!("The {field} does not match the format Y-m-d H:i:s."),
            );
            None
        }
    }
}
