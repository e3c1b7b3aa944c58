//! # Schema
//!
//! Accepted shape of an RSVP submission.
//!
//! ## Rules
//!
//! - `firstName`, `lastName`: required, non-empty text (trimmed before storing)
//! - `email`: required, general email syntax, must end with `@bu.edu`
//! - `certification`: required, exactly one of `PMP`, `CAPM`, `Both`
//!
//! Every failing rule produces an [`Issue`]. Issues are collected for all
//! fields, so the client can mark every bad input at once. Unknown fields are
//! ignored.
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::{CERTIFICATIONS, Certification, NewRsvp};

pub const EMAIL_DOMAIN: &str = "@bu.edu";
pub const EMAIL_DOMAIN_MESSAGE: &str = "Email must be a Boston University email address (@bu.edu)";

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .unwrap()
});

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub code: &'static str,
    pub message: String,
    pub path: Vec<String>,
}

impl Issue {
    fn new(code: &'static str, message: impl Into<String>, field: Option<&str>) -> Self {
        Self {
            code,
            message: message.into(),
            path: field.map(|f| vec![f.to_string()]).unwrap_or_default(),
        }
    }

    /// Body could not be read as JSON at all.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::new("invalid_json", reason, None)
    }
}

pub fn validate(payload: &Value) -> Result<NewRsvp, Vec<Issue>> {
    let Value::Object(fields) = payload else {
        return Err(vec![Issue::new(
            "invalid_type",
            format!("Expected object, received {}", type_name(payload)),
            None,
        )]);
    };

    let mut issues = Vec::new();

    let first_name = name_field(fields, "firstName", &mut issues);
    let last_name = name_field(fields, "lastName", &mut issues);
    let email = email_field(fields, &mut issues);
    let certification = certification_field(fields, &mut issues);

    match (first_name, last_name, email, certification) {
        (Some(first_name), Some(last_name), Some(email), Some(certification))
            if issues.is_empty() =>
        {
            Ok(NewRsvp {
                first_name,
                last_name,
                email,
                certification,
            })
        }
        _ => Err(issues),
    }
}

pub fn is_email(email: &str) -> bool {
    // The regex crate has no lookahead, so the dot rules live here.
    !email.starts_with('.') && !email.contains("..") && EMAIL.is_match(email)
}

fn string_field<'a>(
    fields: &'a Map<String, Value>,
    field: &str,
    issues: &mut Vec<Issue>,
) -> Option<&'a str> {
    match fields.get(field) {
        Some(Value::String(value)) => Some(value),
        None => {
            issues.push(Issue::new("invalid_type", "Required", Some(field)));
            None
        }
        Some(other) => {
            issues.push(Issue::new(
                "invalid_type",
                format!("Expected string, received {}", type_name(other)),
                Some(field),
            ));
            None
        }
    }
}

fn name_field(fields: &Map<String, Value>, field: &str, issues: &mut Vec<Issue>) -> Option<String> {
    let value = string_field(fields, field, issues)?.trim();

    if value.is_empty() {
        issues.push(Issue::new(
            "too_small",
            "String must contain at least 1 character(s)",
            Some(field),
        ));
        return None;
    }

    Some(value.to_string())
}

fn email_field(fields: &Map<String, Value>, issues: &mut Vec<Issue>) -> Option<String> {
    let email = string_field(fields, "email", issues)?;
    let before = issues.len();

    if !is_email(email) {
        issues.push(Issue::new("invalid_string", "Invalid email", Some("email")));
    }

    if !email.ends_with(EMAIL_DOMAIN) {
        issues.push(Issue::new("custom", EMAIL_DOMAIN_MESSAGE, Some("email")));
    }

    (issues.len() == before).then(|| email.to_string())
}

fn certification_field(fields: &Map<String, Value>, issues: &mut Vec<Issue>) -> Option<Certification> {
    let value = string_field(fields, "certification", issues)?;

    value.parse().ok().or_else(|| {
        let expected = CERTIFICATIONS
            .iter()
            .map(|c| format!("'{c}'"))
            .collect::<Vec<_>>()
            .join(" | ");

        issues.push(Issue::new(
            "invalid_enum_value",
            format!("Invalid enum value. Expected {expected}, received '{value}'"),
            Some("certification"),
        ));
        None
    })
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
