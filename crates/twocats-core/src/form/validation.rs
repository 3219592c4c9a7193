use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum message length, counted in characters after trimming
pub const MIN_MESSAGE_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Name,
    Email,
    Service,
    Message,
}

impl FieldName {
    /// Fields in check order
    pub const ALL: [FieldName; 4] = [Self::Name, Self::Email, Self::Service, Self::Message];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Service => "service",
            Self::Message => "message",
        }
    }

    /// Human label shown next to the field
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Service => "Service",
            Self::Message => "Project description",
        }
    }

    /// Free-text inputs get focus styling; the service select does not
    pub fn is_text_input(&self) -> bool {
        !matches!(self, Self::Service)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "service" => Ok(Self::Service),
            "message" => Ok(Self::Message),
            other => Err(crate::Error::MissingElement(format!("form field '{}'", other))),
        }
    }
}

/// Submitted text for each contact form field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValues {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub message: String,
}

impl FieldValues {
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Name => &self.name,
            FieldName::Email => &self.email,
            FieldName::Service => &self.service,
            FieldName::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        let slot = match field {
            FieldName::Name => &mut self.name,
            FieldName::Email => &mut self.email,
            FieldName::Service => &mut self.service,
            FieldName::Message => &mut self.message,
        };
        *slot = value.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter your name")]
    NameRequired,

    #[error("Please enter your email address")]
    EmailRequired,

    #[error("Please enter a valid email address")]
    EmailInvalid,

    #[error("Please choose a service")]
    ServiceRequired,

    #[error("Please describe your project")]
    MessageRequired,

    #[error("The project description needs at least {min} characters")]
    MessageTooShort { min: usize },
}

impl ValidationError {
    /// Field the error belongs to
    pub fn field(&self) -> FieldName {
        match self {
            Self::NameRequired => FieldName::Name,
            Self::EmailRequired | Self::EmailInvalid => FieldName::Email,
            Self::ServiceRequired => FieldName::Service,
            Self::MessageRequired | Self::MessageTooShort { .. } => FieldName::Message,
        }
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
}

/// Loose `local@domain.tld` check: one `@`, a dot after it, no whitespace.
///
/// Deliberately permissive; `a..b@c.d` passes.
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Check a single field on its own
pub fn validate_field(field: FieldName, value: &str) -> Option<ValidationError> {
    let trimmed = value.trim();
    match field {
        FieldName::Name if trimmed.is_empty() => Some(ValidationError::NameRequired),
        FieldName::Email if trimmed.is_empty() => Some(ValidationError::EmailRequired),
        FieldName::Email if !is_valid_email(value) => Some(ValidationError::EmailInvalid),
        FieldName::Service if trimmed.is_empty() => Some(ValidationError::ServiceRequired),
        FieldName::Message if trimmed.is_empty() => Some(ValidationError::MessageRequired),
        FieldName::Message if trimmed.chars().count() < MIN_MESSAGE_CHARS => {
            Some(ValidationError::MessageTooShort {
                min: MIN_MESSAGE_CHARS,
            })
        }
        _ => None,
    }
}

/// Validate every field in fixed order: name, email, service, message.
///
/// Callers surface only the first error.
pub fn validate(values: &FieldValues) -> Vec<ValidationError> {
    FieldName::ALL
        .iter()
        .filter_map(|field| validate_field(*field, values.get(*field)))
        .collect()
}
