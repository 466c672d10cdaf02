use core::fmt;

use thiserror::Error;

/// A value was rejected by a property's handler or by a property-specific constraint.
///
/// Carries the property name, the offending value in its wire form, a description of what the
/// property expected, and the underlying cause when there is one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "invalid value {value} for property {property:?}, expected {expected}{}",
    cause_suffix(.cause)
)]
pub struct PropertyValueError {
    pub property: String,
    pub value: String,
    pub expected: &'static str,
    pub cause: Option<String>,
}

impl PropertyValueError {
    pub fn new(
        property: impl Into<String>,
        value: impl fmt::Display,
        expected: &'static str,
    ) -> Self {
        Self {
            property: property.into(),
            value: value.to_string(),
            expected,
            cause: None,
        }
    }

    #[must_use]
    pub fn with_cause(mut self, cause: impl fmt::Display) -> Self {
        self.cause = Some(cause.to_string());
        self
    }
}

fn cause_suffix(cause: &Option<String>) -> String {
    cause
        .as_deref()
        .map(|cause| format!(": {cause}"))
        .unwrap_or_default()
}

/// Errors produced when reading, updating, or (de)serializing spreadsheet metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("unknown property {0:?}")]
    UnknownProperty(String),
    #[error(transparent)]
    InvalidValue(#[from] PropertyValueError),
    #[error("missing property {0:?}")]
    MissingProperty(String),
    #[error("missing properties: {}", .0.join(", "))]
    MissingProperties(Vec<String>),
    #[error("defaults metadata must not have defaults of its own")]
    DefaultsHaveDefaults,
    #[error("property {0:?} cannot be used as a default")]
    NonShareableDefault(String),
    #[error("invalid metadata json: {0}")]
    InvalidJson(String),
}

impl From<serde_json::Error> for MetadataError {
    fn from(err: serde_json::Error) -> Self {
        MetadataError::InvalidJson(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MetadataError>;
