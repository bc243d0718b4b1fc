//! Domain error types.
//!
//! Application boundaries use `anyhow`; these enums describe the failures
//! that callers may want to match on (catalog integrity, comparison
//! arity, settings validation).

use thiserror::Error;

/// Errors raised while loading or querying a broker catalog.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Broker record has an empty {field} (name: {name:?})")]
    EmptyField { field: &'static str, name: String },

    #[error("Duplicate broker id '{id}' ({first} and {second})")]
    DuplicateId {
        id: String,
        first: String,
        second: String,
    },

    #[error("Duplicate broker slug '{slug}' ({first} and {second})")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },

    #[error("Invalid {field} for {name}: {value} (expected 0.0 to 5.0)")]
    InvalidRating {
        name: String,
        field: &'static str,
        value: f64,
    },

    #[error("Invalid slug '{slug}' for {name}: only lowercase letters, digits and '-' are allowed")]
    InvalidSlug { name: String, slug: String },

    #[error("Unknown broker: {0}")]
    UnknownBroker(String),

    #[error("Unsupported catalog format: {0} (expected .toml or .json)")]
    UnsupportedFormat(String),

    #[error("Failed to parse catalog: {0}")]
    Parse(String),
}

/// Errors raised when building a comparison.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompareError {
    #[error("At least 2 brokers are required for a comparison (got {0})")]
    TooFew(usize),

    #[error("At most {max} brokers can be compared at once (got {got})")]
    TooMany { max: usize, got: usize },

    #[error("Broker '{0}' was requested more than once")]
    Repeated(String),
}

/// A single settings field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors raised by the settings form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{} settings field(s) failed validation: {}", .0.len(), join_fields(.0))]
    Invalid(Vec<FieldError>),

    #[error("Failed to parse settings: {0}")]
    Parse(String),
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_error_lists_every_field() {
        let err = SettingsError::Invalid(vec![
            FieldError {
                field: "email",
                message: "Please enter a valid email address.".to_string(),
            },
            FieldError {
                field: "display_name",
                message: "Display name must be at least 2 characters.".to_string(),
            },
        ]);

        let text = err.to_string();
        assert!(text.starts_with("2 settings field(s)"));
        assert!(text.contains("email: Please enter a valid email address."));
        assert!(text.contains("display_name: Display name must be at least 2 characters."));
    }
}
