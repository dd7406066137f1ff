//! Core error types for skillpath-core.
//!
//! This module defines the error hierarchy using thiserror. Every fallible
//! operation in the library returns one of the leaf enums below; callers that
//! mix concerns can funnel them into [`CoreError`].

use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

use crate::navigation::View;

/// Core error type for skillpath-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Navigation-related errors
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// Assessment-related errors
    #[error("Assessment error: {0}")]
    Assessment(#[from] AssessmentError),

    /// Code execution errors
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Errors raised by the navigation state machine.
///
/// A failed dispatch never mutates the navigator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavigationError {
    /// The action is not valid from the current view
    #[error("'{action}' is not allowed from the {from} view")]
    IllegalTransition { from: View, action: &'static str },

    /// The target view needs context that has not been supplied
    #[error("cannot enter the {view} view without {payload}")]
    MissingPayload { view: View, payload: &'static str },

    /// The action needs a signed-in user
    #[error("no user is signed in")]
    NotAuthenticated,

    /// The module's prerequisite has not been completed
    #[error("module {0} is locked")]
    ModuleLocked(u32),

    /// The skill's prerequisite has not been completed
    #[error("skill {0} is locked")]
    SkillLocked(u32),

    /// The module id is not part of the current learning path
    #[error("module {0} is not part of the current learning path")]
    UnknownModule(u32),

    /// The skill id is not part of the profile's roadmap
    #[error("skill {0} is not part of the current roadmap")]
    UnknownSkill(u32),

    /// The course id is not in the course catalog
    #[error("course {0} does not exist")]
    UnknownCourse(u32),

    /// Form input was rejected
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Profiling answer was rejected
    #[error(transparent)]
    Assessment(#[from] AssessmentError),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more form fields were rejected, keyed by field name
    #[error("invalid form: {}", describe_fields(.0))]
    Fields(BTreeMap<String, String>),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    /// Message recorded for a single field, if any.
    pub fn field(&self, name: &str) -> Option<&str> {
        match self {
            ValidationError::Fields(fields) => fields.get(name).map(String::as_str),
            ValidationError::InvalidValue { field, message } if field == name => {
                Some(message.as_str())
            }
            ValidationError::InvalidValue { .. } => None,
        }
    }
}

fn describe_fields(fields: &BTreeMap<String, String>) -> String {
    fields
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Assessment errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssessmentError {
    /// Every question has already been answered
    #[error("no question left to answer")]
    NoQuestion,

    /// The selected option does not exist
    #[error("choice {choice} is out of range for question {question_id} ({options} options)")]
    InvalidChoice {
        question_id: u32,
        choice: usize,
        options: usize,
    },

    /// The background generation task went away before delivering a result
    #[error("simulated operation ended without a result")]
    Abandoned,
}

/// Errors from the code execution seam.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// No runner exists for the language tag
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// The submission could not be evaluated at all
    #[error("malformed submission: {0}")]
    Malformed(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not name a configuration value
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_render_in_key_order() {
        let mut fields = BTreeMap::new();
        fields.insert("password".to_string(), "Password is required".to_string());
        fields.insert("email".to_string(), "Email is required".to_string());
        let err = ValidationError::Fields(fields);

        assert_eq!(
            err.to_string(),
            "invalid form: email: Email is required, password: Password is required"
        );
        assert_eq!(err.field("email"), Some("Email is required"));
        assert_eq!(err.field("name"), None);
    }

    #[test]
    fn test_navigation_error_wraps_into_core() {
        let err: CoreError = NavigationError::NotAuthenticated.into();
        assert!(matches!(err, CoreError::Navigation(NavigationError::NotAuthenticated)));
    }
}
