use thiserror::Error;
use validator::ValidationErrors;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("Invalid segment {index}: {reason}")]
    InvalidSegment { index: usize, reason: String },

    #[error("Route has no segments")]
    EmptyRoute,

    #[error("Invalid athlete profile: {0}")]
    InvalidProfile(String),

    #[error("Invalid checkpoint {name}: {reason}")]
    InvalidCheckpoint { name: String, reason: String },

    #[error("Invalid target time: {0}")]
    InvalidTarget(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl PlanError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn invalid_segment(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidSegment {
            index,
            reason: reason.into(),
        }
    }
}

/// Flattens validator field errors into one readable message.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| match &e.message {
                Some(m) => m.to_string(),
                None => format!("{field} is out of range"),
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}
