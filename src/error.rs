//! Error types for the onboarding flow.

use crate::onboarding::state::OnboardingStep;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),

    #[error("Picker error: {0}")]
    Pick(#[from] PickError),

    #[error("Validation rejected: {0}")]
    Validation(#[from] ValidationError),

    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// A step's input was rejected by its validator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Phone number is empty")]
    EmptyPhoneNumber,

    #[error("Phone number must be exactly 10 digits, got {len} characters")]
    PhoneNumberLength { len: usize },

    #[error("Phone number may only contain digits")]
    PhoneNumberNotNumeric,

    #[error("First name is empty")]
    EmptyFirstName,

    #[error("No profile picture selected")]
    NoPictureSelected,
}

/// Persistent store errors. Always recoverable from the flow's point of view.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to open store: {0}")]
    Open(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),
}

/// Image acquisition failed (distinct from the user cancelling).
#[derive(Debug, thiserror::Error)]
pub enum PickError {
    #[error("Failed to read image {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Failed to decode image: {0}")]
    Decode(String),
}

/// Converting the picture into its stored form failed.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("Invalid JPEG quality {0}, expected 1-100")]
    InvalidQuality(u8),

    #[error("JPEG encoding failed: {0}")]
    Jpeg(String),
}

/// Errors returned by the flow controller.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("Validation rejected: {0}")]
    Validation(#[from] ValidationError),

    #[error("Action requires step {expected}, but the flow is on {actual}")]
    WrongStep {
        expected: OnboardingStep,
        actual: OnboardingStep,
    },

    #[error("Final step reached, call finish to complete onboarding")]
    FinishRequired,

    #[error("Picker error: {0}")]
    Pick(#[from] PickError),

    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
