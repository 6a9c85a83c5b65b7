//! Core error types.

/// Errors that can occur in the intake core.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    /// A configuration or input value failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type IntakeResult<T> = std::result::Result<T, IntakeError>;
