//! Error Types

use thiserror::Error;

/// Result type alias for license-core operations
pub type Result<T> = std::result::Result<T, LicenseError>;

/// Errors raised by the license domain and screen state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LicenseError {
    /// Status string outside the known lifecycle
    #[error("Unknown license status: {0}")]
    UnknownStatus(String),

    /// Wizard transition not allowed from the current step
    #[error("Invalid buy-flow transition: {0}")]
    InvalidTransition(String),

    /// Continue pressed without a selected project
    #[error("No project selected")]
    NoProjectSelected,

    /// Pagination parameters out of range
    #[error("Invalid page size: {0}")]
    InvalidPageSize(usize),
}

impl LicenseError {
    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            LicenseError::UnknownStatus(_) => "This license has an unrecognized status.".into(),
            LicenseError::NoProjectSelected => "Please select a project to continue.".into(),
            LicenseError::InvalidTransition(_) => "That step is not available right now.".into(),
            LicenseError::InvalidPageSize(_) => "Invalid page size.".into(),
        }
    }
}
