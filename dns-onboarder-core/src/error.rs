//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error types
pub use dns_onboarder_provider::ProviderError;
pub use dns_onboarder_toolbox::ToolboxError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The record template table is unreadable or structurally malformed
    #[error("Record table error: {0}")]
    RecordTableError(String),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// Toolbox error (converting from library)
    #[error("{0}")]
    Toolbox(#[from] ToolboxError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, resource already exists, etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ValidationError(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::Toolbox(e) => matches!(
                e,
                ToolboxError::ValidationError(_) | ToolboxError::NoRecords(_)
            ),
            Self::StorageError(_) | Self::SerializationError(_) | Self::RecordTableError(_) => {
                false
            }
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
