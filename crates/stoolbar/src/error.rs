//! Error types for toolbar construction.

use stoolbar_core::HostError;

/// Result type alias for toolbar operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring or materializing a toolbar.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The builder was constructed from an unsuitable host.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An entity cannot be turned into a widget.
    #[error("missing reference: {0}")]
    MissingReference(String),

    /// The host toolkit rejected an operation.
    #[error(transparent)]
    Host(#[from] HostError),
}

impl Error {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn missing_reference(message: impl Into<String>) -> Self {
        Self::MissingReference(message.into())
    }
}
