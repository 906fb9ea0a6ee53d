//! Domain error taxonomy shared by every `ContainerStore` implementation

use crate::container::Container;
use thiserror::Error;

/// Coarse classification of a [`StoreError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    InvalidArgument,
    Canceled,
    Unavailable,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::Canceled => "canceled",
            ErrorKind::Unavailable => "unavailable",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The call was cancelled. `partial` holds whatever records a listing
    /// had already received; it is empty for every other operation.
    #[error("canceled: {message}")]
    Canceled {
        message: String,
        partial: Vec<Container>,
    },

    #[error("unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// A cancellation carrying no partial results
    pub fn canceled(message: impl Into<String>) -> Self {
        StoreError::Canceled {
            message: message.into(),
            partial: Vec::new(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::NotFound(_) => ErrorKind::NotFound,
            StoreError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            StoreError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            StoreError::Canceled { .. } => ErrorKind::Canceled,
            StoreError::Unavailable(_) => ErrorKind::Unavailable,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_already_exists(&self) -> bool {
        self.kind() == ErrorKind::AlreadyExists
    }

    pub fn is_canceled(&self) -> bool {
        self.kind() == ErrorKind::Canceled
    }

    /// Records received before a listing was cancelled
    pub fn partial_results(&self) -> &[Container] {
        match self {
            StoreError::Canceled { partial, .. } => partial,
            _ => &[],
        }
    }

    pub fn into_partial_results(self) -> Vec<Container> {
        match self {
            StoreError::Canceled { partial, .. } => partial,
            _ => Vec::new(),
        }
    }
}
