/*!
 * Error types for Stevedore
 */

use stevedore_connect::ConnectError;
use stevedore_core_interface::{ErrorKind, StoreError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StevedoreError>;

#[derive(Error, Debug)]
pub enum StevedoreError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    /// Could not reach the containers service
    #[error("Connection error: {0}")]
    Connect(#[from] ConnectError),

    /// A store operation failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl StevedoreError {
    /// Domain kind of a failed store operation, if this is one
    pub fn store_kind(&self) -> Option<ErrorKind> {
        match self {
            StevedoreError::Store(e) => Some(e.kind()),
            _ => None,
        }
    }

    /// Check if this error is transient (temporary, worth retrying by an outer layer)
    pub fn is_transient(&self) -> bool {
        match self {
            StevedoreError::Connect(ConnectError::Transport(_)) => true,
            StevedoreError::Store(e) => e.kind() == ErrorKind::Unavailable,
            _ => false,
        }
    }
}
