//! Error types for the stevedore-connect crate

use stevedore_core_interface::StoreError;
use thiserror::Error;
use tonic::Code;

#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("gRPC transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("gRPC status error: {0}")]
    Status(#[from] tonic::Status),

    #[error("Invalid namespace metadata: {0}")]
    InvalidMetadata(#[from] tonic::metadata::errors::InvalidMetadataValue),

    #[error("Invalid endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("{0} response carried no container")]
    MissingContainer(&'static str),
}

/// Map a gRPC status onto the domain taxonomy.
///
/// `Unimplemented` lands in `Unavailable`: once a caller sees it the feature
/// is genuinely absent on the server.
pub fn status_to_store_error(status: tonic::Status) -> StoreError {
    let message = if status.message().is_empty() {
        status.code().description().to_string()
    } else {
        status.message().to_string()
    };

    match status.code() {
        Code::NotFound => StoreError::NotFound(message),
        Code::AlreadyExists => StoreError::AlreadyExists(message),
        Code::InvalidArgument => StoreError::InvalidArgument(message),
        Code::Cancelled | Code::DeadlineExceeded => StoreError::canceled(message),
        _ => StoreError::Unavailable(message),
    }
}

impl From<ConnectError> for StoreError {
    fn from(err: ConnectError) -> Self {
        match err {
            ConnectError::Status(status) => status_to_store_error(status),
            ConnectError::InvalidMetadata(e) => StoreError::InvalidArgument(e.to_string()),
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}
