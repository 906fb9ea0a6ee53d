/*!
 * Stevedore - a remote container metadata store client
 *
 * Presents create/get/update/delete/list over container records that live
 * behind a gRPC containers service:
 * - Lossless conversion between domain records and wire messages
 * - Streaming listing with transparent unary fallback
 * - Cancellation on every call, partial results for cancelled listings
 * - A single domain error taxonomy regardless of transport
 */

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{ClientConfig, LogLevel};
pub use error::{Result, StevedoreError};
pub use stevedore_connect::{ConnectError, GrpcContainers, RemoteContainerStore};
pub use stevedore_core_interface::{
    fieldpaths, Container, ContainerStore, ContainerStoreExt, ErrorKind, RuntimeInfo, StoreError,
    TypedPayload,
};

use tonic::transport::Endpoint;
use tracing::info;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the endpoint described by `config` without connecting
pub fn endpoint(config: &ClientConfig) -> Result<Endpoint> {
    let endpoint = Endpoint::from_shared(config.endpoint.clone()).map_err(|e| {
        ConnectError::InvalidEndpoint {
            endpoint: config.endpoint.clone(),
            reason: e.to_string(),
        }
    })?;

    let endpoint = endpoint.connect_timeout(config.connect_timeout());
    Ok(match config.request_timeout() {
        Some(timeout) => endpoint.timeout(timeout),
        None => endpoint,
    })
}

/// Connect to the containers service described by `config`
pub async fn connect(config: &ClientConfig) -> Result<RemoteContainerStore> {
    info!("Connecting to containers service at {}", config.endpoint);

    let channel = endpoint(config)?
        .connect()
        .await
        .map_err(ConnectError::from)?;

    let mut service = GrpcContainers::new(channel);
    if let Some(ref namespace) = config.namespace {
        service = service.with_namespace(namespace)?;
    }

    Ok(RemoteContainerStore::from_service(service))
}
