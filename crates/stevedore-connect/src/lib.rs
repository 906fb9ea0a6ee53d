//! Stevedore Connect: client-side gRPC access to a remote container store
//!
//! This crate turns the [`ContainerStore`](stevedore_core_interface::ContainerStore)
//! contract into calls against a remote containers service.
//!
//! # Architecture
//!
//! - **codec**: lossless conversion between domain containers and wire messages
//! - **listing**: streaming listing with fallback to the unary call for servers
//!   that do not implement streaming
//! - **RemoteContainerStore**: one remote call per operation, errors mapped to
//!   the domain taxonomy at the boundary
//! - **ContainersService**: the transport seam, implemented over tonic by
//!   [`GrpcContainers`]
//!
//! # Example
//!
//! ```rust,no_run
//! use stevedore_connect::{GrpcContainers, RemoteContainerStore};
//! use stevedore_core_interface::ContainerStore;
//! use tokio_util::sync::CancellationToken;
//! use tonic::transport::Channel;
//!
//! async fn example() -> anyhow::Result<()> {
//!     let channel = Channel::from_static("http://10.0.0.5:10010").connect().await?;
//!     let service = GrpcContainers::new(channel).with_namespace("default")?;
//!     let store = RemoteContainerStore::from_service(service);
//!
//!     let containers = store
//!         .list(&["labels.app==web".to_string()], &CancellationToken::new())
//!         .await?;
//!     println!("{} containers", containers.len());
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod error;
pub mod listing;
pub mod service;
pub mod store;

pub use error::ConnectError;
pub use service::{ContainerStream, ContainersService, GrpcContainers, NAMESPACE_HEADER};
pub use store::RemoteContainerStore;
