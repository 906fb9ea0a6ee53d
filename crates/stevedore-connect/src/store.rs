//! RemoteContainerStore: ContainerStore implementation backed by a remote service

use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use stevedore_core_interface::{Container, ContainerStore, Result, StoreError};
use stevedore_proto::prost_types::FieldMask;
use stevedore_proto::{
    CreateContainerRequest, DeleteContainerRequest, GetContainerRequest, UpdateContainerRequest,
};
use tokio_util::sync::CancellationToken;
use tonic::transport::Channel;
use tonic::Status;
use tracing::debug;

use crate::codec::{container_from_proto, container_to_proto};
use crate::error::{status_to_store_error, ConnectError};
use crate::listing;
use crate::service::{ContainersService, GrpcContainers};

/// A [`ContainerStore`] that forwards every operation to a remote containers
/// service.
///
/// The store keeps no records of its own; cloning it only clones a handle to
/// the service, so clones may be used from many tasks at once.
///
/// # Example
///
/// ```rust,no_run
/// use stevedore_connect::RemoteContainerStore;
/// use stevedore_core_interface::{Container, ContainerStore};
/// use tokio_util::sync::CancellationToken;
/// use tonic::transport::Channel;
///
/// # async fn example() -> anyhow::Result<()> {
/// let channel = Channel::from_static("http://10.0.0.5:10010").connect().await?;
/// let store = RemoteContainerStore::new(channel);
///
/// let cancel = CancellationToken::new();
/// let created = store
///     .create(Container::new("c1").with_image("img:latest"), &cancel)
///     .await?;
/// println!("created at {:?}", created.created_at);
/// # Ok(())
/// # }
/// ```
pub struct RemoteContainerStore<S = GrpcContainers> {
    service: Arc<S>,
}

impl<S> Clone for RemoteContainerStore<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for RemoteContainerStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteContainerStore")
            .field("service", &self.service)
            .finish()
    }
}

impl RemoteContainerStore<GrpcContainers> {
    /// Create a store over an established channel, without a namespace
    pub fn new(channel: Channel) -> Self {
        Self::from_service(GrpcContainers::new(channel))
    }
}

impl<S: ContainersService> RemoteContainerStore<S> {
    /// Create a store over any implementation of the remote service
    pub fn from_service(service: S) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }
}

/// Run a unary call, giving up as soon as `cancel` fires
async fn call<T, F>(op: &'static str, cancel: &CancellationToken, fut: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, Status>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!("{} canceled before the server answered", op);
            Err(StoreError::canceled(format!("{} canceled", op)))
        }
        result = fut => result.map_err(status_to_store_error),
    }
}

#[async_trait]
impl<S: ContainersService> ContainerStore for RemoteContainerStore<S> {
    async fn get(&self, id: &str, cancel: &CancellationToken) -> Result<Container> {
        debug!("Getting container {}", id);

        let request = GetContainerRequest { id: id.to_string() };
        let response = call("Get", cancel, self.service.get(request)).await?;

        let container = response
            .container
            .ok_or(ConnectError::MissingContainer("Get"))?;
        Ok(container_from_proto(container))
    }

    async fn list(&self, filters: &[String], cancel: &CancellationToken) -> Result<Vec<Container>> {
        debug!("Listing containers with {} filters", filters.len());

        let containers = listing::list(self.service.as_ref(), filters, cancel).await?;

        debug!("Listed {} containers", containers.len());
        Ok(containers)
    }

    async fn create(&self, container: Container, cancel: &CancellationToken) -> Result<Container> {
        debug!("Creating container {}", container.id);

        let request = CreateContainerRequest {
            container: Some(container_to_proto(container)),
        };
        let response = call("Create", cancel, self.service.create(request)).await?;

        let created = response
            .container
            .ok_or(ConnectError::MissingContainer("Create"))?;
        Ok(container_from_proto(created))
    }

    async fn update(
        &self,
        container: Container,
        fieldpaths: &[String],
        cancel: &CancellationToken,
    ) -> Result<Container> {
        debug!(
            "Updating container {} (fields: {})",
            container.id,
            if fieldpaths.is_empty() {
                "all".to_string()
            } else {
                fieldpaths.join(",")
            }
        );

        // No mask at all means "replace everything"
        let update_mask = if fieldpaths.is_empty() {
            None
        } else {
            Some(FieldMask {
                paths: fieldpaths.to_vec(),
            })
        };

        let request = UpdateContainerRequest {
            container: Some(container_to_proto(container)),
            update_mask,
        };
        let response = call("Update", cancel, self.service.update(request)).await?;

        let updated = response
            .container
            .ok_or(ConnectError::MissingContainer("Update"))?;
        Ok(container_from_proto(updated))
    }

    async fn delete(&self, id: &str, cancel: &CancellationToken) -> Result<()> {
        debug!("Deleting container {}", id);

        let request = DeleteContainerRequest { id: id.to_string() };
        call("Delete", cancel, self.service.delete(request)).await
    }
}
