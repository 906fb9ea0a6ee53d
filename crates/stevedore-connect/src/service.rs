//! The remote containers service as seen by the client
//!
//! [`ContainersService`] is the seam between the store logic and the
//! transport. [`GrpcContainers`] implements it over a tonic channel; tests
//! substitute in-memory implementations.

use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;
use stevedore_proto::containers_client::ContainersClient;
use stevedore_proto::{
    CreateContainerRequest, CreateContainerResponse, DeleteContainerRequest, GetContainerRequest,
    GetContainerResponse, ListContainerMessage, ListContainersRequest, ListContainersResponse,
    UpdateContainerRequest, UpdateContainerResponse,
};
use tonic::metadata::AsciiMetadataValue;
use tonic::transport::Channel;
use tonic::Status;

use crate::error::ConnectError;

/// Metadata key carrying the namespace on every request
pub const NAMESPACE_HEADER: &str = "stevedore-namespace";

/// Server-streamed listing, one message per container
pub type ContainerStream = Pin<Box<dyn Stream<Item = Result<ListContainerMessage, Status>> + Send>>;

/// Request/response surface of the remote containers service
#[async_trait]
pub trait ContainersService: Send + Sync + 'static {
    async fn get(&self, request: GetContainerRequest) -> Result<GetContainerResponse, Status>;

    async fn list(&self, request: ListContainersRequest)
        -> Result<ListContainersResponse, Status>;

    /// Open a server stream. Servers without streaming support answer
    /// `Unimplemented`, either here or as the first stream item.
    async fn list_stream(&self, request: ListContainersRequest)
        -> Result<ContainerStream, Status>;

    async fn create(
        &self,
        request: CreateContainerRequest,
    ) -> Result<CreateContainerResponse, Status>;

    async fn update(
        &self,
        request: UpdateContainerRequest,
    ) -> Result<UpdateContainerResponse, Status>;

    async fn delete(&self, request: DeleteContainerRequest) -> Result<(), Status>;
}

/// [`ContainersService`] over a tonic channel.
///
/// Cheap to clone; tonic's `Channel` is reference counted internally.
#[derive(Clone, Debug)]
pub struct GrpcContainers {
    client: ContainersClient<Channel>,

    /// Attached to every request when set
    namespace: Option<AsciiMetadataValue>,
}

impl GrpcContainers {
    pub fn new(channel: Channel) -> Self {
        Self {
            client: ContainersClient::new(channel),
            namespace: None,
        }
    }

    /// Scope every request to `namespace`
    pub fn with_namespace(mut self, namespace: &str) -> Result<Self, ConnectError> {
        self.namespace = Some(namespace.parse()?);
        Ok(self)
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_ref().and_then(|v| v.to_str().ok())
    }

    fn request<T>(&self, message: T) -> tonic::Request<T> {
        let mut req = tonic::Request::new(message);
        if let Some(namespace) = &self.namespace {
            req.metadata_mut()
                .insert(NAMESPACE_HEADER, namespace.clone());
        }
        req
    }
}

#[async_trait]
impl ContainersService for GrpcContainers {
    async fn get(&self, request: GetContainerRequest) -> Result<GetContainerResponse, Status> {
        let response = self.client.clone().get(self.request(request)).await?;
        Ok(response.into_inner())
    }

    async fn list(
        &self,
        request: ListContainersRequest,
    ) -> Result<ListContainersResponse, Status> {
        let response = self.client.clone().list(self.request(request)).await?;
        Ok(response.into_inner())
    }

    async fn list_stream(
        &self,
        request: ListContainersRequest,
    ) -> Result<ContainerStream, Status> {
        let response = self
            .client
            .clone()
            .list_stream(self.request(request))
            .await?;
        Ok(Box::pin(response.into_inner()))
    }

    async fn create(
        &self,
        request: CreateContainerRequest,
    ) -> Result<CreateContainerResponse, Status> {
        let response = self.client.clone().create(self.request(request)).await?;
        Ok(response.into_inner())
    }

    async fn update(
        &self,
        request: UpdateContainerRequest,
    ) -> Result<UpdateContainerResponse, Status> {
        let response = self.client.clone().update(self.request(request)).await?;
        Ok(response.into_inner())
    }

    async fn delete(&self, request: DeleteContainerRequest) -> Result<(), Status> {
        self.client.clone().delete(self.request(request)).await?;
        Ok(())
    }
}
