//! Bulk retrieval: server streaming first, unary fallback
//!
//! The listing runs as an explicit state machine:
//!
//! ```text
//!  AttemptStream ──ok──▶ Streaming ──end──▶ Completed
//!       │                  │  │
//!       │ unimplemented    │  └──error / cancel──▶ Failed / Completed(partial)
//!       ▼                  │
//!  FallbackUnary ◀─────────┘ unimplemented as first response
//!       │
//!       └──▶ Completed / Failed
//! ```
//!
//! `Unimplemented` is a routing signal here, never a caller-visible error.
//! If the unary call also answers `Unimplemented` it surfaces as
//! `Unavailable`.

use futures::StreamExt;
use stevedore_core_interface::{Container, StoreError};
use stevedore_proto::ListContainersRequest;
use tokio_util::sync::CancellationToken;
use tonic::{Code, Status};
use tracing::debug;

use crate::codec::{container_from_proto, containers_from_proto};
use crate::error::{status_to_store_error, ConnectError};
use crate::service::{ContainerStream, ContainersService};

enum ListState {
    AttemptStream,
    Streaming {
        stream: ContainerStream,
        received: Vec<Container>,
    },
    FallbackUnary,
    Completed(Result<Vec<Container>, StoreError>),
    Failed(StoreError),
}

impl ListState {
    fn name(&self) -> &'static str {
        match self {
            ListState::AttemptStream => "attempt_stream",
            ListState::Streaming { .. } => "streaming",
            ListState::FallbackUnary => "fallback_unary",
            ListState::Completed(_) => "completed",
            ListState::Failed(_) => "failed",
        }
    }
}

/// List containers matching `filters` through `service`.
///
/// A cancelled token ends the stream early with `StoreError::Canceled`
/// carrying the records received so far.
pub async fn list<S>(
    service: &S,
    filters: &[String],
    cancel: &CancellationToken,
) -> Result<Vec<Container>, StoreError>
where
    S: ContainersService + ?Sized,
{
    let mut state = ListState::AttemptStream;

    loop {
        let next = match state {
            ListState::AttemptStream => attempt_stream(service, filters, cancel).await,
            ListState::Streaming { stream, received } => {
                receive_next(stream, received, cancel).await
            }
            ListState::FallbackUnary => fallback_unary(service, filters, cancel).await,
            ListState::Completed(result) => return result,
            ListState::Failed(err) => return Err(err),
        };

        if !matches!(next, ListState::Streaming { .. }) {
            debug!("Container listing -> {}", next.name());
        }
        state = next;
    }
}

fn request(filters: &[String]) -> ListContainersRequest {
    ListContainersRequest {
        filters: filters.to_vec(),
    }
}

/// Route a failed streaming call: `Unimplemented` falls back, anything else fails
fn on_stream_error(status: Status) -> ListState {
    if status.code() == Code::Unimplemented {
        debug!("Streaming listing not implemented by server: {}", status.message());
        ListState::FallbackUnary
    } else {
        ListState::Failed(status_to_store_error(status))
    }
}

async fn attempt_stream<S>(service: &S, filters: &[String], cancel: &CancellationToken) -> ListState
where
    S: ContainersService + ?Sized,
{
    let opened = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            return ListState::Failed(StoreError::canceled("container listing canceled"));
        }
        opened = service.list_stream(request(filters)) => opened,
    };

    match opened {
        Ok(stream) => ListState::Streaming {
            stream,
            received: Vec::new(),
        },
        Err(status) => on_stream_error(status),
    }
}

async fn receive_next(
    mut stream: ContainerStream,
    mut received: Vec<Container>,
    cancel: &CancellationToken,
) -> ListState {
    let item = tokio::select! {
        biased;
        _ = cancel.cancelled() => return canceled(received),
        item = stream.next() => item,
    };

    match item {
        None => ListState::Completed(Ok(received)),
        Some(Ok(message)) => {
            if cancel.is_cancelled() {
                return canceled(received);
            }
            match message.container {
                Some(container) => {
                    received.push(container_from_proto(container));
                    ListState::Streaming { stream, received }
                }
                None => ListState::Failed(ConnectError::MissingContainer("ListStream").into()),
            }
        }
        // Only the first response can signal a server without streaming
        Some(Err(status)) if received.is_empty() => on_stream_error(status),
        Some(Err(status)) => {
            debug!(
                "Container stream failed after {} records, discarding them",
                received.len()
            );
            ListState::Failed(status_to_store_error(status))
        }
    }
}

fn canceled(received: Vec<Container>) -> ListState {
    debug!("Container listing canceled after {} records", received.len());
    ListState::Completed(Err(StoreError::Canceled {
        message: "container listing canceled".to_string(),
        partial: received,
    }))
}

async fn fallback_unary<S>(service: &S, filters: &[String], cancel: &CancellationToken) -> ListState
where
    S: ContainersService + ?Sized,
{
    let response = tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            return ListState::Failed(StoreError::canceled("container listing canceled"));
        }
        response = service.list(request(filters)) => response,
    };

    match response {
        Ok(response) => ListState::Completed(Ok(containers_from_proto(response.containers))),
        Err(status) => ListState::Failed(status_to_store_error(status)),
    }
}
