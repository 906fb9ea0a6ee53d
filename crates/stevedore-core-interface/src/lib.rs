//! Stevedore Core Interface: container records and the store contract
//!
//! This crate defines the canonical [`Container`] record and the
//! [`ContainerStore`] trait through which callers create, read, update,
//! delete and list records. It knows nothing about the wire: remote
//! implementations live in `stevedore-connect`.
//!
//! # Example
//!
//! ```rust,no_run
//! use stevedore_core_interface::{Container, ContainerStore};
//! use tokio_util::sync::CancellationToken;
//!
//! async fn relabel<S: ContainerStore>(store: &S) -> anyhow::Result<()> {
//!     let cancel = CancellationToken::new();
//!
//!     let mut container = store.get("c1", &cancel).await?;
//!     container.labels.insert("tier".to_string(), "backend".to_string());
//!
//!     // Only the labels are replaced; every other stored field is kept
//!     store
//!         .update(container, &["labels".to_string()], &cancel)
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! # Cancellation
//!
//! Every operation takes a [`CancellationToken`] bound to that call. A
//! cancelled call returns [`StoreError::Canceled`]; for `list` the error
//! carries the records that had already arrived.

pub mod container;
pub mod error;
pub mod fieldpaths;

pub use container::{Container, RuntimeInfo, TypedPayload};
pub use error::{ErrorKind, Result, StoreError};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// CRUD-plus-list access to container records.
///
/// Implementations hold no record state of their own, so a single instance may
/// be shared across tasks.
#[async_trait]
pub trait ContainerStore: Send + Sync + 'static {
    /// Fetch one record by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no record has this id.
    async fn get(&self, id: &str, cancel: &CancellationToken) -> Result<Container>;

    /// List every record matching any of `filters`.
    ///
    /// Filters are opaque query expressions interpreted by the backing
    /// service; an empty slice matches everything.
    async fn list(&self, filters: &[String], cancel: &CancellationToken) -> Result<Vec<Container>>;

    /// Store a new record and return it as accepted by the backend, including
    /// backend-assigned fields such as `created_at`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyExists` if the id is taken.
    async fn create(&self, container: Container, cancel: &CancellationToken) -> Result<Container>;

    /// Update the record identified by `container.id`.
    ///
    /// With no `fieldpaths` the whole record is replaced. Otherwise only the
    /// named fields (see [`fieldpaths`]) are taken from `container`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the record does not exist.
    async fn update(
        &self,
        container: Container,
        fieldpaths: &[String],
        cancel: &CancellationToken,
    ) -> Result<Container>;

    /// Remove a record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the record does not exist.
    async fn delete(&self, id: &str, cancel: &CancellationToken) -> Result<()>;
}

/// Convenience methods derived from [`ContainerStore`]
#[async_trait]
pub trait ContainerStoreExt: ContainerStore {
    /// Whether a record with this id exists
    async fn exists(&self, id: &str, cancel: &CancellationToken) -> Result<bool> {
        match self.get(id, cancel).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// List every record without filtering
    async fn list_all(&self, cancel: &CancellationToken) -> Result<Vec<Container>> {
        self.list(&[], cancel).await
    }
}

impl<T: ContainerStore + ?Sized> ContainerStoreExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Single-record store used to exercise the extension trait
    struct OneRecord {
        record: Mutex<Option<Container>>,
    }

    #[async_trait]
    impl ContainerStore for OneRecord {
        async fn get(&self, id: &str, _cancel: &CancellationToken) -> Result<Container> {
            self.record
                .lock()
                .unwrap()
                .clone()
                .filter(|c| c.id == id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))
        }

        async fn list(
            &self,
            _filters: &[String],
            _cancel: &CancellationToken,
        ) -> Result<Vec<Container>> {
            Ok(self.record.lock().unwrap().iter().cloned().collect())
        }

        async fn create(&self, container: Container, _cancel: &CancellationToken) -> Result<Container> {
            *self.record.lock().unwrap() = Some(container.clone());
            Ok(container)
        }

        async fn update(
            &self,
            container: Container,
            _fieldpaths: &[String],
            cancel: &CancellationToken,
        ) -> Result<Container> {
            self.create(container, cancel).await
        }

        async fn delete(&self, _id: &str, _cancel: &CancellationToken) -> Result<()> {
            Err(StoreError::Unavailable("read-only".into()))
        }
    }

    #[test]
    fn test_exists_maps_not_found_to_false() {
        let store = OneRecord {
            record: Mutex::new(Some(Container::new("c1"))),
        };
        let cancel = CancellationToken::new();

        assert!(tokio_test::block_on(store.exists("c1", &cancel)).unwrap());
        assert!(!tokio_test::block_on(store.exists("c2", &cancel)).unwrap());
    }

    #[tokio::test]
    async fn test_list_all_uses_empty_filters() {
        let store = OneRecord {
            record: Mutex::new(Some(Container::new("c1"))),
        };
        let all = store.list_all(&CancellationToken::new()).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[test]
    fn test_store_is_object_safe() {
        fn assert_dyn(_: &dyn ContainerStore) {}
        let store = OneRecord {
            record: Mutex::new(None),
        };
        assert_dyn(&store);
    }
}
