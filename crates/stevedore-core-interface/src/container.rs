//! Canonical container record and the opaque payloads it carries

use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// A byte payload tagged with the type identifier needed to interpret it.
///
/// The store never looks inside `value`. Two payloads are equal when both the
/// type identifier and the bytes are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TypedPayload {
    /// Type identifier (for example `types.stevedore.dev/runc/v1/Options`)
    pub type_url: String,

    /// Serialized body, opaque to this crate
    pub value: Vec<u8>,
}

impl TypedPayload {
    pub fn new(type_url: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            type_url: type_url.into(),
            value: value.into(),
        }
    }

    pub fn type_url(&self) -> &str {
        &self.type_url
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

/// Runtime used to execute a container.
///
/// `RuntimeInfo::default()` is the zero value: no name and no options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeInfo {
    /// Runtime name (for example `io.stevedore.runc.v2`)
    pub name: String,

    /// Runtime-specific options, opaque to this crate
    pub options: Option<TypedPayload>,
}

impl RuntimeInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: None,
        }
    }

    pub fn with_options(mut self, options: TypedPayload) -> Self {
        self.options = Some(options);
        self
    }
}

/// A container metadata record.
///
/// This is the in-process representation used by callers of a
/// [`ContainerStore`](crate::ContainerStore). It has no knowledge of how the
/// record travels over the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    /// Unique identifier, immutable after creation
    pub id: String,

    /// Free-form labels; an empty map and an absent map are the same thing
    pub labels: HashMap<String, String>,

    /// Image reference, empty when unset
    pub image: String,

    pub runtime: RuntimeInfo,

    /// Runtime-specific container specification
    pub spec: Option<TypedPayload>,

    /// Snapshotter backing the root filesystem
    pub snapshotter: String,

    /// Key of the snapshot within the snapshotter
    pub snapshot_key: String,

    /// Extension data keyed by name. Unknown entries are carried unchanged.
    pub extensions: HashMap<String, TypedPayload>,

    /// Sandbox this container belongs to, empty when none
    pub sandbox_id: String,

    /// Set once by the server at creation
    pub created_at: Option<DateTime<Utc>>,

    /// Advanced by the server on every successful mutation
    pub updated_at: Option<DateTime<Utc>>,
}

impl Container {
    /// Create a container record with only its identifier set
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn with_runtime(mut self, runtime: RuntimeInfo) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn with_spec(mut self, spec: TypedPayload) -> Self {
        self.spec = Some(spec);
        self
    }

    pub fn with_snapshot(
        mut self,
        snapshotter: impl Into<String>,
        snapshot_key: impl Into<String>,
    ) -> Self {
        self.snapshotter = snapshotter.into();
        self.snapshot_key = snapshot_key.into();
        self
    }

    pub fn with_extension(mut self, name: impl Into<String>, payload: TypedPayload) -> Self {
        self.extensions.insert(name.into(), payload);
        self
    }

    pub fn with_sandbox(mut self, sandbox_id: impl Into<String>) -> Self {
        self.sandbox_id = sandbox_id.into();
        self
    }

    /// Whether this container is linked to a sandbox
    pub fn has_sandbox(&self) -> bool {
        !self.sandbox_id.is_empty()
    }
}
