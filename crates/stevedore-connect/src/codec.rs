//! Conversion between domain containers and their wire messages
//!
//! Opaque payloads (runtime options, spec, extensions) are carried as
//! `google.protobuf.Any` and never inspected. Both directions are total:
//! decoding never fails, an absent runtime decodes to the zero runtime.

use chrono::{DateTime, Utc};
use prost_types::{Any, Timestamp};
use stevedore_core_interface::{Container, RuntimeInfo, TypedPayload};
use stevedore_proto as proto;
use tracing::warn;

pub fn payload_to_any(payload: TypedPayload) -> Any {
    Any {
        type_url: payload.type_url,
        value: payload.value,
    }
}

pub fn payload_from_any(any: Any) -> TypedPayload {
    TypedPayload {
        type_url: any.type_url,
        value: any.value,
    }
}

/// Convert to a wire timestamp.
///
/// The wire format has no leap seconds. chrono reports an instant inside a
/// leap second as `23:59:59` with nanos >= 1e9, and it is carried over into
/// the first second of the next minute (`23:59:60.5` becomes `00:00:00.5`).
/// Every other instant converts losslessly.
pub fn timestamp_to_proto(time: DateTime<Utc>) -> Timestamp {
    let mut ts = Timestamp {
        seconds: time.timestamp(),
        nanos: time.timestamp_subsec_nanos() as i32,
    };
    ts.normalize();
    ts
}

/// Convert a wire timestamp, returning `None` if chrono cannot represent it
pub fn timestamp_from_proto(ts: Timestamp) -> Option<DateTime<Utc>> {
    let mut ts = ts;
    ts.normalize();
    let time = DateTime::from_timestamp(ts.seconds, ts.nanos as u32);
    if time.is_none() {
        warn!(
            "Dropping out-of-range timestamp (seconds={}, nanos={})",
            ts.seconds, ts.nanos
        );
    }
    time
}

pub fn container_to_proto(container: Container) -> proto::Container {
    let extensions = container
        .extensions
        .into_iter()
        .map(|(name, payload)| (name, payload_to_any(payload)))
        .collect();

    proto::Container {
        id: container.id,
        labels: container.labels,
        image: container.image,
        runtime: Some(proto::container::Runtime {
            name: container.runtime.name,
            options: container.runtime.options.map(payload_to_any),
        }),
        spec: container.spec.map(payload_to_any),
        snapshotter: container.snapshotter,
        snapshot_key: container.snapshot_key,
        created_at: container.created_at.map(timestamp_to_proto),
        updated_at: container.updated_at.map(timestamp_to_proto),
        extensions,
        sandbox: container.sandbox_id,
    }
}

pub fn container_from_proto(container: proto::Container) -> Container {
    let runtime = container
        .runtime
        .map(|runtime| RuntimeInfo {
            name: runtime.name,
            options: runtime.options.map(payload_from_any),
        })
        .unwrap_or_default();

    let extensions = container
        .extensions
        .into_iter()
        .map(|(name, any)| (name, payload_from_any(any)))
        .collect();

    Container {
        id: container.id,
        labels: container.labels,
        image: container.image,
        runtime,
        spec: container.spec.map(payload_from_any),
        snapshotter: container.snapshotter,
        snapshot_key: container.snapshot_key,
        extensions,
        sandbox_id: container.sandbox,
        created_at: container.created_at.and_then(timestamp_from_proto),
        updated_at: container.updated_at.and_then(timestamp_from_proto),
    }
}

/// Encode a sequence of containers, preserving order
pub fn containers_to_proto(containers: Vec<Container>) -> Vec<proto::Container> {
    containers.into_iter().map(container_to_proto).collect()
}

/// Decode a sequence of containers, preserving order
pub fn containers_from_proto(containers: Vec<proto::Container>) -> Vec<Container> {
    containers.into_iter().map(container_from_proto).collect()
}
