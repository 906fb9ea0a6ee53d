/// Generated gRPC protocol definitions for the Stevedore containers service.
///
/// Well-known types (`Any`, `Timestamp`, `FieldMask`) come from `prost-types`.
pub mod stevedore {
    pub mod containers {
        pub mod v1 {
            tonic::include_proto!("stevedore.containers.v1");
        }
    }
}

// Re-export commonly used types for convenience
pub use stevedore::containers::v1::*;

pub use prost_types;
