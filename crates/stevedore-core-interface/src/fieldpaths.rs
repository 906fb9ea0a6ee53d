//! Field paths understood by `ContainerStore::update`
//!
//! An empty list of field paths means "replace the whole record". Paths are
//! forwarded to the server verbatim.

pub const LABELS: &str = "labels";
pub const IMAGE: &str = "image";
pub const RUNTIME: &str = "runtime";
pub const SPEC: &str = "spec";
pub const SNAPSHOTTER: &str = "snapshotter";
pub const SNAPSHOT_KEY: &str = "snapshotkey";
pub const EXTENSIONS: &str = "extensions";
pub const SANDBOX: &str = "sandbox";

/// Path addressing a single label
pub fn label(key: &str) -> String {
    format!("{}.{}", LABELS, key)
}

/// Path addressing a single extension entry
pub fn extension(name: &str) -> String {
    format!("{}.{}", EXTENSIONS, name)
}
