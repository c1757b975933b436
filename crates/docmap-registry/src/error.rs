//! Error types for loading, building, and lookup.
//!
//! All failures surface synchronously at load or lookup time. Nothing is
//! retried: the payload is static, so re-attempting an identical load
//! would reproduce the same error.

use std::path::PathBuf;

pub use docmap_schema::ParseError;

/// Error type for loading a version snapshot.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Payload file could not be read.
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        /// Path of the payload file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Malformed payload structure.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Payload violates a referential-integrity invariant.
    #[error(transparent)]
    Integrity(#[from] IntegrityError),
}

/// Referential-integrity violation in a parsed payload.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IntegrityError {
    /// A sidebar link references a doc id with no record.
    #[error("Sidebar '{sidebar}' link '{label}' references unknown doc '{doc_id}'")]
    DanglingLink {
        /// Sidebar containing the link.
        sidebar: String,
        /// Display label of the link.
        label: String,
        /// The unresolved doc id.
        doc_id: String,
    },
    /// A doc record's back-reference names a missing sidebar.
    #[error("Doc '{doc_id}' references unknown sidebar '{sidebar}'")]
    UnknownSidebar {
        /// The referencing doc.
        doc_id: String,
        /// The missing sidebar name.
        sidebar: String,
    },
    /// A doc record's `id` field disagrees with its map key.
    #[error("Doc keyed '{key}' carries mismatched id '{id}'")]
    IdMismatch {
        /// Key in the docs mapping.
        key: String,
        /// `id` field of the record.
        id: String,
    },
}

/// Lookup miss on an immutable snapshot.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// No doc with the given id.
    #[error("Doc not found: {0}")]
    DocNotFound(String),
    /// No sidebar with the given name.
    #[error("Sidebar not found: {0}")]
    SidebarNotFound(String),
    /// No version with the given name.
    #[error("Version not found: {0}")]
    VersionNotFound(String),
    /// The registry holds no version flagged as last.
    #[error("Registry has no default version")]
    NoDefaultVersion,
}

/// Error accumulating version snapshots into a registry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// Two snapshots share a version name.
    #[error("Duplicate version name: {0}")]
    DuplicateVersion(String),
    /// Two snapshots are both flagged as the last version.
    #[error("Versions '{first}' and '{second}' are both flagged as last")]
    MultipleLastVersions {
        /// Name of the snapshot flagged first.
        first: String,
        /// Name of the conflicting snapshot.
        second: String,
    },
}
