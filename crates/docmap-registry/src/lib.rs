//! Immutable registry over versioned docs sidebar and page metadata.
//!
//! This crate provides:
//! - [`VersionedDocSet`]: one integrity-checked version snapshot with
//!   read-only doc and sidebar lookups
//! - [`Registry`]: an immutable mapping from version name to snapshot,
//!   published once via [`RegistryBuilder`]
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use docmap_registry::{LoadOptions, RegistryBuilder, VersionedDocSet};
//!
//! let payload = r#"{
//!     "version": "1.0",
//!     "label": "1.0",
//!     "isLast": true,
//!     "docsSidebars": {"main": [
//!         {"type": "link", "label": "Guide", "href": "/guide", "docId": "guide"}
//!     ]},
//!     "docs": {"guide": {"id": "guide", "title": "Guide", "description": "", "sidebar": "main"}}
//! }"#;
//! let set = VersionedDocSet::load_str(payload, LoadOptions::default())?;
//!
//! let mut builder = RegistryBuilder::new();
//! builder.add(set)?;
//! let registry = builder.build();
//!
//! assert_eq!(registry.latest()?.doc("guide")?.title, "Guide");
//! # Ok(())
//! # }
//! ```

mod doc_set;
mod error;
mod registry;

pub use doc_set::{
    DanglingLinkPolicy, DocRecord, LoadOptions, SidebarCategory, SidebarItem, SidebarLink,
    VersionedDocSet,
};
pub use error::{BuildError, IntegrityError, LoadError, LookupError, ParseError};
pub use registry::{Registry, RegistryBuilder};

// Re-export the wire contract for callers that work with raw payloads
pub use docmap_schema::Envelope;
