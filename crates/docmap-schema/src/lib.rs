//! Wire contract for generator-emitted docs metadata payloads.
//!
//! This crate provides:
//! - [`Envelope`]: the top-level payload wrapper and its parse entry points
//! - Raw serde types mirroring the payload field-for-field
//!
//! The types here are the untyped boundary of the system: they accept
//! whatever shape the site generator emits and tolerate unknown extra
//! fields. Referential integrity between sidebars and docs is not checked
//! at this layer; that happens when the payload is resolved into a
//! `VersionedDocSet` (see the `docmap-registry` crate).

mod envelope;

pub use envelope::{
    CategoryEntry, DocEntry, Envelope, LinkEntry, ParseError, SidebarEntry, VersionPayload,
};
