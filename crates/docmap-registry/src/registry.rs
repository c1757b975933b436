//! Multi-version registry of doc set snapshots.
//!
//! The registry maps version names to [`VersionedDocSet`] snapshots.
//! Partial sources are accumulated in a [`RegistryBuilder`] and merged
//! before a single immutable [`Registry`] is published; readers never
//! observe partial state.

use std::collections::BTreeMap;

use crate::doc_set::VersionedDocSet;
use crate::error::{BuildError, LookupError};

/// Immutable mapping from version name to doc set snapshot.
///
/// Contains only owned data, so it can be shared across any number of
/// concurrent readers without locking. There is no ambient global; the
/// registry is an explicit value passed by reference to consumers.
#[derive(Clone, Debug)]
pub struct Registry {
    versions: BTreeMap<String, VersionedDocSet>,
    default_version: Option<String>,
}

impl Registry {
    /// Look up a version snapshot by name.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::VersionNotFound`] if `name` is absent.
    pub fn version(&self, name: &str) -> Result<&VersionedDocSet, LookupError> {
        self.versions
            .get(name)
            .ok_or_else(|| LookupError::VersionNotFound(name.to_owned()))
    }

    /// The default version: the snapshot flagged as last.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NoDefaultVersion`] if no snapshot carries
    /// the flag.
    pub fn latest(&self) -> Result<&VersionedDocSet, LookupError> {
        let name = self
            .default_version
            .as_ref()
            .ok_or(LookupError::NoDefaultVersion)?;
        self.version(name)
    }

    /// All version snapshots in name order.
    pub fn versions(&self) -> impl Iterator<Item = &VersionedDocSet> {
        self.versions.values()
    }

    /// Version names in natural order.
    pub fn version_names(&self) -> impl Iterator<Item = &str> {
        self.versions.keys().map(String::as_str)
    }

    /// Number of versions held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Whether the registry holds no versions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

/// Accumulates doc sets before publishing an immutable [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    versions: BTreeMap<String, VersionedDocSet>,
    default_version: Option<String>,
}

impl RegistryBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a version snapshot.
    ///
    /// # Errors
    ///
    /// Rejects a duplicate version name and a second snapshot flagged as
    /// last; at most one default version is allowed.
    pub fn add(&mut self, set: VersionedDocSet) -> Result<(), BuildError> {
        if self.versions.contains_key(set.name()) {
            return Err(BuildError::DuplicateVersion(set.name().to_owned()));
        }

        if set.is_last() {
            if let Some(first) = &self.default_version {
                return Err(BuildError::MultipleLastVersions {
                    first: first.clone(),
                    second: set.name().to_owned(),
                });
            }
            self.default_version = Some(set.name().to_owned());
        }

        self.versions.insert(set.name().to_owned(), set);
        Ok(())
    }

    /// Publish the immutable registry.
    #[must_use]
    pub fn build(self) -> Registry {
        tracing::debug!(version_count = self.versions.len(), "Published registry");

        Registry {
            versions: self.versions,
            default_version: self.default_version,
        }
    }
}
