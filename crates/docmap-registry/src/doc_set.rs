//! Immutable version snapshot of sidebar and doc metadata.
//!
//! [`VersionedDocSet`] is the resolved counterpart of the wire payload:
//! strongly typed, integrity-checked during loading, and immutable after
//! construction. Sidebar trees are finite and acyclic by construction
//! (owned recursion, no back-edges).
//!
//! # Integrity
//!
//! Loading verifies three invariants over the parsed payload:
//! - every link `doc_id` resolves to a doc record (or, under
//!   [`DanglingLinkPolicy::Flag`], the link is kept with its `dangling`
//!   flag set and a warning is logged)
//! - every doc record's `id` field equals its key in the docs mapping
//! - every doc record's `sidebar` back-reference names an existing sidebar

use std::collections::BTreeMap;
use std::path::Path;

use docmap_schema::{CategoryEntry, DocEntry, Envelope, LinkEntry, SidebarEntry, VersionPayload};
use serde::Serialize;

use crate::error::{IntegrityError, LoadError, LookupError};

/// Policy for links whose doc reference does not resolve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DanglingLinkPolicy {
    /// Fail the load with an integrity error.
    #[default]
    Reject,
    /// Keep the link, set its `dangling` flag, and log a warning.
    Flag,
}

/// Options controlling snapshot loading.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoadOptions {
    /// How to treat links whose `doc_id` does not resolve.
    pub dangling_links: DanglingLinkPolicy,
}

/// Navigation link to a doc page or external URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarLink {
    /// Display label.
    pub label: String,
    /// Link target (site-relative path or external URL).
    pub href: String,
    /// CSS class for the rendered item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Doc this link opens. `None` for external links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,
    /// Hidden from the rendered sidebar but still addressable.
    pub unlisted: bool,
    /// Set when the doc reference failed to resolve during a lenient load.
    pub dangling: bool,
}

/// Collapsible grouping of nested sidebar items.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarCategory {
    /// Display label.
    pub label: String,
    /// Whether the category starts collapsed.
    pub collapsed: bool,
    /// Whether the category can be collapsed at all.
    pub collapsible: bool,
    /// CSS class for the rendered item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Optional landing page for the category itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Nested items, in display order.
    pub items: Vec<SidebarItem>,
}

/// One entry in a sidebar tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SidebarItem {
    /// Navigation link.
    Link(SidebarLink),
    /// Nested grouping.
    Category(SidebarCategory),
}

impl SidebarItem {
    fn to_entry(&self) -> SidebarEntry {
        match self {
            Self::Link(link) => SidebarEntry::Link(LinkEntry {
                label: link.label.clone(),
                href: link.href.clone(),
                class_name: link.class_name.clone(),
                doc_id: link.doc_id.clone(),
                unlisted: link.unlisted,
            }),
            Self::Category(category) => SidebarEntry::Category(CategoryEntry {
                label: category.label.clone(),
                collapsed: category.collapsed,
                collapsible: category.collapsible,
                class_name: category.class_name.clone(),
                href: category.href.clone(),
                items: category.items.iter().map(Self::to_entry).collect(),
            }),
        }
    }
}

/// One documentation page's indexable metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocRecord {
    /// Doc id, unique within the version.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Page summary. May be empty for stub pages.
    pub description: String,
    /// Sidebar this doc belongs to (relation only, not ownership).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<String>,
}

impl DocRecord {
    fn to_entry(&self) -> DocEntry {
        DocEntry {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            sidebar: self.sidebar.clone(),
        }
    }
}

/// One documentation version snapshot.
///
/// Constructed once from a payload, immutable thereafter. Contains only
/// owned data, so it can be shared across any number of concurrent
/// readers without locking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionedDocSet {
    plugin_id: String,
    name: String,
    label: String,
    banner: Option<String>,
    badge: bool,
    no_index: bool,
    class_name: Option<String>,
    is_last: bool,
    sidebars: BTreeMap<String, Vec<SidebarItem>>,
    docs: BTreeMap<String, DocRecord>,
}

impl VersionedDocSet {
    /// Load a snapshot from a JSON payload string.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Parse`] for malformed input and
    /// [`LoadError::Integrity`] for referential-integrity violations.
    pub fn load_str(payload: &str, options: LoadOptions) -> Result<Self, LoadError> {
        Self::from_envelope(Envelope::from_json(payload)?, options)
    }

    /// Load a snapshot from an already-deserialized JSON value.
    pub fn load_value(value: serde_json::Value, options: LoadOptions) -> Result<Self, LoadError> {
        Self::from_envelope(Envelope::from_value(value)?, options)
    }

    /// Load a snapshot from a payload file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file cannot be read, otherwise as
    /// [`load_str`](Self::load_str).
    pub fn load_path(path: &Path, options: LoadOptions) -> Result<Self, LoadError> {
        let payload = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load_str(&payload, options)
    }

    /// Resolve a parsed envelope into an integrity-checked snapshot.
    pub fn from_envelope(envelope: Envelope, options: LoadOptions) -> Result<Self, LoadError> {
        let payload = envelope.version;

        let mut docs = BTreeMap::new();
        for (key, entry) in payload.docs {
            if entry.id != key {
                return Err(IntegrityError::IdMismatch { key, id: entry.id }.into());
            }
            docs.insert(
                key,
                DocRecord {
                    id: entry.id,
                    title: entry.title,
                    description: entry.description,
                    sidebar: entry.sidebar,
                },
            );
        }

        let mut sidebars = BTreeMap::new();
        for (name, entries) in payload.docs_sidebars {
            let items = entries
                .into_iter()
                .map(|entry| resolve_entry(&name, entry, &docs, options))
                .collect::<Result<Vec<_>, IntegrityError>>()?;
            sidebars.insert(name, items);
        }

        for record in docs.values() {
            if let Some(sidebar) = &record.sidebar {
                if !sidebars.contains_key(sidebar) {
                    return Err(IntegrityError::UnknownSidebar {
                        doc_id: record.id.clone(),
                        sidebar: sidebar.clone(),
                    }
                    .into());
                }
            }
        }

        // The generator always labels versions; fall back to the version
        // name for hand-written payloads that omit it.
        let label = if payload.label.is_empty() {
            payload.version.clone()
        } else {
            payload.label
        };

        let set = Self {
            plugin_id: payload.plugin_id,
            name: payload.version,
            label,
            banner: payload.banner,
            badge: payload.badge,
            no_index: payload.no_index,
            class_name: payload.class_name,
            is_last: payload.is_last,
            sidebars,
            docs,
        };

        tracing::debug!(
            version = %set.name,
            doc_count = set.docs.len(),
            sidebar_count = set.sidebars.len(),
            "Loaded doc set"
        );

        Ok(set)
    }

    /// Docs plugin instance that produced this snapshot.
    #[must_use]
    pub fn plugin_id(&self) -> &str {
        &self.plugin_id
    }

    /// Internal version name (e.g. "current").
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display label (e.g. "Next").
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Version banner kind, if any.
    #[must_use]
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Whether the version badge is shown.
    #[must_use]
    pub fn badge(&self) -> bool {
        self.badge
    }

    /// Whether pages of this version are excluded from search indexing.
    #[must_use]
    pub fn no_index(&self) -> bool {
        self.no_index
    }

    /// CSS class attached to pages of this version.
    #[must_use]
    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    /// Whether this is the default/current version.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.is_last
    }

    /// Look up a doc record by id.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::DocNotFound`] if `id` is absent.
    pub fn doc(&self, id: &str) -> Result<&DocRecord, LookupError> {
        self.docs
            .get(id)
            .ok_or_else(|| LookupError::DocNotFound(id.to_owned()))
    }

    /// Look up a sidebar's ordered items by name.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::SidebarNotFound`] if `name` is absent.
    pub fn sidebar(&self, name: &str) -> Result<&[SidebarItem], LookupError> {
        self.sidebars
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| LookupError::SidebarNotFound(name.to_owned()))
    }

    /// All doc records in the mapping's natural (id) order.
    ///
    /// The iterator is lazy and restartable; call again for a fresh pass.
    pub fn docs(&self) -> impl Iterator<Item = &DocRecord> {
        self.docs.values()
    }

    /// Number of doc records.
    #[must_use]
    pub fn doc_count(&self) -> usize {
        self.docs.len()
    }

    /// Sidebar names in natural order.
    pub fn sidebar_names(&self) -> impl Iterator<Item = &str> {
        self.sidebars.keys().map(String::as_str)
    }

    /// All links across all sidebars, depth-first in display order,
    /// paired with the name of the sidebar containing them.
    #[must_use]
    pub fn links(&self) -> Vec<(&str, &SidebarLink)> {
        let mut links = Vec::new();
        for (name, items) in &self.sidebars {
            collect_links(name, items, &mut links);
        }
        links
    }

    /// Links flagged dangling during a lenient load.
    #[must_use]
    pub fn dangling_links(&self) -> Vec<(&str, &SidebarLink)> {
        self.links()
            .into_iter()
            .filter(|(_, link)| link.dangling)
            .collect()
    }

    /// Docs whose back-reference names the given sidebar, in id order.
    pub fn docs_in_sidebar<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a DocRecord> {
        self.docs
            .values()
            .filter(move |record| record.sidebar.as_deref() == Some(name))
    }

    /// Serialize back to the wire envelope. Inverse of
    /// [`from_envelope`](Self::from_envelope): reloading the result yields
    /// an equal snapshot.
    #[must_use]
    pub fn to_envelope(&self) -> Envelope {
        Envelope {
            version: VersionPayload {
                plugin_id: self.plugin_id.clone(),
                version: self.name.clone(),
                label: self.label.clone(),
                banner: self.banner.clone(),
                badge: self.badge,
                no_index: self.no_index,
                class_name: self.class_name.clone(),
                is_last: self.is_last,
                docs_sidebars: self
                    .sidebars
                    .iter()
                    .map(|(name, items)| {
                        (name.clone(), items.iter().map(SidebarItem::to_entry).collect())
                    })
                    .collect(),
                docs: self
                    .docs
                    .iter()
                    .map(|(id, record)| (id.clone(), record.to_entry()))
                    .collect(),
            },
        }
    }
}

/// Resolve one raw entry, checking link back-references against `docs`.
fn resolve_entry(
    sidebar: &str,
    entry: SidebarEntry,
    docs: &BTreeMap<String, DocRecord>,
    options: LoadOptions,
) -> Result<SidebarItem, IntegrityError> {
    match entry {
        SidebarEntry::Link(link) => {
            let dangling = link
                .doc_id
                .as_ref()
                .is_some_and(|id| !docs.contains_key(id));

            if dangling {
                let doc_id = link.doc_id.clone().unwrap_or_default();
                match options.dangling_links {
                    DanglingLinkPolicy::Reject => {
                        return Err(IntegrityError::DanglingLink {
                            sidebar: sidebar.to_owned(),
                            label: link.label,
                            doc_id,
                        });
                    }
                    DanglingLinkPolicy::Flag => {
                        tracing::warn!(
                            sidebar = %sidebar,
                            label = %link.label,
                            doc_id = %doc_id,
                            "Sidebar link references a doc with no record"
                        );
                    }
                }
            }

            Ok(SidebarItem::Link(SidebarLink {
                label: link.label,
                href: link.href,
                class_name: link.class_name,
                doc_id: link.doc_id,
                unlisted: link.unlisted,
                dangling,
            }))
        }
        SidebarEntry::Category(category) => {
            let items = category
                .items
                .into_iter()
                .map(|child| resolve_entry(sidebar, child, docs, options))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(SidebarItem::Category(SidebarCategory {
                label: category.label,
                collapsed: category.collapsed,
                collapsible: category.collapsible,
                class_name: category.class_name,
                href: category.href,
                items,
            }))
        }
    }
}

fn collect_links<'a>(
    sidebar: &'a str,
    items: &'a [SidebarItem],
    out: &mut Vec<(&'a str, &'a SidebarLink)>,
) {
    for item in items {
        match item {
            SidebarItem::Link(link) => out.push((sidebar, link)),
            SidebarItem::Category(category) => collect_links(sidebar, &category.items, out),
        }
    }
}
