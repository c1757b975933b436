//! Raw payload types and parse entry points.
//!
//! Field names follow the generator's JSON output (camelCase on the wire).
//! Payloads occur in two forms: wrapped in a top-level `{"version": {...}}`
//! object, or as a bare version payload. [`Envelope::from_value`] accepts
//! both.

use std::collections::BTreeMap;
use std::io::Read;

use serde::{Deserialize, Serialize};

/// Error type for payload parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Malformed JSON or schema mismatch.
    #[error("Malformed payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level payload wrapper around one version snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// The version snapshot carried by this payload.
    pub version: VersionPayload,
}

impl Envelope {
    /// Parse a payload from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the JSON is malformed or required fields
    /// are missing or of the wrong type.
    pub fn from_json(payload: &str) -> Result<Self, ParseError> {
        Self::from_value(serde_json::from_str(payload)?)
    }

    /// Parse a payload from an already-deserialized JSON value.
    ///
    /// Accepts both the wrapped form (`{"version": {...}}`) and a bare
    /// version payload. A bare payload also carries a `version` key, but
    /// there it holds the version name string rather than an object.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ParseError> {
        let wrapped = value.get("version").is_some_and(serde_json::Value::is_object);

        if wrapped {
            Ok(serde_json::from_value(value)?)
        } else {
            Ok(Self {
                version: serde_json::from_value(value)?,
            })
        }
    }

    /// Parse a payload from a reader.
    pub fn from_reader(reader: impl Read) -> Result<Self, ParseError> {
        Self::from_value(serde_json::from_reader(reader)?)
    }

    /// Serialize back to the wrapped wire form.
    pub fn to_json(&self) -> Result<String, ParseError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// One documentation version snapshot as emitted by the generator.
///
/// Unknown extra fields are ignored; the generator adds fields over time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionPayload {
    /// Docs plugin instance that produced this snapshot.
    #[serde(default = "default_plugin_id")]
    pub plugin_id: String,
    /// Internal version name (e.g. "current").
    #[serde(default = "default_version_name")]
    pub version: String,
    /// Display label (e.g. "Next"). Empty when the generator omitted it.
    #[serde(default)]
    pub label: String,
    /// Version banner kind, if any.
    #[serde(default)]
    pub banner: Option<String>,
    /// Whether the version badge is shown.
    #[serde(default)]
    pub badge: bool,
    /// Whether pages of this version are excluded from search indexing.
    #[serde(default)]
    pub no_index: bool,
    /// CSS class attached to pages of this version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Whether this is the default/current version.
    #[serde(default)]
    pub is_last: bool,
    /// Sidebar name to ordered item sequence.
    #[serde(default)]
    pub docs_sidebars: BTreeMap<String, Vec<SidebarEntry>>,
    /// Doc id to metadata record.
    #[serde(default)]
    pub docs: BTreeMap<String, DocEntry>,
}

/// One entry in a sidebar tree, tagged by `"type"` on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SidebarEntry {
    /// Navigation link to a doc page or external URL.
    Link(LinkEntry),
    /// Collapsible grouping of nested entries.
    Category(CategoryEntry),
}

/// Raw link entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkEntry {
    /// Display label.
    pub label: String,
    /// Link target (site-relative path or external URL). Empty when the
    /// payload carries only the doc back-reference.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub href: String,
    /// CSS class for the rendered item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Back-reference to the doc this link opens. Absent for external links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<String>,
    /// Hidden from the rendered sidebar but still addressable.
    #[serde(default)]
    pub unlisted: bool,
}

/// Raw category entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryEntry {
    /// Display label.
    pub label: String,
    /// Whether the category starts collapsed.
    #[serde(default = "default_true")]
    pub collapsed: bool,
    /// Whether the category can be collapsed at all.
    #[serde(default = "default_true")]
    pub collapsible: bool,
    /// CSS class for the rendered item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Optional landing page for the category itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Nested entries, in display order.
    pub items: Vec<SidebarEntry>,
}

/// Raw doc metadata record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocEntry {
    /// Doc id, unique within the version.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Page summary. The generator emits an empty string for stub pages.
    #[serde(default)]
    pub description: String,
    /// Name of the sidebar this doc belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar: Option<String>,
}

fn default_plugin_id() -> String {
    "default".to_owned()
}

fn default_version_name() -> String {
    "current".to_owned()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// A payload in the shape the generator actually emits.
    fn generator_payload() -> &'static str {
        r#"{
            "version": {
                "pluginId": "default",
                "version": "current",
                "label": "Next",
                "banner": null,
                "badge": false,
                "noIndex": false,
                "className": "docs-version-current",
                "isLast": true,
                "docsSidebars": {
                    "tutorialSidebar": [
                        {
                            "type": "link",
                            "label": "Introduction",
                            "href": "/docs/intro",
                            "className": "intro",
                            "docId": "intro",
                            "unlisted": false
                        },
                        {
                            "type": "category",
                            "label": "Ecosystem",
                            "collapsed": false,
                            "collapsible": false,
                            "items": [
                                {
                                    "type": "link",
                                    "href": "https://example.com/",
                                    "label": "External Tool"
                                }
                            ]
                        }
                    ]
                },
                "docs": {
                    "intro": {
                        "id": "intro",
                        "title": "Introduction",
                        "description": "",
                        "sidebar": "tutorialSidebar"
                    }
                }
            }
        }"#
    }

    #[test]
    fn test_parse_wrapped_payload() {
        let envelope = Envelope::from_json(generator_payload()).unwrap();
        let version = &envelope.version;

        assert_eq!(version.plugin_id, "default");
        assert_eq!(version.version, "current");
        assert_eq!(version.label, "Next");
        assert_eq!(version.banner, None);
        assert!(!version.badge);
        assert!(!version.no_index);
        assert_eq!(version.class_name.as_deref(), Some("docs-version-current"));
        assert!(version.is_last);
        assert_eq!(version.docs_sidebars.len(), 1);
        assert_eq!(version.docs.len(), 1);
    }

    #[test]
    fn test_parse_bare_payload() {
        let payload = r#"{
            "docs": {"a": {"id": "a", "title": "T", "description": ""}},
            "docsSidebars": {"main": [{"type": "link", "label": "T", "href": "/a", "docId": "a"}]}
        }"#;

        let envelope = Envelope::from_json(payload).unwrap();

        // Identity fields fall back to generator defaults
        assert_eq!(envelope.version.version, "current");
        assert_eq!(envelope.version.plugin_id, "default");
        assert_eq!(envelope.version.docs.len(), 1);
        assert_eq!(envelope.version.docs_sidebars["main"].len(), 1);
    }

    #[test]
    fn test_parse_link_entry_fields() {
        let envelope = Envelope::from_json(generator_payload()).unwrap();
        let items = &envelope.version.docs_sidebars["tutorialSidebar"];

        let SidebarEntry::Link(link) = &items[0] else {
            panic!("expected link entry");
        };
        assert_eq!(link.label, "Introduction");
        assert_eq!(link.href, "/docs/intro");
        assert_eq!(link.class_name.as_deref(), Some("intro"));
        assert_eq!(link.doc_id.as_deref(), Some("intro"));
        assert!(!link.unlisted);
    }

    #[test]
    fn test_parse_external_link_has_no_doc_id() {
        let envelope = Envelope::from_json(generator_payload()).unwrap();
        let items = &envelope.version.docs_sidebars["tutorialSidebar"];

        let SidebarEntry::Category(category) = &items[1] else {
            panic!("expected category entry");
        };
        assert_eq!(category.label, "Ecosystem");
        assert!(!category.collapsed);
        assert!(!category.collapsible);

        let SidebarEntry::Link(external) = &category.items[0] else {
            panic!("expected link entry");
        };
        assert_eq!(external.href, "https://example.com/");
        assert!(external.doc_id.is_none());
        assert!(!external.unlisted);
    }

    #[test]
    fn test_parse_category_defaults_to_collapsible() {
        let payload = r#"{
            "docsSidebars": {
                "main": [{"type": "category", "label": "Guides", "items": []}]
            }
        }"#;

        let envelope = Envelope::from_json(payload).unwrap();
        let SidebarEntry::Category(category) = &envelope.version.docs_sidebars["main"][0] else {
            panic!("expected category entry");
        };

        assert!(category.collapsed);
        assert!(category.collapsible);
    }

    #[test]
    fn test_parse_unknown_fields_ignored() {
        let payload = r#"{
            "version": "current",
            "label": "Next",
            "futureField": {"nested": true},
            "docs": {},
            "docsSidebars": {}
        }"#;

        let envelope = Envelope::from_json(payload).unwrap();

        assert_eq!(envelope.version.label, "Next");
    }

    #[test]
    fn test_parse_unknown_entry_type_fails() {
        let payload = r#"{
            "docsSidebars": {"main": [{"type": "carousel", "label": "X"}]}
        }"#;

        let result = Envelope::from_json(payload);

        assert!(matches!(result, Err(ParseError::Json(_))));
    }

    #[test]
    fn test_parse_link_without_href() {
        let payload = r#"{
            "docsSidebars": {"main": [{"type": "link", "label": "T", "docId": "a"}]}
        }"#;

        let envelope = Envelope::from_json(payload).unwrap();
        let SidebarEntry::Link(link) = &envelope.version.docs_sidebars["main"][0] else {
            panic!("expected link entry");
        };

        assert_eq!(link.href, "");
        assert_eq!(link.doc_id.as_deref(), Some("a"));
    }

    #[test]
    fn test_parse_link_missing_label_fails() {
        let payload = r#"{
            "docsSidebars": {"main": [{"type": "link", "href": "/a"}]}
        }"#;

        assert!(Envelope::from_json(payload).is_err());
    }

    #[test]
    fn test_parse_docs_wrong_shape_fails() {
        let payload = r#"{"docs": ["not", "a", "mapping"]}"#;

        assert!(Envelope::from_json(payload).is_err());
    }

    #[test]
    fn test_parse_invalid_json_fails() {
        assert!(Envelope::from_json("{not json").is_err());
    }

    #[test]
    fn test_from_reader() {
        let envelope = Envelope::from_reader(generator_payload().as_bytes()).unwrap();

        assert_eq!(envelope.version.label, "Next");
    }

    #[test]
    fn test_wire_round_trip() {
        let envelope = Envelope::from_json(generator_payload()).unwrap();

        let json = envelope.to_json().unwrap();
        let reparsed = Envelope::from_json(&json).unwrap();

        assert_eq!(envelope, reparsed);
    }
}
