//! Sidebar tree model.
//!
//! A sidebar is an ordered list of [`SidebarItem`]s. Categories own their
//! children directly; there are no back-references, since every traversal
//! is top-down.
//!
//! # Labels
//!
//! Raw labels carry optional tags after a `:` delimiter. Parsing is derived
//! on demand by [`parse_label`] and never stored:
//!
//! ```
//! use docnav_sidebar::parse_label;
//!
//! let parsed = parse_label("Getting Started:new");
//! assert_eq!(parsed.label, "Getting Started");
//! assert_eq!(parsed.tags, vec!["new"]);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Tag that receives a distinguishing badge style.
pub const NEW_TAG: &str = "new";

/// Navigation tree node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SidebarItem {
    /// Group of child items that can be expanded or collapsed.
    Category {
        /// Raw label, possibly with `:`-separated tags.
        label: String,
        /// Child items in display order.
        #[serde(default)]
        items: Vec<SidebarItem>,
        /// Whether children are hidden.
        #[serde(default = "default_collapsed")]
        collapsed: bool,
    },
    /// Leaf pointing to a page.
    Link {
        /// Raw label, possibly with `:`-separated tags.
        label: String,
        /// Link target.
        href: String,
    },
}

fn default_collapsed() -> bool {
    true
}

impl SidebarItem {
    /// Create a collapsed category.
    #[must_use]
    pub fn category(label: impl Into<String>, items: Vec<SidebarItem>) -> Self {
        Self::Category {
            label: label.into(),
            items,
            collapsed: true,
        }
    }

    /// Create a link.
    #[must_use]
    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self::Link {
            label: label.into(),
            href: href.into(),
        }
    }

    /// Raw label including tags.
    #[must_use]
    pub fn raw_label(&self) -> &str {
        match self {
            Self::Category { label, .. } | Self::Link { label, .. } => label,
        }
    }

    /// Parsed label and tags.
    #[must_use]
    pub fn parsed_label(&self) -> ParsedLabel<'_> {
        parse_label(self.raw_label())
    }

    /// Collapse flag, `None` for links.
    #[must_use]
    pub fn collapsed(&self) -> Option<bool> {
        match self {
            Self::Category { collapsed, .. } => Some(*collapsed),
            Self::Link { .. } => None,
        }
    }

    /// Iterate over every link in this subtree, depth-first.
    pub fn links(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_> {
        match self {
            Self::Link { label, href } => {
                Box::new(std::iter::once((label.as_str(), href.as_str())))
            }
            Self::Category { items, .. } => Box::new(items.iter().flat_map(SidebarItem::links)),
        }
    }
}

/// Display label and tags split from a raw label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedLabel<'a> {
    /// Text shown in the menu.
    pub label: &'a str,
    /// Tags rendered as badges, in label order.
    pub tags: Vec<&'a str>,
}

/// Split a raw label into display label and tags.
///
/// The first `:`-separated segment is the display label, every following
/// segment is a tag. Tags are trimmed and empty tags dropped. A label
/// without `:` is all display label.
#[must_use]
pub fn parse_label(raw: &str) -> ParsedLabel<'_> {
    let mut segments = raw.split(':');
    let label = segments.next().unwrap_or_default();
    let tags = segments.map(str::trim).filter(|t| !t.is_empty()).collect();
    ParsedLabel { label, tags }
}

/// Check whether a tag gets the "new" badge style.
#[must_use]
pub fn is_new_tag(tag: &str) -> bool {
    tag == NEW_TAG
}

/// Ordered items of one named sidebar.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SidebarTree {
    /// Top-level items.
    pub items: Vec<SidebarItem>,
}

impl SidebarTree {
    /// Create a tree from top-level items.
    #[must_use]
    pub fn new(items: Vec<SidebarItem>) -> Self {
        Self { items }
    }

    /// Check whether any link in the tree points at `href`.
    #[must_use]
    pub fn contains_href(&self, href: &str) -> bool {
        self.items
            .iter()
            .flat_map(SidebarItem::links)
            .any(|(_, h)| h == href)
    }
}

impl From<Vec<SidebarItem>> for SidebarTree {
    fn from(items: Vec<SidebarItem>) -> Self {
        Self::new(items)
    }
}

/// Mapping from sidebar id to its tree.
///
/// Built once per docs version and reused for the whole session; trees are
/// mutated in place on navigation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SidebarRegistry {
    sidebars: HashMap<String, SidebarTree>,
}

impl SidebarRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sidebar, replacing any previous tree with the same id.
    pub fn insert(&mut self, id: impl Into<String>, tree: impl Into<SidebarTree>) {
        self.sidebars.insert(id.into(), tree.into());
    }

    /// Get a sidebar by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SidebarTree> {
        self.sidebars.get(id)
    }

    /// Get a sidebar by id for in-place mutation.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut SidebarTree> {
        self.sidebars.get_mut(id)
    }

    /// Check whether a sidebar is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.sidebars.contains_key(id)
    }

    /// Registered sidebar ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.sidebars.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of registered sidebars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sidebars.len()
    }

    /// Check whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sidebars.is_empty()
    }
}

impl<K: Into<String>, T: Into<SidebarTree>> FromIterator<(K, T)> for SidebarRegistry {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        Self {
            sidebars: iter
                .into_iter()
                .map(|(id, tree)| (id.into(), tree.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_label_with_tag() {
        let parsed = parse_label("Getting Started:new");

        assert_eq!(parsed.label, "Getting Started");
        assert_eq!(parsed.tags, vec!["new"]);
    }

    #[test]
    fn test_parse_label_plain() {
        let parsed = parse_label("Plain Link");

        assert_eq!(parsed.label, "Plain Link");
        assert!(parsed.tags.is_empty());
    }

    #[test]
    fn test_parse_label_multiple_tags_keep_order() {
        let parsed = parse_label("API:beta:new");

        assert_eq!(parsed.label, "API");
        assert_eq!(parsed.tags, vec!["beta", "new"]);
    }

    #[test]
    fn test_parse_label_drops_empty_and_trims_tags() {
        let parsed = parse_label("Setup:: new :");

        assert_eq!(parsed.label, "Setup");
        assert_eq!(parsed.tags, vec!["new"]);
    }

    #[test]
    fn test_parse_label_empty() {
        let parsed = parse_label("");

        assert_eq!(parsed.label, "");
        assert!(parsed.tags.is_empty());
    }

    #[test]
    fn test_is_new_tag() {
        assert!(is_new_tag("new"));
        assert!(!is_new_tag("New"));
        assert!(!is_new_tag("beta"));
    }

    #[test]
    fn test_parsed_label_on_item() {
        let item = SidebarItem::link("Reference:new", "/api/ref");

        let parsed = item.parsed_label();

        assert_eq!(parsed.label, "Reference");
        assert_eq!(parsed.tags, vec!["new"]);
    }

    #[test]
    fn test_collapsed_only_on_categories() {
        let category = SidebarItem::category("Guides", vec![]);
        let link = SidebarItem::link("Intro", "/intro");

        assert_eq!(category.collapsed(), Some(true));
        assert_eq!(link.collapsed(), None);
    }

    #[test]
    fn test_links_depth_first() {
        let item = SidebarItem::category(
            "Guides",
            vec![
                SidebarItem::link("Intro", "/intro"),
                SidebarItem::category("Deep", vec![SidebarItem::link("Nested", "/nested")]),
                SidebarItem::link("Setup", "/setup"),
            ],
        );

        let hrefs: Vec<&str> = item.links().map(|(_, href)| href).collect();

        assert_eq!(hrefs, vec!["/intro", "/nested", "/setup"]);
    }

    #[test]
    fn test_tree_contains_href() {
        let tree = SidebarTree::new(vec![SidebarItem::category(
            "Guides",
            vec![SidebarItem::link("Setup", "/setup")],
        )]);

        assert!(tree.contains_href("/setup"));
        assert!(!tree.contains_href("/missing"));
    }

    #[test]
    fn test_deserialize_items_from_json() {
        let json = r#"[
            {"type": "category", "label": "Guides", "items": [
                {"type": "link", "label": "Intro", "href": "/intro"}
            ]},
            {"type": "category", "label": "API", "collapsed": false, "items": []}
        ]"#;

        let tree: SidebarTree = serde_json::from_str(json).unwrap();

        assert_eq!(
            tree.items,
            vec![
                SidebarItem::category("Guides", vec![SidebarItem::link("Intro", "/intro")]),
                SidebarItem::Category {
                    label: "API".to_owned(),
                    items: vec![],
                    collapsed: false,
                },
            ]
        );
    }

    #[test]
    fn test_deserialize_registry_from_yaml() {
        let yaml = r"
docs:
  - type: link
    label: Intro
    href: /intro
api:
  - type: category
    label: Reference
    items:
      - type: link
        label: Ref
        href: /api/ref
";

        let registry: SidebarRegistry = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(registry.ids(), vec!["api", "docs"]);
        assert!(registry.get("api").unwrap().contains_href("/api/ref"));
    }

    #[test]
    fn test_serialize_item_tagged() {
        let item = SidebarItem::link("Intro", "/intro");

        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["type"], "link");
        assert_eq!(json["label"], "Intro");
        assert_eq!(json["href"], "/intro");
    }

    #[test]
    fn test_registry_insert_and_lookup() {
        let mut registry = SidebarRegistry::new();
        assert!(registry.is_empty());

        registry.insert("docs", vec![SidebarItem::link("Intro", "/intro")]);

        assert_eq!(registry.len(), 1);
        assert!(registry.contains("docs"));
        assert!(registry.get("docs2").is_none());
    }

    #[test]
    fn test_registry_from_iter() {
        let registry: SidebarRegistry = [("docs", SidebarTree::default())].into_iter().collect();

        assert!(registry.contains("docs"));
    }
}
