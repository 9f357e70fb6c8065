//! Version metadata loading.
//!
//! A docs version is described by one metadata file (JSON or YAML) holding
//! the sidebars and the permalink to sidebar mapping:
//!
//! ```json
//! {
//!   "version": "current",
//!   "docsSidebars": {
//!     "docs": [{"type": "link", "label": "Intro", "href": "/intro"}]
//!   },
//!   "permalinkToSidebar": {"/intro": "docs"},
//!   "homePagePath": "/intro"
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::doc_page::RouteTable;
use crate::model::{SidebarItem, SidebarRegistry};

/// Sidebars and routing data of one docs version.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionMetadata {
    /// Version name.
    #[serde(default)]
    pub version: String,
    /// Sidebars by id.
    #[serde(default)]
    pub docs_sidebars: SidebarRegistry,
    /// Sidebar id for each doc permalink.
    #[serde(default)]
    pub permalink_to_sidebar: HashMap<String, String>,
    /// Doc routes without a sidebar mapping.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<String>,
    /// Permalink of the doc served as docs home page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_page_path: Option<String>,
}

/// Error type for metadata operations.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// Metadata file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Metadata file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Metadata content is malformed.
    #[error("{0}")]
    Parse(String),
    /// File extension is neither JSON nor YAML.
    #[error("Unsupported metadata format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// Reference from a permalink to a sidebar that does not exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DanglingSidebarRef {
    /// Doc permalink.
    pub permalink: String,
    /// Missing sidebar id.
    pub sidebar: String,
}

/// Permalink whose sidebar has no link to it.
///
/// The page still renders its sidebar, but nothing is highlighted and every
/// category stays collapsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnlistedPermalink {
    /// Doc permalink.
    pub permalink: String,
    /// Sidebar the permalink is mapped to.
    pub sidebar: String,
}

/// Category that has no items and is therefore never rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmptyCategory {
    /// Sidebar id.
    pub sidebar: String,
    /// Raw category label.
    pub label: String,
}

impl VersionMetadata {
    /// Parse metadata from JSON content.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(content: &str) -> Result<Self, MetadataError> {
        serde_json::from_str(content)
            .map_err(|e| MetadataError::Parse(format!("Invalid JSON: {e}")))
    }

    /// Parse metadata from YAML content.
    ///
    /// Empty content returns a default instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn from_yaml(content: &str) -> Result<Self, MetadataError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(trimmed)
            .map_err(|e| MetadataError::Parse(format!("Invalid YAML: {e}")))
    }

    /// Load metadata from a `.json`, `.yaml` or `.yml` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unknown extension
    /// or is malformed.
    pub fn load(path: &Path) -> Result<Self, MetadataError> {
        let extension = path.extension().and_then(|e| e.to_str());
        let parse: fn(&str) -> Result<Self, MetadataError> = match extension {
            Some("json") => Self::from_json,
            Some("yaml" | "yml") => Self::from_yaml,
            _ => return Err(MetadataError::UnsupportedFormat(path.to_path_buf())),
        };

        let content = std::fs::read_to_string(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let metadata = parse(&content)?;

        tracing::info!(
            path = %path.display(),
            version = %metadata.version,
            sidebars = metadata.docs_sidebars.len(),
            "Loaded version metadata"
        );

        Ok(metadata)
    }

    /// Permalinks mapped to sidebars missing from the registry, sorted.
    #[must_use]
    pub fn dangling_sidebar_refs(&self) -> Vec<DanglingSidebarRef> {
        let mut dangling: Vec<DanglingSidebarRef> = self
            .permalink_to_sidebar
            .iter()
            .filter(|(_, sidebar)| !self.docs_sidebars.contains(sidebar))
            .map(|(permalink, sidebar)| DanglingSidebarRef {
                permalink: permalink.clone(),
                sidebar: sidebar.clone(),
            })
            .collect();
        dangling.sort_by(|a, b| a.permalink.cmp(&b.permalink));
        dangling
    }

    /// Permalinks mapped to an existing sidebar that never links to them, sorted.
    #[must_use]
    pub fn unlisted_permalinks(&self) -> Vec<UnlistedPermalink> {
        let mut unlisted: Vec<UnlistedPermalink> = self
            .permalink_to_sidebar
            .iter()
            .filter(|(permalink, sidebar)| {
                self.docs_sidebars
                    .get(sidebar)
                    .is_some_and(|tree| !tree.contains_href(permalink))
            })
            .map(|(permalink, sidebar)| UnlistedPermalink {
                permalink: permalink.clone(),
                sidebar: sidebar.clone(),
            })
            .collect();
        unlisted.sort_by(|a, b| a.permalink.cmp(&b.permalink));
        unlisted
    }

    /// Categories without items, by sidebar id.
    #[must_use]
    pub fn empty_categories(&self) -> Vec<EmptyCategory> {
        fn walk(sidebar: &str, item: &SidebarItem, out: &mut Vec<EmptyCategory>) {
            if let SidebarItem::Category { label, items, .. } = item {
                if items.is_empty() {
                    out.push(EmptyCategory {
                        sidebar: sidebar.to_owned(),
                        label: label.clone(),
                    });
                }
                for child in items {
                    walk(sidebar, child, out);
                }
            }
        }

        let mut out = Vec::new();
        for id in self.docs_sidebars.ids() {
            if let Some(tree) = self.docs_sidebars.get(id) {
                for item in &tree.items {
                    walk(id, item, &mut out);
                }
            }
        }
        out
    }

    /// Split into the sidebar registry and the route table.
    #[must_use]
    pub fn into_parts(self) -> (SidebarRegistry, RouteTable) {
        let routes = RouteTable::new(self.routes, self.permalink_to_sidebar, self.home_page_path);
        (self.docs_sidebars, routes)
    }
}
