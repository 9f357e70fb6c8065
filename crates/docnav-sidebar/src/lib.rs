//! Collapsible documentation sidebar for docnav.
//!
//! This crate provides:
//! - [`SidebarItem`] / [`SidebarTree`] / [`SidebarRegistry`]: the sidebar model
//! - [`resolve_tree`]: collapse state resolution for the active page
//! - [`SidebarContainer`]: composition, per-node state and mobile visibility
//! - [`VersionMetadata`] and [`RouteTable`]: loading sidebars and routing pages to them
//! - [`render_sidebar`]: HTML output
//!
//! # Quick Start
//!
//! ```
//! use docnav_sidebar::{SidebarContainer, SidebarItem, SidebarOptions, SidebarRegistry};
//!
//! let mut registry = SidebarRegistry::new();
//! registry.insert(
//!     "docs",
//!     vec![
//!         SidebarItem::category(
//!             "Guides",
//!             vec![
//!                 SidebarItem::link("Intro", "/intro"),
//!                 SidebarItem::link("Setup", "/setup"),
//!             ],
//!         ),
//!         SidebarItem::category("API", vec![SidebarItem::link("Ref", "/api/ref")]),
//!     ],
//! );
//!
//! let mut container = SidebarContainer::new(registry, SidebarOptions::default());
//! let view = container.render(Some("docs"), "/setup")?.expect("sidebar applies");
//! let html = docnav_sidebar::render_sidebar(&view);
//! assert!(html.contains("menu__list-item--collapsed"));
//! # Ok::<(), docnav_sidebar::SidebarError>(())
//! ```

mod container;
mod doc_page;
mod html;
mod link;
mod metadata;
mod model;
mod node;
mod resolver;
mod widget;

pub use container::{
    ItemActivation, ItemView, NoopScrollLock, ScrollLock, SidebarContainer, SidebarError,
    SidebarOptions, SidebarView,
};
pub use doc_page::{DocRoute, RouteTable};
pub use html::render_sidebar;
pub use link::{DefaultLinkClassifier, LinkClassifier, has_protocol};
pub use metadata::{
    DanglingSidebarRef, EmptyCategory, MetadataError, UnlistedPermalink, VersionMetadata,
};
pub use model::{
    NEW_TAG, ParsedLabel, SidebarItem, SidebarRegistry, SidebarTree, is_new_tag, parse_label,
};
pub use node::{ClickEvent, ItemNodeState, NodeKey, NodeStates};
pub use resolver::{resolve, resolve_tree};
pub use widget::{EmptyWidget, Logo, SearchBar, SidebarWidget};
