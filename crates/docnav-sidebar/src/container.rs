//! Sidebar composition.
//!
//! [`SidebarContainer`] owns the sidebar registry for the session. On every
//! render it selects the tree for the current page, runs the collapse
//! resolver over it, reconciles each category with its node state and
//! produces a [`SidebarView`]. It also tracks the mobile visibility flag,
//! which is independent of per-item state.
//!
//! All methods take `&mut self`: the registry has exactly one writer and the
//! resolver pass finishes before any view is built.

use std::collections::HashMap;

use serde::Serialize;

use crate::link::{DefaultLinkClassifier, LinkClassifier};
use crate::model::{SidebarItem, SidebarRegistry};
use crate::node::{ClickEvent, NodeKey, NodeStates};
use crate::resolver::resolve_tree;
use crate::widget::{EmptyWidget, SidebarWidget};

/// Error returned when a sidebar cannot be rendered.
#[derive(Debug, thiserror::Error)]
pub enum SidebarError {
    /// The requested sidebar id is not in the registry.
    #[error("Cannot find the sidebar \"{id}\" in the sidebar config!")]
    NotFound {
        /// Requested sidebar id.
        id: String,
    },
}

/// Sidebar behavior flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SidebarOptions {
    /// Whether categories can be collapsed.
    pub collapsible: bool,
    /// Whether the navbar hides on scroll (presentation only).
    pub hide_on_scroll: bool,
}

impl Default for SidebarOptions {
    fn default() -> Self {
        Self {
            collapsible: true,
            hide_on_scroll: false,
        }
    }
}

/// Locks background scrolling while the mobile sidebar is open.
pub trait ScrollLock {
    /// Prevent the page behind the sidebar from scrolling.
    fn lock(&mut self);
    /// Restore page scrolling.
    fn unlock(&mut self);
}

/// Scroll lock that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopScrollLock;

impl ScrollLock for NoopScrollLock {
    fn lock(&mut self) {}
    fn unlock(&mut self) {}
}

/// Mobile visibility flag holding the scroll lock while visible.
struct MobileVisibility {
    visible: bool,
    scroll_lock: Box<dyn ScrollLock>,
}

impl MobileVisibility {
    fn set(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        if visible {
            self.scroll_lock.lock();
        } else {
            self.scroll_lock.unlock();
        }
    }
}

impl Drop for MobileVisibility {
    fn drop(&mut self) {
        if self.visible {
            self.scroll_lock.unlock();
        }
    }
}

/// Outcome of activating a link, reported to the page shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemActivation {
    /// Client-side navigation to an internal page.
    Navigate {
        /// Target path.
        href: String,
    },
    /// Open an external URL in a new browsing context.
    OpenExternal {
        /// Target URL.
        href: String,
    },
}

/// Rendered sidebar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarView {
    /// Sidebar id.
    pub sidebar: String,
    /// Path of the current page.
    pub active_path: String,
    /// Logo markup.
    pub logo: String,
    /// Search entry point markup.
    pub search: String,
    /// Top-level items, empty categories omitted.
    pub items: Vec<ItemView>,
    /// Whether the mobile sidebar is shown.
    pub mobile_visible: bool,
    /// Whether the navbar hides on scroll.
    pub hide_on_scroll: bool,
}

/// Rendered sidebar node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ItemView {
    /// Category with its visible state.
    #[serde(rename_all = "camelCase")]
    Category {
        /// Node identity for click dispatch.
        key: NodeKey,
        /// Display label.
        label: String,
        /// Badge tags.
        tags: Vec<String>,
        /// Whether the header toggles on click.
        collapsible: bool,
        /// Effective collapse state (user override applied).
        collapsed: bool,
        /// Whether the header is styled active.
        active: bool,
        /// Tab index set by the parent category.
        #[serde(skip_serializing_if = "Option::is_none")]
        tab_index: Option<i8>,
        /// Child items, empty categories omitted.
        items: Vec<ItemView>,
    },
    /// Link to a page.
    #[serde(rename_all = "camelCase")]
    Link {
        /// Node identity for click dispatch.
        key: NodeKey,
        /// Display label.
        label: String,
        /// Badge tags.
        tags: Vec<String>,
        /// Link target.
        href: String,
        /// Whether this link points at the current page.
        active: bool,
        /// Whether the link leaves the site.
        external: bool,
        /// Tab index set by the parent category.
        #[serde(skip_serializing_if = "Option::is_none")]
        tab_index: Option<i8>,
    },
}

impl ItemView {
    /// Display label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Category { label, .. } | Self::Link { label, .. } => label,
        }
    }
}

/// Inputs shared by every node of one render pass.
struct ViewContext<'a> {
    active_path: &'a str,
    collapsible: bool,
    classifier: &'a dyn LinkClassifier,
}

/// Page the container last rendered.
struct CurrentRoute {
    sidebar: String,
    active_path: String,
}

/// Top-level sidebar composition.
pub struct SidebarContainer {
    registry: SidebarRegistry,
    options: SidebarOptions,
    logo: Box<dyn SidebarWidget>,
    search: Box<dyn SidebarWidget>,
    classifier: Box<dyn LinkClassifier>,
    /// Node states per sidebar id.
    node_states: HashMap<String, NodeStates>,
    mobile: MobileVisibility,
    current: Option<CurrentRoute>,
}

impl SidebarContainer {
    /// Create a container owning `registry`.
    ///
    /// Widgets default to empty markup, links are classified with
    /// [`DefaultLinkClassifier`] and scroll locking is a no-op.
    #[must_use]
    pub fn new(registry: SidebarRegistry, options: SidebarOptions) -> Self {
        Self {
            registry,
            options,
            logo: Box::new(EmptyWidget),
            search: Box::new(EmptyWidget),
            classifier: Box::new(DefaultLinkClassifier),
            node_states: HashMap::new(),
            mobile: MobileVisibility {
                visible: false,
                scroll_lock: Box::new(NoopScrollLock),
            },
            current: None,
        }
    }

    /// Set the logo widget.
    #[must_use]
    pub fn with_logo(mut self, logo: impl SidebarWidget + 'static) -> Self {
        self.logo = Box::new(logo);
        self
    }

    /// Set the search widget.
    #[must_use]
    pub fn with_search(mut self, search: impl SidebarWidget + 'static) -> Self {
        self.search = Box::new(search);
        self
    }

    /// Set the link classifier.
    #[must_use]
    pub fn with_link_classifier(mut self, classifier: impl LinkClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    /// Set the scroll lock used while the mobile sidebar is shown.
    #[must_use]
    pub fn with_scroll_lock(mut self, scroll_lock: impl ScrollLock + 'static) -> Self {
        self.mobile.scroll_lock = Box::new(scroll_lock);
        self
    }

    /// Sidebar registry.
    #[must_use]
    pub fn registry(&self) -> &SidebarRegistry {
        &self.registry
    }

    /// Node states of a sidebar, if it was rendered before.
    #[must_use]
    pub fn node_states(&self, sidebar_id: &str) -> Option<&NodeStates> {
        self.node_states.get(sidebar_id)
    }

    /// Render the sidebar for a page.
    ///
    /// Returns `Ok(None)` when no sidebar applies to the page.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError::NotFound`] if `sidebar_id` is not registered.
    /// Nothing is rendered and no state is touched in that case.
    pub fn render(
        &mut self,
        sidebar_id: Option<&str>,
        active_path: &str,
    ) -> Result<Option<SidebarView>, SidebarError> {
        let Some(id) = sidebar_id else {
            tracing::debug!(path = %active_path, "No sidebar for page");
            self.current = None;
            return Ok(None);
        };

        let Some(tree) = self.registry.get_mut(id) else {
            tracing::error!(sidebar = %id, "Sidebar not found in registry");
            return Err(SidebarError::NotFound { id: id.to_owned() });
        };

        if self.options.collapsible {
            let found = resolve_tree(tree, active_path);
            tracing::debug!(sidebar = %id, path = %active_path, found, "Resolved collapse state");
        }

        let ctx = ViewContext {
            active_path,
            collapsible: self.options.collapsible,
            classifier: self.classifier.as_ref(),
        };
        let states = self.node_states.entry(id.to_owned()).or_default();
        let items = build_items(&tree.items, &NodeKey::default(), None, &ctx, states);

        self.current = Some(CurrentRoute {
            sidebar: id.to_owned(),
            active_path: active_path.to_owned(),
        });

        Ok(Some(SidebarView {
            sidebar: id.to_owned(),
            active_path: active_path.to_owned(),
            logo: self.logo.render_html(),
            search: self.search.render_html(),
            items,
            mobile_visible: self.mobile.visible,
            hide_on_scroll: self.options.hide_on_scroll,
        }))
    }

    /// Render again for the last rendered page.
    ///
    /// Used after user interaction; returns `Ok(None)` if nothing was
    /// rendered yet.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError::NotFound`] if the sidebar disappeared.
    pub fn refresh(&mut self) -> Result<Option<SidebarView>, SidebarError> {
        match self.current.take() {
            Some(current) => self.render(Some(&current.sidebar), &current.active_path),
            None => Ok(None),
        }
    }

    /// Handle a click on a category header of the current sidebar.
    ///
    /// Returns whether the category was toggled. Clicks are ignored when
    /// collapsing is disabled or the node is unknown.
    pub fn click_category(&mut self, key: &NodeKey, event: &mut ClickEvent) -> bool {
        if !self.options.collapsible {
            return false;
        }
        let Some(current) = &self.current else {
            return false;
        };
        let Some(state) = self
            .node_states
            .get_mut(&current.sidebar)
            .and_then(|states| states.get_mut(key))
        else {
            tracing::debug!(key = %key, "Click on unknown category");
            return false;
        };

        let collapsed = state.handle_click(event);
        tracing::debug!(key = %key, collapsed, "Toggled category");
        true
    }

    /// Handle a click on a link.
    ///
    /// Every link click closes the mobile sidebar, external ones included.
    pub fn click_link(&mut self, href: &str, event: &mut ClickEvent) -> ItemActivation {
        self.on_item_click(event);
        if self.classifier.is_internal(href) {
            ItemActivation::Navigate {
                href: href.to_owned(),
            }
        } else {
            ItemActivation::OpenExternal {
                href: href.to_owned(),
            }
        }
    }

    /// Item click callback: blur the target and hide the mobile sidebar.
    pub fn on_item_click(&mut self, event: &mut ClickEvent) {
        event.blur();
        self.mobile.set(false);
    }

    /// Whether the mobile sidebar is shown.
    #[must_use]
    pub fn is_mobile_visible(&self) -> bool {
        self.mobile.visible
    }

    /// Show or hide the mobile sidebar.
    pub fn set_mobile_visible(&mut self, visible: bool) {
        self.mobile.set(visible);
    }

    /// Toggle the mobile sidebar. Returns the new visibility.
    pub fn toggle_mobile(&mut self) -> bool {
        let visible = !self.mobile.visible;
        self.mobile.set(visible);
        visible
    }
}

fn build_items(
    items: &[SidebarItem],
    parent: &NodeKey,
    tab_index: Option<i8>,
    ctx: &ViewContext<'_>,
    states: &mut NodeStates,
) -> Vec<ItemView> {
    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let key = parent.child(index, item.raw_label());
            build_item(item, key, tab_index, ctx, states)
        })
        .collect()
}

fn build_item(
    item: &SidebarItem,
    key: NodeKey,
    tab_index: Option<i8>,
    ctx: &ViewContext<'_>,
    states: &mut NodeStates,
) -> Option<ItemView> {
    let parsed = item.parsed_label();
    let label = parsed.label.to_owned();
    let tags = parsed.tags.iter().map(|&t| t.to_owned()).collect();

    match item {
        SidebarItem::Category {
            items, collapsed, ..
        } => {
            if items.is_empty() {
                return None;
            }

            // Collapse flags are ignored entirely when collapsing is disabled
            let local_collapsed = ctx.collapsible && states.reconcile(&key, *collapsed);
            let child_tab_index = if local_collapsed { -1 } else { 0 };
            let children = build_items(items, &key, Some(child_tab_index), ctx, states);

            Some(ItemView::Category {
                key,
                label,
                tags,
                collapsible: ctx.collapsible,
                collapsed: local_collapsed,
                active: ctx.collapsible && !*collapsed,
                tab_index,
                items: children,
            })
        }
        SidebarItem::Link { href, .. } => Some(ItemView::Link {
            key,
            label,
            tags,
            href: href.clone(),
            active: href == ctx.active_path,
            external: !ctx.classifier.is_internal(href),
            tab_index,
        }),
    }
}
