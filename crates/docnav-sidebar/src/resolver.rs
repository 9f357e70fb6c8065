//! Collapse state resolution.
//!
//! Recomputes category `collapsed` flags for the active path so that the
//! branch containing the current page is expanded and everything else is
//! collapsed. The pass is post-order: children are resolved before their
//! parent decides.

use crate::model::{SidebarItem, SidebarTree};

/// Resolve collapse flags for one subtree.
///
/// Returns whether the subtree contains a link to `active_path`. Every child
/// is visited even after a match so that sibling categories are collapsed
/// too.
pub fn resolve(item: &mut SidebarItem, active_path: &str) -> bool {
    match item {
        SidebarItem::Link { href, .. } => *href == active_path,
        SidebarItem::Category {
            items, collapsed, ..
        } => {
            // Non-short-circuiting: every child must be resolved
            let any_child_active = items
                .iter_mut()
                .fold(false, |any, child| resolve(child, active_path) | any);
            *collapsed = !any_child_active;
            any_child_active
        }
    }
}

/// Resolve collapse flags for every top-level item of a tree.
///
/// Returns whether the tree contains a link to `active_path`.
pub fn resolve_tree(tree: &mut SidebarTree, active_path: &str) -> bool {
    tree.items
        .iter_mut()
        .fold(false, |any, item| resolve(item, active_path) | any)
}
