//! Per-node sidebar state.
//!
//! Each rendered category keeps a local collapse flag that the user can
//! toggle. On every render the flag computed by the resolver is compared to
//! the last value this node observed: a change means a navigation happened
//! and the computed value wins, otherwise the user's choice is kept.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// Stable identity of a node within one sidebar.
///
/// Built from `{index}_{raw label}` segments joined with `/`, starting at
/// the sidebar root, so the same tree yields the same keys on every render.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeKey(String);

impl NodeKey {
    /// Key of a child at `index` with the given raw label.
    #[must_use]
    pub fn child(&self, index: usize, raw_label: &str) -> Self {
        if self.0.is_empty() {
            Self(format!("{index}_{raw_label}"))
        } else {
            Self(format!("{}/{index}_{raw_label}", self.0))
        }
    }

    /// Key for a top-level item.
    #[must_use]
    pub fn top_level(index: usize, raw_label: &str) -> Self {
        Self::default().child(index, raw_label)
    }

    /// Key as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Click on a sidebar element.
///
/// Records the effects a handler requested so the host can apply them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClickEvent {
    default_prevented: bool,
    blurred: bool,
}

impl ClickEvent {
    /// Create a fresh click event.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress the element's default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Remove focus from the clicked element.
    pub fn blur(&mut self) {
        self.blurred = true;
    }

    /// Whether the default action was suppressed.
    #[must_use]
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Whether the clicked element was blurred.
    #[must_use]
    pub fn is_blurred(&self) -> bool {
        self.blurred
    }
}

/// Collapse state of one category node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ItemNodeState {
    local_collapsed: bool,
    last_seen_collapsed: Option<bool>,
}

impl ItemNodeState {
    /// Create a state that has not observed any computed value yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile with the collapse flag computed for this render.
    ///
    /// Adopts `computed` only when it differs from the last observed value.
    /// Returns the effective collapse state.
    pub fn reconcile(&mut self, computed: bool) -> bool {
        if self.last_seen_collapsed != Some(computed) {
            self.last_seen_collapsed = Some(computed);
            self.local_collapsed = computed;
        }
        self.local_collapsed
    }

    /// Flip the local collapse state. Returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.local_collapsed = !self.local_collapsed;
        self.local_collapsed
    }

    /// Handle a click on the category header.
    ///
    /// Categories have no destination, so the default navigation is
    /// suppressed and focus is dropped before toggling.
    pub fn handle_click(&mut self, event: &mut ClickEvent) -> bool {
        event.prevent_default();
        event.blur();
        self.toggle()
    }

    /// Effective collapse state.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.local_collapsed
    }

    /// Last computed value observed by [`ItemNodeState::reconcile`].
    #[must_use]
    pub fn last_seen_collapsed(&self) -> Option<bool> {
        self.last_seen_collapsed
    }
}

/// Node states of one sidebar, keyed by [`NodeKey`].
#[derive(Debug, Default)]
pub struct NodeStates {
    states: HashMap<NodeKey, ItemNodeState>,
}

impl NodeStates {
    /// Create an empty state store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile the node at `key`, creating its state on first sight.
    pub fn reconcile(&mut self, key: &NodeKey, computed: bool) -> bool {
        self.states.entry(key.clone()).or_default().reconcile(computed)
    }

    /// Get the state of a node for mutation.
    pub fn get_mut(&mut self, key: &NodeKey) -> Option<&mut ItemNodeState> {
        self.states.get_mut(key)
    }

    /// Number of tracked nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Check whether no node is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_reconcile_adopts_computed() {
        let mut state = ItemNodeState::new();

        assert!(state.reconcile(true));
        assert_eq!(state.last_seen_collapsed(), Some(true));

        let mut state = ItemNodeState::new();
        assert!(!state.reconcile(false));
    }

    #[test]
    fn test_user_toggle_survives_same_computed_value() {
        let mut state = ItemNodeState::new();
        state.reconcile(true);

        state.toggle();
        assert!(!state.is_collapsed());

        assert!(!state.reconcile(true));
        assert!(!state.reconcile(true));
    }

    #[test]
    fn test_changed_computed_value_overrides_user_toggle() {
        let mut state = ItemNodeState::new();
        state.reconcile(true);
        state.toggle();

        let collapsed = state.reconcile(false);

        assert!(!collapsed);
        assert_eq!(state.last_seen_collapsed(), Some(false));

        // User collapses again, then navigation away collapses it anyway
        state.toggle();
        assert!(state.is_collapsed());
        assert!(state.reconcile(true));
    }

    #[test]
    fn test_navigation_back_resets_user_collapse() {
        let mut state = ItemNodeState::new();
        state.reconcile(false);
        state.toggle();
        assert!(state.is_collapsed());

        state.reconcile(true);
        let collapsed = state.reconcile(false);

        assert!(!collapsed);
    }

    #[test]
    fn test_handle_click_prevents_default_and_blurs() {
        let mut state = ItemNodeState::new();
        state.reconcile(true);
        let mut event = ClickEvent::new();

        let collapsed = state.handle_click(&mut event);

        assert!(!collapsed);
        assert!(event.is_default_prevented());
        assert!(event.is_blurred());
    }

    #[test]
    fn test_node_key_child_paths() {
        let top = NodeKey::top_level(0, "Guides");
        let child = top.child(2, "Setup:new");

        assert_eq!(top.as_str(), "0_Guides");
        assert_eq!(child.as_str(), "0_Guides/2_Setup:new");
        assert_eq!(child.to_string(), "0_Guides/2_Setup:new");
    }

    #[test]
    fn test_node_states_track_per_key() {
        let mut states = NodeStates::new();
        let guides = NodeKey::top_level(0, "Guides");
        let api = NodeKey::top_level(1, "API");

        states.reconcile(&guides, true);
        states.reconcile(&api, true);
        states.get_mut(&guides).unwrap().toggle();

        assert_eq!(states.len(), 2);
        assert!(!states.reconcile(&guides, true));
        assert!(states.reconcile(&api, true));
    }
}
