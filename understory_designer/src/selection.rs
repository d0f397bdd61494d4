// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection and dirty-state collaborators.

use hashbrown::HashSet;
use understory_anchor_layout::NodeId;

/// The designer's current selection, in selection order.
///
/// Gizmo picking walks [`Selection::selected`] front to back, so earlier
/// entries win ties.
pub trait Selection {
    /// Selected nodes in order.
    fn selected(&self) -> &[NodeId];

    /// Whether `id` is selected.
    fn is_selected(&self, id: NodeId) -> bool {
        self.selected().contains(&id)
    }

    /// Replace the selection with `id`.
    fn select_single(&mut self, id: NodeId);

    /// Add `id` if absent, remove it if present.
    fn toggle(&mut self, id: NodeId);

    /// Add `id` if absent.
    fn add(&mut self, id: NodeId);

    /// Deselect everything.
    fn clear(&mut self);
}

/// Ordered selection with O(1) membership.
#[derive(Clone, Debug, Default)]
pub struct SelectionSet {
    order: Vec<NodeId>,
    members: HashSet<NodeId>,
}

impl SelectionSet {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of selected nodes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Remove `id` if present.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if self.members.remove(&id) {
            self.order.retain(|&n| n != id);
            true
        } else {
            false
        }
    }

    /// Drop every entry for which `keep` returns false, e.g. nodes removed
    /// from the tree.
    pub fn retain(&mut self, mut keep: impl FnMut(NodeId) -> bool) {
        self.order.retain(|&n| keep(n));
        self.members.retain(|n| self.order.contains(n));
    }
}

impl Selection for SelectionSet {
    fn selected(&self) -> &[NodeId] {
        &self.order
    }

    fn is_selected(&self, id: NodeId) -> bool {
        self.members.contains(&id)
    }

    fn select_single(&mut self, id: NodeId) {
        self.clear();
        self.add(id);
    }

    fn toggle(&mut self, id: NodeId) {
        if !self.remove(id) {
            self.add(id);
        }
    }

    fn add(&mut self, id: NodeId) {
        if self.members.insert(id) {
            self.order.push(id);
        }
    }

    fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }
}

/// Receives "the document changed" notifications after a committed edit.
pub trait DirtyNotifier {
    /// Record that the document has unsaved changes.
    fn mark_dirty(&mut self);
}

impl DirtyNotifier for () {
    fn mark_dirty(&mut self) {}
}

/// A plain dirty bit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirtyFlag {
    dirty: bool,
}

impl DirtyFlag {
    /// Whether a change has been recorded since the last [`DirtyFlag::take`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return the current state and reset it.
    pub fn take(&mut self) -> bool {
        core::mem::take(&mut self.dirty)
    }
}

impl DirtyNotifier for DirtyFlag {
    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;
    use understory_anchor_layout::UiTree;

    fn ids(n: usize) -> (UiTree, Vec<NodeId>) {
        let mut tree = UiTree::new(Size::new(100.0, 100.0));
        let ids = (0..n).map(|_| tree.insert(None, None)).collect();
        (tree, ids)
    }

    #[test]
    fn add_keeps_order_and_ignores_duplicates() {
        let (_, n) = ids(3);
        let mut sel = SelectionSet::new();
        sel.add(n[2]);
        sel.add(n[0]);
        sel.add(n[2]);
        assert_eq!(sel.selected(), &[n[2], n[0]]);
    }

    #[test]
    fn toggle_flips_membership() {
        let (_, n) = ids(2);
        let mut sel = SelectionSet::new();
        sel.toggle(n[0]);
        sel.toggle(n[1]);
        sel.toggle(n[0]);
        assert_eq!(sel.selected(), &[n[1]]);
        assert!(!sel.is_selected(n[0]));
    }

    #[test]
    fn select_single_replaces() {
        let (_, n) = ids(3);
        let mut sel = SelectionSet::new();
        sel.add(n[0]);
        sel.add(n[1]);
        sel.select_single(n[2]);
        assert_eq!(sel.selected(), &[n[2]]);
        assert_eq!(sel.len(), 1);
    }

    #[test]
    fn retain_prunes_removed_nodes() {
        let (mut tree, n) = ids(3);
        let mut sel = SelectionSet::new();
        for &id in &n {
            sel.add(id);
        }
        tree.remove(n[1]);
        sel.retain(|id| tree.is_alive(id));
        assert_eq!(sel.selected(), &[n[0], n[2]]);
        assert!(!sel.is_selected(n[1]));
    }

    #[test]
    fn dirty_flag_take_resets() {
        let mut flag = DirtyFlag::default();
        assert!(!flag.take());
        flag.mark_dirty();
        assert!(flag.is_dirty());
        assert!(flag.take());
        assert!(!flag.is_dirty());
    }
}
