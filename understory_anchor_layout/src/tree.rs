// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure and per-node data.

use alloc::{vec, vec::Vec};
use kurbo::Size;

use crate::types::{NodeFlags, NodeId, UiTransform};

/// Tree of UI elements edited on a fixed-size design canvas.
///
/// Parents own their children; every node keeps a non-owning link to its
/// parent for upward traversal. A node may or may not carry a [`UiTransform`].
/// Nodes without one (for example a root "canvas" node) do not contribute a
/// frame of their own: layout skips over them to the next transformed
/// ancestor, or to the canvas rectangle.
///
/// Unlike a retained scene, nothing here is cached. Layout queries such as
/// [`UiTree::resolve_bounds`] walk the parent chain every time, so a transform
/// written mid-drag is visible to the very next query.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Rect, Size};
/// use understory_anchor_layout::{UiTransform, UiTree};
///
/// let mut tree = UiTree::new(Size::new(800.0, 600.0));
/// let canvas = tree.insert(None, None);
/// let panel = tree.insert(Some(canvas), Some(UiTransform::with_size(100.0, 50.0)));
///
/// // Centered by default: anchor and pivot are both (0.5, 0.5).
/// assert_eq!(
///     tree.resolve_bounds(panel),
///     Some(Rect::new(350.0, 275.0, 450.0, 325.0))
/// );
/// ```
#[derive(Clone)]
pub struct UiTree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    canvas_size: Size,
}

impl core::fmt::Debug for UiTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("UiTree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("canvas_size", &self.canvas_size)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    transform: Option<UiTransform>,
    flags: NodeFlags,
}

impl Node {
    fn new(generation: u32, transform: Option<UiTransform>) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            transform,
            flags: NodeFlags::default(),
        }
    }
}

impl UiTree {
    /// Create an empty tree for a canvas of the given design size.
    pub fn new(canvas_size: Size) -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            canvas_size,
        }
    }

    /// Design size of the canvas that frames all top-level elements.
    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    /// Change the design size of the canvas.
    pub fn set_canvas_size(&mut self, size: Size) {
        self.canvas_size = size;
    }

    /// Insert a new node as the last child of `parent` (or as a root if `None`).
    ///
    /// A stale `parent` inserts the node as a root.
    pub fn insert(&mut self, parent: Option<NodeId>, transform: Option<UiTransform>) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, transform));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, transform)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent
            && self.is_alive(p)
        {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove a node and its whole subtree.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Move `id` (with its subtree) to the end of `new_parent`'s children, or
    /// make it a root.
    ///
    /// Reparenting a node under itself or one of its descendants is ignored.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(p) = new_parent
            && (!self.is_alive(p) || p == id || self.is_ancestor(id, p))
        {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is live if its slot is occupied and its generation matches
    /// the generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.1)
    }

    /// Returns the parent of a node if live, or `None` for roots or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Get the children of a node in paint order, or an empty slice if the node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        match self.node_opt(id) {
            Some(n) => &n.children,
            None => &[],
        }
    }

    /// Returns the transform of a live node, if it has one.
    pub fn transform(&self, id: NodeId) -> Option<&UiTransform> {
        self.node_opt(id).and_then(|n| n.transform.as_ref())
    }

    /// Mutable access to the transform of a live node, if it has one.
    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut UiTransform> {
        self.node_opt_mut(id).and_then(|n| n.transform.as_mut())
    }

    /// Attach, replace, or (with `None`) detach a node's transform.
    pub fn set_transform(&mut self, id: NodeId, transform: Option<UiTransform>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.transform = transform;
        }
    }

    /// Returns the flags of a node if the identifier is live.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node_opt(id).map(|n| n.flags)
    }

    /// Update node flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.flags = flags;
        }
    }

    /// Iterate the live root nodes in slot order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, n)| match n {
            Some(n) if n.parent.is_none() =>
            {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "NodeId uses 32-bit indices by design."
                )]
                Some(NodeId::new(i as u32, n.generation))
            }
            _ => None,
        })
    }

    /// Iterate the strict ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        core::iter::successors(self.parent_of(id), move |&p| self.parent_of(p))
    }

    /// Every descendant of `id` in depth-first pre-order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children_of(id).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children_of(n).iter().rev().copied());
        }
        out
    }

    /// All live nodes in paint order: roots in slot order, each followed
    /// by its subtree depth-first. The last node is drawn on top.
    pub fn draw_order(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        for root in self.roots() {
            let mut stack = vec![root];
            while let Some(n) = stack.pop() {
                out.push(n);
                stack.extend(self.children_of(n).iter().rev().copied());
            }
        }
        out
    }

    // --- internals ---

    fn is_ancestor(&self, ancestor: NodeId, of: NodeId) -> bool {
        self.ancestors(of).any(|a| a == ancestor)
    }

    /// Access a node; panics if `id` is stale.
    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{vec, vec::Vec};

    fn canvas() -> UiTree {
        UiTree::new(Size::new(800.0, 600.0))
    }

    #[test]
    fn liveness_insert_remove_reuse() {
        let mut tree = canvas();
        let root = tree.insert(None, None);
        let a = tree.insert(Some(root), Some(UiTransform::default()));
        assert!(tree.is_alive(root));
        assert!(tree.is_alive(a));

        // Remove child; id becomes stale.
        tree.remove(a);
        assert!(!tree.is_alive(a));
        assert!(tree.transform(a).is_none());

        // Insert new child; reuses the slot but the generation bumps.
        let b = tree.insert(Some(root), Some(UiTransform::default()));
        assert_eq!(a.idx(), b.idx());
        assert_ne!(a, b);
        assert!(tree.is_alive(b));
        assert_eq!(tree.children_of(root), &[b]);
    }

    #[test]
    fn remove_drops_subtree() {
        let mut tree = canvas();
        let root = tree.insert(None, None);
        let a = tree.insert(Some(root), Some(UiTransform::default()));
        let b = tree.insert(Some(a), Some(UiTransform::default()));
        tree.remove(a);
        assert!(!tree.is_alive(b));
        assert!(tree.children_of(root).is_empty());
    }

    #[test]
    fn reparent_rejects_cycles() {
        let mut tree = canvas();
        let a = tree.insert(None, None);
        let b = tree.insert(Some(a), None);
        let c = tree.insert(Some(b), None);

        tree.reparent(a, Some(c));
        assert_eq!(tree.parent_of(a), None, "ancestor cannot move under its descendant");
        assert_eq!(tree.parent_of(c), Some(b));

        tree.reparent(c, Some(a));
        assert_eq!(tree.children_of(a), &[b, c]);
        assert!(tree.children_of(b).is_empty());
    }

    #[test]
    fn traversal_orders() {
        let mut tree = canvas();
        let root = tree.insert(None, None);
        let a = tree.insert(Some(root), None);
        let a1 = tree.insert(Some(a), None);
        let b = tree.insert(Some(root), None);
        let other_root = tree.insert(None, None);

        assert_eq!(tree.descendants(root), vec![a, a1, b]);
        assert_eq!(tree.draw_order(), vec![root, a, a1, b, other_root]);
        assert_eq!(tree.ancestors(a1).collect::<Vec<_>>(), vec![a, root]);
    }

    #[test]
    fn stale_ids_are_ignored() {
        let mut tree = canvas();
        let a = tree.insert(None, Some(UiTransform::default()));
        tree.remove(a);
        tree.set_transform(a, Some(UiTransform::with_size(5.0, 5.0)));
        tree.set_flags(a, NodeFlags::empty());
        assert!(tree.transform_mut(a).is_none());
        assert!(tree.flags(a).is_none());
        assert!(tree.descendants(a).is_empty());
    }
}
