// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reversible transform edits and a linear undo history.
//!
//! A finished drag produces one [`TransformEdit`] holding the before and after
//! transform of every node it touched. Edits are handed to an [`UndoSink`],
//! which is expected to apply them; [`History`] is the bundled sink.

use std::collections::VecDeque;

use thiserror::Error;
use tracing::debug;
use understory_anchor_layout::{NodeId, UiTransform, UiTree};

/// Why an edit could not be applied or reverted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum EditError {
    /// The node was removed from the tree after the edit was recorded.
    #[error("node {0:?} is no longer in the tree")]
    StaleNode(NodeId),
    /// The node exists but no longer carries a transform.
    #[error("node {0:?} has no transform")]
    MissingTransform(NodeId),
}

/// The gesture an edit came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditKind {
    /// Body drag.
    Move,
    /// Handle drag (including the cascade to descendants).
    Resize,
    /// Anchor marker drag.
    Anchor,
    /// Pivot marker drag.
    Pivot,
}

impl EditKind {
    /// Human-readable label for menus and history panels.
    pub fn label(self) -> &'static str {
        match self {
            Self::Move => "Move Element",
            Self::Resize => "Resize Element",
            Self::Anchor => "Move Anchor",
            Self::Pivot => "Move Pivot",
        }
    }
}

/// One node's transform before and after an edit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformChange {
    /// The edited node.
    pub node: NodeId,
    /// Transform before the edit.
    pub before: UiTransform,
    /// Transform after the edit.
    pub after: UiTransform,
}

/// A reversible batch of transform changes.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformEdit {
    kind: EditKind,
    changes: Vec<TransformChange>,
}

impl TransformEdit {
    /// Create an edit from its changes.
    pub fn new(kind: EditKind, changes: Vec<TransformChange>) -> Self {
        Self { kind, changes }
    }

    /// The gesture this edit came from.
    pub fn kind(&self) -> EditKind {
        self.kind
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    /// Per-node changes; the dragged node comes first.
    pub fn changes(&self) -> &[TransformChange] {
        &self.changes
    }

    /// Write every `after` transform.
    ///
    /// All nodes are checked first; on error the tree is untouched.
    pub fn apply(&self, tree: &mut UiTree) -> Result<(), EditError> {
        self.write(tree, |c| c.after)
    }

    /// Write every `before` transform.
    ///
    /// All nodes are checked first; on error the tree is untouched.
    pub fn revert(&self, tree: &mut UiTree) -> Result<(), EditError> {
        self.write(tree, |c| c.before)
    }

    fn write(
        &self,
        tree: &mut UiTree,
        pick: impl Fn(&TransformChange) -> UiTransform,
    ) -> Result<(), EditError> {
        for change in &self.changes {
            if !tree.is_alive(change.node) {
                return Err(EditError::StaleNode(change.node));
            }
            if tree.transform(change.node).is_none() {
                return Err(EditError::MissingTransform(change.node));
            }
        }
        for change in &self.changes {
            if let Some(t) = tree.transform_mut(change.node) {
                *t = pick(change);
            }
        }
        Ok(())
    }
}

/// Receives committed edits.
///
/// Implementations must apply the edit to `tree` (the controller has already
/// put the tree back into its pre-drag state) and may record it for undo.
pub trait UndoSink {
    /// Apply and record `edit`.
    fn submit(&mut self, edit: TransformEdit, tree: &mut UiTree) -> Result<(), EditError>;
}

/// Linear undo/redo stacks of [`TransformEdit`]s.
///
/// ```rust
/// use kurbo::Size;
/// use understory_anchor_layout::{UiTransform, UiTree};
/// use understory_designer::{EditKind, History, TransformChange, TransformEdit, UndoSink};
///
/// let mut tree = UiTree::new(Size::new(800.0, 600.0));
/// let n = tree.insert(None, Some(UiTransform::default()));
/// let before = *tree.transform(n).unwrap();
/// let after = before.offset(25.0, 0.0);
///
/// let mut history = History::new();
/// let edit = TransformEdit::new(EditKind::Move, vec![TransformChange { node: n, before, after }]);
/// history.submit(edit, &mut tree).unwrap();
/// assert_eq!(tree.transform(n), Some(&after));
///
/// assert!(history.undo(&mut tree).unwrap());
/// assert_eq!(tree.transform(n), Some(&before));
/// assert_eq!(history.redo_label(), Some("Move Element"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct History {
    undo: VecDeque<TransformEdit>,
    redo: Vec<TransformEdit>,
    limit: Option<usize>,
}

impl History {
    /// An unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// A history that keeps at most `limit` undo steps, dropping the oldest.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Whether there is anything to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether there is anything to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Label of the edit [`History::undo`] would revert.
    pub fn undo_label(&self) -> Option<&'static str> {
        self.undo.back().map(TransformEdit::label)
    }

    /// Label of the edit [`History::redo`] would reapply.
    pub fn redo_label(&self) -> Option<&'static str> {
        self.redo.last().map(TransformEdit::label)
    }

    /// Number of undo steps held.
    pub fn len(&self) -> usize {
        self.undo.len()
    }

    /// Whether no undo steps are held.
    pub fn is_empty(&self) -> bool {
        self.undo.is_empty()
    }

    /// Revert the most recent edit.
    ///
    /// Returns `Ok(false)` when there is nothing to undo. An edit that can no
    /// longer be reverted is discarded and its error returned.
    pub fn undo(&mut self, tree: &mut UiTree) -> Result<bool, EditError> {
        let Some(edit) = self.undo.pop_back() else {
            return Ok(false);
        };
        edit.revert(tree)?;
        debug!(label = edit.label(), "undo");
        self.redo.push(edit);
        Ok(true)
    }

    /// Reapply the most recently undone edit.
    ///
    /// Returns `Ok(false)` when there is nothing to redo. An edit that can no
    /// longer be applied is discarded and its error returned.
    pub fn redo(&mut self, tree: &mut UiTree) -> Result<bool, EditError> {
        let Some(edit) = self.redo.pop() else {
            return Ok(false);
        };
        edit.apply(tree)?;
        debug!(label = edit.label(), "redo");
        self.push_undo(edit);
        Ok(true)
    }

    /// Drop both stacks.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    fn push_undo(&mut self, edit: TransformEdit) {
        self.undo.push_back(edit);
        if let Some(limit) = self.limit {
            while self.undo.len() > limit {
                self.undo.pop_front();
            }
        }
    }
}

impl UndoSink for History {
    fn submit(&mut self, edit: TransformEdit, tree: &mut UiTree) -> Result<(), EditError> {
        edit.apply(tree)?;
        self.redo.clear();
        self.push_undo(edit);
        Ok(())
    }
}
