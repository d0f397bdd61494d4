// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag sessions: snapshot at press, live update while held, diff at release.
//!
//! A [`DragSession`] captures the dragged node's transform (and, for resizes,
//! every transformed descendant) when the drag starts. Each frame the live
//! transforms are recomputed from those snapshots and the pointer's total
//! canvas-space delta, never accumulated frame to frame. On release the
//! session restores the snapshots and hands back a [`TransformEdit`]
//! describing the net change.

use kurbo::{Point, Rect, Size, Vec2};
use understory_anchor_layout::{MIN_EXTENT, NodeId, UiTransform, UiTree, clamp_unit, place};
use understory_handle_hit::Handle;

use crate::controller::InteractionMode;
use crate::edit::{EditKind, TransformChange, TransformEdit};
use crate::snap::{canvas_edge_snap, snap_value};

/// What a drag is editing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragKind {
    /// Translate the element by changing its offset.
    Move,
    /// Resize from one of the handles.
    Resize(Handle),
    /// Move the anchor while keeping the element in place.
    Anchor,
    /// Move the pivot while keeping the element in place.
    Pivot,
}

impl DragKind {
    /// The edit kind recorded when this drag commits.
    pub fn edit_kind(self) -> EditKind {
        match self {
            Self::Move => EditKind::Move,
            Self::Resize(_) => EditKind::Resize,
            Self::Anchor => EditKind::Anchor,
            Self::Pivot => EditKind::Pivot,
        }
    }

    /// The controller mode while this drag is active.
    pub fn mode(self) -> InteractionMode {
        match self {
            Self::Move => InteractionMode::Moving,
            Self::Resize(_) => InteractionMode::Resizing,
            Self::Anchor => InteractionMode::DraggingAnchor,
            Self::Pivot => InteractionMode::DraggingPivot,
        }
    }
}

/// Per-frame knobs a drag update needs.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DragParams {
    /// Canvas-edge snapping for moves.
    pub(crate) snapping: bool,
    /// Edge snap distance, already in canvas units.
    pub(crate) snap_threshold: f64,
    /// Anchor/pivot value snap tolerance.
    pub(crate) value_tolerance: f64,
}

/// Resize `start` by a canvas-space pointer delta applied to `handle`.
///
/// Edges owned by the handle follow the pointer and the opposite edges stay
/// put, whatever the pivot. Width and height never drop below
/// [`MIN_EXTENT`]; the offset compensates by the size change that actually
/// happened, so a clamped resize pins the moving edge instead of drifting.
///
/// ```rust
/// use kurbo::{Size, Vec2};
/// use understory_anchor_layout::UiTransform;
/// use understory_designer::session::resize;
/// use understory_handle_hit::Handle;
///
/// // Centered pivot: growing to the right shifts the offset by half the growth.
/// let start = UiTransform::with_size(100.0, 50.0);
/// let grown = resize(&start, Handle::Right, Vec2::new(20.0, 10.0));
/// assert_eq!(grown.size, Size::new(120.0, 50.0));
/// assert_eq!(grown.offset, Vec2::new(10.0, 0.0));
/// ```
pub fn resize(start: &UiTransform, handle: Handle, delta: Vec2) -> UiTransform {
    let mut out = *start;
    let (w0, h0) = (start.size.width, start.size.height);
    let pivot = start.pivot;
    if handle.moves_right() {
        out.size.width = (w0 + delta.x).max(MIN_EXTENT);
        out.offset.x = start.offset.x + (out.size.width - w0) * pivot.x;
    } else if handle.moves_left() {
        out.size.width = (w0 - delta.x).max(MIN_EXTENT);
        out.offset.x = start.offset.x + (w0 - out.size.width) * (1.0 - pivot.x);
    }
    if handle.moves_bottom() {
        out.size.height = (h0 + delta.y).max(MIN_EXTENT);
        out.offset.y = start.offset.y + (out.size.height - h0) * pivot.y;
    } else if handle.moves_top() {
        out.size.height = (h0 - delta.y).max(MIN_EXTENT);
        out.offset.y = start.offset.y + (h0 - out.size.height) * (1.0 - pivot.y);
    }
    out
}

/// Scale a descendant's snapshot by its resized ancestor's factors.
///
/// Size and offset scale per axis (size floored at [`MIN_EXTENT`]); anchor,
/// pivot and rotation are kept.
pub fn cascade(snapshot: &UiTransform, scale: Vec2) -> UiTransform {
    let mut out = *snapshot;
    out.size = Size::new(
        (snapshot.size.width * scale.x).max(MIN_EXTENT),
        (snapshot.size.height * scale.y).max(MIN_EXTENT),
    );
    out.offset = Vec2::new(snapshot.offset.x * scale.x, snapshot.offset.y * scale.y);
    out
}

/// Normalized position of `p` along an axis starting at `origin` with `extent`.
///
/// A degenerate axis keeps `fallback`.
fn normalized(p: f64, origin: f64, extent: f64, fallback: f64) -> f64 {
    if extent > 0.0 {
        (p - origin) / extent
    } else {
        fallback
    }
}

fn ratio(new: f64, old: f64) -> f64 {
    if old > 0.0 { new / old } else { 1.0 }
}

fn clamp_and_snap(raw: Point, tolerance: f64) -> Point {
    let p = clamp_unit(raw);
    Point::new(snap_value(p.x, tolerance), snap_value(p.y, tolerance))
}

/// An in-progress drag.
///
/// Owned by the controller from press to release.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    kind: DragKind,
    target: NodeId,
    start_canvas: Point,
    start: UiTransform,
    parent_frame: Rect,
    canvas: Size,
    descendants: Vec<(NodeId, UiTransform)>,
}

impl DragSession {
    /// Snapshot `target` for a drag of `kind` starting at `start_canvas`.
    ///
    /// Returns `None` if the node is stale or has no transform.
    pub(crate) fn begin(
        tree: &UiTree,
        target: NodeId,
        kind: DragKind,
        start_canvas: Point,
    ) -> Option<Self> {
        let start = *tree.transform(target)?;
        let parent_frame = tree.parent_frame(target)?;
        let descendants = match kind {
            DragKind::Resize(_) => tree
                .descendants(target)
                .into_iter()
                .filter_map(|d| tree.transform(d).map(|t| (d, *t)))
                .collect(),
            DragKind::Move | DragKind::Anchor | DragKind::Pivot => Vec::new(),
        };
        Some(Self {
            kind,
            target,
            start_canvas,
            start,
            parent_frame,
            canvas: tree.canvas_size(),
            descendants,
        })
    }

    /// What the drag edits.
    pub fn kind(&self) -> DragKind {
        self.kind
    }

    /// The dragged node.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Pointer position at press, in canvas space.
    pub fn start_canvas(&self) -> Point {
        self.start_canvas
    }

    /// The target's transform at press.
    pub fn start_transform(&self) -> &UiTransform {
        &self.start
    }

    /// Frame the target's anchor resolved against at press.
    pub fn parent_frame(&self) -> Rect {
        self.parent_frame
    }

    /// Descendant snapshots captured for a resize cascade.
    pub fn descendants(&self) -> &[(NodeId, UiTransform)] {
        &self.descendants
    }

    /// The target's transform for a pointer at `pointer` (canvas space).
    pub(crate) fn target_transform(&self, pointer: Point, params: &DragParams) -> UiTransform {
        let delta = pointer - self.start_canvas;
        if delta == Vec2::ZERO {
            return self.start;
        }
        let start = &self.start;
        let mut out = *start;
        match self.kind {
            DragKind::Move => {
                out.offset = start.offset + delta;
                if params.snapping {
                    let bounds = place(&out, self.parent_frame);
                    out.offset += canvas_edge_snap(bounds, self.canvas, params.snap_threshold);
                }
            }
            DragKind::Resize(handle) => out = resize(start, handle, delta),
            DragKind::Anchor => {
                let frame = self.parent_frame;
                let raw = Point::new(
                    normalized(pointer.x, frame.x0, frame.width(), start.anchor.x),
                    normalized(pointer.y, frame.y0, frame.height(), start.anchor.y),
                );
                out.anchor = clamp_and_snap(raw, params.value_tolerance);
                out.offset = start.offset
                    - Vec2::new(
                        (out.anchor.x - start.anchor.x) * frame.width(),
                        (out.anchor.y - start.anchor.y) * frame.height(),
                    );
            }
            DragKind::Pivot => {
                let bounds = place(start, self.parent_frame);
                let raw = Point::new(
                    normalized(pointer.x, bounds.x0, bounds.width(), start.pivot.x),
                    normalized(pointer.y, bounds.y0, bounds.height(), start.pivot.y),
                );
                out.pivot = clamp_and_snap(raw, params.value_tolerance);
                out.offset = start.offset
                    + Vec2::new(
                        (out.pivot.x - start.pivot.x) * start.size.width,
                        (out.pivot.y - start.pivot.y) * start.size.height,
                    );
            }
        }
        out
    }

    /// Write live transforms for a pointer at `pointer` (canvas space).
    pub(crate) fn update(&self, tree: &mut UiTree, pointer: Point, params: &DragParams) {
        let next = self.target_transform(pointer, params);
        if let Some(t) = tree.transform_mut(self.target) {
            *t = next;
        }
        if self.descendants.is_empty() {
            return;
        }
        let scale = Vec2::new(
            ratio(next.size.width, self.start.size.width),
            ratio(next.size.height, self.start.size.height),
        );
        for (id, snapshot) in &self.descendants {
            if let Some(t) = tree.transform_mut(*id) {
                *t = cascade(snapshot, scale);
            }
        }
    }

    /// Write every snapshot back.
    pub(crate) fn restore(&self, tree: &mut UiTree) {
        for (id, snapshot) in self.snapshots() {
            if let Some(t) = tree.transform_mut(id) {
                *t = snapshot;
            }
        }
    }

    /// Diff live state against the snapshots.
    ///
    /// If anything changed, the tree is restored to the snapshots and the
    /// net change is returned as one edit. Nodes removed mid-drag are left
    /// out of the edit.
    pub(crate) fn finish(&self, tree: &mut UiTree) -> Option<TransformEdit> {
        let changes: Vec<TransformChange> = self
            .snapshots()
            .filter_map(|(node, before)| {
                let after = *tree.transform(node)?;
                (after != before).then_some(TransformChange {
                    node,
                    before,
                    after,
                })
            })
            .collect();
        if changes.is_empty() {
            return None;
        }
        self.restore(tree);
        Some(TransformEdit::new(self.kind.edit_kind(), changes))
    }

    fn snapshots(&self) -> impl Iterator<Item = (NodeId, UiTransform)> + '_ {
        core::iter::once((self.target, self.start)).chain(self.descendants.iter().copied())
    }
}
