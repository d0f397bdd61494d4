// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame interaction state machine.
//!
//! ## Frame phases
//!
//! [`InteractionController::update`] runs once per frame and always walks the
//! same phases in the same order:
//!
//! 1. **Pan**: middle press starts panning; middle release (or loss of the
//!    button) ends it.
//! 2. **Zoom**: scroll over the viewport zooms about the pointer.
//! 3. **Press**: a left press while idle picks a gizmo on the selection, or
//!    falls back to selecting a body and starting a move.
//! 4. **Drag**: the live drag recomputes its transforms from the snapshot,
//!    including on the frame the button is released.
//! 5. **Release**: the live drag diffs against its snapshot and commits one
//!    edit to the undo sink.
//!
//! Because press only starts from idle, a middle-button pan that started
//! earlier in the frame cannot be interrupted by a simultaneous left click.

use core::fmt;

use kurbo::Point;
use tracing::{debug, trace, warn};
use understory_anchor_layout::{Camera, CoordinateSpace, NodeId, UiTree};
use understory_handle_hit::{GizmoHit, pick_body, pick_gizmo};

use crate::config::InteractionConfig;
use crate::edit::UndoSink;
use crate::input::{Modifiers, PointerButtons, PointerFrame};
use crate::selection::{DirtyNotifier, Selection};
use crate::session::{DragKind, DragParams, DragSession};

/// The controller's externally visible mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InteractionMode {
    /// Nothing in progress.
    #[default]
    Idle,
    /// Middle-button camera pan.
    Panning,
    /// Body drag.
    Moving,
    /// Handle drag.
    Resizing,
    /// Anchor marker drag.
    DraggingAnchor,
    /// Pivot marker drag.
    DraggingPivot,
}

#[derive(Clone, Debug, Default)]
enum State {
    #[default]
    Idle,
    Panning {
        last: Point,
    },
    Dragging(DragSession),
}

/// Everything [`InteractionController::update`] reads or writes besides input.
pub struct FrameContext<'a> {
    /// The element tree being edited.
    pub tree: &'a mut UiTree,
    /// Viewport camera; pan and zoom write to it.
    pub camera: &'a mut Camera,
    /// Current selection.
    pub selection: &'a mut dyn Selection,
    /// Receives one edit per committed drag.
    pub undo: &'a mut dyn UndoSink,
    /// Told when a committed drag changed the document.
    pub dirty: &'a mut dyn DirtyNotifier,
}

impl fmt::Debug for FrameContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameContext")
            .field("tree", &self.tree)
            .field("camera", &self.camera)
            .field("selection", &self.selection.selected())
            .finish_non_exhaustive()
    }
}

/// Translates polled pointer input into camera moves, selection changes and
/// transform edits.
///
/// ```rust
/// use kurbo::{Point, Size};
/// use understory_anchor_layout::{Camera, UiTransform, UiTree};
/// use understory_designer::{
///     DirtyFlag, FrameContext, History, InteractionController, InteractionMode, PointerButtons,
///     PointerFrame, Selection, SelectionSet,
/// };
///
/// let mut tree = UiTree::new(Size::new(800.0, 600.0));
/// let node = tree.insert(None, Some(UiTransform::with_size(100.0, 50.0)));
/// let mut camera = Camera::default();
/// let mut selection = SelectionSet::new();
/// let mut history = History::new();
/// let mut dirty = DirtyFlag::default();
/// let mut controller = InteractionController::default();
///
/// let frames = [
///     PointerFrame::at(Point::new(380.0, 290.0)).press(PointerButtons::LEFT),
///     PointerFrame::at(Point::new(400.0, 250.0)).hold(PointerButtons::LEFT),
///     PointerFrame::at(Point::new(400.0, 250.0)).release(PointerButtons::LEFT),
/// ];
/// for frame in &frames {
///     let mut cx = FrameContext {
///         tree: &mut tree,
///         camera: &mut camera,
///         selection: &mut selection,
///         undo: &mut history,
///         dirty: &mut dirty,
///     };
///     controller.update(frame, &mut cx);
/// }
///
/// assert_eq!(controller.mode(), InteractionMode::Idle);
/// assert_eq!(selection.selected(), &[node]);
/// assert_eq!(tree.resolve_bounds(node).unwrap().origin(), Point::new(370.0, 235.0));
/// assert_eq!(history.undo_label(), Some("Move Element"));
/// assert!(dirty.is_dirty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    config: InteractionConfig,
    state: State,
}

impl InteractionController {
    /// Create a controller with `config`.
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            state: State::Idle,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next frame.
    pub fn set_config(&mut self, config: InteractionConfig) {
        self.config = config;
    }

    /// Toggle canvas-edge snapping for moves.
    pub fn set_snapping(&mut self, snapping: bool) {
        self.config.snapping = snapping;
    }

    /// Current mode.
    pub fn mode(&self) -> InteractionMode {
        match &self.state {
            State::Idle => InteractionMode::Idle,
            State::Panning { .. } => InteractionMode::Panning,
            State::Dragging(session) => session.kind().mode(),
        }
    }

    /// The live drag, if any.
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            State::Dragging(session) => Some(session),
            State::Idle | State::Panning { .. } => None,
        }
    }

    /// Whether a move, resize, anchor or pivot drag is live.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, State::Dragging(_))
    }

    /// What a press at `screen_point` would grab: a gizmo of a selected
    /// node, else the topmost body. For cursor feedback.
    pub fn hovered_gizmo(
        &self,
        tree: &UiTree,
        camera: &Camera,
        selection: &[NodeId],
        screen_point: Point,
    ) -> Option<(NodeId, GizmoHit)> {
        pick_gizmo(
            tree,
            selection,
            camera,
            screen_point,
            &self.config.hit_radii,
        )
        .or_else(|| {
            pick_body(tree, camera.screen_to_canvas(screen_point)).map(|id| (id, GizmoHit::Body))
        })
    }

    /// Abandon the live drag or pan without committing.
    ///
    /// Drag targets are restored to their pre-drag transforms. Returns
    /// whether anything was cancelled.
    pub fn cancel(&mut self, tree: &mut UiTree) -> bool {
        match core::mem::take(&mut self.state) {
            State::Idle => false,
            State::Panning { .. } => {
                debug!("pan cancelled");
                true
            }
            State::Dragging(session) => {
                session.restore(tree);
                debug!(node = ?session.target(), kind = ?session.kind(), "drag cancelled");
                true
            }
        }
    }

    /// Advance one frame.
    pub fn update(&mut self, input: &PointerFrame, cx: &mut FrameContext<'_>) {
        self.update_pan(input, cx);
        self.update_zoom(input, cx);
        self.update_press(input, cx);
        self.update_drag(input, cx);
        self.update_release(input, cx);
    }

    fn update_pan(&mut self, input: &PointerFrame, cx: &mut FrameContext<'_>) {
        match self.state {
            State::Idle
                if input.pressed.contains(PointerButtons::MIDDLE)
                    && input.accepts_viewport_input() =>
            {
                debug!(at = ?input.position, "pan start");
                self.state = State::Panning {
                    last: input.position,
                };
            }
            State::Panning { last } => {
                if input.down.contains(PointerButtons::MIDDLE) {
                    cx.camera.pan_by_screen(input.position - last);
                    self.state = State::Panning {
                        last: input.position,
                    };
                } else {
                    debug!(offset = ?cx.camera.offset, "pan end");
                    self.state = State::Idle;
                }
            }
            _ => {}
        }
    }

    fn update_zoom(&self, input: &PointerFrame, cx: &mut FrameContext<'_>) {
        if input.scroll == 0.0 || !input.accepts_viewport_input() {
            return;
        }
        let factor = 1.0 + input.scroll * self.config.zoom_step;
        cx.camera.zoom_about(
            input.position,
            factor,
            self.config.min_zoom,
            self.config.max_zoom,
        );
        trace!(zoom = cx.camera.zoom, "zoom");
    }

    fn update_press(&mut self, input: &PointerFrame, cx: &mut FrameContext<'_>) {
        if !matches!(self.state, State::Idle)
            || !input.pressed.contains(PointerButtons::LEFT)
            || !input.accepts_viewport_input()
        {
            return;
        }
        let canvas = cx.camera.screen_to_canvas(input.position);

        if let Some((id, hit)) = pick_gizmo(
            cx.tree,
            cx.selection.selected(),
            &*cx.camera,
            input.position,
            &self.config.hit_radii,
        ) {
            let kind = match hit {
                GizmoHit::Anchor => DragKind::Anchor,
                GizmoHit::Pivot => DragKind::Pivot,
                GizmoHit::Handle(handle) => DragKind::Resize(handle),
                GizmoHit::Body => DragKind::Move,
            };
            self.begin(cx.tree, id, kind, canvas);
            return;
        }

        let Some(id) = pick_body(cx.tree, canvas) else {
            if !input.modifiers.intersects(Modifiers::CTRL | Modifiers::SHIFT) {
                trace!("empty click clears selection");
                cx.selection.clear();
            }
            return;
        };
        if input.modifiers.contains(Modifiers::CTRL) {
            cx.selection.toggle(id);
        } else if input.modifiers.contains(Modifiers::SHIFT) {
            cx.selection.add(id);
        } else {
            cx.selection.select_single(id);
        }
        if cx.selection.is_selected(id) {
            self.begin(cx.tree, id, DragKind::Move, canvas);
        }
    }

    fn begin(&mut self, tree: &UiTree, id: NodeId, kind: DragKind, canvas: Point) {
        match DragSession::begin(tree, id, kind, canvas) {
            Some(session) => {
                debug!(node = ?id, ?kind, at = ?canvas, "drag start");
                self.state = State::Dragging(session);
            }
            None => debug!(node = ?id, "drag target has no transform; ignoring press"),
        }
    }

    fn update_drag(&self, input: &PointerFrame, cx: &mut FrameContext<'_>) {
        let State::Dragging(session) = &self.state else {
            return;
        };
        // The release frame still carries the final pointer position.
        if !(input.down | input.released).contains(PointerButtons::LEFT) {
            return;
        }
        let params = DragParams {
            snapping: self.config.snapping,
            snap_threshold: self.config.snap_threshold / cx.camera.zoom(),
            value_tolerance: self.config.value_snap_tolerance,
        };
        let pointer = cx.camera.screen_to_canvas(input.position);
        trace!(node = ?session.target(), at = ?pointer, "drag update");
        session.update(cx.tree, pointer, &params);
    }

    fn update_release(&mut self, input: &PointerFrame, cx: &mut FrameContext<'_>) {
        let left_up = input.released.contains(PointerButtons::LEFT)
            || !input.down.contains(PointerButtons::LEFT);
        if !left_up || !self.is_dragging() {
            return;
        }
        let State::Dragging(session) = core::mem::take(&mut self.state) else {
            return;
        };
        let Some(edit) = session.finish(cx.tree) else {
            debug!(node = ?session.target(), "drag ended without change");
            return;
        };
        let label = edit.label();
        let changed = edit.changes().len();
        match cx.undo.submit(edit, cx.tree) {
            Ok(()) => {
                debug!(node = ?session.target(), label, changed, "drag committed");
                cx.dirty.mark_dirty();
            }
            Err(err) => warn!(node = ?session.target(), %err, "drag edit rejected"),
        }
    }
}
