// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end gestures through the controller, checked against the undo history.

use kurbo::{Point, Size, Vec2};
use proptest::prelude::*;
use understory_anchor_layout::{Camera, CoordinateSpace, NodeId, UiTransform, UiTree};
use understory_designer::{
    DirtyFlag, EditKind, FrameContext, History, InteractionConfig, InteractionController,
    InteractionMode, PointerButtons, PointerFrame, Selection, SelectionSet,
};
use understory_handle_hit::{Handle, anchor_marker, handle_positions, pivot_marker};

struct Editor {
    tree: UiTree,
    camera: Camera,
    selection: SelectionSet,
    history: History,
    dirty: DirtyFlag,
    controller: InteractionController,
}

impl Editor {
    fn new(config: InteractionConfig) -> Self {
        Self {
            tree: UiTree::new(Size::new(800.0, 600.0)),
            camera: Camera::default(),
            selection: SelectionSet::new(),
            history: History::new(),
            dirty: DirtyFlag::default(),
            controller: InteractionController::new(config),
        }
    }

    fn frame(&mut self, input: PointerFrame) {
        let mut cx = FrameContext {
            tree: &mut self.tree,
            camera: &mut self.camera,
            selection: &mut self.selection,
            undo: &mut self.history,
            dirty: &mut self.dirty,
        };
        self.controller.update(&input, &mut cx);
    }

    fn drag(&mut self, from: Point, to: Point) {
        self.frame(PointerFrame::at(from).press(PointerButtons::LEFT));
        self.frame(PointerFrame::at(from.midpoint(to)).hold(PointerButtons::LEFT));
        self.frame(PointerFrame::at(to).hold(PointerButtons::LEFT));
        self.frame(PointerFrame::at(to).release(PointerButtons::LEFT));
    }

    fn handle(&self, id: NodeId, which: Handle) -> Point {
        handle_positions(&self.tree, id, &self.camera)
            .unwrap()
            .into_iter()
            .find(|(h, _)| *h == which)
            .unwrap()
            .1
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn resize_cascade_undoes_in_one_step() {
    let mut ed = Editor::new(InteractionConfig::default());
    let panel = ed
        .tree
        .insert(None, Some(UiTransform::with_size(200.0, 100.0).pivot(0.0, 0.0)));
    let label = ed.tree.insert(
        Some(panel),
        Some(UiTransform::with_size(50.0, 20.0).offset(10.0, 5.0)),
    );
    let grandchild = ed
        .tree
        .insert(Some(label), Some(UiTransform::with_size(10.0, 10.0).offset(4.0, 2.0)));
    ed.selection.add(panel);
    let snapshot: Vec<_> = [panel, label, grandchild]
        .iter()
        .map(|&id| *ed.tree.transform(id).unwrap())
        .collect();

    let corner = ed.handle(panel, Handle::BottomRight);
    ed.drag(corner, corner + Vec2::new(200.0, 50.0));

    assert_eq!(ed.controller.mode(), InteractionMode::Idle);
    assert_eq!(ed.history.len(), 1);
    assert_eq!(ed.history.undo_label(), Some(EditKind::Resize.label()));
    assert_eq!(ed.tree.transform(panel).unwrap().size, Size::new(400.0, 150.0));
    // Every descendant scales by (2, 1.5) from its own snapshot.
    let l = ed.tree.transform(label).unwrap();
    assert_eq!(l.size, Size::new(100.0, 30.0));
    assert_eq!(l.offset, Vec2::new(20.0, 7.5));
    let g = ed.tree.transform(grandchild).unwrap();
    assert_eq!(g.size, Size::new(20.0, 15.0));
    assert_eq!(g.offset, Vec2::new(8.0, 3.0));

    assert!(ed.history.undo(&mut ed.tree).unwrap());
    for (id, before) in [panel, label, grandchild].iter().zip(&snapshot) {
        assert_eq!(ed.tree.transform(*id), Some(before));
    }
}

#[test]
fn anchor_and_pivot_drags_keep_the_element_still() {
    let mut ed = Editor::new(InteractionConfig::default());
    let n = ed
        .tree
        .insert(None, Some(UiTransform::with_size(120.0, 60.0).offset(-100.0, 50.0)));
    ed.selection.add(n);
    let bounds = ed.tree.resolve_bounds(n).unwrap();

    // Anchor sits at the canvas center, pivot at the element center: distinct.
    let anchor = anchor_marker(&ed.tree, n, &ed.camera).unwrap();
    ed.drag(anchor, Point::new(795.0, 598.0));
    let t = *ed.tree.transform(n).unwrap();
    assert_eq!(t.anchor, Point::new(1.0, 1.0), "snapped to the corner");
    let after = ed.tree.resolve_bounds(n).unwrap();
    assert!(close(after.x0, bounds.x0) && close(after.y0, bounds.y0));

    let pivot = pivot_marker(&ed.tree, n, &ed.camera).unwrap();
    ed.drag(pivot, Point::new(bounds.x0 + 1.0, bounds.y0 + 2.0));
    let t = *ed.tree.transform(n).unwrap();
    assert_eq!(t.pivot, Point::new(0.0, 0.0), "snapped to the top-left");
    let after = ed.tree.resolve_bounds(n).unwrap();
    assert!(close(after.x0, bounds.x0) && close(after.y0, bounds.y0));

    assert_eq!(ed.history.len(), 2);
    assert_eq!(ed.history.undo_label(), Some("Move Pivot"));
}

#[test]
fn drags_work_under_pan_and_zoom() {
    let mut ed = Editor::new(InteractionConfig::default());
    let n = ed
        .tree
        .insert(None, Some(UiTransform::with_size(100.0, 50.0)));
    ed.camera = Camera {
        viewport_origin: Point::new(20.0, 40.0),
        offset: Vec2::new(300.0, 200.0),
        zoom: 2.0,
    };
    let grab = ed.camera.canvas_to_screen(Point::new(400.0, 300.0));
    // 60 screen px right at 2x is 30 canvas units.
    ed.drag(grab, grab + Vec2::new(60.0, 0.0));
    assert_eq!(ed.tree.transform(n).unwrap().offset, Vec2::new(30.0, 0.0));
    assert!(ed.dirty.take());
}

#[test]
fn redo_after_new_drag_is_gone() {
    let mut ed = Editor::new(InteractionConfig::default());
    ed.tree
        .insert(None, Some(UiTransform::with_size(100.0, 50.0)));
    ed.drag(Point::new(380.0, 290.0), Point::new(300.0, 290.0));
    assert!(ed.history.undo(&mut ed.tree).unwrap());
    assert!(ed.history.can_redo());
    ed.drag(Point::new(380.0, 290.0), Point::new(380.0, 200.0));
    assert!(!ed.history.can_redo());
    assert_eq!(ed.history.len(), 1);
}

#[test]
fn selection_follows_click_modifiers_across_frames() {
    let mut ed = Editor::new(InteractionConfig::default());
    let a = ed.tree.insert(
        None,
        Some(UiTransform::with_size(60.0, 60.0).offset(-200.0, 0.0)),
    );
    let b = ed.tree.insert(
        None,
        Some(UiTransform::with_size(60.0, 60.0).offset(200.0, 0.0)),
    );
    let click = |p: Point| PointerFrame::at(p).press(PointerButtons::LEFT);
    let release = |p: Point| PointerFrame::at(p).release(PointerButtons::LEFT);
    // Body points away from each element's markers and handles.
    let pa = Point::new(185.0, 290.0);
    let pb = Point::new(585.0, 290.0);

    ed.frame(click(pa));
    ed.frame(release(pa));
    assert_eq!(ed.selection.selected(), &[a]);

    ed.frame(click(pb).with_modifiers(understory_designer::Modifiers::SHIFT));
    ed.frame(release(pb));
    assert_eq!(ed.selection.selected(), &[a, b]);

    ed.frame(click(pa));
    ed.frame(release(pa));
    assert_eq!(ed.selection.selected(), &[a]);
    assert!(!ed.history.can_undo(), "clicks without motion commit nothing");
}

proptest! {
    #[test]
    fn move_then_undo_restores_exactly(
        dx in -500.0_f64..500.0,
        dy in -400.0_f64..400.0,
        snapping in any::<bool>(),
    ) {
        let config = InteractionConfig { snapping, ..InteractionConfig::default() };
        let mut ed = Editor::new(config);
        let n = ed.tree.insert(None, Some(UiTransform::with_size(100.0, 50.0)));
        let before = *ed.tree.transform(n).unwrap();
        let from = Point::new(380.0, 290.0);
        ed.drag(from, from + Vec2::new(dx, dy));
        prop_assert_eq!(ed.controller.mode(), InteractionMode::Idle);
        if ed.history.can_undo() {
            prop_assert!(ed.dirty.is_dirty());
            prop_assert!(ed.history.undo(&mut ed.tree).unwrap());
        }
        prop_assert_eq!(ed.tree.transform(n), Some(&before));
    }
}
