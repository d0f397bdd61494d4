// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted designer session: select, move, resize with cascade, drag the
//! anchor, then undo everything.
//!
//! This example shows how to combine:
//! - `understory_anchor_layout` for placement and the pan/zoom camera,
//! - `understory_handle_hit` for gizmo positions,
//! - `understory_designer` for the frame-driven controller and undo history.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example designer_drag`

use kurbo::{Point, Size, Vec2};
use tracing::info;
use tracing_subscriber::EnvFilter;
use understory_anchor_layout::{Camera, CoordinateSpace, NodeId, UiTransform, UiTree};
use understory_designer::{
    DirtyFlag, FrameContext, History, InteractionConfig, InteractionController, PointerButtons,
    PointerFrame, Selection, SelectionSet,
};
use understory_handle_hit::{Handle, anchor_marker, handle_positions};

struct Editor {
    tree: UiTree,
    camera: Camera,
    selection: SelectionSet,
    history: History,
    dirty: DirtyFlag,
    controller: InteractionController,
}

impl Editor {
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

    /// Press at `from`, move in a few steps to `to`, release.
    fn drag(&mut self, from: Point, to: Point) {
        self.frame(PointerFrame::at(from).press(PointerButtons::LEFT));
        for step in 1..=4 {
            let t = f64::from(step) / 4.0;
            self.frame(PointerFrame::at(from.lerp(to, t)).hold(PointerButtons::LEFT));
        }
        self.frame(PointerFrame::at(to).release(PointerButtons::LEFT));
    }

    fn report(&self, label: &str, nodes: &[(&str, NodeId)]) {
        println!("\n== {label} ==");
        for (name, id) in nodes {
            if let (Some(t), Some(b)) = (self.tree.transform(*id), self.tree.resolve_bounds(*id)) {
                println!(
                    "  {name:<6} bounds=({:.1}, {:.1})-({:.1}, {:.1}) anchor=({:.2}, {:.2}) offset=({:.1}, {:.1})",
                    b.x0, b.y0, b.x1, b.y1, t.anchor.x, t.anchor.y, t.offset.x, t.offset.y
                );
            }
        }
        println!(
            "  undo: {:?}  dirty: {}",
            self.history.undo_label(),
            self.dirty.is_dirty()
        );
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = InteractionConfig::from_json(r#"{ "snap_threshold": 10.0 }"#)
        .unwrap_or_else(|err| {
            tracing::warn!(%err, "falling back to default interaction config");
            InteractionConfig::default()
        });

    let mut tree = UiTree::new(Size::new(1280.0, 720.0));
    let root = tree.insert(None, None);
    let panel = tree.insert(Some(root), Some(UiTransform::with_size(400.0, 300.0)));
    let button = tree.insert(
        Some(panel),
        Some(
            UiTransform::with_size(120.0, 40.0)
                .anchor(0.5, 1.0)
                .pivot(0.5, 1.0)
                .offset(0.0, -20.0),
        ),
    );

    let mut editor = Editor {
        tree,
        camera: Camera::new(Point::new(0.0, 0.0)),
        selection: SelectionSet::new(),
        history: History::new(),
        dirty: DirtyFlag::default(),
        controller: InteractionController::new(config),
    };
    let nodes = [("panel", panel), ("button", button)];
    editor.report("initial", &nodes);

    // Select the panel by grabbing its body and move it toward the left edge.
    editor.drag(Point::new(500.0, 250.0), Point::new(65.0, 250.0));
    info!(selected = ?editor.selection.selected(), "after move");
    editor.report("moved (snapped to left edge)", &nodes);

    // Drag the panel's bottom-right handle outward; the button scales along.
    if let Some((_, corner)) = handle_positions(&editor.tree, panel, &editor.camera)
        .and_then(|handles| handles.into_iter().find(|(h, _)| *h == Handle::BottomRight))
    {
        editor.drag(corner, corner + Vec2::new(100.0, 50.0));
    }
    editor.report("resized", &nodes);

    // Drag the anchor to the top-left of the canvas; the panel stays put.
    if let Some(anchor) = anchor_marker(&editor.tree, panel, &editor.camera) {
        let target = editor.camera.canvas_to_screen(Point::new(15.0, 12.0));
        editor.drag(anchor, target);
    }
    editor.report("anchor moved", &nodes);

    while editor.history.can_undo() {
        let label = editor.history.undo_label();
        match editor.history.undo(&mut editor.tree) {
            Ok(_) => info!(?label, "undone"),
            Err(err) => {
                tracing::warn!(%err, "undo failed");
                break;
            }
        }
    }
    editor.report("after undo", &nodes);
}
