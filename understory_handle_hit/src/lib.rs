// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gizmo hit testing for UI designers.
//!
//! This crate answers "what is under the pointer?" for elements laid out with
//! [`understory_anchor_layout`]. It distinguishes the element body from the
//! small manipulation affordances drawn around a selected element:
//!
//! - the eight resize [`Handle`]s (four corners, four edge midpoints),
//! - the anchor marker, drawn at the anchor point inside the parent frame,
//! - the pivot marker, drawn at the pivot point inside the element.
//!
//! Body tests run in canvas space against the axis-aligned resolved bounds.
//! Gizmo tests run in screen space with fixed radii ([`HitRadii`]) so they keep
//! the same on-screen size at every zoom level. Handle positions follow the
//! rotated corners, so handles stay grabbable on rotated elements.
//!
//! # Priority
//!
//! Gizmos are small, precise targets and must never be shadowed by the much
//! larger body. For each node, [`classify`] tests in the order anchor → pivot →
//! handle → body. Across a selection, [`pick`] and [`pick_gizmo`] evaluate nodes
//! in selection order and the first match wins. Corner handles are tested
//! before edge handles so that near-corner ambiguity resolves to the corner.
//!
//! All functions are total: stale node ids and nodes without a transform never
//! hit anything.
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_anchor_layout::{Camera, UiTransform, UiTree};
//! use understory_handle_hit::{GizmoHit, Handle, HitRadii, classify};
//!
//! let mut tree = UiTree::new(Size::new(800.0, 600.0));
//! let n = tree.insert(None, Some(UiTransform::with_size(100.0, 50.0)));
//! let cam = Camera::default();
//!
//! // Bounds are {350, 275, 100, 50}; the bottom-right corner handle sits at (450, 325).
//! let hit = classify(&tree, n, &cam, Point::new(447.0, 322.0), &HitRadii::default());
//! assert_eq!(hit, Some(GizmoHit::Handle(Handle::BottomRight)));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

use kurbo::{Point, Rect, Size};
use understory_anchor_layout::{
    CoordinateSpace, NodeFlags, NodeId, UiTree, anchor_point, pivot_point,
};

mod handle;

pub use handle::Handle;

/// Screen-space radii for gizmo hit tests.
///
/// These stay constant in screen space regardless of zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HitRadii {
    /// Half-size of the square hit region around each resize handle.
    pub handle: f64,
    /// Radius around the anchor marker.
    pub anchor: f64,
    /// Radius around the pivot marker.
    pub pivot: f64,
}

impl Default for HitRadii {
    fn default() -> Self {
        Self {
            handle: 12.0,
            anchor: 12.0,
            pivot: 10.0,
        }
    }
}

/// What part of an element a pointer landed on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GizmoHit {
    /// The anchor marker.
    Anchor,
    /// The pivot marker.
    Pivot,
    /// One of the resize handles.
    Handle(Handle),
    /// The element body.
    Body,
}

/// Inclusive containment: points on the edges are inside.
fn contains_inclusive(rect: Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}

/// Whether `canvas_point` lies within the resolved bounds of `id`, edges included.
pub fn hit_test_body(tree: &UiTree, id: NodeId, canvas_point: Point) -> bool {
    tree.resolve_bounds(id)
        .is_some_and(|b| contains_inclusive(b, canvas_point))
}

/// Screen positions of all eight handles of `id`, in [`Handle::ALL`] order.
///
/// Corners come from the rotated corners; edge handles sit at the midpoints
/// between adjacent corners.
pub fn handle_positions<S: CoordinateSpace + ?Sized>(
    tree: &UiTree,
    id: NodeId,
    space: &S,
) -> Option<[(Handle, Point); 8]> {
    let [tl, tr, br, bl] = tree.resolve_rotated_corners(id, space)?;
    Some([
        (Handle::TopLeft, tl),
        (Handle::TopRight, tr),
        (Handle::BottomRight, br),
        (Handle::BottomLeft, bl),
        (Handle::Top, tl.midpoint(tr)),
        (Handle::Right, tr.midpoint(br)),
        (Handle::Bottom, br.midpoint(bl)),
        (Handle::Left, bl.midpoint(tl)),
    ])
}

/// The resize handle of `id` under `screen_point`, if any.
///
/// Each handle owns a square of half-size `radii.handle` centered on it.
/// Corners are tested before edges.
pub fn hit_test_handle<S: CoordinateSpace + ?Sized>(
    tree: &UiTree,
    id: NodeId,
    space: &S,
    screen_point: Point,
    radii: &HitRadii,
) -> Option<Handle> {
    let extent = Size::new(radii.handle * 2.0, radii.handle * 2.0);
    handle_positions(tree, id, space)?
        .into_iter()
        .find(|(_, p)| contains_inclusive(Rect::from_center_size(*p, extent), screen_point))
        .map(|(h, _)| h)
}

/// Screen position of the anchor marker of `id`.
///
/// The anchor is a point of the parent frame, so it is computed there and then
/// converted to screen space.
pub fn anchor_marker<S: CoordinateSpace + ?Sized>(
    tree: &UiTree,
    id: NodeId,
    space: &S,
) -> Option<Point> {
    let transform = tree.transform(id)?;
    let frame = tree.parent_frame(id)?;
    Some(space.canvas_to_screen(anchor_point(transform, frame)))
}

/// Screen position of the pivot marker of `id`.
pub fn pivot_marker<S: CoordinateSpace + ?Sized>(
    tree: &UiTree,
    id: NodeId,
    space: &S,
) -> Option<Point> {
    let transform = tree.transform(id)?;
    let bounds = tree.resolve_bounds(id)?;
    Some(space.canvas_to_screen(pivot_point(transform, bounds)))
}

/// Whether `screen_point` is within `radii.anchor` of the anchor marker of `id`.
pub fn hit_test_anchor<S: CoordinateSpace + ?Sized>(
    tree: &UiTree,
    id: NodeId,
    space: &S,
    screen_point: Point,
    radii: &HitRadii,
) -> bool {
    anchor_marker(tree, id, space).is_some_and(|m| m.distance(screen_point) <= radii.anchor)
}

/// Whether `screen_point` is within `radii.pivot` of the pivot marker of `id`.
pub fn hit_test_pivot<S: CoordinateSpace + ?Sized>(
    tree: &UiTree,
    id: NodeId,
    space: &S,
    screen_point: Point,
    radii: &HitRadii,
) -> bool {
    pivot_marker(tree, id, space).is_some_and(|m| m.distance(screen_point) <= radii.pivot)
}

/// Test the gizmos of a single node: anchor, then pivot, then handles.
fn classify_gizmo<S: CoordinateSpace + ?Sized>(
    tree: &UiTree,
    id: NodeId,
    space: &S,
    screen_point: Point,
    radii: &HitRadii,
) -> Option<GizmoHit> {
    if hit_test_anchor(tree, id, space, screen_point, radii) {
        return Some(GizmoHit::Anchor);
    }
    if hit_test_pivot(tree, id, space, screen_point, radii) {
        return Some(GizmoHit::Pivot);
    }
    hit_test_handle(tree, id, space, screen_point, radii).map(GizmoHit::Handle)
}

/// Classify `screen_point` against one node: anchor, pivot, handle, then body.
pub fn classify<S: CoordinateSpace + ?Sized>(
    tree: &UiTree,
    id: NodeId,
    space: &S,
    screen_point: Point,
    radii: &HitRadii,
) -> Option<GizmoHit> {
    classify_gizmo(tree, id, space, screen_point, radii).or_else(|| {
        hit_test_body(tree, id, space.screen_to_canvas(screen_point)).then_some(GizmoHit::Body)
    })
}

/// The first selected node whose anchor, pivot, or handle is under `screen_point`.
///
/// Nodes are evaluated in `selection` order; within a node the order is
/// anchor, pivot, handle. Bodies are not considered.
pub fn pick_gizmo<S: CoordinateSpace + ?Sized>(
    tree: &UiTree,
    selection: &[NodeId],
    space: &S,
    screen_point: Point,
    radii: &HitRadii,
) -> Option<(NodeId, GizmoHit)> {
    selection.iter().find_map(|&id| {
        classify_gizmo(tree, id, space, screen_point, radii).map(|hit| (id, hit))
    })
}

/// The first selected node hit by `screen_point`, with full [`classify`]
/// priority (body included).
pub fn pick<S: CoordinateSpace + ?Sized>(
    tree: &UiTree,
    selection: &[NodeId],
    space: &S,
    screen_point: Point,
    radii: &HitRadii,
) -> Option<(NodeId, GizmoHit)> {
    selection
        .iter()
        .find_map(|&id| classify(tree, id, space, screen_point, radii).map(|hit| (id, hit)))
}

/// The topmost element whose body contains `canvas_point`.
///
/// Candidates are all nodes with a transform and both
/// [`NodeFlags::VISIBLE`] and [`NodeFlags::PICKABLE`]; the last one in
/// [`UiTree::draw_order`] wins.
pub fn pick_body(tree: &UiTree, canvas_point: Point) -> Option<NodeId> {
    tree.draw_order().into_iter().rev().find(|&id| {
        tree.flags(id)
            .is_some_and(|f| f.contains(NodeFlags::VISIBLE | NodeFlags::PICKABLE))
            && hit_test_body(tree, id, canvas_point)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;
    use understory_anchor_layout::{Camera, UiTransform};

    /// 800×600 canvas with one 100×50 element centered: bounds {350, 275, 100, 50}.
    fn scene() -> (UiTree, NodeId) {
        let mut tree = UiTree::new(Size::new(800.0, 600.0));
        let root = tree.insert(None, None);
        let n = tree.insert(Some(root), Some(UiTransform::with_size(100.0, 50.0)));
        (tree, n)
    }

    #[test]
    fn body_containment_is_inclusive() {
        let (tree, n) = scene();
        assert!(hit_test_body(&tree, n, Point::new(350.0, 275.0)));
        assert!(hit_test_body(&tree, n, Point::new(450.0, 325.0)));
        assert!(!hit_test_body(&tree, n, Point::new(450.1, 300.0)));
        assert!(!hit_test_body(&tree, n, Point::new(349.9, 300.0)));
    }

    #[test]
    fn handles_sit_on_corners_and_midpoints() {
        let (tree, n) = scene();
        let cam = Camera::default();
        let r = HitRadii::default();
        let at = |p: Point| hit_test_handle(&tree, n, &cam, p, &r);
        assert_eq!(at(Point::new(350.0, 275.0)), Some(Handle::TopLeft));
        assert_eq!(at(Point::new(400.0, 275.0)), Some(Handle::Top));
        assert_eq!(at(Point::new(450.0, 300.0)), Some(Handle::Right));
        assert_eq!(at(Point::new(400.0, 325.0)), Some(Handle::Bottom));
        assert_eq!(at(Point::new(362.0, 287.0)), Some(Handle::TopLeft), "edge of square");
        assert_eq!(at(Point::new(400.0, 300.0)), None);
    }

    #[test]
    fn corners_win_over_edges() {
        // A 20-unit-tall element puts the Left/Right midpoints within reach of the corners.
        let mut tree = UiTree::new(Size::new(800.0, 600.0));
        let n = tree.insert(None, Some(UiTransform::with_size(100.0, 20.0)));
        let cam = Camera::default();
        // Bounds {350, 290, 100, 20}; (352, 295) is inside both the TopLeft and Left squares.
        assert_eq!(
            hit_test_handle(&tree, n, &cam, Point::new(352.0, 295.0), &HitRadii::default()),
            Some(Handle::TopLeft)
        );
    }

    #[test]
    fn handle_radius_is_constant_in_screen_space() {
        let (tree, n) = scene();
        let cam = Camera {
            zoom: 4.0,
            offset: Vec2::new(300.0, 250.0),
            ..Camera::default()
        };
        let corner = cam.canvas_to_screen(Point::new(350.0, 275.0));
        let r = HitRadii::default();
        assert_eq!(
            hit_test_handle(&tree, n, &cam, corner + Vec2::new(12.0, 12.0), &r),
            Some(Handle::TopLeft)
        );
        assert_eq!(
            hit_test_handle(&tree, n, &cam, corner + Vec2::new(-13.0, 0.0), &r),
            None
        );
    }

    #[test]
    fn rotated_handles_follow_corners() {
        let mut tree = UiTree::new(Size::new(800.0, 600.0));
        let n = tree.insert(None, Some(UiTransform::with_size(100.0, 100.0).rotation(90.0)));
        let cam = Camera::default();
        // After a 90° counter-clockwise turn, the top-left corner sits at (350, 350).
        assert_eq!(
            hit_test_handle(&tree, n, &cam, Point::new(351.0, 349.0), &HitRadii::default()),
            Some(Handle::TopLeft)
        );
    }

    #[test]
    fn anchor_and_pivot_markers() {
        let mut tree = UiTree::new(Size::new(800.0, 600.0));
        let n = tree.insert(
            None,
            Some(
                UiTransform::with_size(100.0, 50.0)
                    .anchor(0.0, 0.0)
                    .pivot(0.0, 0.0)
                    .offset(200.0, 100.0),
            ),
        );
        let cam = Camera::default();
        let r = HitRadii::default();
        assert_eq!(anchor_marker(&tree, n, &cam), Some(Point::new(0.0, 0.0)));
        assert_eq!(pivot_marker(&tree, n, &cam), Some(Point::new(200.0, 100.0)));

        assert!(hit_test_anchor(&tree, n, &cam, Point::new(12.0, 0.0), &r));
        assert!(!hit_test_anchor(&tree, n, &cam, Point::new(9.0, 9.0), &r));
        assert!(hit_test_pivot(&tree, n, &cam, Point::new(206.0, 106.0), &r));
        assert!(!hit_test_pivot(&tree, n, &cam, Point::new(208.0, 108.0), &r));
    }

    #[test]
    fn classify_prefers_gizmos_over_body() {
        let (tree, n) = scene();
        let cam = Camera::default();
        let r = HitRadii::default();
        // Centered anchor and pivot coincide at (400, 300); anchor is tested first.
        assert_eq!(
            classify(&tree, n, &cam, Point::new(400.0, 300.0), &r),
            Some(GizmoHit::Anchor)
        );
        assert_eq!(
            classify(&tree, n, &cam, Point::new(350.0, 300.0), &r),
            Some(GizmoHit::Handle(Handle::Left))
        );
        assert_eq!(
            classify(&tree, n, &cam, Point::new(380.0, 300.0), &r),
            Some(GizmoHit::Body)
        );
        assert_eq!(classify(&tree, n, &cam, Point::new(10.0, 10.0), &r), None);
    }

    #[test]
    fn pick_follows_selection_order() {
        let mut tree = UiTree::new(Size::new(800.0, 600.0));
        let a = tree.insert(None, Some(UiTransform::with_size(200.0, 200.0)));
        let b = tree.insert(None, Some(UiTransform::with_size(100.0, 100.0)));
        let cam = Camera::default();
        let r = HitRadii::default();
        let p = Point::new(380.0, 330.0);
        assert_eq!(pick(&tree, &[a, b], &cam, p, &r), Some((a, GizmoHit::Body)));
        assert_eq!(pick(&tree, &[b, a], &cam, p, &r), Some((b, GizmoHit::Body)));
        assert_eq!(pick_gizmo(&tree, &[a, b], &cam, p, &r), None);
        assert_eq!(
            pick_gizmo(&tree, &[a, b], &cam, Point::new(450.0, 350.0), &r),
            Some((b, GizmoHit::Handle(Handle::BottomRight)))
        );
    }

    #[test]
    fn pick_body_prefers_topmost_and_skips_unpickable() {
        let mut tree = UiTree::new(Size::new(800.0, 600.0));
        let root = tree.insert(None, None);
        let back = tree.insert(Some(root), Some(UiTransform::with_size(300.0, 300.0)));
        let front = tree.insert(Some(back), Some(UiTransform::with_size(50.0, 50.0)));
        let p = Point::new(400.0, 300.0);
        assert_eq!(pick_body(&tree, p), Some(front));

        tree.set_flags(front, NodeFlags::VISIBLE);
        assert_eq!(pick_body(&tree, p), Some(back));

        assert_eq!(pick_body(&tree, Point::new(10.0, 10.0)), None);
    }

    #[test]
    fn stale_nodes_never_hit() {
        let (mut tree, n) = scene();
        tree.remove(n);
        let cam = Camera::default();
        let p = Point::new(400.0, 300.0);
        assert!(!hit_test_body(&tree, n, p));
        assert!(classify(&tree, n, &cam, p, &HitRadii::default()).is_none());
    }
}
