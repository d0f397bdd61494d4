// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounds resolution through the ancestor chain.

use kurbo::{Affine, Point, Rect};
use smallvec::SmallVec;

use crate::camera::CoordinateSpace;
use crate::tree::UiTree;
use crate::types::{NodeId, UiTransform};

/// The point of `frame` that `transform`'s offset is measured from.
pub fn anchor_point(transform: &UiTransform, frame: Rect) -> Point {
    Point::new(
        frame.x0 + transform.anchor.x * frame.width(),
        frame.y0 + transform.anchor.y * frame.height(),
    )
}

/// Place an element inside its parent frame and return its canvas-space bounds.
///
/// ```rust
/// use kurbo::Rect;
/// use understory_anchor_layout::{UiTransform, place};
///
/// let t = UiTransform::with_size(100.0, 50.0).anchor(0.0, 0.0).pivot(0.0, 0.0).offset(10.0, 5.0);
/// assert_eq!(
///     place(&t, Rect::new(0.0, 0.0, 800.0, 600.0)),
///     Rect::new(10.0, 5.0, 110.0, 55.0)
/// );
/// ```
pub fn place(transform: &UiTransform, frame: Rect) -> Rect {
    let anchor = anchor_point(transform, frame);
    let origin = Point::new(
        anchor.x + transform.offset.x - transform.pivot.x * transform.size.width,
        anchor.y + transform.offset.y - transform.pivot.y * transform.size.height,
    );
    Rect::from_origin_size(origin, transform.size)
}

/// The canvas-space position of `transform`'s pivot inside `bounds`.
pub fn pivot_point(transform: &UiTransform, bounds: Rect) -> Point {
    Point::new(
        bounds.x0 + transform.pivot.x * bounds.width(),
        bounds.y0 + transform.pivot.y * bounds.height(),
    )
}

impl UiTree {
    /// The canvas rectangle `{0, 0, canvas_width, canvas_height}`.
    pub fn canvas_rect(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.canvas_size())
    }

    /// The frame `id`'s anchor is resolved against: the bounds of the nearest
    /// ancestor that owns a transform, or the canvas rectangle if there is none.
    ///
    /// Ancestors without a transform are skipped. Returns `None` for stale ids.
    pub fn parent_frame(&self, id: NodeId) -> Option<Rect> {
        if !self.is_alive(id) {
            return None;
        }
        // Nearest first; folded outermost first below.
        let chain: SmallVec<[&UiTransform; 8]> = self
            .ancestors(id)
            .filter_map(|a| self.transform(a))
            .collect();
        Some(
            chain
                .iter()
                .rev()
                .fold(self.canvas_rect(), |frame, t| place(t, frame)),
        )
    }

    /// Resolve the canvas-space bounds of `id`.
    ///
    /// Returns `None` if `id` is stale or carries no transform. The result is
    /// recomputed from the transform chain on every call.
    pub fn resolve_bounds(&self, id: NodeId) -> Option<Rect> {
        let transform = self.transform(id)?;
        Some(place(transform, self.parent_frame(id)?))
    }

    /// Accumulated rotation of `id` and all its transformed ancestors, in degrees.
    pub fn world_rotation(&self, id: NodeId) -> Option<f64> {
        let own = self.transform(id)?.rotation;
        Some(
            self.ancestors(id)
                .filter_map(|a| self.transform(a))
                .fold(own, |acc, t| acc + t.rotation),
        )
    }

    /// Screen-space corners of `id`, in the order top-left, top-right,
    /// bottom-right, bottom-left.
    ///
    /// With a non-zero world rotation, each corner is rotated about the
    /// pivot's screen position. Screen Y points down, so the stored angle is
    /// negated before rotating.
    pub fn resolve_rotated_corners<S: CoordinateSpace + ?Sized>(
        &self,
        id: NodeId,
        space: &S,
    ) -> Option<[Point; 4]> {
        let transform = self.transform(id)?;
        let bounds = self.resolve_bounds(id)?;
        let corners = [
            Point::new(bounds.x0, bounds.y0),
            Point::new(bounds.x1, bounds.y0),
            Point::new(bounds.x1, bounds.y1),
            Point::new(bounds.x0, bounds.y1),
        ]
        .map(|p| space.canvas_to_screen(p));

        let rotation = self.world_rotation(id)?;
        if rotation == 0.0 {
            return Some(corners);
        }
        let pivot = space.canvas_to_screen(pivot_point(transform, bounds));
        let rotate = Affine::rotate_about(-rotation.to_radians(), pivot);
        Some(corners.map(|c| rotate * c))
    }

    /// Element-local → screen transform for `id`.
    ///
    /// Local coordinates span `0..width` × `0..height`. The result scales by
    /// the zoom, moves the origin onto the element's top-left corner on
    /// screen, then applies the world rotation about the pivot.
    pub fn screen_transform<S: CoordinateSpace + ?Sized>(
        &self,
        id: NodeId,
        space: &S,
    ) -> Option<Affine> {
        let transform = self.transform(id)?;
        let bounds = self.resolve_bounds(id)?;
        let origin = space.canvas_to_screen(bounds.origin());
        let pivot = space.canvas_to_screen(pivot_point(transform, bounds));
        let rotation = self.world_rotation(id)?;
        Some(
            Affine::rotate_about(-rotation.to_radians(), pivot)
                * Affine::translate(origin.to_vec2())
                * Affine::scale(space.zoom()),
        )
    }
}
