// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canvas ↔ screen conversion.

use kurbo::{Affine, Point, Vec2};

/// Conversion between canvas space (the design resolution elements are laid
/// out in) and screen space (viewport pixels after pan and zoom).
///
/// Implementations are expected to be a uniform scale plus a translation;
/// [`UiTree::screen_transform`](crate::UiTree::screen_transform) relies on it.
pub trait CoordinateSpace {
    /// Map a canvas-space point to screen space.
    fn canvas_to_screen(&self, p: Point) -> Point;
    /// Map a screen-space point to canvas space.
    fn screen_to_canvas(&self, p: Point) -> Point;
    /// Screen units per canvas unit.
    fn zoom(&self) -> f64;
}

/// A pan/zoom camera over the design canvas.
///
/// `screen = viewport_origin + (canvas - offset) * zoom`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Screen position of the viewport's top-left corner.
    pub viewport_origin: Point,
    /// Canvas position shown at the viewport's top-left corner.
    pub offset: Vec2,
    /// Screen units per canvas unit. Always positive.
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            viewport_origin: Point::ZERO,
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// Create a camera whose viewport starts at `viewport_origin` on screen.
    pub fn new(viewport_origin: Point) -> Self {
        Self {
            viewport_origin,
            ..Self::default()
        }
    }

    /// The canvas → screen mapping as an affine transform.
    pub fn to_screen(&self) -> Affine {
        Affine::translate(self.viewport_origin.to_vec2())
            * Affine::scale(self.zoom)
            * Affine::translate(-self.offset)
    }

    /// Pan by a pointer movement measured in screen units.
    ///
    /// Content follows the pointer: the offset moves by `-delta / zoom`.
    pub fn pan_by_screen(&mut self, delta: Vec2) {
        self.offset -= delta / self.zoom;
    }

    /// Multiply the zoom by `factor`, clamped to `[min, max]`, keeping the
    /// canvas point under `screen_anchor` fixed on screen.
    ///
    /// The bounds may be given in either order; a NaN bound is ignored.
    /// Non-positive or non-finite factors, and bounds that leave no positive
    /// finite range, leave the camera unchanged.
    pub fn zoom_about(&mut self, screen_anchor: Point, factor: f64, min: f64, max: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        // `f64::min`/`max` return the other operand when one is NaN.
        let (lo, hi) = (min.min(max), min.max(max));
        if lo.is_nan() || lo <= 0.0 || !hi.is_finite() {
            return;
        }
        let pinned = self.screen_to_canvas(screen_anchor);
        self.zoom = (self.zoom * factor).clamp(lo, hi);
        self.offset = pinned.to_vec2() - (screen_anchor - self.viewport_origin) / self.zoom;
    }
}

impl CoordinateSpace for Camera {
    fn canvas_to_screen(&self, p: Point) -> Point {
        self.viewport_origin + (p.to_vec2() - self.offset) * self.zoom
    }

    fn screen_to_canvas(&self, p: Point) -> Point {
        (self.offset + (p - self.viewport_origin) / self.zoom).to_point()
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }
}
