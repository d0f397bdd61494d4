// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the layout tree: node identifiers, flags, and element transforms.

use kurbo::{Point, Size, Vec2};

/// Smallest width or height an element may have after an edit.
pub const MIN_EXTENT: f64 = 1.0;

/// Identifier for a node in the tree (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags controlling visibility and picking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is visible (drawn by the host).
        const VISIBLE  = 0b0000_0001;
        /// Node is pickable (participates in body hit testing).
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// Local placement of a UI element relative to its parent frame.
///
/// The element's top-left corner in canvas space is
/// `frame.origin + anchor * frame.size + offset - pivot * size`, where `frame`
/// is the resolved bounds of the nearest ancestor owning a transform (or the
/// canvas rectangle).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UiTransform {
    /// Unscaled width and height.
    pub size: Size,
    /// Translation from the anchor point, in parent-space units.
    pub offset: Vec2,
    /// Normalized point within the parent frame the offset is measured from.
    pub anchor: Point,
    /// Normalized point within the element used as rotation and edit origin.
    pub pivot: Point,
    /// Rotation in degrees, counter-clockwise on screen (screen Y points down).
    pub rotation: f64,
}

impl Default for UiTransform {
    fn default() -> Self {
        Self {
            size: Size::new(100.0, 100.0),
            offset: Vec2::ZERO,
            anchor: Point::new(0.5, 0.5),
            pivot: Point::new(0.5, 0.5),
            rotation: 0.0,
        }
    }
}

impl UiTransform {
    /// Create a transform of the given size, centered in its parent frame.
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            ..Self::default()
        }
    }

    /// Builder-style setter for [`UiTransform::offset`].
    #[must_use]
    pub fn offset(mut self, x: f64, y: f64) -> Self {
        self.offset = Vec2::new(x, y);
        self
    }

    /// Builder-style setter for [`UiTransform::anchor`].
    #[must_use]
    pub fn anchor(mut self, x: f64, y: f64) -> Self {
        self.anchor = Point::new(x, y);
        self
    }

    /// Builder-style setter for [`UiTransform::pivot`].
    #[must_use]
    pub fn pivot(mut self, x: f64, y: f64) -> Self {
        self.pivot = Point::new(x, y);
        self
    }

    /// Builder-style setter for [`UiTransform::rotation`].
    #[must_use]
    pub fn rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Return a copy with the size floored at [`MIN_EXTENT`] and the anchor
    /// and pivot clamped into the unit square.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            size: Size::new(
                self.size.width.max(MIN_EXTENT),
                self.size.height.max(MIN_EXTENT),
            ),
            anchor: clamp_unit(self.anchor),
            pivot: clamp_unit(self.pivot),
            ..self
        }
    }
}

/// Clamp both components of a normalized point into `[0, 1]`.
pub fn clamp_unit(p: Point) -> Point {
    Point::new(p.x.clamp(0.0, 1.0), p.y.clamp(0.0, 1.0))
}
