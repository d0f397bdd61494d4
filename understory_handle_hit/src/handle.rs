// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The eight resize handles around an element.

/// One of the eight resize handles: four corners and four edge midpoints.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Handle {
    /// Top-left corner.
    TopLeft,
    /// Midpoint of the top edge.
    Top,
    /// Top-right corner.
    TopRight,
    /// Midpoint of the left edge.
    Left,
    /// Midpoint of the right edge.
    Right,
    /// Bottom-left corner.
    BottomLeft,
    /// Midpoint of the bottom edge.
    Bottom,
    /// Bottom-right corner.
    BottomRight,
}

impl Handle {
    /// Corner handles, clockwise from the top-left.
    pub const CORNERS: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomRight,
        Self::BottomLeft,
    ];

    /// Edge-midpoint handles, clockwise from the top.
    pub const EDGES: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// All handles in hit-test order: corners before edges.
    pub const ALL: [Self; 8] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomRight,
        Self::BottomLeft,
        Self::Top,
        Self::Right,
        Self::Bottom,
        Self::Left,
    ];

    /// Whether this handle is a corner.
    pub fn is_corner(self) -> bool {
        Self::CORNERS.contains(&self)
    }

    /// Whether dragging this handle moves the element's left edge.
    pub fn moves_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::Left | Self::BottomLeft)
    }

    /// Whether dragging this handle moves the element's right edge.
    pub fn moves_right(self) -> bool {
        matches!(self, Self::TopRight | Self::Right | Self::BottomRight)
    }

    /// Whether dragging this handle moves the element's top edge.
    pub fn moves_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::Top | Self::TopRight)
    }

    /// Whether dragging this handle moves the element's bottom edge.
    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::BottomLeft | Self::Bottom | Self::BottomRight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_handle_moves_exactly_the_expected_edges() {
        for h in Handle::ALL {
            let horizontal = u8::from(h.moves_left()) + u8::from(h.moves_right());
            let vertical = u8::from(h.moves_top()) + u8::from(h.moves_bottom());
            assert!(horizontal <= 1 && vertical <= 1, "{h:?}");
            if h.is_corner() {
                assert_eq!((horizontal, vertical), (1, 1), "{h:?}");
            } else {
                assert_eq!(horizontal + vertical, 1, "{h:?}");
            }
        }
    }
}
