// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_anchor_layout --heading-base-level=0

//! Understory Anchor Layout: anchor/pivot/offset placement for trees of UI rectangles.
//!
//! This crate is the geometry layer of a visual UI designer. Each element in a [`UiTree`]
//! optionally carries a [`UiTransform`]: a size, an offset, a normalized anchor into the
//! parent's frame, a normalized pivot inside the element itself, and a rotation.
//! From that local description the crate resolves absolute canvas-space bounds, rotated
//! screen-space corners, and per-element screen transforms.
//!
//! ## Placement rule
//!
//! For an element with transform `t` inside a parent frame `f`:
//!
//! ```text
//! anchor = f.origin + t.anchor * f.size
//! origin = anchor + t.offset - t.pivot * t.size
//! bounds = { origin, t.size }
//! ```
//!
//! The parent frame is the resolved bounds of the nearest ancestor that owns a transform.
//! Ancestors without one (groups, the canvas root) are skipped; when no transformed ancestor
//! exists the frame is the canvas rectangle `{0, 0, canvas_width, canvas_height}`.
//!
//! ## No caching
//!
//! Bounds are a pure function of the transform chain and are recomputed on every query
//! (O(depth)). Interactive editors write transforms between queries within the same frame,
//! so nothing is memoized.
//!
//! ## Coordinate spaces
//!
//! - Canvas space: the design resolution elements are laid out in.
//! - Screen space: viewport pixels after pan and zoom.
//!
//! [`CoordinateSpace`] abstracts the conversion; [`Camera`] is a ready-made pan/zoom
//! implementation.
//!
//! ## API overview
//!
//! - [`UiTree`]: generational arena of nodes with parent links and optional transforms.
//! - [`place`], [`anchor_point`], [`pivot_point`]: the pure placement math.
//! - [`UiTree::resolve_bounds`], [`UiTree::parent_frame`], [`UiTree::world_rotation`],
//!   [`UiTree::resolve_rotated_corners`], [`UiTree::screen_transform`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod camera;
mod resolve;
mod tree;
mod types;

pub use camera::{Camera, CoordinateSpace};
pub use resolve::{anchor_point, pivot_point, place};
pub use tree::UiTree;
pub use types::{MIN_EXTENT, NodeFlags, NodeId, UiTransform, clamp_unit};
