// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_designer --heading-base-level=0

//! Understory Designer: pointer interaction for a visual UI editor.
//!
//! This crate drives the editing gestures of a UI designer viewport on top of
//! [`understory_anchor_layout`] (placement) and [`understory_handle_hit`]
//! (gizmo picking). Hosts poll their input once per frame into a
//! [`PointerFrame`] and call [`InteractionController::update`] with a
//! [`FrameContext`] that borrows the tree, camera, selection, undo sink and
//! dirty notifier for the duration of the call.
//!
//! ## Gestures
//!
//! - Left press on a selected element's anchor, pivot or resize handle starts
//!   the matching drag.
//! - Left press on an element body selects it (ctrl toggles, shift adds) and
//!   starts a move; a plain press on empty canvas clears the selection.
//! - Middle drag pans; scroll zooms about the pointer.
//!
//! ## Commit model
//!
//! While a drag is live the tree shows the in-progress transforms. On release
//! the controller puts the tree back to its pre-drag state and submits one
//! [`TransformEdit`] to the [`UndoSink`], which applies it. A drag that ends
//! where it started submits nothing. [`History`] is a ready-made sink with
//! undo and redo.
//!
//! ## Logging
//!
//! Gesture transitions are reported through [`tracing`] at `debug`, per-frame
//! detail at `trace`, and rejected edits at `warn`. Nothing here installs a
//! subscriber.
//!
//! ## Configuration
//!
//! [`InteractionConfig`] holds snapping, hit radii and zoom limits and can be
//! loaded from JSON with [`InteractionConfig::from_json`].

mod config;
mod controller;
mod edit;
mod input;
mod selection;
pub mod session;
pub mod snap;

pub use config::{ConfigError, InteractionConfig};
pub use controller::{FrameContext, InteractionController, InteractionMode};
pub use edit::{EditError, EditKind, History, TransformChange, TransformEdit, UndoSink};
pub use input::{Modifiers, PointerButtons, PointerFrame};
pub use selection::{DirtyFlag, DirtyNotifier, Selection, SelectionSet};
pub use session::{DragKind, DragSession};
