// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polled pointer and keyboard state for one frame.

use kurbo::Point;

bitflags::bitflags! {
    /// A set of pointer buttons.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PointerButtons: u8 {
        /// Primary (usually left) button.
        const LEFT   = 0b0000_0001;
        /// Auxiliary (usually middle/wheel) button.
        const MIDDLE = 0b0000_0010;
        /// Secondary (usually right) button.
        const RIGHT  = 0b0000_0100;
    }
}

bitflags::bitflags! {
    /// Keyboard modifiers held during the frame.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Control (Command on macOS hosts): toggle selection.
        const CTRL  = 0b0000_0001;
        /// Shift: add to selection.
        const SHIFT = 0b0000_0010;
        /// Alt / Option.
        const ALT   = 0b0000_0100;
    }
}

/// Input snapshot read at the top of a frame.
///
/// Hosts fill this from their windowing or immediate-mode toolkit once per
/// frame; nothing is pushed to the controller between frames.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerFrame {
    /// Pointer position in screen space.
    pub position: Point,
    /// Buttons currently held.
    pub down: PointerButtons,
    /// Buttons that went down this frame.
    pub pressed: PointerButtons,
    /// Buttons that went up this frame.
    pub released: PointerButtons,
    /// Scroll wheel movement this frame, positive away from the user.
    pub scroll: f64,
    /// Modifiers held this frame.
    pub modifiers: Modifiers,
    /// Whether the pointer is over the designer viewport.
    pub viewport_hovered: bool,
    /// Whether a modal popup currently owns input.
    pub popup_open: bool,
}

impl PointerFrame {
    /// A frame with the pointer hovering the viewport at `position` and no buttons held.
    pub fn at(position: Point) -> Self {
        Self {
            position,
            viewport_hovered: true,
            ..Self::default()
        }
    }

    /// Mark `buttons` as pressed this frame (and therefore held).
    #[must_use]
    pub fn press(mut self, buttons: PointerButtons) -> Self {
        self.pressed |= buttons;
        self.down |= buttons;
        self
    }

    /// Mark `buttons` as held.
    #[must_use]
    pub fn hold(mut self, buttons: PointerButtons) -> Self {
        self.down |= buttons;
        self
    }

    /// Mark `buttons` as released this frame (and no longer held).
    #[must_use]
    pub fn release(mut self, buttons: PointerButtons) -> Self {
        self.released |= buttons;
        self.down.remove(buttons);
        self
    }

    /// Set the held modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the scroll delta.
    #[must_use]
    pub fn with_scroll(mut self, scroll: f64) -> Self {
        self.scroll = scroll;
        self
    }

    /// Whether the viewport may start new interactions this frame.
    pub fn accepts_viewport_input(&self) -> bool {
        self.viewport_hovered && !self.popup_open
    }
}
