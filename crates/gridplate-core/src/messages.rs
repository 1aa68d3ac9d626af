//! Input events: [`Msg`], [`Key`], [`MouseAction`], and the per-tick
//! [`FrameInput`] snapshot the frame loop polls.

use std::time::Instant;

use crate::geom::Vec2;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// A keyboard key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    /// A printable character.
    Char(char),
}

impl Key {
    /// Whether `self` is the character key `c`, ignoring ASCII case.
    pub fn is_char_ignore_case(&self, c: char) -> bool {
        matches!(self, Key::Char(k) if k.eq_ignore_ascii_case(&c))
    }
}

// ---------------------------------------------------------------------------
// Mouse
// ---------------------------------------------------------------------------

/// A mouse button.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) button.
    Main,
    /// Middle button.
    Auxiliary,
    /// Secondary (right) button.
    Secondary,
}

impl MouseButton {
    #[inline]
    const fn bit(self) -> u8 {
        match self {
            Self::Main => 1 << 0,
            Self::Auxiliary => 1 << 1,
            Self::Secondary => 1 << 2,
        }
    }
}

/// A mouse action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseAction {
    Press(MouseButton),
    Release(MouseButton),
    /// Pointer moved (no button state change).
    Move,
}

// ---------------------------------------------------------------------------
// Msg
// ---------------------------------------------------------------------------

/// An input message delivered by a driver.
#[derive(Clone, Debug)]
pub enum Msg {
    /// A key was pressed.
    KeyDown { key: Key, time: Instant },
    /// A mouse event. `pos` is in logical screen pixels.
    Mouse {
        action: MouseAction,
        pos: Vec2,
        time: Instant,
    },
    /// The host asked the application to close.
    Quit,
}

impl Msg {
    /// Convenience: create a `KeyDown` stamped now.
    pub fn key(key: Key) -> Self {
        Self::KeyDown {
            key,
            time: Instant::now(),
        }
    }

    /// Convenience: create a `Mouse` message stamped now.
    pub fn mouse(action: MouseAction, pos: Vec2) -> Self {
        Self::Mouse {
            action,
            pos,
            time: Instant::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// FrameInput
// ---------------------------------------------------------------------------

/// Input state as seen by one frame: the current pointer position plus the
/// edge events ("just pressed", "just released") that arrived since the
/// previous tick.
#[derive(Clone, Debug, Default)]
pub struct FrameInput {
    pointer: Vec2,
    released: u8,
    pressed_keys: Vec<Key>,
}

impl FrameInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a message into the snapshot.
    pub fn apply(&mut self, msg: &Msg) {
        match msg {
            Msg::KeyDown { key, .. } => self.pressed_keys.push(key.clone()),
            Msg::Mouse { action, pos, .. } => {
                self.pointer = *pos;
                if let MouseAction::Release(button) = action {
                    self.released |= button.bit();
                }
            }
            // The runner stops on Quit before any tick sees it.
            Msg::Quit => {}
        }
    }

    /// Last known pointer position.
    #[inline]
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Whether `button` was released since the previous tick.
    #[inline]
    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.released & button.bit() != 0
    }

    /// Whether a key matching `pred` was pressed since the previous tick.
    pub fn is_key_pressed<F: Fn(&Key) -> bool>(&self, pred: F) -> bool {
        self.pressed_keys.iter().any(pred)
    }

    /// Drop the edge events after a tick. The pointer position persists.
    pub fn end_frame(&mut self) {
        self.released = 0;
        self.pressed_keys.clear();
    }
}
