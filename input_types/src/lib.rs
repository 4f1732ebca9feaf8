//! # Input Types
//!
//! This crate defines the device-input types consumed by the surface
//! controller's input translator.
//!
//! ## Philosophy
//!
//! - **Samples, not callbacks**: Input arrives as one immutable snapshot of
//!   device state per tick, never as ambient global state
//! - **Edges are explicit**: A press-edge is data in the sample, not
//!   something derived from hidden history
//! - **Testable**: Samples are serializable and can be injected to drive
//!   the repeat engine and pointer tracker deterministically
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A hardware driver (no scan codes, no HID reports)
//! - A general keyboard map (only the keys the remote protocol names)
//! - A focus or routing layer

use core::fmt;
use serde::{Deserialize, Serialize};
use surface_types::{Point, SurfaceId};

/// A key the remote protocol understands by name.
///
/// This is a closed set: the navigation keys plus Backspace. Printable
/// characters never appear here — they travel as text in the sample and
/// are forwarded as `char_down`, outside the repeat engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Backspace,
    Tab,
    Delete,
    PageUp,
    PageDown,
    Home,
    End,
    UpArrow,
    DownArrow,
    LeftArrow,
    RightArrow,
}

/// The navigation keys the repeat engine scans for press-edges, in scan
/// order. Backspace is deliberately absent: it is tested first, before
/// character input, and so has its own branch.
pub const NAVIGATION_KEYS: [Key; 10] = [
    Key::Tab,
    Key::Delete,
    Key::PageUp,
    Key::PageDown,
    Key::Home,
    Key::End,
    Key::UpArrow,
    Key::DownArrow,
    Key::LeftArrow,
    Key::RightArrow,
];

impl Key {
    /// Returns the wire name the remote protocol expects for this key
    pub fn name(&self) -> &'static str {
        match self {
            Key::Backspace => "Backspace",
            Key::Tab => "Tab",
            Key::Delete => "Delete",
            Key::PageUp => "PageUp",
            Key::PageDown => "PageDown",
            Key::Home => "Home",
            Key::End => "End",
            Key::UpArrow => "UpArrow",
            Key::DownArrow => "DownArrow",
            Key::LeftArrow => "LeftArrow",
            Key::RightArrow => "RightArrow",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A pointer button, named by role rather than device index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left/primary button
    Primary,
    /// Wheel/middle button
    Middle,
    /// Right/secondary button
    Secondary,
}

/// All buttons, in wire-index order.
pub const ALL_BUTTONS: [MouseButton; 3] =
    [MouseButton::Primary, MouseButton::Middle, MouseButton::Secondary];

impl MouseButton {
    /// Returns the button index the remote protocol expects.
    ///
    /// Middle maps to 1 and Secondary to 2 — the inverse of the usual
    /// device ordering. This mapping is a wire contract; do not change it
    /// without confirming the remote protocol's expectation.
    pub fn protocol_index(&self) -> u8 {
        match self {
            MouseButton::Primary => 0,
            MouseButton::Middle => 1,
            MouseButton::Secondary => 2,
        }
    }
}

/// Capability interface for objects the host's hit test can return.
///
/// The controller does not know about the host's widget hierarchy; any
/// object that can name the surface it displays qualifies as a hit target.
pub trait PointerTarget {
    /// Returns the surface this target displays
    fn surface_id(&self) -> SurfaceId;
}

impl PointerTarget for SurfaceId {
    fn surface_id(&self) -> SurfaceId {
        *self
    }
}

/// One tick's worth of device state.
///
/// The host samples its input system once per tick and hands the result
/// here. `pressed` carries press-edges (the single tick of transition),
/// `held` carries level state; a key on its press-edge is also held.
/// `hits` lists the surfaces under the pointer, front-most first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSample {
    /// Keys whose press-edge fired this tick
    pub pressed: Vec<Key>,
    /// Keys held down this tick (includes fresh presses)
    pub held: Vec<Key>,
    /// Printable character input produced this tick
    pub text: String,
    /// Pointer position in screen space
    pub pointer: Point,
    /// Scroll wheel delta this tick (0.0 when idle)
    pub scroll_delta: f32,
    /// Buttons whose press-edge fired this tick
    pub buttons_pressed: Vec<MouseButton>,
    /// Buttons whose release-edge fired this tick
    pub buttons_released: Vec<MouseButton>,
    /// Surfaces under the pointer, front-most first
    pub hits: Vec<SurfaceId>,
}

impl InputSample {
    /// Creates an empty sample (no input this tick)
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a key press-edge (also marks the key held)
    pub fn with_pressed(mut self, key: Key) -> Self {
        self.pressed.push(key);
        self.held.push(key);
        self
    }

    /// Marks a key held without a press-edge
    pub fn with_held(mut self, key: Key) -> Self {
        self.held.push(key);
        self
    }

    /// Sets the printable text produced this tick
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Sets the pointer position
    pub fn at_pointer(mut self, pointer: Point) -> Self {
        self.pointer = pointer;
        self
    }

    /// Sets the scroll wheel delta
    pub fn with_scroll(mut self, delta: f32) -> Self {
        self.scroll_delta = delta;
        self
    }

    /// Adds a button press-edge
    pub fn with_button_pressed(mut self, button: MouseButton) -> Self {
        self.buttons_pressed.push(button);
        self
    }

    /// Adds a button release-edge
    pub fn with_button_released(mut self, button: MouseButton) -> Self {
        self.buttons_released.push(button);
        self
    }

    /// Records a hit-test result
    pub fn with_hit(mut self, target: &dyn PointerTarget) -> Self {
        self.hits.push(target.surface_id());
        self
    }

    /// Returns true if the key's press-edge fired this tick
    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    /// Returns true if the key is held this tick
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Returns true if printable text arrived this tick
    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }

    /// Returns true if the button's press-edge fired this tick
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    /// Returns true if the button's release-edge fired this tick
    pub fn is_button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }

    /// Returns true if the hit list contains the given surface
    pub fn hits_surface(&self, surface: SurfaceId) -> bool {
        self.hits.contains(&surface)
    }
}
