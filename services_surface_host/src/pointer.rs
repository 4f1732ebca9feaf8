//! Pointer translation and enter/leave tracking
//!
//! Converts the host's hit-test results into surface-local pointer
//! commands. The host's rectangles have a bottom-left origin; the remote
//! content expects top-left, so the vertical axis flips here and nowhere
//! else.

use input_types::{InputSample, MouseButton, ALL_BUTTONS};
use surface_types::{Point, Rect, SurfaceId};

/// What the tracker wants forwarded this tick, in emission order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEmission {
    Wheel { at: Point, delta: f32 },
    Move { at: Point },
    Down { at: Point, button: MouseButton },
    Up { at: Point, button: MouseButton },
    Leave,
}

/// Tracks whether the pointer is over the owned surface.
#[derive(Debug, Default)]
pub struct PointerTracker {
    inside: bool,
}

impl PointerTracker {
    /// Creates a tracker with the pointer outside the surface
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the pointer was over the surface last tick
    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Forgets the enter state (on disable)
    pub fn reset(&mut self) {
        self.inside = false;
    }

    /// Evaluates one tick of pointer state against the owned surface.
    ///
    /// Hits on other surfaces are ignored; leaving the surface emits one
    /// `Leave` per contiguous span outside it.
    pub fn poll(
        &mut self,
        sample: &InputSample,
        owned: SurfaceId,
        rect: Rect,
    ) -> Vec<PointerEmission> {
        if !sample.hits_surface(owned) {
            if self.inside {
                self.inside = false;
                return vec![PointerEmission::Leave];
            }
            return Vec::new();
        }

        self.inside = true;
        let local = rect.to_local(sample.pointer);
        let at = Point::new(local.x, rect.height - local.y);

        let mut emissions = Vec::new();
        if sample.scroll_delta != 0.0 {
            emissions.push(PointerEmission::Wheel {
                at,
                delta: sample.scroll_delta,
            });
        }
        emissions.push(PointerEmission::Move { at });
        for &button in &ALL_BUTTONS {
            if sample.is_button_pressed(button) {
                emissions.push(PointerEmission::Down { at, button });
            }
        }
        for &button in &ALL_BUTTONS {
            if sample.is_button_released(button) {
                emissions.push(PointerEmission::Up { at, button });
            }
        }
        emissions
    }
}
