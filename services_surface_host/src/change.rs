//! Change detection against last-pushed state
//!
//! The renderer only hears about values that actually changed: the detector
//! compares the surface's current url and rect against the last values it
//! pushed and updates its record before the caller emits the command, so a
//! command is never emitted twice for one change.

use surface_types::Rect;

/// Last geometry/content values successfully sent to the connector.
#[derive(Debug, Clone, PartialEq)]
pub struct PushedState {
    pub url: String,
    pub rect: Rect,
}

/// Diffs current surface state against pushed state.
///
/// Empty until [`snapshot`](ChangeDetector::snapshot) runs at
/// initialization; no diffs are reported before that.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    pushed: Option<PushedState>,
}

impl ChangeDetector {
    /// Creates a detector with no pushed state
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the initial pushed state at initialization time
    pub fn snapshot(&mut self, url: &str, rect: Rect) {
        self.pushed = Some(PushedState {
            url: url.to_string(),
            rect,
        });
    }

    /// Clears the pushed state (on disable)
    pub fn reset(&mut self) {
        self.pushed = None;
    }

    /// Returns the pushed state, if initialized
    pub fn pushed(&self) -> Option<&PushedState> {
        self.pushed.as_ref()
    }

    /// Checks the url against the pushed value, updating it on change.
    ///
    /// Returns true exactly once per distinct value.
    pub fn url_changed(&mut self, current: &str) -> bool {
        let Some(pushed) = self.pushed.as_mut() else {
            return false;
        };
        if pushed.url == current {
            return false;
        }
        pushed.url = current.to_string();
        true
    }

    /// Checks the rect against the pushed value, updating it on change.
    ///
    /// Compared per field; returns true exactly once per distinct value.
    pub fn rect_changed(&mut self, current: Rect) -> bool {
        let Some(pushed) = self.pushed.as_mut() else {
            return false;
        };
        let same = pushed.rect.x == current.x
            && pushed.rect.y == current.y
            && pushed.rect.width == current.width
            && pushed.rect.height == current.height;
        if same {
            return false;
        }
        pushed.rect = current;
        true
    }
}
