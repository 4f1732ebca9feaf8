//! Host environment capture and restore
//!
//! The bridge needs the host to keep executing while unfocused (the
//! renderer runs out-of-process and frames keep arriving) and needs a
//! steady fixed tick for frame sync. Both are host-wide settings, so the
//! controller captures them on enable and restores them on disable.

use std::time::Duration;

/// Fixed tick interval the bridge requests while enabled (~60 Hz).
pub const FIXED_TICK_INTERVAL: Duration = Duration::from_micros(16_600);

/// Host-wide settings the bridge overrides while enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostSettings {
    /// Whether the host keeps ticking while its window is unfocused
    pub run_in_background: bool,
    /// Interval between fixed-rate ticks
    pub fixed_tick_interval: Duration,
}

impl HostSettings {
    /// The settings the bridge applies while enabled
    pub fn bridge_overrides() -> Self {
        Self {
            run_in_background: true,
            fixed_tick_interval: FIXED_TICK_INTERVAL,
        }
    }
}

/// Capability interface over the host's global settings.
pub trait HostEnvironment {
    /// Returns the current settings
    fn settings(&self) -> HostSettings;

    /// Replaces the settings
    fn apply(&mut self, settings: HostSettings);
}
