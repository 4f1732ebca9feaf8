//! Single-slot frame mailbox
//!
//! The renderer produces frames at its own cadence; the host consumes them
//! on its fixed tick. The mailbox holds at most one undisplayed frame and a
//! newer frame overwrites an unconsumed one (latest-frame-wins), so the
//! host never queues behind a slow tick and never reads a half-written
//! buffer: publishing replaces the slot wholesale, and the consumer only
//! sees complete frames via pull → acknowledge.

use std::sync::{Arc, Mutex};

/// Mailbox holding at most one undisplayed frame.
#[derive(Debug, Default)]
pub struct FrameMailbox {
    slot: Option<Vec<u8>>,
}

impl FrameMailbox {
    /// Creates an empty mailbox
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mailbox that can be shared across the transport boundary
    pub fn shared() -> SharedFrameMailbox {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Publishes a frame, overwriting any unconsumed one.
    ///
    /// Returns true if an unconsumed frame was dropped.
    pub fn publish(&mut self, frame: Vec<u8>) -> bool {
        self.slot.replace(frame).is_some()
    }

    /// Returns true if an undisplayed frame is waiting
    pub fn is_ready(&self) -> bool {
        self.slot.is_some()
    }

    /// Returns the waiting frame's bytes without consuming the slot
    pub fn pull(&self) -> Option<&[u8]> {
        self.slot.as_deref()
    }

    /// Frees the slot after the frame has been displayed
    pub fn acknowledge(&mut self) {
        self.slot = None;
    }
}

/// Mailbox handle shared between the connector and the transport reader.
pub type SharedFrameMailbox = Arc<Mutex<FrameMailbox>>;
