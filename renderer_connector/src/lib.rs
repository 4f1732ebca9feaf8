//! # Renderer Connector
//!
//! This crate defines the protocol boundary between the surface controller
//! and the out-of-process rendering engine.
//!
//! ## Philosophy
//!
//! - **Commands, not calls**: Everything outbound is a typed command with a
//!   stable action identifier and schema version
//! - **Fire-and-forget out, poll in**: Commands never block; frames are
//!   pulled through a single-slot mailbox, never pushed into the host
//! - **Mockable boundary**: The connector is a trait, so the whole bridge
//!   can be driven against a recording double in tests
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - The rendering engine (it lives in another process)
//! - A process launcher/installer for that engine
//! - A codec for the frame payload (bytes are opaque here)

pub mod command;
pub mod mailbox;
pub mod transport;

pub use command::{CommandEnvelope, SchemaVersion, SurfaceCommand, SURFACE_COMMAND_SCHEMA};
pub use mailbox::{FrameMailbox, SharedFrameMailbox};
pub use transport::JsonLineConnector;

use thiserror::Error;

/// Connector error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConnectorError {
    #[error("Transport failure: {reason}")]
    Transport { reason: String },

    #[error("No frame is ready to pull")]
    FrameUnavailable,
}

/// The opaque channel to the renderer process.
///
/// Commands are fire-and-forget from the caller's perspective; the frame
/// queries are non-blocking and follow the ready → pull → acknowledge
/// discipline of the mailbox.
pub trait RendererConnector {
    /// Sends one command to the renderer
    fn send(&mut self, command: SurfaceCommand) -> Result<(), ConnectorError>;

    /// Returns true if an undisplayed frame is waiting
    fn is_frame_ready(&self) -> bool;

    /// Pulls the waiting frame's bytes without consuming the slot
    fn pull_frame(&mut self) -> Result<Vec<u8>, ConnectorError>;

    /// Marks the pulled frame as displayed, freeing the slot
    fn acknowledge_frame(&mut self);

    /// Requests renderer shutdown (best-effort)
    fn shutdown(&mut self) -> Result<(), ConnectorError>;
}

/// In-memory connector that records every command, for tests.
#[derive(Debug, Default)]
pub struct RecordingConnector {
    commands: Vec<SurfaceCommand>,
    mailbox: FrameMailbox,
    fail_sends: bool,
}

impl RecordingConnector {
    /// Creates a new recording connector
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `send` fail with a transport error
    pub fn set_fail_sends(&mut self, fail: bool) {
        self.fail_sends = fail;
    }

    /// Publishes a frame as if the renderer had produced it
    pub fn publish_frame(&mut self, frame: Vec<u8>) {
        self.mailbox.publish(frame);
    }

    /// Returns the commands recorded so far
    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    /// Drains and returns the commands recorded so far
    pub fn take_commands(&mut self) -> Vec<SurfaceCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Returns how many shutdown requests were recorded
    pub fn shutdown_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, SurfaceCommand::Shutdown))
            .count()
    }
}

impl RendererConnector for RecordingConnector {
    fn send(&mut self, command: SurfaceCommand) -> Result<(), ConnectorError> {
        if self.fail_sends {
            return Err(ConnectorError::Transport {
                reason: "recording connector configured to fail".to_string(),
            });
        }
        self.commands.push(command);
        Ok(())
    }

    fn is_frame_ready(&self) -> bool {
        self.mailbox.is_ready()
    }

    fn pull_frame(&mut self) -> Result<Vec<u8>, ConnectorError> {
        self.mailbox
            .pull()
            .map(<[u8]>::to_vec)
            .ok_or(ConnectorError::FrameUnavailable)
    }

    fn acknowledge_frame(&mut self) {
        self.mailbox.acknowledge();
    }

    fn shutdown(&mut self) -> Result<(), ConnectorError> {
        self.commands.push(SurfaceCommand::Shutdown);
        Ok(())
    }
}
