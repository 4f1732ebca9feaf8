//! JSON-line transport connector
//!
//! Commands go out as one envelope per line over any `Write` (a pipe to
//! the renderer process, a socket, a buffer in tests). Frames come back
//! through a shared mailbox that the transport's reader side publishes
//! into off the host's schedule.

use std::io::Write;

use crate::command::{CommandEnvelope, SurfaceCommand};
use crate::mailbox::{FrameMailbox, SharedFrameMailbox};
use crate::{ConnectorError, RendererConnector};

/// Connector writing newline-delimited JSON envelopes.
pub struct JsonLineConnector<W: Write> {
    writer: W,
    frames: SharedFrameMailbox,
}

impl<W: Write> JsonLineConnector<W> {
    /// Creates a connector with its own frame mailbox
    pub fn new(writer: W) -> Self {
        Self::with_mailbox(writer, FrameMailbox::shared())
    }

    /// Creates a connector over an existing shared mailbox
    pub fn with_mailbox(writer: W, frames: SharedFrameMailbox) -> Self {
        Self { writer, frames }
    }

    /// Returns a handle to the frame mailbox for the reader side
    pub fn frames(&self) -> SharedFrameMailbox {
        self.frames.clone()
    }

    fn transport_error(reason: impl ToString) -> ConnectorError {
        ConnectorError::Transport {
            reason: reason.to_string(),
        }
    }
}

impl<W: Write> RendererConnector for JsonLineConnector<W> {
    fn send(&mut self, command: SurfaceCommand) -> Result<(), ConnectorError> {
        let envelope = CommandEnvelope::new(command);
        serde_json::to_writer(&mut self.writer, &envelope).map_err(Self::transport_error)?;
        self.writer.write_all(b"\n").map_err(Self::transport_error)?;
        // The renderer acts on commands as they arrive; a line must never
        // sit in a buffered writer until the buffer happens to fill.
        self.writer.flush().map_err(Self::transport_error)?;
        Ok(())
    }

    fn is_frame_ready(&self) -> bool {
        self.frames
            .lock()
            .map(|mailbox| mailbox.is_ready())
            .unwrap_or(false)
    }

    fn pull_frame(&mut self) -> Result<Vec<u8>, ConnectorError> {
        let mailbox = self
            .frames
            .lock()
            .map_err(|_| Self::transport_error("frame mailbox poisoned"))?;
        mailbox
            .pull()
            .map(<[u8]>::to_vec)
            .ok_or(ConnectorError::FrameUnavailable)
    }

    fn acknowledge_frame(&mut self) {
        if let Ok(mut mailbox) = self.frames.lock() {
            mailbox.acknowledge();
        }
    }

    fn shutdown(&mut self) -> Result<(), ConnectorError> {
        self.send(SurfaceCommand::Shutdown)
    }
}
