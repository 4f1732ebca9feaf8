//! Frame synchronization
//!
//! Pulls completed frames from the connector on the fixed tick and decodes
//! them into the surface's backing image. Runs on its own cadence so a
//! slow decode never stalls input polling.
//!
//! No retry logic: a frame that fails to decode is reported and the slot
//! is still acknowledged, so a poison frame can never wedge the mailbox.

use renderer_connector::RendererConnector;
use surface_types::{Rect, SurfaceImage, BYTES_PER_PIXEL};
use thiserror::Error;

use crate::diagnostics::{DiagnosticsSink, LogEntry, LogLevel};

/// Frame decode error types
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("frame payload is {actual} bytes, expected {expected} for {width}x{height}")]
    LengthMismatch {
        actual: usize,
        expected: usize,
        width: u32,
        height: u32,
    },
}

/// Decodes pulled frame bytes into a backing image.
///
/// The payload layout is owned by the connector/renderer pairing; the
/// decoder is the one place that knows it.
pub trait FrameDecoder {
    fn decode(&self, bytes: &[u8], target: &mut SurfaceImage) -> Result<(), DecodeError>;
}

/// Decoder for raw RGBA8888 payloads of exactly the image's size.
#[derive(Debug, Default)]
pub struct RgbaFrameDecoder;

impl FrameDecoder for RgbaFrameDecoder {
    fn decode(&self, bytes: &[u8], target: &mut SurfaceImage) -> Result<(), DecodeError> {
        if bytes.len() != target.byte_len() {
            return Err(DecodeError::LengthMismatch {
                actual: bytes.len(),
                expected: target.byte_len(),
                width: target.width(),
                height: target.height(),
            });
        }
        target.pixels_mut().copy_from_slice(bytes);
        Ok(())
    }
}

/// Runs one fixed-tick sync pass.
///
/// Allocates the backing image at the last-pushed geometry if absent,
/// decodes the ready frame into it, and acknowledges the slot whether or
/// not the decode succeeded. Returns true if a frame was consumed.
pub fn sync_frame<C: RendererConnector>(
    connector: &mut C,
    decoder: &dyn FrameDecoder,
    image: &mut Option<SurfaceImage>,
    pushed_rect: Rect,
    diagnostics: &mut dyn DiagnosticsSink,
) -> bool {
    if !connector.is_frame_ready() {
        return false;
    }

    let target = image.get_or_insert_with(|| {
        SurfaceImage::new(pushed_rect.width as u32, pushed_rect.height as u32)
    });

    match connector.pull_frame() {
        Ok(bytes) => {
            if let Err(err) = decoder.decode(&bytes, target) {
                diagnostics.report(
                    LogEntry::new(LogLevel::Warn, "frame decode failed")
                        .with_field("error", err.to_string()),
                );
            }
        }
        Err(err) => {
            diagnostics.report(
                LogEntry::new(LogLevel::Warn, "frame pull failed")
                    .with_field("error", err.to_string()),
            );
        }
    }

    // Acknowledge regardless: the previous image stays on screen and the
    // mailbox stays unblocked.
    connector.acknowledge_frame();
    true
}
