//! Command vocabulary and envelope structure

use core::fmt;
use input_types::{Key, MouseButton};
use serde::{Deserialize, Serialize};
use surface_types::{Point, Rect};

/// Schema version for command payloads
///
/// This enables backward-compatible evolution of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version (breaking changes)
    pub major: u32,
    /// Minor version (backward-compatible additions)
    pub minor: u32,
}

impl SchemaVersion {
    /// Creates a new schema version
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Checks if this version is compatible with another
    ///
    /// Same major version = compatible.
    pub fn is_compatible_with(&self, other: &SchemaVersion) -> bool {
        self.major == other.major
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}", self.major, self.minor)
    }
}

/// Surface command schema version (v1.0).
pub const SURFACE_COMMAND_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0);

/// One command in the outbound vocabulary.
///
/// Coordinates in the pointer commands are local to the surface with a
/// top-left origin (the translator has already flipped the vertical axis).
/// Button indices carry the fixed 0/1/2 wire mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SurfaceCommand {
    Initialize { url: String, rect: Rect },
    LoadUrl { url: String },
    LoadHtml { html: String },
    Resize { rect: Rect },
    MouseMove { x: f32, y: f32 },
    MouseDown { x: f32, y: f32, button: u8 },
    MouseUp { x: f32, y: f32, button: u8 },
    MouseWheel { x: f32, y: f32, delta: f32 },
    MouseLeave,
    KeyDown { key: String },
    CharDown { text: String },
    FocusChanged { focused: bool },
    Shutdown,
}

impl SurfaceCommand {
    /// Builds a key-down command using the key's wire name
    pub fn key_down(key: Key) -> Self {
        Self::KeyDown {
            key: key.name().to_string(),
        }
    }

    /// Builds a char-down command
    pub fn char_down(text: impl Into<String>) -> Self {
        Self::CharDown { text: text.into() }
    }

    /// Builds a mouse-down command using the button's wire index
    pub fn mouse_down(at: Point, button: MouseButton) -> Self {
        Self::MouseDown {
            x: at.x,
            y: at.y,
            button: button.protocol_index(),
        }
    }

    /// Builds a mouse-up command using the button's wire index
    pub fn mouse_up(at: Point, button: MouseButton) -> Self {
        Self::MouseUp {
            x: at.x,
            y: at.y,
            button: button.protocol_index(),
        }
    }

    /// Returns the stable action identifier for this command
    pub fn action(&self) -> &'static str {
        match self {
            SurfaceCommand::Initialize { .. } => "surface.initialize",
            SurfaceCommand::LoadUrl { .. } => "surface.load_url",
            SurfaceCommand::LoadHtml { .. } => "surface.load_html",
            SurfaceCommand::Resize { .. } => "surface.resize",
            SurfaceCommand::MouseMove { .. } => "surface.mouse_move",
            SurfaceCommand::MouseDown { .. } => "surface.mouse_down",
            SurfaceCommand::MouseUp { .. } => "surface.mouse_up",
            SurfaceCommand::MouseWheel { .. } => "surface.mouse_wheel",
            SurfaceCommand::MouseLeave => "surface.mouse_leave",
            SurfaceCommand::KeyDown { .. } => "surface.key_down",
            SurfaceCommand::CharDown { .. } => "surface.char_down",
            SurfaceCommand::FocusChanged { .. } => "surface.focus_changed",
            SurfaceCommand::Shutdown => "surface.shutdown",
        }
    }
}

/// Envelope carrying one command on the wire.
///
/// The action identifier is redundant with the command variant but lets a
/// receiver route and reject without decoding the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandEnvelope {
    pub schema_version: SchemaVersion,
    pub action: String,
    pub command: SurfaceCommand,
}

impl CommandEnvelope {
    /// Wraps a command with its action identifier and the current schema
    pub fn new(command: SurfaceCommand) -> Self {
        Self {
            schema_version: SURFACE_COMMAND_SCHEMA,
            action: command.action().to_string(),
            command,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_version_compatibility() {
        let v1_0 = SchemaVersion::new(1, 0);
        let v1_3 = SchemaVersion::new(1, 3);
        let v2_0 = SchemaVersion::new(2, 0);
        assert!(v1_0.is_compatible_with(&v1_3));
        assert!(!v1_0.is_compatible_with(&v2_0));
    }

    #[test]
    fn test_key_down_uses_wire_name() {
        let command = SurfaceCommand::key_down(Key::PageDown);
        assert_eq!(
            command,
            SurfaceCommand::KeyDown {
                key: "PageDown".to_string()
            }
        );
    }

    #[test]
    fn test_mouse_commands_use_protocol_indices() {
        let at = Point::new(10.0, 20.0);
        assert_eq!(
            SurfaceCommand::mouse_down(at, MouseButton::Middle),
            SurfaceCommand::MouseDown {
                x: 10.0,
                y: 20.0,
                button: 1
            }
        );
        assert_eq!(
            SurfaceCommand::mouse_up(at, MouseButton::Secondary),
            SurfaceCommand::MouseUp {
                x: 10.0,
                y: 20.0,
                button: 2
            }
        );
    }

    #[test]
    fn test_envelope_carries_action_and_schema() {
        let envelope = CommandEnvelope::new(SurfaceCommand::MouseLeave);
        assert_eq!(envelope.action, "surface.mouse_leave");
        assert_eq!(envelope.schema_version, SURFACE_COMMAND_SCHEMA);
    }

    #[test]
    fn test_envelope_serde_round_trip() {
        let envelope = CommandEnvelope::new(SurfaceCommand::Resize {
            rect: Rect::new(0.0, 0.0, 800.0, 600.0),
        });
        let json = serde_json::to_string(&envelope).unwrap();
        let decoded: CommandEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(envelope, decoded);
    }
}
