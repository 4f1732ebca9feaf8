//! Renderer connector contract tests
//!
//! These tests define the stable wire contract for the command channel.

use renderer_connector::SchemaVersion;

// ===== Connector Contract Version =====
pub const CONNECTOR_SCHEMA_VERSION: SchemaVersion = SchemaVersion::new(1, 0);

// ===== Action Identifiers =====
pub const ACTION_INITIALIZE: &str = "surface.initialize";
pub const ACTION_LOAD_URL: &str = "surface.load_url";
pub const ACTION_LOAD_HTML: &str = "surface.load_html";
pub const ACTION_RESIZE: &str = "surface.resize";
pub const ACTION_MOUSE_MOVE: &str = "surface.mouse_move";
pub const ACTION_MOUSE_DOWN: &str = "surface.mouse_down";
pub const ACTION_MOUSE_UP: &str = "surface.mouse_up";
pub const ACTION_MOUSE_WHEEL: &str = "surface.mouse_wheel";
pub const ACTION_MOUSE_LEAVE: &str = "surface.mouse_leave";
pub const ACTION_KEY_DOWN: &str = "surface.key_down";
pub const ACTION_CHAR_DOWN: &str = "surface.char_down";
pub const ACTION_FOCUS_CHANGED: &str = "surface.focus_changed";
pub const ACTION_SHUTDOWN: &str = "surface.shutdown";

// ===== Contract Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use renderer_connector::{CommandEnvelope, SurfaceCommand, SURFACE_COMMAND_SCHEMA};
    use surface_types::Rect;

    #[test]
    fn test_schema_version_pinned() {
        assert_eq!(SURFACE_COMMAND_SCHEMA, CONNECTOR_SCHEMA_VERSION);
    }

    #[test]
    fn test_action_identifiers_pinned() {
        let expected = [
            (
                SurfaceCommand::Initialize {
                    url: "about:blank".to_string(),
                    rect: Rect::default(),
                },
                ACTION_INITIALIZE,
            ),
            (
                SurfaceCommand::LoadUrl {
                    url: String::new(),
                },
                ACTION_LOAD_URL,
            ),
            (
                SurfaceCommand::LoadHtml {
                    html: String::new(),
                },
                ACTION_LOAD_HTML,
            ),
            (
                SurfaceCommand::Resize {
                    rect: Rect::default(),
                },
                ACTION_RESIZE,
            ),
            (SurfaceCommand::MouseMove { x: 0.0, y: 0.0 }, ACTION_MOUSE_MOVE),
            (
                SurfaceCommand::MouseDown {
                    x: 0.0,
                    y: 0.0,
                    button: 0,
                },
                ACTION_MOUSE_DOWN,
            ),
            (
                SurfaceCommand::MouseUp {
                    x: 0.0,
                    y: 0.0,
                    button: 0,
                },
                ACTION_MOUSE_UP,
            ),
            (
                SurfaceCommand::MouseWheel {
                    x: 0.0,
                    y: 0.0,
                    delta: 0.0,
                },
                ACTION_MOUSE_WHEEL,
            ),
            (SurfaceCommand::MouseLeave, ACTION_MOUSE_LEAVE),
            (
                SurfaceCommand::KeyDown {
                    key: String::new(),
                },
                ACTION_KEY_DOWN,
            ),
            (
                SurfaceCommand::CharDown {
                    text: String::new(),
                },
                ACTION_CHAR_DOWN,
            ),
            (
                SurfaceCommand::FocusChanged { focused: false },
                ACTION_FOCUS_CHANGED,
            ),
            (SurfaceCommand::Shutdown, ACTION_SHUTDOWN),
        ];

        for (command, action) in expected {
            assert_eq!(command.action(), action);
        }
    }

    #[test]
    fn test_envelope_contract() {
        let envelope = CommandEnvelope::new(SurfaceCommand::LoadUrl {
            url: "https://example.com".to_string(),
        });

        verify_envelope_contract(&envelope, ACTION_LOAD_URL, CONNECTOR_SCHEMA_VERSION);
        verify_major_version(&envelope, 1);
    }

    #[test]
    fn test_envelope_json_shape() {
        let json = envelope_json(SurfaceCommand::Resize {
            rect: Rect::new(0.0, 0.0, 800.0, 600.0),
        });

        assert_eq!(
            json,
            serde_json::json!({
                "schema_version": { "major": 1, "minor": 0 },
                "action": "surface.resize",
                "command": {
                    "Resize": {
                        "rect": { "x": 0.0, "y": 0.0, "width": 800.0, "height": 600.0 }
                    }
                }
            })
        );
    }

    #[test]
    fn test_unit_command_json_shape() {
        let json = envelope_json(SurfaceCommand::MouseLeave);
        assert_eq!(json["command"], serde_json::json!("MouseLeave"));
    }

    #[test]
    fn test_mouse_down_json_carries_button_index() {
        let json = envelope_json(SurfaceCommand::MouseDown {
            x: 10.0,
            y: 20.0,
            button: 1,
        });
        assert_eq!(json["command"]["MouseDown"]["button"], 1);
    }

    #[test]
    fn test_envelope_round_trip() {
        let envelope = CommandEnvelope::new(SurfaceCommand::KeyDown {
            key: "PageDown".to_string(),
        });
        let json = serde_json::to_string(&envelope).unwrap();
        let decoded: CommandEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, envelope);
    }
}
