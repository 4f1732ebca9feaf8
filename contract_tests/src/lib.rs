//! # Wire Contract Tests
//!
//! This crate provides "golden" tests for the renderer wire contract to
//! ensure it doesn't drift accidentally over time. The process on the
//! other side of the connector is versioned independently; every
//! identifier, index, and field name it reads is pinned here.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: The wire contract is written as code
//! - **Testability first**: Contract tests fail when the wire changes
//! - **Mechanism not policy**: Define what must be stable, not how to use it
//!
//! ## Structure
//!
//! Each contract surface has a module:
//! - Command envelope structure, action identifiers, schema version
//! - Input vocabulary: key wire names and button indices

pub mod connector;
pub mod input;

/// Common test helpers for contract validation
pub mod test_helpers {
    use renderer_connector::{CommandEnvelope, SchemaVersion, SurfaceCommand};

    /// Wraps a command and serializes its envelope to a JSON value
    pub fn envelope_json(command: SurfaceCommand) -> serde_json::Value {
        serde_json::to_value(CommandEnvelope::new(command))
            .expect("Failed to serialize envelope")
    }

    /// Verifies an envelope carries the expected action and version
    pub fn verify_envelope_contract(
        envelope: &CommandEnvelope,
        expected_action: &str,
        expected_version: SchemaVersion,
    ) {
        assert_eq!(
            envelope.action, expected_action,
            "Action identifier changed: expected '{}', got '{}'",
            expected_action, envelope.action
        );
        assert_eq!(
            envelope.schema_version, expected_version,
            "Schema version changed: expected {}, got {}",
            expected_version, envelope.schema_version
        );
    }

    /// Verifies schema version stays within major version
    pub fn verify_major_version(envelope: &CommandEnvelope, expected_major: u32) {
        assert_eq!(
            envelope.schema_version.major, expected_major,
            "Major version changed (breaking change): expected {}, got {}",
            expected_major, envelope.schema_version.major
        );
    }
}
