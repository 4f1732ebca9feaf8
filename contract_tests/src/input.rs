//! Input vocabulary contract tests
//!
//! These tests pin the key names and button indices the remote protocol
//! reads off the wire.

// ===== Contract Tests =====
