//! Structured diagnostics
//!
//! The controller never propagates connector failures to the host loop; it
//! reports them here. Entries are explicit and structured, not printf-style.

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Debug information
    Debug,
    /// Informational messages
    Info,
    /// Warnings
    Warn,
    /// Errors
    Error,
}

/// A structured log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Structured fields
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    /// Creates a new log entry
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Adds a field to the log entry
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }
}

/// Sink for diagnostics entries
pub trait DiagnosticsSink {
    fn report(&mut self, entry: LogEntry);
}

/// Sink that drops every entry
#[derive(Debug, Default)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn report(&mut self, _entry: LogEntry) {}
}

/// In-memory sink for tests
#[derive(Debug, Default)]
pub struct MemorySink {
    pub entries: Vec<LogEntry>,
}

impl MemorySink {
    /// Creates an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many entries were reported at or above the given level
    pub fn count_at_least(&self, level: LogLevel) -> usize {
        self.entries.iter().filter(|e| e.level >= level).count()
    }
}

impl DiagnosticsSink for MemorySink {
    fn report(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_log_entry_fields() {
        let entry = LogEntry::new(LogLevel::Warn, "decode failed")
            .with_field("error", "length mismatch")
            .with_field("size", "800x600");
        assert_eq!(entry.fields.len(), 2);
        assert_eq!(entry.fields[0].0, "error");
    }

    #[test]
    fn test_memory_sink_counts() {
        let mut sink = MemorySink::new();
        sink.report(LogEntry::new(LogLevel::Debug, "a"));
        sink.report(LogEntry::new(LogLevel::Error, "b"));
        assert_eq!(sink.entries.len(), 2);
        assert_eq!(sink.count_at_least(LogLevel::Warn), 1);
    }
}
