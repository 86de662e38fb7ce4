//! Logging collaborator for the batch coordinator
//!
//! The coordinator reports through [`RunLogger`] instead of calling the
//! `tracing` macros directly, so skip paths can be asserted in tests with
//! [`MemoryLogger`].

use std::sync::Mutex;
use tracing::{info, warn};

/// Sink for coordinator progress and failure messages
pub trait RunLogger {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Forwards to the global `tracing` subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl RunLogger for TracingLogger {
    fn info(&self, message: &str) {
        info!("{}", message);
    }

    fn warn(&self, message: &str) {
        warn!("{}", message);
    }
}

/// Severity of a captured log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
}

/// A captured log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

/// Keeps every message in memory
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all entries so far
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    /// Messages logged at `level`, in order
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|entry| entry.level == level)
            .map(|entry| entry.message.clone())
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages(LogLevel::Warn)
    }

    /// Whether any warning contains `needle`
    pub fn has_warning(&self, needle: &str) -> bool {
        self.warnings().iter().any(|m| m.contains(needle))
    }

    fn push(&self, level: LogLevel, message: &str) {
        self.lock().push(LogEntry {
            level,
            message: message.to_string(),
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogEntry>> {
        // A poisoned lock still holds every entry pushed before the panic
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl RunLogger for MemoryLogger {
    fn info(&self, message: &str) {
        self.push(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(LogLevel::Warn, message);
    }
}

impl<T: RunLogger + ?Sized> RunLogger for &T {
    fn info(&self, message: &str) {
        (**self).info(message);
    }

    fn warn(&self, message: &str) {
        (**self).warn(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_logger_captures_in_order() {
        let logger = MemoryLogger::new();
        logger.info("starting");
        logger.warn("skipped line 2");
        logger.info("done");

        let entries = logger.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].level, LogLevel::Warn);
        assert_eq!(logger.messages(LogLevel::Info), vec!["starting", "done"]);
        assert!(logger.has_warning("line 2"));
        assert!(!logger.has_warning("line 3"));
    }

    #[test]
    fn test_logger_by_reference() {
        fn log_through<L: RunLogger>(logger: L) {
            logger.warn("via reference");
        }

        let logger = MemoryLogger::new();
        log_through(&logger);
        assert_eq!(logger.warnings(), vec!["via reference"]);
    }
}
