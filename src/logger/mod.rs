//! Logger capability - the single collaborator a task talks to.
//!
//! A logger is anything that can accept a plain message string. Tasks hold an
//! `Arc<dyn Logger>` and never configure or close it.
//!
//! Sinks:
//! - [`ConsoleLogger`] writes each message as a line on stdout
//! - [`TracingLogger`] forwards messages as `tracing` events
//! - [`MemoryLogger`] captures messages for assertions
//! - [`NoopLogger`] discards everything
//! - [`PrefixLogger`] decorates another sink with a fixed prefix

mod memory;
mod trace;

use std::io::Write;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use memory::{LogRecord, MemoryLogger};
pub use trace::TracingLogger;

/// A sink for task log lines.
///
/// # Contract
/// - `log` never fails from the caller's point of view
/// - No levels, buffering, or formatting beyond the message itself
pub trait Logger: Send + Sync {
    fn log(&self, message: &str);
}

impl<L: Logger + ?Sized> Logger for &L {
    fn log(&self, message: &str) {
        (**self).log(message)
    }
}

impl<L: Logger + ?Sized> Logger for Box<L> {
    fn log(&self, message: &str) {
        (**self).log(message)
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn log(&self, message: &str) {
        (**self).log(message)
    }
}

/// Writes each message followed by a newline to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn log(&self, message: &str) {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        // A closed stdout must not turn a log call into a failure.
        let _ = writeln!(handle, "{}", message);
    }
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _message: &str) {}
}

/// Prepends a fixed prefix to every message before handing it on.
#[derive(Debug, Clone)]
pub struct PrefixLogger<L> {
    prefix: String,
    inner: L,
}

impl<L: Logger> PrefixLogger<L> {
    pub fn new(prefix: impl Into<String>, inner: L) -> Self {
        Self {
            prefix: prefix.into(),
            inner,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }
}

impl<L: Logger> Logger for PrefixLogger<L> {
    fn log(&self, message: &str) {
        self.inner.log(&format!("{}{}", self.prefix, message));
    }
}

/// Wrap `logger` in a [`PrefixLogger`] unless `prefix` is missing or empty.
pub fn with_prefix(logger: Arc<dyn Logger>, prefix: Option<&str>) -> Arc<dyn Logger> {
    match prefix {
        Some(prefix) if !prefix.is_empty() => Arc::new(PrefixLogger::new(prefix, logger)),
        _ => logger,
    }
}

/// Which sink to build, as named in configuration.
///
/// Only sinks that write somewhere are configurable. [`MemoryLogger`] is
/// constructed directly by whoever needs to read the lines back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogSink {
    #[default]
    Console,
    Tracing,
    Noop,
}

impl LogSink {
    /// Parse a sink name (case-insensitive). Returns `None` for unknown names.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "console" | "stdout" => Some(Self::Console),
            "tracing" => Some(Self::Tracing),
            "noop" | "none" | "off" => Some(Self::Noop),
            _ => None,
        }
    }

    /// Build a fresh shared logger for this sink.
    pub fn build(self) -> Arc<dyn Logger> {
        match self {
            LogSink::Console => Arc::new(ConsoleLogger),
            LogSink::Tracing => Arc::new(TracingLogger::default()),
            LogSink::Noop => Arc::new(NoopLogger),
        }
    }

    /// Build a logger for this sink, wrapped in a [`PrefixLogger`] when a
    /// prefix is given.
    pub fn build_with_prefix(self, prefix: Option<&str>) -> Arc<dyn Logger> {
        with_prefix(self.build(), prefix)
    }
}
