//! Sink that forwards task log lines into `tracing`.

use super::Logger;

/// Emits every message as an `INFO` event with target `tasklog::task`.
///
/// Whether the line is shown depends on the installed subscriber and its
/// filter, e.g. `RUST_LOG=tasklog=info`.
#[derive(Debug, Clone, Default)]
pub struct TracingLogger {
    /// Optional label attached to every event as the `source` field
    source: Option<String>,
}

impl TracingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
        }
    }
}

impl Logger for TracingLogger {
    fn log(&self, message: &str) {
        match &self.source {
            Some(source) => {
                tracing::info!(target: "tasklog::task", source = %source, "{}", message)
            }
            None => tracing::info!(target: "tasklog::task", "{}", message),
        }
    }
}
