//! Task factory sharing one logger and one set of templates.

use std::sync::Arc;

use super::messages::TaskMessages;
use super::task::{AbortPolicy, Task};
use crate::config::Config;
use crate::logger::{with_prefix, Logger};

/// Creates tasks bound to a shared logger.
///
/// Holds no registry: tasks are handed out and not tracked.
#[derive(Clone)]
pub struct TaskManager {
    logger: Arc<dyn Logger>,
    messages: TaskMessages,
    abort_policy: AbortPolicy,
}

impl TaskManager {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            logger,
            messages: TaskMessages::default(),
            abort_policy: AbortPolicy::default(),
        }
    }

    /// Build a manager whose logger, templates and abort policy come from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::from_config_with_logger(config, config.sink.build())
    }

    /// Like [`TaskManager::from_config`], but writes through `logger` instead
    /// of building `config.sink`. The configured prefix still applies.
    pub fn from_config_with_logger(config: &Config, logger: Arc<dyn Logger>) -> Self {
        tracing::debug!(
            sink = ?config.sink,
            abort_policy = ?config.abort_policy,
            "Task manager configured"
        );
        Self {
            logger: with_prefix(logger, config.prefix.as_deref()),
            messages: config.messages.clone(),
            abort_policy: config.abort_policy,
        }
    }

    pub fn with_messages(mut self, messages: TaskMessages) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_abort_policy(mut self, policy: AbortPolicy) -> Self {
        self.abort_policy = policy;
        self
    }

    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    /// Create a task with duration 0.
    pub fn create_task(&self, name: impl Into<String>) -> Task {
        self.create_task_with_duration(name, 0)
    }

    pub fn create_task_with_duration(&self, name: impl Into<String>, duration: i64) -> Task {
        Task::builder(name, self.logger.clone())
            .duration(duration)
            .messages(self.messages.clone())
            .abort_policy(self.abort_policy)
            .build()
    }
}

impl std::fmt::Debug for TaskManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskManager")
            .field("messages", &self.messages)
            .field("abort_policy", &self.abort_policy)
            .finish_non_exhaustive()
    }
}
