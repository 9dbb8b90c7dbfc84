//! Core Task type.
//!
//! # Invariants
//! - A task always holds a logger; construction logs through it exactly once
//! - `execute` and `abort` never fail and never change a field
//!
//! There is no status: aborting does not stop a later `execute`, and nothing
//! records which of the two ran.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::messages::TaskMessages;
use crate::logger::Logger;

/// What `abort` does after logging the abort line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbortPolicy {
    /// Log the abort line and return
    #[default]
    LogOnly,
    /// Log the abort line, then run `execute` in the same call
    ThenExecute,
}

/// Anything that can be executed and reports success.
pub trait Executable {
    fn execute(&self) -> bool;
}

/// Execute every item in order. Returns how many reported success.
pub fn execute_all(items: &[&dyn Executable]) -> usize {
    items.iter().filter(|item| item.execute()).count()
}

/// A named unit of work bound to a shared logger.
pub struct Task {
    name: String,
    /// Stored as given; not used in any computation
    duration: i64,
    logger: Arc<dyn Logger>,
    messages: TaskMessages,
    abort_policy: AbortPolicy,
}

impl Task {
    /// Create a task with the standard wording and [`AbortPolicy::LogOnly`].
    ///
    /// # Postcondition
    /// Exactly one creation line has been written to `logger`.
    ///
    /// No validation: empty names and negative durations are accepted.
    pub fn new(name: impl Into<String>, duration: i64, logger: Arc<dyn Logger>) -> Self {
        Self::builder(name, logger).duration(duration).build()
    }

    pub fn builder(name: impl Into<String>, logger: Arc<dyn Logger>) -> TaskBuilder {
        TaskBuilder {
            name: name.into(),
            duration: 0,
            logger,
            messages: TaskMessages::default(),
            abort_policy: AbortPolicy::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn duration(&self) -> i64 {
        self.duration
    }

    pub fn set_duration(&mut self, duration: i64) {
        self.duration = duration;
    }

    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    pub fn messages(&self) -> &TaskMessages {
        &self.messages
    }

    pub fn abort_policy(&self) -> AbortPolicy {
        self.abort_policy
    }

    /// Log the execution line. Always returns `true`.
    pub fn execute(&self) -> bool {
        self.logger
            .log(&self.messages.render_executing(&self.name, self.duration));
        true
    }

    /// Log the abort line, then execute if the policy says so.
    ///
    /// Returns `self` so calls can be chained.
    pub fn abort(&self, delay: f64) -> &Self {
        tracing::debug!(task = %self.name, delay, policy = ?self.abort_policy, "Aborting task");
        self.logger
            .log(&self.messages.render_aborting(&self.name, self.duration, delay));
        if self.abort_policy == AbortPolicy::ThenExecute {
            self.execute();
        }
        self
    }
}

impl Executable for Task {
    fn execute(&self) -> bool {
        Task::execute(self)
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("duration", &self.duration)
            .field("messages", &self.messages)
            .field("abort_policy", &self.abort_policy)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Task`]. Nothing is logged until [`TaskBuilder::build`].
pub struct TaskBuilder {
    name: String,
    duration: i64,
    logger: Arc<dyn Logger>,
    messages: TaskMessages,
    abort_policy: AbortPolicy,
}

impl TaskBuilder {
    pub fn duration(mut self, duration: i64) -> Self {
        self.duration = duration;
        self
    }

    pub fn messages(mut self, messages: TaskMessages) -> Self {
        self.messages = messages;
        self
    }

    pub fn abort_policy(mut self, policy: AbortPolicy) -> Self {
        self.abort_policy = policy;
        self
    }

    /// Create the task and write its creation line.
    pub fn build(self) -> Task {
        let task = Task {
            name: self.name,
            duration: self.duration,
            logger: self.logger,
            messages: self.messages,
            abort_policy: self.abort_policy,
        };
        tracing::debug!(task = %task.name, duration = task.duration, "Task created");
        task.logger
            .log(&task.messages.render_created(&task.name, task.duration));
        task
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::MemoryLogger;

    fn capture() -> (Arc<MemoryLogger>, Arc<dyn Logger>) {
        let memory = Arc::new(MemoryLogger::new());
        let logger: Arc<dyn Logger> = memory.clone();
        (memory, logger)
    }

    #[test]
    fn test_construction_logs_once() {
        let (memory, logger) = capture();
        let task = Task::new("Test", 0, logger);
        assert_eq!(memory.messages(), vec!["Task created: Test"]);
        assert_eq!(task.name(), "Test");
        assert_eq!(task.duration(), 0);
    }

    #[test]
    fn test_execute_returns_true_and_logs_name() {
        let (memory, logger) = capture();
        let task = Task::new("Test", 0, logger);
        memory.clear();

        assert!(task.execute());
        assert_eq!(memory.messages(), vec!["Executing task: Test"]);
    }

    #[test]
    fn test_abort_log_only() {
        let (memory, logger) = capture();
        let task = Task::new("Test", 5, logger);
        memory.clear();

        task.abort(1.5);
        let messages = memory.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("Test"));
        assert!(messages[0].starts_with("Aborting"));
    }

    #[test]
    fn test_abort_then_execute() {
        let (memory, logger) = capture();
        let task = Task::builder("Test", logger)
            .duration(5)
            .abort_policy(AbortPolicy::ThenExecute)
            .build();
        memory.clear();

        task.abort(1.5);
        assert_eq!(
            memory.messages(),
            vec!["Aborting task: Test", "Executing task: Test"]
        );
    }

    #[test]
    fn test_abort_leaves_fields_untouched_and_chains() {
        let (memory, logger) = capture();
        let task = Task::new("Test", 5, logger);

        let same = task.abort(0.0).abort(2.5);
        assert!(std::ptr::eq(same, &task));
        assert_eq!(task.name(), "Test");
        assert_eq!(task.duration(), 5);
        // creation + two aborts
        assert_eq!(memory.len(), 3);
    }

    #[test]
    fn test_execute_still_runs_after_abort() {
        let (memory, logger) = capture();
        let task = Task::new("Test", 0, logger);
        task.abort(1.0);
        assert!(task.execute());
        assert_eq!(
            memory.messages().last().map(String::as_str),
            Some("Executing task: Test")
        );
    }

    #[test]
    fn test_negative_duration_and_empty_name_accepted() {
        let (memory, logger) = capture();
        let task = Task::builder("", logger)
            .duration(-10)
            .messages(TaskMessages::descriptive())
            .build();
        assert_eq!(task.duration(), -10);
        assert_eq!(memory.messages(), vec!["name: , duration: -10"]);
    }

    #[test]
    fn test_setters_do_not_log() {
        let (memory, logger) = capture();
        let mut task = Task::new("Test", 0, logger);
        task.set_name("Renamed");
        task.set_duration(42);
        assert_eq!(memory.len(), 1);
        assert!(task.execute());
        assert_eq!(memory.messages()[1], "Executing task: Renamed");
    }

    #[test]
    fn test_execute_all_counts_successes() {
        let (memory, logger) = capture();
        let a = Task::new("a", 1, logger.clone());
        let b = Task::new("b", 2, logger);
        memory.clear();

        assert_eq!(execute_all(&[&a, &b]), 2);
        assert_eq!(memory.messages(), vec!["Executing task: a", "Executing task: b"]);
    }

    #[test]
    fn test_shared_logger_not_consumed() {
        let (memory, logger) = capture();
        let task = Task::new("Test", 0, logger.clone());
        // The task holds one more handle; the caller's handle keeps working.
        assert_eq!(Arc::strong_count(&logger), 3);
        logger.log("direct");
        drop(task);
        assert_eq!(memory.len(), 2);
    }

    #[test]
    fn test_abort_policy_serde() {
        let policy: AbortPolicy = serde_json::from_str("\"then_execute\"").unwrap();
        assert_eq!(policy, AbortPolicy::ThenExecute);
        assert_eq!(AbortPolicy::default(), AbortPolicy::LogOnly);
    }
}
