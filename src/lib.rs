//! # tasklog
//!
//! A minimal task lifecycle over a pluggable logger.
//!
//! A [`Task`] has a name, a duration and a shared [`Logger`]. Creating it logs
//! a creation line; `execute()` logs an execution line and reports success;
//! `abort(delay)` logs an abort line and, under [`AbortPolicy::ThenExecute`],
//! executes as well.
//!
//! ```text
//!   TaskManager ──create_task──▶ Task ──log──▶ Arc<dyn Logger>
//!                                               ├─ ConsoleLogger
//!                                               ├─ TracingLogger
//!                                               ├─ MemoryLogger
//!                                               └─ NoopLogger / PrefixLogger
//! ```
//!
//! ## Modules
//! - `task`: Task, templates and the manager
//! - `logger`: the `Logger` trait and its sinks
//! - `config`: environment and file configuration

pub mod config;
pub mod logger;
pub mod task;
pub mod util;

pub use config::{Config, ConfigError};
pub use logger::{
    ConsoleLogger, LogSink, Logger, MemoryLogger, NoopLogger, PrefixLogger, TracingLogger,
};
pub use task::{AbortPolicy, Executable, Task, TaskManager, TaskMessages};
