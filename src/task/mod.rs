//! Task module - the task type, its log templates and a factory.
//!
//! - `task`: [`Task`], [`AbortPolicy`] and the [`Executable`] trait
//! - `messages`: wording of the creation, execution and abort lines
//! - `manager`: [`TaskManager`], creating tasks over a shared logger

mod manager;
mod messages;
pub mod task;

pub use manager::TaskManager;
pub use messages::{MessagePreset, TaskMessages, TemplateError};
pub use task::{execute_all, AbortPolicy, Executable, Task, TaskBuilder};
