//! tasklog - demo entry point
//!
//! Creates a task through the manager, executes it, and optionally aborts it.
//!
//! Usage: `tasklog [NAME]` (default name `Test`). Set `TASKLOG_ABORT_DELAY` to
//! also abort the task with that delay.

use tasklog::{config::Config, task::TaskManager};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasklog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Loaded configuration: sink={:?}, abort_policy={:?}",
        config.sink, config.abort_policy
    );

    let name = std::env::args().nth(1).unwrap_or_else(|| "Test".to_string());

    let manager = TaskManager::from_config(&config);
    let task = manager.create_task(name);
    let ok = task.execute();
    info!(task = %task.name(), ok, "Task executed");

    if let Some(delay) = config.abort_delay {
        task.abort(delay);
    }

    Ok(())
}
