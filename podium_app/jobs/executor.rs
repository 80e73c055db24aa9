use async_trait::async_trait;
use tokio::runtime::Handle;
use tracing::Instrument;
use uuid::Uuid;

/// A unit of best-effort work detached from the request that scheduled it.
/// Its outcome is never reported back: implementations log their own failures.
#[async_trait]
pub trait BackgroundTask: Send {
    fn name(&self) -> &'static str;

    async fn run(self: Box<Self>);
}

/// Schedules background tasks. There is no result channel back to the caller.
pub trait TaskExecutor: Send + Sync {
    fn spawn(&self, task: Box<dyn BackgroundTask>);
}

/// Runs every task on the current tokio runtime, without joining it.
#[derive(Debug, Default, Clone)]
pub struct TokioTaskExecutor;

impl TokioTaskExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl TaskExecutor for TokioTaskExecutor {
    fn spawn(&self, task: Box<dyn BackgroundTask>) {
        let task_id = Uuid::new_v4();
        let span = tracing::info_span!("background_task", task = task.name(), %task_id);

        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(task.run().instrument(span));
            }
            Err(e) => {
                tracing::error!(task = task.name(), %task_id, "No runtime to run task on: {e}");
            }
        }
    }
}
