mod executor;
pub mod tasks;

pub use executor::{BackgroundTask, TaskExecutor, TokioTaskExecutor};
