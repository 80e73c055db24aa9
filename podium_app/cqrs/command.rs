use async_trait::async_trait;
use podium_types::errors::ApplicationError;

use crate::app::AppContext;

/// A marker trait for Command structs.
/// Commands are operations that change the state of the system.
pub trait Command: Send + Sync {}

/// A trait for handlers that execute Commands.
/// It receives the command and the `AppContext` holding store, cache and
/// background executor.
#[async_trait]
pub trait CommandHandler<C: Command> {
    async fn handle(&self, cmd: C, ctx: &AppContext) -> Result<(), ApplicationError>;
}
