use std::sync::Arc;

use podium_types::errors::ApplicationError;

use crate::{
    config::Config,
    cqrs::{Command, CommandHandler, Query, QueryHandler},
    jobs::TaskExecutor,
    repository::{LeaderboardCache, ScoreRepository},
};

/// Everything a handler needs: the durable score store, the leaderboard
/// cache in front of it, and the executor for detached cache work.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub scores: Arc<dyn ScoreRepository>,
    pub cache: Arc<dyn LeaderboardCache>,
    pub executor: Arc<dyn TaskExecutor>,
}

/// AppBus (Mediator)
/// This struct is the central entry point for all application logic.
/// It does not contain any business logic itself: it dispatches Commands and
/// Queries to their handlers, sharing one `AppContext` among them.
pub struct AppBus {
    context: AppContext,
}

impl AppBus {
    pub fn new(
        config: Arc<Config>,
        scores: Arc<dyn ScoreRepository>,
        cache: Arc<dyn LeaderboardCache>,
        executor: Arc<dyn TaskExecutor>,
    ) -> Self {
        Self {
            context: AppContext {
                config,
                scores,
                cache,
                executor,
            },
        }
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.context.config
    }

    /// Executes a command.
    /// A command is an operation that modifies the system state.
    pub async fn execute<C, H>(&self, cmd: C, handler: H) -> Result<(), ApplicationError>
    where
        C: Command,
        H: CommandHandler<C>,
    {
        handler.handle(cmd, &self.context).await
    }

    /// Executes a query.
    /// A query reads system state and returns data. It may still schedule
    /// background cache work.
    pub async fn query<Q, H>(&self, query: Q, handler: H) -> Result<Q::Output, ApplicationError>
    where
        Q: Query,
        H: QueryHandler<Q>,
    {
        handler.handle(query, &self.context).await
    }
}
