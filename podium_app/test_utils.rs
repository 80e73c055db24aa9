#[cfg(any(test, feature = "test-utils"))]
#[cfg(not(tarpaulin_include))]
pub mod tests {
    use async_trait::async_trait;
    use std::{
        collections::{HashMap, HashSet},
        sync::{
            Arc, Mutex,
            atomic::{AtomicBool, AtomicUsize, Ordering},
        },
    };

    use podium_types::{
        PlayerScore,
        errors::{ApplicationError, CacheError, StoreError},
    };

    use crate::{
        app::AppContext,
        config::Config,
        jobs::{BackgroundTask, TaskExecutor},
        repository::{LeaderboardCache, ScoreRepository},
    };

    /// In-memory score store. Counts full scans so tests can tell a cache
    /// hit from a store fallback.
    #[derive(Clone)]
    pub struct MockScoreRepository {
        players: Arc<Mutex<HashMap<String, PlayerScore>>>,
        scans: Arc<AtomicUsize>,
        available: Arc<AtomicBool>,
    }

    impl Default for MockScoreRepository {
        fn default() -> Self {
            Self {
                players: Arc::new(Mutex::new(HashMap::new())),
                scans: Arc::new(AtomicUsize::new(0)),
                available: Arc::new(AtomicBool::new(true)),
            }
        }
    }

    impl MockScoreRepository {
        /// Stores a record directly, bypassing the application.
        pub fn seed(&self, player: PlayerScore) {
            self.players
                .lock()
                .unwrap()
                .insert(player.player_id.clone(), player);
        }

        pub fn scan_count(&self) -> usize {
            self.scans.load(Ordering::SeqCst)
        }

        pub fn set_available(&self, available: bool) {
            self.available.store(available, Ordering::SeqCst);
        }

        fn ensure_available(&self) -> Result<(), ApplicationError> {
            if self.available.load(Ordering::SeqCst) {
                Ok(())
            } else {
                Err(StoreError::Unavailable("mock store is down".to_string()).into())
            }
        }
    }

    #[async_trait]
    impl ScoreRepository for MockScoreRepository {
        async fn upsert(&self, player: &PlayerScore) -> Result<(), ApplicationError> {
            self.ensure_available()?;
            self.seed(player.clone());
            Ok(())
        }

        async fn top_players(&self) -> Result<Vec<PlayerScore>, ApplicationError> {
            self.ensure_available()?;
            self.scans.fetch_add(1, Ordering::SeqCst);

            let mut players: Vec<PlayerScore> =
                self.players.lock().unwrap().values().cloned().collect();
            players.sort_by(|a, b| {
                b.score
                    .cmp(&a.score)
                    .then_with(|| b.player_id.cmp(&a.player_id))
            });
            Ok(players)
        }

        async fn get_score(&self, player_id: &str) -> Result<i64, ApplicationError> {
            self.ensure_available()?;
            self.players
                .lock()
                .unwrap()
                .get(player_id)
                .map(|p| p.score)
                .ok_or_else(|| ApplicationError::PlayerNotFound(player_id.to_string()))
        }
    }

    #[derive(Default)]
    struct MockKeyspace {
        sets: HashMap<String, HashMap<String, i64>>,
        details: HashMap<String, PlayerScore>,
    }

    /// Leaderboard cache backed by plain maps. Single players can be made to
    /// fail on write to simulate partial outages.
    #[derive(Default, Clone)]
    pub struct MockLeaderboardCache {
        keyspace: Arc<Mutex<MockKeyspace>>,
        rejected: Arc<Mutex<HashSet<String>>>,
    }

    impl MockLeaderboardCache {
        pub fn reject_player(&self, player_id: &str) {
            self.rejected.lock().unwrap().insert(player_id.to_string());
        }

        fn write(
            &self,
            rank_key: &str,
            player_id: &str,
            player_name: &str,
            score: i64,
        ) -> Result<(), ApplicationError> {
            if self.rejected.lock().unwrap().contains(player_id) {
                return Err(CacheError::Unavailable(format!("write rejected for {player_id}")).into());
            }

            let mut keyspace = self.keyspace.lock().unwrap();
            keyspace
                .sets
                .entry(rank_key.to_string())
                .or_default()
                .insert(player_id.to_string(), score);
            keyspace.details.insert(
                player_id.to_string(),
                PlayerScore::new(player_id, player_name, score),
            );
            Ok(())
        }
    }

    #[async_trait]
    impl LeaderboardCache for MockLeaderboardCache {
        async fn upsert_entry(
            &self,
            rank_key: &str,
            player: &PlayerScore,
        ) -> Result<(), ApplicationError> {
            self.write(rank_key, &player.player_id, &player.player_name, player.score)
        }

        async fn read_ranked(&self, rank_key: &str) -> Result<Vec<PlayerScore>, ApplicationError> {
            let keyspace = self.keyspace.lock().unwrap();
            let Some(set) = keyspace.sets.get(rank_key) else {
                return Ok(Vec::new());
            };

            let mut ranked = set
                .iter()
                .map(|(player_id, score)| -> Result<PlayerScore, ApplicationError> {
                    let detail = keyspace
                        .details
                        .get(player_id)
                        .ok_or_else(|| CacheError::MissingDetail(player_id.clone()))?;
                    Ok(PlayerScore::new(
                        player_id.clone(),
                        detail.player_name.clone(),
                        *score,
                    ))
                })
                .collect::<Result<Vec<_>, _>>()?;
            ranked.sort_by(|a, b| {
                b.score
                    .cmp(&a.score)
                    .then_with(|| b.player_id.cmp(&a.player_id))
            });
            Ok(ranked)
        }

        async fn read_one(&self, player_id: &str) -> Result<PlayerScore, ApplicationError> {
            self.keyspace
                .lock()
                .unwrap()
                .details
                .get(player_id)
                .cloned()
                .ok_or_else(|| CacheError::EntryNotFound(player_id.to_string()).into())
        }

        async fn insert_one(
            &self,
            rank_key: &str,
            player_id: &str,
            player_name: &str,
            score: i64,
        ) -> Result<(), ApplicationError> {
            self.write(rank_key, player_id, player_name, score)
        }
    }

    /// A cache whose backend cannot be reached at all. Every call fails;
    /// write attempts are recorded by player id.
    #[derive(Default, Clone)]
    pub struct FailingLeaderboardCache {
        attempts: Arc<Mutex<Vec<String>>>,
    }

    impl FailingLeaderboardCache {
        pub fn write_attempts(&self) -> Vec<String> {
            self.attempts.lock().unwrap().clone()
        }

        fn refuse_write(&self, player_id: &str) -> ApplicationError {
            self.attempts.lock().unwrap().push(player_id.to_string());
            unreachable_cache()
        }
    }

    fn unreachable_cache() -> ApplicationError {
        CacheError::Unavailable("connection refused".to_string()).into()
    }

    #[async_trait]
    impl LeaderboardCache for FailingLeaderboardCache {
        async fn upsert_entry(
            &self,
            _rank_key: &str,
            player: &PlayerScore,
        ) -> Result<(), ApplicationError> {
            Err(self.refuse_write(&player.player_id))
        }

        async fn read_ranked(&self, _rank_key: &str) -> Result<Vec<PlayerScore>, ApplicationError> {
            Err(unreachable_cache())
        }

        async fn read_one(&self, _player_id: &str) -> Result<PlayerScore, ApplicationError> {
            Err(unreachable_cache())
        }

        async fn insert_one(
            &self,
            _rank_key: &str,
            player_id: &str,
            _player_name: &str,
            _score: i64,
        ) -> Result<(), ApplicationError> {
            Err(self.refuse_write(player_id))
        }
    }

    /// Queues background tasks instead of spawning them, so tests decide
    /// when the detached work completes.
    #[derive(Default, Clone)]
    pub struct ManualTaskExecutor {
        queue: Arc<Mutex<Vec<Box<dyn BackgroundTask>>>>,
    }

    impl ManualTaskExecutor {
        pub fn pending(&self) -> usize {
            self.queue.lock().unwrap().len()
        }

        /// Runs queued tasks (including any they schedule) in submission
        /// order and returns how many ran.
        pub async fn run_pending(&self) -> usize {
            let mut ran = 0;
            loop {
                let batch = std::mem::take(&mut *self.queue.lock().unwrap());
                if batch.is_empty() {
                    return ran;
                }
                for task in batch {
                    task.run().await;
                    ran += 1;
                }
            }
        }
    }

    impl TaskExecutor for ManualTaskExecutor {
        fn spawn(&self, task: Box<dyn BackgroundTask>) {
            self.queue.lock().unwrap().push(task);
        }
    }

    /// Application context wired to mocks, with handles to each of them.
    pub struct TestApp {
        pub scores: Arc<MockScoreRepository>,
        pub cache: Arc<dyn LeaderboardCache>,
        pub executor: Arc<ManualTaskExecutor>,
        pub ctx: AppContext,
    }

    impl TestApp {
        pub fn new() -> Self {
            Self::with(
                Arc::new(MockScoreRepository::default()),
                Arc::new(MockLeaderboardCache::default()),
            )
        }

        pub fn with(scores: Arc<MockScoreRepository>, cache: Arc<dyn LeaderboardCache>) -> Self {
            let executor = Arc::new(ManualTaskExecutor::default());
            let ctx = AppContext {
                config: Arc::new(Config::default()),
                scores: scores.clone(),
                cache: cache.clone(),
                executor: executor.clone(),
            };

            Self {
                scores,
                cache,
                executor,
                ctx,
            }
        }

        pub fn with_leaderboard_key(mut self, key: &str) -> Self {
            let config = Config {
                leaderboard_key: key.to_string(),
                ..Config::default()
            };
            self.ctx.config = Arc::new(config);
            self
        }
    }
}
