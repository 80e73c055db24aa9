mod leaderboard_cache;
mod score_repository;

pub use leaderboard_cache::LeaderboardCache;
pub use score_repository::ScoreRepository;
