mod keyspace;
mod memory_cache;
mod ranked_set;
mod redis_cache;

pub use memory_cache::InMemoryLeaderboardCache;
pub use redis_cache::RedisLeaderboardCache;
