use dotenvy::dotenv;
use std::env;

/// Rank key of the one leaderboard this service maintains.
pub const DEFAULT_LEADERBOARD_KEY: &str = "leaderboard";
pub const DEFAULT_HTTP_PORT: u16 = 8000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_REDIS_DB_INDEX: i64 = 0;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub leaderboard_key: String,
    pub db_max_connections: u32,
    /// Redis cache settings. `None` keeps the leaderboard cache in process.
    pub redis: Option<RedisConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            leaderboard_key: DEFAULT_LEADERBOARD_KEY.to_string(),
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            redis: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let http_port = match env::var("PODIUM_HTTP_PORT") {
            Ok(val) => val.parse::<u16>().unwrap_or(DEFAULT_HTTP_PORT),
            Err(_) => DEFAULT_HTTP_PORT,
        };

        let leaderboard_key = match env::var("PODIUM_LEADERBOARD_KEY") {
            Ok(val) if !val.trim().is_empty() => val,
            _ => DEFAULT_LEADERBOARD_KEY.to_string(),
        };

        let db_max_connections = match env::var("PODIUM_DB_MAX_CONNECTIONS") {
            Ok(val) => val
                .parse::<u32>()
                .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
                .max(1),
            Err(_) => DEFAULT_DB_MAX_CONNECTIONS,
        };

        let redis = RedisConfig::from_vars(
            env::var("REDIS_ADDR").ok(),
            env::var("REDIS_PASSWORD").ok(),
            env::var("REDIS_DB_INDEX").ok(),
        );

        Self {
            http_port,
            leaderboard_key,
            db_max_connections,
            redis,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisConfig {
    /// `host:port` of the Redis server.
    pub addr: String,
    pub password: Option<String>,
    pub db_index: i64,
}

impl RedisConfig {
    /// Reads the raw `REDIS_ADDR`, `REDIS_PASSWORD` and `REDIS_DB_INDEX`
    /// values. Without an address there is no Redis cache.
    pub fn from_vars(
        addr: Option<String>,
        password: Option<String>,
        db_index: Option<String>,
    ) -> Option<Self> {
        let addr = addr
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())?;
        let password = password.filter(|p| !p.is_empty());
        let db_index = db_index
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(DEFAULT_REDIS_DB_INDEX);

        Some(Self {
            addr,
            password,
            db_index,
        })
    }

    pub fn url(&self) -> String {
        match &self.password {
            Some(password) => format!("redis://:{password}@{}/{}", self.addr, self.db_index),
            None => format!("redis://{}/{}", self.addr, self.db_index),
        }
    }
}
