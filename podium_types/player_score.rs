use serde::{Deserialize, Serialize};

/// A player's entry on the leaderboard.
///
/// `player_id` is the primary key both in the durable store and in the cache;
/// every write overwrites `player_name` and `score` as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerScore {
    pub player_id: String,
    pub player_name: String,
    pub score: i64,
}

impl PlayerScore {
    pub fn new(player_id: impl Into<String>, player_name: impl Into<String>, score: i64) -> Self {
        Self {
            player_id: player_id.into(),
            player_name: player_name.into(),
            score,
        }
    }
}
