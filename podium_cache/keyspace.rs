use std::collections::HashMap;

use crate::ranked_set::RankedSet;

/// Detail record kept for every cached player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlayerDetail {
    pub player_name: String,
    pub score: i64,
}

/// Ranked sets by rank key, plus the per-player detail records they refer to.
#[derive(Debug, Default)]
pub(crate) struct Keyspace {
    pub sets: HashMap<String, RankedSet>,
    pub details: HashMap<String, PlayerDetail>,
}

impl Keyspace {
    /// Updates the player's rank and detail record in one step.
    pub fn put(&mut self, rank_key: &str, player_id: &str, player_name: &str, score: i64) {
        self.sets
            .entry(rank_key.to_string())
            .or_default()
            .upsert(player_id, score);
        self.details.insert(
            player_id.to_string(),
            PlayerDetail {
                player_name: player_name.to_string(),
                score,
            },
        );
    }
}
