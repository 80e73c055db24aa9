use podium_types::PlayerScore;

use crate::cqrs::Query;

/// Fetch the whole leaderboard, highest score first.
pub struct GetTopPlayers;

impl Query for GetTopPlayers {
    type Output = Vec<PlayerScore>;
}

/// Fetch the score of one player.
pub struct GetPlayerScore {
    pub player_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerScoreView {
    pub player_id: String,
    pub score: i64,
}

impl Query for GetPlayerScore {
    type Output = PlayerScoreView;
}
