use podium_types::PlayerScore;

use crate::cqrs::Command;

/// Creates a player's score or overwrites name and score of an existing one.
#[derive(Debug, Clone)]
pub struct SubmitScore {
    pub player_id: String,
    pub player_name: String,
    pub score: i64,
}

impl Command for SubmitScore {}

impl From<SubmitScore> for PlayerScore {
    fn from(cmd: SubmitScore) -> Self {
        PlayerScore {
            player_id: cmd.player_id,
            player_name: cmd.player_name,
            score: cmd.score,
        }
    }
}
