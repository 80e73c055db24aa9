mod get_player_score;
mod get_top_players;

pub use get_player_score::GetPlayerScoreHandler;
pub use get_top_players::GetTopPlayersHandler;
