pub mod errors;
pub mod player_score;

pub use errors::Result;
pub use player_score::PlayerScore;
