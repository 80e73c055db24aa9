mod helpers;
mod scores_handler;

pub(crate) use helpers::*;
pub use scores_handler::{ScoreForm, add_or_update, get_points, top_players};
