use sqlx::FromRow;

#[derive(Debug, FromRow, Clone)]
pub struct PlayerScore {
    pub player_id: String,
    pub player_name: String,
    pub score: i64,
}
