mod submit_score;

pub use submit_score::SubmitScoreCommandHandler;
