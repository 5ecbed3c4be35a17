pub mod high_score;

pub use high_score::{FileHighScoreStore, HighScoreKeeper, HighScoreStore};

#[cfg(test)]
pub use high_score::MemoryHighScoreStore;
