use std::time::{Duration, Instant};

/// Per-session numbers shown in the HUD
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    /// Whether the last finished game set a new high score
    pub new_record: bool,
}

impl GameMetrics {
    /// Start a session; `high_score` is the best carried over from earlier runs
    pub fn new(high_score: u32) -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score,
            games_played: 0,
            new_record: false,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.new_record = false;
    }

    /// Returns true when `final_score` beats the best so far
    pub fn on_game_over(&mut self, final_score: u32) -> bool {
        self.games_played += 1;
        self.new_record = final_score > self.high_score;
        if self.new_record {
            self.high_score = final_score;
        }
        self.new_record
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new(0)
    }
}
