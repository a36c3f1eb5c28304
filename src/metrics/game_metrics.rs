use std::time::{Duration, Instant};

use crate::game::GameStatus;

/// `mm:ss`, minutes keep counting past the hour
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// Wall-clock statistics across the games of one session
pub struct GameMetrics {
    session_start: Instant,
    game_start: Instant,
    /// Wall-clock time of the current game
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub games_won: u32,
    game_open: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            session_start: now,
            game_start: now,
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            games_won: 0,
            game_open: true,
        }
    }

    /// Advances the game clock; it stops while the game is finished
    pub fn update(&mut self) {
        if self.game_open {
            self.elapsed_time = self.game_start.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.game_start = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.game_open = true;
    }

    /// Records a finished game; repeated calls for the same game are ignored
    pub fn on_game_over(&mut self, final_score: u32, status: GameStatus) {
        if !self.game_open {
            return;
        }
        self.update();
        self.game_open = false;
        self.games_played += 1;
        if status == GameStatus::Won {
            self.games_won += 1;
        }
        self.high_score = self.high_score.max(final_score);
    }

    pub fn session_time(&self) -> Duration {
        self.session_start.elapsed()
    }

    pub fn format_time(&self) -> String {
        format_duration(self.elapsed_time)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
