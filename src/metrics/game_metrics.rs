use std::time::Duration;

/// Session statistics shown next to the board
pub struct GameMetrics {
    /// Time spent in the Playing status this round
    pub play_time: Duration,
    pub high_score: usize,
    pub rounds_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            play_time: Duration::ZERO,
            high_score: 0,
            rounds_played: 0,
        }
    }

    /// Count a frame towards the round clock; paused frames don't
    pub fn record_frame(&mut self, delta: Duration, playing: bool) {
        if playing {
            self.play_time += delta;
        }
    }

    pub fn on_round_start(&mut self) {
        self.play_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, final_score: usize) {
        self.rounds_played += 1;
        self.high_score = self.high_score.max(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.play_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.play_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.play_time = Duration::ZERO;
        assert_eq!(metrics.format_time(), "00:00");

        metrics.play_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.rounds_played, 1);

        metrics.on_game_over(5);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.rounds_played, 2);

        metrics.on_game_over(15);
        assert_eq!(metrics.high_score, 15);
        assert_eq!(metrics.rounds_played, 3);
    }

    #[test]
    fn test_paused_frames_do_not_count() {
        let mut metrics = GameMetrics::new();

        metrics.record_frame(Duration::from_millis(500), true);
        metrics.record_frame(Duration::from_secs(30), false);
        metrics.record_frame(Duration::from_millis(700), true);

        assert_eq!(metrics.play_time, Duration::from_millis(1200));

        metrics.on_round_start();
        assert_eq!(metrics.play_time, Duration::ZERO);
    }
}
