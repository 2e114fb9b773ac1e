use std::time::Duration;

/// Fixed-interval gate between frames and simulation ticks
///
/// Frames feed their elapsed time in with [`Timer::tick`]; the timer fires
/// once the accumulated time reaches the current delay.
#[derive(Debug, Clone, PartialEq)]
pub struct Timer {
    base_delay: Duration,
    delay: Duration,
    accumulated: Duration,
}

impl Timer {
    pub fn new(delay: Duration) -> Self {
        Self {
            base_delay: delay,
            delay,
            accumulated: Duration::ZERO,
        }
    }

    /// Add `delta` to the accumulator; returns true and clears it once the
    /// delay is reached
    pub fn tick(&mut self, delta: Duration) -> bool {
        self.accumulated += delta;
        if self.accumulated >= self.delay {
            self.accumulated = Duration::ZERO;
            true
        } else {
            false
        }
    }

    /// Scale the delay by `factor`. Accumulated time is kept.
    pub fn speed_up(&mut self, factor: f64) {
        self.delay = self.delay.mul_f64(factor);
    }

    /// Back to the base delay with an empty accumulator
    pub fn reset(&mut self) {
        self.delay = self.base_delay;
        self.accumulated = Duration::ZERO;
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn test_fires_once_threshold_reached() {
        let mut timer = Timer::new(secs(0.2));

        assert!(!timer.tick(secs(0.1)));
        assert!(timer.tick(secs(0.1)));
        assert!(!timer.tick(secs(0.05)));
    }

    #[test]
    fn test_accumulator_resets_after_firing() {
        let mut timer = Timer::new(Duration::from_millis(100));

        assert!(timer.tick(Duration::from_millis(150)));
        // Overshoot is dropped, a full delay is needed again
        assert!(!timer.tick(Duration::from_millis(90)));
        assert!(timer.tick(Duration::from_millis(10)));
    }

    #[test]
    fn test_speed_up_keeps_accumulated_time() {
        let mut timer = Timer::new(Duration::from_millis(200));

        assert!(!timer.tick(Duration::from_millis(150)));
        timer.speed_up(0.5);
        assert_eq!(timer.delay(), Duration::from_millis(100));

        // 150ms already banked is past the new 100ms threshold
        assert!(timer.tick(Duration::ZERO));
    }

    #[test]
    fn test_reset_restores_base_delay() {
        let mut timer = Timer::new(Duration::from_millis(200));
        timer.speed_up(0.5);
        timer.tick(Duration::from_millis(50));

        timer.reset();

        assert_eq!(timer.delay(), timer.base_delay());
        assert!(!timer.tick(Duration::from_millis(150)));
        assert!(timer.tick(Duration::from_millis(50)));
    }
}
