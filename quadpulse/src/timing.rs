use std::time::Instant;

/// Measures the wall-clock duration of each frame.
pub struct FrameTimer {
    last: Instant,
}

impl FrameTimer {
    pub fn start() -> Self {
        Self::at(Instant::now())
    }

    pub fn at(now: Instant) -> Self {
        Self { last: now }
    }

    /// Seconds since the previous tick; re-arms the timer.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let delta = now.saturating_duration_since(self.last).as_secs_f32();
        self.last = now;

        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn delta_matches_elapsed_time() {
        let start = Instant::now();
        let mut timer = FrameTimer::at(start);

        let delta = timer.tick_at(start + Duration::from_millis(16));

        assert!((delta - 0.016).abs() < 1e-6);
    }

    #[test]
    fn delta_is_positive_for_an_advancing_clock() {
        let start = Instant::now();
        let mut timer = FrameTimer::at(start);

        assert!(timer.tick_at(start + Duration::from_micros(1)) > 0.0);
    }

    #[test]
    fn repeated_instants_measure_zero() {
        let start = Instant::now();
        let mut timer = FrameTimer::at(start);

        assert_eq!(timer.tick_at(start), 0.0);
    }

    #[test]
    fn ticks_rearm_the_timer() {
        let start = Instant::now();
        let mut timer = FrameTimer::at(start);

        timer.tick_at(start + Duration::from_secs(1));
        let delta = timer.tick_at(start + Duration::from_secs(3));

        assert!((delta - 2.0).abs() < 1e-6);
    }
}
