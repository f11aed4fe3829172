//! Time management utilities

use std::time::Instant;

/// Frame timer producing the per-frame delta time
#[derive(Debug, Clone)]
pub struct FrameTimer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    /// Create a new timer starting now
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a timer whose previous frame is `start`
    pub const fn starting_at(start: Instant) -> Self {
        Self {
            last_frame: start,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer from the monotonic clock (call once per frame)
    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    /// Update the timer with an explicit frame timestamp
    ///
    /// Timestamps earlier than the previous frame yield a zero delta.
    pub fn update_at(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.delta_time = elapsed.as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Treat `now` as the previous frame without counting a frame
    pub fn restart_at(&mut self, now: Instant) {
        self.last_frame = now;
        self.delta_time = 0.0;
    }

    /// Get the time since the last frame in seconds
    pub const fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time accumulated over all frames
    pub const fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::time::Duration;

    #[test]
    fn test_delta_time_from_explicit_timestamps() {
        let start = Instant::now();
        let mut timer = FrameTimer::starting_at(start);

        timer.update_at(start + Duration::from_millis(16));
        assert_relative_eq!(timer.delta_time(), 0.016, epsilon = 1e-6);

        timer.update_at(start + Duration::from_millis(48));
        assert_relative_eq!(timer.delta_time(), 0.032, epsilon = 1e-6);
        assert_relative_eq!(timer.total_time(), 0.048, epsilon = 1e-6);
        assert_eq!(timer.frame_count(), 2);
    }

    #[test]
    fn test_restart_excludes_idle_time() {
        let start = Instant::now();
        let mut timer = FrameTimer::starting_at(start);

        timer.restart_at(start + Duration::from_secs(3));
        timer.update_at(start + Duration::from_millis(3020));

        assert_relative_eq!(timer.delta_time(), 0.020, epsilon = 1e-5);
        assert_eq!(timer.frame_count(), 1);
    }

    #[test]
    fn test_backwards_timestamp_yields_zero_delta() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut timer = FrameTimer::starting_at(start);

        timer.update_at(start - Duration::from_millis(5));
        assert_eq!(timer.delta_time(), 0.0);
    }
}
