//! Animation clock driven by the host frame callback

use crate::consts::MAX_FRAME_DELTA;

/// Frames averaged for the FPS readout
const FPS_WINDOW: usize = 60;

/// Monotonic elapsed time plus per-frame delta.
///
/// The host calls [`AnimationClock::advance`] once per displayed frame with
/// its own timestamp (seconds). The first call anchors time zero.
#[derive(Debug, Clone)]
pub struct AnimationClock {
    start: Option<f64>,
    last: f64,
    elapsed: f64,
    delta: f32,
    max_delta: f32,
    frame: u64,
    // FPS tracking
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    fps: u32,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationClock {
    pub fn new() -> Self {
        Self {
            start: None,
            last: 0.0,
            elapsed: 0.0,
            delta: 0.0,
            max_delta: MAX_FRAME_DELTA,
            frame: 0,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            fps: 0,
        }
    }

    /// Advance to host timestamp `now` (seconds). Returns the clamped delta.
    ///
    /// Timestamps that are not finite or that run backwards leave `elapsed`
    /// unchanged and yield a zero delta.
    pub fn advance(&mut self, now: f64) -> f32 {
        if !now.is_finite() {
            self.delta = 0.0;
            return 0.0;
        }

        let Some(start) = self.start else {
            self.start = Some(now);
            self.last = now;
            self.delta = 0.0;
            self.record_frame(now);
            return 0.0;
        };

        let step = now - self.last;
        if step <= 0.0 {
            self.delta = 0.0;
            return 0.0;
        }

        self.last = now;
        self.elapsed = now - start;
        self.delta = (step as f32).min(self.max_delta);
        self.record_frame(now);
        self.delta
    }

    /// Seconds since the first frame
    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }

    /// Clamped delta of the last advance
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Frames counted so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Frames per second over the last `FPS_WINDOW` frames (0 until warm)
    pub fn fps(&self) -> u32 {
        self.fps
    }

    fn record_frame(&mut self, now: f64) {
        self.frame += 1;
        self.frame_times[self.frame_index] = now;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;

        // Slot just after the newest holds the oldest sample once the ring is full
        if self.frame >= FPS_WINDOW as u64 {
            let oldest = self.frame_times[self.frame_index];
            let span = now - oldest;
            if span > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 / span).round() as u32;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_anchors_time() {
        let mut clock = AnimationClock::new();
        assert_eq!(clock.advance(123.5), 0.0);
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.frame(), 1);

        let dt = clock.advance(123.55);
        assert!((dt - 0.05).abs() < 1e-5);
        assert!((clock.elapsed() - 0.05).abs() < 1e-5);
    }

    #[test]
    fn test_elapsed_is_monotonic() {
        let mut clock = AnimationClock::new();
        clock.advance(0.0);
        clock.advance(1.0);
        assert_eq!(clock.advance(0.5), 0.0);
        assert_eq!(clock.elapsed(), 1.0);
        assert_eq!(clock.advance(f64::NAN), 0.0);
        assert_eq!(clock.elapsed(), 1.0);
        clock.advance(1.5);
        assert_eq!(clock.elapsed(), 1.5);
    }

    #[test]
    fn test_delta_clamped_after_stall() {
        let mut clock = AnimationClock::new();
        clock.advance(0.0);
        let dt = clock.advance(5.0);
        assert_eq!(dt, MAX_FRAME_DELTA);
        // Elapsed still tracks wall time
        assert_eq!(clock.elapsed(), 5.0);
    }

    #[test]
    fn test_fps_at_60hz() {
        let mut clock = AnimationClock::new();
        assert_eq!(clock.fps(), 0);
        for i in 0..120 {
            clock.advance(i as f64 / 60.0);
        }
        assert_eq!(clock.fps(), 60);
    }
}
