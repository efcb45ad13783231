//! Time-based scroll tween used for snapping and programmatic scrolls.

use std::time::{Duration, Instant};

/// Eased interpolation of the wheel offset (in rows) between two positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTween {
    from: f64,
    to: f64,
    start: Instant,
    duration: Duration,
}

impl ScrollTween {
    pub fn new(from: f64, to: f64, start: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            duration: duration.max(Duration::from_millis(1)),
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn is_done(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }

    pub fn sample(&self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.start);
        let t = (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0);
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * smoothstep(t)
    }

    /// Restarts toward `to` from wherever the tween currently is.
    pub fn retarget(&mut self, now: Instant, to: f64, duration: Duration) {
        let current = self.sample(now);
        *self = Self::new(current, to, now, duration);
    }
}

fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}
