use instant::Instant;
use std::time::Duration;

use crate::constants::MAX_FRAME_DELTA_MS;

/// Frame clock. Advanced once per display frame before any subject updates.
///
/// `elapsed` only grows while playing and uses the raw step; the `delta`
/// handed to subjects is clamped so a stalled tab does not teleport orbits.
#[derive(Clone, Debug)]
pub struct Clock {
    start: Instant,
    current: Instant,
    elapsed_ms: f64,
    delta_ms: f64,
    playing: bool,
}

impl Clock {
    pub fn new(now: Instant) -> Self {
        Self {
            start: now,
            current: now,
            elapsed_ms: 0.0,
            delta_ms: 16.0,
            playing: true,
        }
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Advances to `now`. Returns the clamped delta in seconds when the clock
    /// is playing, `None` when paused.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        let raw = if now > self.current {
            now - self.current
        } else {
            Duration::ZERO
        };
        self.step(raw);
        self.current = now;
        self.playing.then(|| self.delta_secs())
    }

    /// Advances by an explicit step; used by `tick` and by hosts without a wall clock.
    pub fn step(&mut self, raw: Duration) {
        let raw_ms = raw.as_secs_f64() * 1000.0;
        if self.playing {
            self.elapsed_ms += raw_ms;
        }
        self.delta_ms = raw_ms.min(MAX_FRAME_DELTA_MS);
    }

    pub fn delta_secs(&self) -> f32 {
        (self.delta_ms / 1000.0) as f32
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_ms / 1000.0
    }

    pub fn started_at(&self) -> Instant {
        self.start
    }
}
