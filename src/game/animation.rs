//! Sprite-sheet frame selection.

use instant::Duration;

/// Advances one frame every `skip` calls, e.g. redraws.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSkip {
    frames: usize,
    skip: u32,
    counter: u32,
    current: usize,
}

impl FrameSkip {
    pub fn new(frames: usize, skip: u32) -> Self {
        Self {
            frames,
            skip: skip.max(1),
            counter: 0,
            current: 0,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn advance(&mut self) -> usize {
        if self.frames == 0 {
            return 0;
        }
        self.counter += 1;
        if self.counter >= self.skip {
            self.current = (self.current + 1) % self.frames;
            self.counter = 0;
        }
        self.current
    }
}

/// Advances one frame per `interval` of game time.
///
/// A clock that runs backwards (a new session started) restarts the cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTimer {
    frames: usize,
    interval: Duration,
    last_switch: Duration,
    current: usize,
}

impl FrameTimer {
    pub fn new(frames: usize, interval: Duration) -> Self {
        Self {
            frames,
            interval,
            last_switch: Duration::ZERO,
            current: 0,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn update(&mut self, now: Duration) -> usize {
        if self.frames == 0 || self.interval.is_zero() {
            return 0;
        }
        if now < self.last_switch {
            self.last_switch = Duration::ZERO;
            self.current = 0;
        }
        while now.saturating_sub(self.last_switch) >= self.interval {
            self.last_switch += self.interval;
            self.current = (self.current + 1) % self.frames;
        }
        self.current
    }
}
