use instant::Duration;

/// Game time, advanced by exactly one tick length per simulation step so that
/// every timing window is reproducible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameClock {
    now: Duration,
    ticks: u64,
}

impl GameClock {
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn advance(&mut self, step: Duration) -> Duration {
        self.now += step;
        self.ticks += 1;
        self.now
    }
}
