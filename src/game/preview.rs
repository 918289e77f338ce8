use instant::Duration;

/// Which board sprite the corner preview shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Pose {
    #[default]
    Forward,
    Left,
    Right,
    Ollie,
}

impl Pose {
    pub const ALL: [Pose; 4] = [Pose::Forward, Pose::Left, Pose::Right, Pose::Ollie];

    pub fn file_name(self) -> &'static str {
        match self {
            Pose::Forward => "forward.png",
            Pose::Left => "left.png",
            Pose::Right => "right.png",
            Pose::Ollie => "ollie.png",
        }
    }
}

/// Corner preview with a single-shot reset back to [`Pose::Forward`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Preview {
    pose: Pose,
    reset_at: Option<Duration>,
}

impl Preview {
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Show `pose` until `now + hold`. Calling again restarts the countdown.
    pub fn show_for(&mut self, pose: Pose, now: Duration, hold: Duration) {
        self.pose = pose;
        self.reset_at = Some(now + hold);
    }

    /// Show `pose` until changed.
    pub fn show(&mut self, pose: Pose) {
        self.pose = pose;
        self.reset_at = None;
    }

    pub fn reset(&mut self) {
        self.show(Pose::Forward);
    }

    pub fn update(&mut self, now: Duration) {
        if self.reset_at.is_some_and(|at| now >= at) {
            self.reset();
        }
    }
}
