use crate::game::config::OllieConfig;

/// Scripted jump arc driven one tick at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Ollie {
    active: bool,
    ticks: u32,
}

impl Ollie {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Start a jump. Returns `false` while one is already in the air.
    pub fn start(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.ticks = 0;
        true
    }

    /// Advance one tick and return the camera height for it, or `None` when
    /// no jump is running. The tick that lands clears the jump and returns
    /// exactly the rest height.
    pub fn step(&mut self, config: &OllieConfig) -> Option<f32> {
        if !self.active {
            return None;
        }
        self.ticks += 1;
        if self.ticks >= config.duration + config.hold {
            self.active = false;
            self.ticks = 0;
            return Some(config.rest_height);
        }
        Some(height_at(config, self.ticks))
    }
}

/// Height of the arc `ticks` ticks into the jump.
pub fn height_at(config: &OllieConfig, ticks: u32) -> f32 {
    let half = config.duration / 2;
    let lift = config.peak_height - config.rest_height;
    if ticks <= half {
        config.rest_height + lift * (ticks as f32 / half as f32)
    } else if ticks <= half + config.hold {
        config.peak_height
    } else {
        let falling = (ticks - (half + config.hold)) as f32;
        config.peak_height - lift * (falling / half as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::SkateConfig;

    const CONFIG: OllieConfig = SkateConfig::COMBO.ollie;

    #[test]
    fn rise_and_fall_mirror_each_other() {
        let quarter = CONFIG.duration / 4;
        let rising = height_at(&CONFIG, quarter);
        let mirrored = CONFIG.duration + CONFIG.hold - quarter;
        assert_eq!(rising, height_at(&CONFIG, mirrored));
        assert_eq!(rising, 27.5);
    }

    #[test]
    fn plateau_holds_peak() {
        for ticks in 30..=60 {
            assert_eq!(height_at(&CONFIG, ticks), CONFIG.peak_height);
        }
    }

    #[test]
    fn lands_at_rest_after_duration_plus_hold() {
        let mut ollie = Ollie::default();
        assert!(ollie.start());
        let mut last = None;
        for _ in 0..(CONFIG.duration + CONFIG.hold) {
            last = ollie.step(&CONFIG);
        }
        assert_eq!(last, Some(CONFIG.rest_height));
        assert!(!ollie.is_active());
        assert_eq!(ollie.step(&CONFIG), None);
    }

    #[test]
    fn cannot_restart_midair() {
        let mut ollie = Ollie::default();
        assert!(ollie.start());
        ollie.step(&CONFIG);
        assert!(!ollie.start());
        assert_eq!(ollie.ticks(), 1);
    }
}
