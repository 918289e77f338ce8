//! Per-variant tuning tables.
//!
//! Every speed, duration and threshold the scenes use lives here so that a
//! variant is fully described by one constant. Distances are world units,
//! angles are degrees and "per tick" means per fixed simulation step.

use instant::Duration;

/// Camera start pose shared by every variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StartPose {
    pub position: [f32; 3],
    pub pitch: f32,
    pub yaw: f32,
}

impl StartPose {
    pub const DEFAULT: Self = Self {
        position: [0.0, 20.0, 5.0],
        pitch: 0.0,
        yaw: 0.0,
    };
}

/// Enemy behaviour for the shooter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyConfig {
    /// Distance in front of the camera at which a new enemy appears.
    pub spawn_distance: f32,
    pub start_health: i32,
    /// Distance walked toward the camera each tick.
    pub speed: f32,
    /// Enemies closer than this to the camera hit the player and vanish.
    pub contact_radius: f32,
    pub contact_damage: i32,
    /// Only enemies closer than this can be shot.
    pub shot_range: f32,
    pub shot_damage: i32,
    /// Redraws per sprite frame.
    pub frame_skip: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShooterConfig {
    pub start: StartPose,
    pub move_speed: f32,
    pub sprint_multiplier: f32,
    pub rot_speed: f32,
    /// Movement that would reach this bound on x or z is rejected.
    pub arena_limit: f32,
    pub player_health: i32,
    pub enemy: EnemyConfig,
}

impl ShooterConfig {
    pub const DEFAULT: Self = Self {
        start: StartPose::DEFAULT,
        move_speed: 1.0,
        sprint_multiplier: 1.5,
        rot_speed: 0.8,
        arena_limit: 990.0,
        player_health: 100,
        enemy: EnemyConfig {
            spawn_distance: 100.0,
            start_health: 100,
            speed: 0.1,
            contact_radius: 5.0,
            contact_damage: 5,
            shot_range: 50.0,
            shot_damage: 50,
            frame_skip: 32,
        },
    };
}

impl Default for ShooterConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// How the skater moves forward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Drive {
    /// Constant forward scroll, no throttle.
    AutoScroll { speed: f32 },
    /// Throttle that ramps up under the forward key and cruises once maxed.
    Throttle {
        /// Speed a stopped skater kicks off with.
        kick: f32,
        acceleration: f32,
        deceleration: f32,
        max_speed: f32,
        /// Speed used once `max_speed` was reached and the key is released.
        cruise_speed: f32,
    },
}

/// Scripted jump: linear rise over half the duration, a plateau of `hold`
/// ticks, then a linear fall over the other half.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OllieConfig {
    pub duration: u32,
    pub hold: u32,
    pub peak_height: f32,
    pub rest_height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComboConfig {
    /// A trick older than this ends the combo.
    pub window: Duration,
    /// Max gap between opposite strafe presses for a manual.
    pub manual_window: Duration,
    pub ollie_points: u32,
    pub manual_points: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkateConfig {
    pub start: StartPose,
    pub drive: Drive,
    /// Sideways step per tick while strafing.
    pub side_move_speed: f32,
    /// Yaw change per tick while strafing.
    pub yaw_nudge: f32,
    pub rot_speed: f32,
    /// Positions past this bound teleport to the opposite edge.
    pub wrap_limit: f32,
    pub ollie: OllieConfig,
    pub combo: ComboConfig,
    /// The preview returns to the forward sprite after this long without strafing.
    pub preview_reset: Duration,
    pub avatar_frame_interval: Duration,
    /// Third-person camera offset from the skater.
    pub third_person_offset: [f32; 3],
}

impl SkateConfig {
    const OLLIE: OllieConfig = OllieConfig {
        duration: 60,
        hold: 30,
        peak_height: 35.0,
        rest_height: 20.0,
    };

    const COMBO_RULES: ComboConfig = ComboConfig {
        window: Duration::from_secs(5),
        manual_window: Duration::from_secs(1),
        ollie_points: 100,
        manual_points: 50,
    };

    /// The simple skate demo: steady scroll, strafing only steers.
    pub const CRUISE: Self = Self {
        start: StartPose::DEFAULT,
        drive: Drive::AutoScroll { speed: 1.0 },
        side_move_speed: 0.0,
        yaw_nudge: 0.1,
        rot_speed: 1.0,
        wrap_limit: 1000.0,
        ollie: Self::OLLIE,
        combo: Self::COMBO_RULES,
        preview_reset: Duration::from_millis(500),
        avatar_frame_interval: Duration::from_secs(1),
        third_person_offset: [0.0, 5.0, 10.0],
    };

    /// The combo skate demo: throttle, side steps and auto-cruise at top speed.
    pub const COMBO: Self = Self {
        start: StartPose::DEFAULT,
        drive: Drive::Throttle {
            kick: 0.5,
            acceleration: 0.05,
            deceleration: 0.05,
            max_speed: 1.5,
            cruise_speed: 2.0,
        },
        side_move_speed: 0.2,
        yaw_nudge: 0.1,
        rot_speed: 1.0,
        wrap_limit: 1000.0,
        ollie: Self::OLLIE,
        combo: Self::COMBO_RULES,
        preview_reset: Duration::from_millis(500),
        avatar_frame_interval: Duration::from_secs(1),
        third_person_offset: [0.0, 5.0, 10.0],
    };
}

impl Default for SkateConfig {
    fn default() -> Self {
        Self::COMBO
    }
}
