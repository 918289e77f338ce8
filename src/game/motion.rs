//! Movement policies: the arena clamp, the wrap-around board and the throttle.

use cgmath::{Point3, Vector3};

use crate::game::config::Drive;

/// Accept `candidate` only while it stays strictly inside `±limit` on both
/// horizontal axes; otherwise the whole step is dropped.
pub fn clamp_to_arena(current: Point3<f32>, candidate: Point3<f32>, limit: f32) -> Point3<f32> {
    if candidate.x.abs() < limit && candidate.z.abs() < limit {
        candidate
    } else {
        current
    }
}

/// Teleport to the opposite edge once a horizontal coordinate passes `±limit`.
pub fn wrap_around(mut position: Point3<f32>, limit: f32) -> Point3<f32> {
    position.x = wrap_axis(position.x, limit);
    position.z = wrap_axis(position.z, limit);
    position
}

fn wrap_axis(value: f32, limit: f32) -> f32 {
    if value > limit {
        -limit
    } else if value < -limit {
        limit
    } else {
        value
    }
}

/// Forward speed state of the skater.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Throttle {
    speed: f32,
}

impl Throttle {
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Advance the throttle one tick and return the distance to travel forward.
    ///
    /// `push` is the forward key held without the brake, `brake` the back key.
    pub fn step(&mut self, drive: &Drive, push: bool, brake: bool) -> f32 {
        match *drive {
            Drive::AutoScroll { speed } => speed,
            Drive::Throttle {
                kick,
                acceleration,
                deceleration,
                max_speed,
                cruise_speed,
            } => {
                if push {
                    if self.speed == 0.0 {
                        self.speed = kick;
                    }
                    self.speed = (self.speed + acceleration).min(max_speed);
                    self.speed
                } else if brake {
                    self.speed = (self.speed - deceleration).max(0.0);
                    0.0
                } else if self.speed == max_speed {
                    cruise_speed
                } else {
                    self.speed = (self.speed - deceleration).max(0.0);
                    self.speed
                }
            }
        }
    }
}

/// Move `position` by `distance` along a horizontal `direction`.
pub fn advance(position: Point3<f32>, direction: Vector3<f32>, distance: f32) -> Point3<f32> {
    position + direction * distance
}
