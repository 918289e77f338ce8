//! Enemies walking across the arena floor toward the player.

use cgmath::{InnerSpace, Point3, Vector2};

use crate::{camera::Camera, game::config::EnemyConfig};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Enemy {
    /// Position on the floor as (x, z).
    pub position: Vector2<f32>,
    pub health: i32,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

fn ground(point: Point3<f32>) -> Vector2<f32> {
    Vector2::new(point.x, point.z)
}

#[derive(Clone, Debug, Default)]
pub struct Horde {
    enemies: Vec<Enemy>,
}

impl Horde {
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Place a new enemy `spawn_distance` ahead of the camera.
    pub fn spawn(&mut self, camera: &Camera, config: &EnemyConfig) -> Enemy {
        let ahead = camera.forward() * config.spawn_distance;
        let enemy = Enemy {
            position: ground(camera.position) + Vector2::new(ahead.x, ahead.z),
            health: config.start_health,
        };
        log::debug!("spawned enemy at {:?}", enemy.position);
        self.enemies.push(enemy);
        enemy
    }

    /// Damage the first enemy in range. Returns whether anything was hit.
    pub fn shoot(&mut self, camera: &Camera, config: &EnemyConfig) -> bool {
        let origin = ground(camera.position);
        match self
            .enemies
            .iter_mut()
            .find(|enemy| (origin - enemy.position).magnitude() < config.shot_range)
        {
            Some(enemy) => {
                enemy.health -= config.shot_damage;
                log::debug!("hit enemy, {} health left", enemy.health);
                true
            }
            None => false,
        }
    }

    /// Prune the dead, walk the living toward the camera and resolve contact.
    /// Returns the damage dealt to the player this tick.
    pub fn step(&mut self, camera: &Camera, config: &EnemyConfig) -> i32 {
        let target = ground(camera.position);
        self.enemies.retain(Enemy::is_alive);

        let mut damage = 0;
        self.enemies.retain_mut(|enemy| {
            let offset = target - enemy.position;
            let distance = offset.magnitude();
            if distance > 0.0 {
                enemy.position += offset / distance * config.speed;
            }
            if (target - enemy.position).magnitude() < config.contact_radius {
                damage += config.contact_damage;
                false
            } else {
                true
            }
        });
        damage
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Deg;

    use super::*;
    use crate::game::config::ShooterConfig;

    const CONFIG: EnemyConfig = ShooterConfig::DEFAULT.enemy;

    fn camera() -> Camera {
        Camera::new((0.0, 20.0, 5.0), Deg(0.0), Deg(0.0))
    }

    #[test]
    fn spawns_in_front_of_the_camera() {
        let mut horde = Horde::default();
        let enemy = horde.spawn(&camera(), &CONFIG);
        assert_eq!(enemy.position, Vector2::new(0.0, -95.0));
        assert_eq!(enemy.health, 100);
    }

    #[test]
    fn walks_toward_the_camera() {
        let mut horde = Horde::default();
        horde.spawn(&camera(), &CONFIG);
        assert_eq!(horde.step(&camera(), &CONFIG), 0);
        let moved = horde.enemies()[0].position;
        assert!((moved.y - (-94.9)).abs() < 1e-4);
        assert_eq!(moved.x, 0.0);
    }

    #[test]
    fn contact_removes_and_damages_once() {
        let mut horde = Horde {
            enemies: vec![Enemy {
                position: Vector2::new(0.0, 5.0 - 5.05),
                health: 100,
            }],
        };
        assert_eq!(horde.step(&camera(), &CONFIG), 5);
        assert!(horde.is_empty());
        assert_eq!(horde.step(&camera(), &CONFIG), 0);
    }

    #[test]
    fn two_shots_kill() {
        let mut horde = Horde {
            enemies: vec![Enemy {
                position: Vector2::new(0.0, -30.0),
                health: 100,
            }],
        };
        assert!(horde.shoot(&camera(), &CONFIG));
        assert!(horde.shoot(&camera(), &CONFIG));
        assert!(!horde.enemies()[0].is_alive());
        horde.step(&camera(), &CONFIG);
        assert!(horde.is_empty());
    }

    #[test]
    fn out_of_range_shots_miss() {
        let mut horde = Horde::default();
        horde.spawn(&camera(), &CONFIG);
        assert!(!horde.shoot(&camera(), &CONFIG));
        assert_eq!(horde.enemies()[0].health, 100);
    }

    #[test]
    fn enemy_on_the_camera_does_not_produce_nan() {
        let mut horde = Horde {
            enemies: vec![Enemy {
                position: Vector2::new(0.0, 5.0),
                health: 100,
            }],
        };
        assert_eq!(horde.step(&camera(), &CONFIG), 5);
        assert!(horde.is_empty());
    }
}
