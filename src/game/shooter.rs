//! First-person arena: walk the walled floor and shoot enemies before they
//! reach you.

use instant::Duration;

use crate::{
    camera::Camera,
    game::{
        Simulation,
        config::ShooterConfig,
        enemy::{Enemy, Horde},
        input::{InputSnapshot, Key},
        motion::clamp_to_arena,
        readout::{Anchor, Caption, Readout},
    },
};

#[derive(Clone, Debug)]
pub struct ShooterScene {
    config: ShooterConfig,
    camera: Camera,
    horde: Horde,
    health: i32,
}

impl ShooterScene {
    pub fn new(config: ShooterConfig) -> Self {
        let start = config.start;
        Self {
            camera: Camera::new(start.position, cgmath::Deg(start.yaw), cgmath::Deg(start.pitch)),
            horde: Horde::default(),
            health: config.player_health,
            config,
        }
    }

    pub fn config(&self) -> &ShooterConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn enemies(&self) -> &[Enemy] {
        self.horde.enemies()
    }

    /// Raw health; keeps dropping below zero as hits land.
    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn displayed_health(&self) -> i32 {
        self.health.max(0)
    }

    pub fn health_fraction(&self) -> f32 {
        self.displayed_health() as f32 / self.config.player_health.max(1) as f32
    }

    pub fn spawn_enemy(&mut self) -> Enemy {
        self.horde.spawn(&self.camera, &self.config.enemy)
    }

    pub fn shoot(&mut self) -> bool {
        self.horde.shoot(&self.camera, &self.config.enemy)
    }

    pub fn stats(&self) -> String {
        let p = self.camera.position;
        format!(
            "Position: ({:.2}, {:.2}, {:.2})\nRotation: ({:.2}, {:.2})",
            p.x, p.y, p.z, self.camera.pitch.0, self.camera.yaw.0
        )
    }

    fn walk(&mut self, input: &InputSnapshot) {
        let forward = self.camera.forward();
        let right = self.camera.right();
        let speed = if input.is_held(Key::Sprint) {
            self.config.move_speed * self.config.sprint_multiplier
        } else {
            self.config.move_speed
        };

        let mut candidate = self.camera.position;
        if input.is_held(Key::Forward) {
            candidate += forward * speed;
        }
        if input.is_held(Key::Back) {
            candidate -= forward * speed;
        }
        if input.is_held(Key::StrafeLeft) {
            candidate -= right * speed;
        }
        if input.is_held(Key::StrafeRight) {
            candidate += right * speed;
        }
        self.camera.position =
            clamp_to_arena(self.camera.position, candidate, self.config.arena_limit);
    }

    fn look(&mut self, input: &InputSnapshot) {
        let rot = self.config.rot_speed;
        if input.is_held(Key::TurnLeft) {
            self.camera.turn(-rot);
        }
        if input.is_held(Key::TurnRight) {
            self.camera.turn(rot);
        }
        if input.is_held(Key::LookUp) {
            self.camera.look(-rot);
        }
        if input.is_held(Key::LookDown) {
            self.camera.look(rot);
        }
    }
}

impl Default for ShooterScene {
    fn default() -> Self {
        Self::new(ShooterConfig::DEFAULT)
    }
}

impl Simulation for ShooterScene {
    fn tick(&mut self, input: &InputSnapshot, _now: Duration) {
        self.walk(input);
        self.look(input);

        let damage = self.horde.step(&self.camera, &self.config.enemy);
        if damage > 0 {
            self.health -= damage;
            log::info!("took {} damage, health {}", damage, self.displayed_health());
        }
    }

    fn key_pressed(&mut self, key: Key, _now: Duration) {
        match key {
            Key::Spawn => {
                self.spawn_enemy();
            }
            Key::Action => {
                self.shoot();
            }
            _ => (),
        }
    }

    fn view(&self) -> Camera {
        self.camera
    }
}

impl Readout for ShooterScene {
    fn captions(&self) -> Vec<Caption> {
        let text = format!("{}\nHealth: {}", self.stats(), self.displayed_health());
        vec![Caption::new(Anchor::TopLeft, text)]
    }
}
