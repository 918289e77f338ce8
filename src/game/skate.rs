//! Skateboarding on an endless wrap-around floor, scoring ollies and manuals.

use cgmath::{Deg, Point3, Vector3};
use instant::Duration;

use crate::{
    camera::Camera,
    game::{
        Simulation,
        combo::{ScoreBoard, Side, Trick},
        config::SkateConfig,
        input::{InputSnapshot, Key},
        motion::{Throttle, advance, wrap_around},
        ollie::Ollie,
        preview::{Pose, Preview},
        readout::{Anchor, Caption, Readout},
    },
};

#[derive(Clone, Debug)]
pub struct SkateScene {
    config: SkateConfig,
    camera: Camera,
    throttle: Throttle,
    ollie: Ollie,
    board: ScoreBoard,
    preview: Preview,
    third_person: Option<Camera>,
}

impl SkateScene {
    pub fn new(config: SkateConfig) -> Self {
        let start = config.start;
        Self {
            camera: Camera::new(start.position, Deg(start.yaw), Deg(start.pitch)),
            throttle: Throttle::default(),
            ollie: Ollie::default(),
            board: ScoreBoard::default(),
            preview: Preview::default(),
            third_person: None,
            config,
        }
    }

    pub fn config(&self) -> &SkateConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn speed(&self) -> f32 {
        self.throttle.speed()
    }

    pub fn ollie(&self) -> &Ollie {
        &self.ollie
    }

    pub fn board(&self) -> &ScoreBoard {
        &self.board
    }

    pub fn pose(&self) -> Pose {
        self.preview.pose()
    }

    pub fn is_third_person(&self) -> bool {
        self.third_person.is_some()
    }

    pub fn toggle_view(&mut self) {
        self.third_person = match self.third_person {
            Some(_) => None,
            None => Some(self.chase_camera()),
        };
    }

    pub fn stats(&self) -> String {
        let p = self.camera.position;
        format!(
            "Position: ({:.2}, {:.2}, {:.2}) | Rotation: ({:.2}, {:.2})",
            p.x, p.y, p.z, self.camera.pitch.0, self.camera.yaw.0
        )
    }

    fn chase_camera(&self) -> Camera {
        let offset: Vector3<f32> = self.config.third_person_offset.into();
        Camera {
            position: self.camera.position + offset,
            ..self.camera
        }
    }

    fn ride(&mut self, input: &InputSnapshot, now: Duration) {
        let forward = self.camera.forward();
        let right = self.camera.right();
        let mut position = self.camera.position;

        let push = input.is_held(Key::Forward) && !input.is_held(Key::Back);
        let distance = self
            .throttle
            .step(&self.config.drive, push, input.is_held(Key::Back));
        if distance > 0.0 {
            position = advance(position, forward, distance);
        }

        if let Some(height) = self.ollie.step(&self.config.ollie) {
            position.y = height;
            if !self.ollie.is_active() {
                self.preview.reset();
            }
        }

        if input.is_held(Key::StrafeLeft) {
            self.strafe(&mut position, right, Pose::Left, -1.0, now);
        }
        if input.is_held(Key::StrafeRight) {
            self.strafe(&mut position, right, Pose::Right, 1.0, now);
        }

        self.camera.position = wrap_around(position, self.config.wrap_limit);
    }

    fn strafe(
        &mut self,
        position: &mut Point3<f32>,
        right: Vector3<f32>,
        pose: Pose,
        sign: f32,
        now: Duration,
    ) {
        *position += right * (sign * self.config.side_move_speed);
        self.camera.turn(sign * self.config.yaw_nudge);
        self.preview.show_for(pose, now, self.config.preview_reset);
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

impl Default for SkateScene {
    fn default() -> Self {
        Self::new(SkateConfig::COMBO)
    }
}

impl Simulation for SkateScene {
    fn tick(&mut self, input: &InputSnapshot, now: Duration) {
        if self.board.expire(now, &self.config.combo) {
            log::info!("combo over");
        }
        self.preview.update(now);
        if !input.focused() {
            return;
        }

        self.ride(input, now);
        if self.third_person.is_some() {
            self.third_person = Some(self.chase_camera());
        }
        self.look(input);
    }

    fn key_pressed(&mut self, key: Key, now: Duration) {
        let combo = self.config.combo;
        match key {
            Key::StrafeLeft => {
                self.board.strafe(Side::Left, now, &combo);
            }
            Key::StrafeRight => {
                self.board.strafe(Side::Right, now, &combo);
            }
            Key::Action => {
                if self.ollie.start() {
                    self.preview.show(Pose::Ollie);
                    self.board.land(Trick::Ollie, now, &combo);
                }
            }
            Key::ToggleView => self.toggle_view(),
            _ => (),
        }
    }

    fn view(&self) -> Camera {
        self.third_person.unwrap_or(self.camera)
    }
}

impl Readout for SkateScene {
    fn captions(&self) -> Vec<Caption> {
        let mut captions = vec![Caption::new(Anchor::TopLeft, self.stats())];
        captions.extend(self.board.label().map(|label| Caption::new(Anchor::AboveCorner, label)));
        captions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(keys: &[Key]) -> InputSnapshot {
        InputSnapshot::new(keys.iter().copied(), true)
    }

    #[test]
    fn ollie_scores_and_shows_pose() {
        let mut scene = SkateScene::default();
        scene.key_pressed(Key::Action, Duration::ZERO);
        assert!(scene.ollie().is_active());
        assert_eq!(scene.pose(), Pose::Ollie);
        assert_eq!(scene.board().combo(), 100);

        // A second press mid-air neither restarts nor scores.
        scene.key_pressed(Key::Action, Duration::from_millis(100));
        assert_eq!(scene.board().combo(), 100);
    }

    #[test]
    fn landing_restores_rest_height_and_pose() {
        let mut scene = SkateScene::default();
        scene.key_pressed(Key::Action, Duration::ZERO);
        for _ in 0..90 {
            scene.tick(&held(&[]), Duration::ZERO);
        }
        assert!(!scene.ollie().is_active());
        assert_eq!(scene.camera().position.y, 20.0);
        assert_eq!(scene.pose(), Pose::Forward);
    }

    #[test]
    fn strafing_steers_and_shows_side_pose() {
        let mut scene = SkateScene::default();
        scene.tick(&held(&[Key::StrafeLeft]), Duration::ZERO);
        assert!((scene.camera().yaw.0 - -0.1).abs() < 1e-6);
        assert_eq!(scene.pose(), Pose::Left);
        assert!(scene.camera().position.x < 0.0);

        scene.tick(&held(&[]), Duration::from_millis(600));
        assert_eq!(scene.pose(), Pose::Forward);
    }

    #[test]
    fn unfocused_scene_only_expires_combos() {
        let mut scene = SkateScene::default();
        scene.key_pressed(Key::Action, Duration::ZERO);
        let unfocused = InputSnapshot::new([Key::Forward], false);
        scene.tick(&unfocused, Duration::from_secs(6));
        assert_eq!(scene.board().combo(), 0);
        assert_eq!(scene.ollie().ticks(), 0);
        assert_eq!(scene.camera().position, Point3::new(0.0, 20.0, 5.0));
    }

    #[test]
    fn third_person_trails_behind_and_above() {
        let mut scene = SkateScene::default();
        scene.key_pressed(Key::ToggleView, Duration::ZERO);
        scene.tick(&held(&[Key::Forward]), Duration::ZERO);
        let view = scene.view();
        let eye = scene.camera().position;
        assert_eq!(view.position, eye + Vector3::new(0.0, 5.0, 10.0));

        scene.key_pressed(Key::ToggleView, Duration::ZERO);
        assert_eq!(scene.view(), *scene.camera());
    }

    #[test]
    fn cruise_variant_scrolls_without_input() {
        let mut scene = SkateScene::new(SkateConfig::CRUISE);
        scene.tick(&held(&[]), Duration::ZERO);
        assert_eq!(scene.camera().position.z, 4.0);
        scene.tick(&held(&[Key::StrafeRight]), Duration::ZERO);
        assert_eq!(scene.camera().position.x, 0.0);
        assert!((scene.camera().yaw.0 - 0.1).abs() < 1e-6);
    }
}
