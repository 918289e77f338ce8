//! The fixed set of textured quads the demos draw.
//!
//! Every builder returns corners in drawing order (a fan of two triangles:
//! 0-1-2 and 0-2-3). World quads are in world units, HUD quads in normalized
//! device coordinates. Texture `v = 0` is the top row of the image.

use cgmath::{Deg, Point3, Vector2};

use crate::camera::Camera;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    pub positions: [[f32; 3]; 4],
    pub tex_coords: [[f32; 2]; 4],
}

impl Quad {
    const UNIT_UV: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];
}

/// Half side length of the floor and the skybox.
pub const WORLD_HALF_EXTENT: f32 = 1000.0;
pub const FLOOR_TILES: f32 = 100.0;
pub const WALL_HEIGHT: f32 = 100.0;
pub const WALL_TILES: f32 = 50.0;

pub fn floor() -> Quad {
    let e = WORLD_HALF_EXTENT;
    let t = FLOOR_TILES;
    Quad {
        positions: [[-e, 0.0, -e], [e, 0.0, -e], [e, 0.0, e], [-e, 0.0, e]],
        tex_coords: [[0.0, 0.0], [t, 0.0], [t, t], [0.0, t]],
    }
}

/// Front, back, left and right walls of the arena box.
pub fn skybox() -> [Quad; 4] {
    let e = WORLD_HALF_EXTENT;
    let h = WALL_HEIGHT;
    let t = WALL_TILES;
    let tex_coords = [[0.0, t], [t, t], [t, 0.0], [0.0, 0.0]];
    let wall = |positions| Quad {
        positions,
        tex_coords,
    };
    [
        wall([[-e, 0.0, -e], [e, 0.0, -e], [e, h, -e], [-e, h, -e]]),
        wall([[-e, 0.0, e], [e, 0.0, e], [e, h, e], [-e, h, e]]),
        wall([[-e, 0.0, -e], [-e, 0.0, e], [-e, h, e], [-e, h, -e]]),
        wall([[e, 0.0, -e], [e, 0.0, e], [e, h, e], [e, h, -e]]),
    ]
}

/// Enemy sprites grow a little when the eye rises above standing height.
pub fn enemy_height(eye_height: f32) -> f32 {
    (50.0 + (eye_height - 20.0)).min(55.0)
}

/// Upright square sprite standing on the floor at `ground` (x, z), turned by
/// `-yaw` so that it faces a camera with that yaw.
pub fn billboard(ground: Vector2<f32>, height: f32, yaw: Deg<f32>) -> Quad {
    let facing = Camera::new((0.0, 0.0, 0.0), yaw, Deg(0.0));
    let across = facing.right() * (height / 2.0);
    let (x, z) = (ground.x, ground.y);
    Quad {
        positions: [
            [x - across.x, 0.0, z - across.z],
            [x + across.x, 0.0, z + across.z],
            [x + across.x, height, z + across.z],
            [x - across.x, height, z - across.z],
        ],
        tex_coords: Quad::UNIT_UV,
    }
}

/// The third-person avatar, a 10 × 20 sprite in the XY plane at the skater.
pub fn avatar(at: Point3<f32>) -> Quad {
    Quad {
        positions: [
            [at.x - 5.0, 0.0, at.z],
            [at.x + 5.0, 0.0, at.z],
            [at.x + 5.0, 20.0, at.z],
            [at.x - 5.0, 20.0, at.z],
        ],
        tex_coords: Quad::UNIT_UV,
    }
}

/// Pixel rectangle (origin top-left) mapped into normalized device coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub fn to_quad(self, viewport: [u32; 2]) -> Quad {
        let w = viewport[0].max(1) as f32;
        let h = viewport[1].max(1) as f32;
        let left = self.x / w * 2.0 - 1.0;
        let right = (self.x + self.width) / w * 2.0 - 1.0;
        let top = 1.0 - self.y / h * 2.0;
        let bottom = 1.0 - (self.y + self.height) / h * 2.0;
        Quad {
            positions: [
                [left, bottom, 0.0],
                [right, bottom, 0.0],
                [right, top, 0.0],
                [left, top, 0.0],
            ],
            tex_coords: Quad::UNIT_UV,
        }
    }
}

/// Square preview in the bottom-right corner, `margin` pixels from the edges.
pub fn corner_preview(viewport: [u32; 2], size: f32, margin: f32) -> ScreenRect {
    ScreenRect {
        x: viewport[0] as f32 - size - margin,
        y: viewport[1] as f32 - size - margin,
        width: size,
        height: size,
    }
}

/// Background and fill rectangles of the health bar along the bottom edge.
pub fn health_bar(viewport: [u32; 2], fraction: f32) -> (ScreenRect, ScreenRect) {
    let margin = 10.0;
    let height = 20.0;
    let width = (viewport[0] as f32 * 0.4).max(0.0);
    let y = viewport[1] as f32 - height - margin;
    let background = ScreenRect {
        x: margin,
        y,
        width,
        height,
    };
    let fill = ScreenRect {
        width: width * fraction.clamp(0.0, 1.0),
        ..background
    };
    (background, fill)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn floor_tiles_across_the_world() {
        let quad = floor();
        assert_eq!(quad.positions[0], [-1000.0, 0.0, -1000.0]);
        assert_eq!(quad.positions[2], [1000.0, 0.0, 1000.0]);
        assert_eq!(quad.tex_coords[2], [100.0, 100.0]);
    }

    #[test]
    fn skybox_walls_stand_on_the_edges() {
        for wall in skybox() {
            let on_edge = wall
                .positions
                .iter()
                .all(|p| p[0].abs() == 1000.0 || p[2].abs() == 1000.0);
            assert!(on_edge);
            assert_eq!(wall.positions[2][1], 100.0);
        }
    }

    #[test]
    fn billboard_is_perpendicular_to_view() {
        let yaw = Deg(30.0);
        let quad = billboard(Vector2::new(10.0, -40.0), 50.0, yaw);
        let camera = Camera::new((0.0, 20.0, 0.0), yaw, Deg(0.0));
        let forward = camera.forward();
        let edge = [
            quad.positions[1][0] - quad.positions[0][0],
            quad.positions[1][2] - quad.positions[0][2],
        ];
        assert!(close(edge[0] * forward.x + edge[1] * forward.z, 0.0));
        assert!(close((edge[0] * edge[0] + edge[1] * edge[1]).sqrt(), 50.0));
    }

    #[test]
    fn enemy_height_is_capped() {
        assert_eq!(enemy_height(20.0), 50.0);
        assert_eq!(enemy_height(35.0), 55.0);
    }

    #[test]
    fn full_screen_rect_covers_ndc() {
        let quad = ScreenRect {
            x: 0.0,
            y: 0.0,
            width: 800.0,
            height: 600.0,
        }
        .to_quad([800, 600]);
        assert_eq!(quad.positions[0], [-1.0, -1.0, 0.0]);
        assert_eq!(quad.positions[2], [1.0, 1.0, 0.0]);
    }

    #[test]
    fn health_fill_shrinks_with_health() {
        let (background, fill) = health_bar([1000, 800], 0.25);
        assert_eq!(background.width, 400.0);
        assert_eq!(fill.width, 100.0);
        let (_, empty) = health_bar([1000, 800], -0.5);
        assert_eq!(empty.width, 0.0);
    }
}
