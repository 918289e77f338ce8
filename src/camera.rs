//! Euler-angle camera, projection and the GPU uniform that carries both.
//!
//! The camera has no roll. Yaw turns around the world Y axis and is unbounded,
//! pitch tilts around the camera X axis and is clamped to ±[`PITCH_LIMIT`].
//! The view matrix is `Rx(pitch) * Ry(yaw) * T(-position)`.

use cgmath::{Angle, Deg, EuclideanSpace, Matrix4, Point3, Rad, SquareMatrix, Vector3, perspective};
use wgpu::util::DeviceExt;

/// Pitch is kept strictly inside a quarter turn so the view never flips.
pub const PITCH_LIMIT: f32 = 89.0;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub yaw: Deg<f32>,
    pub pitch: Deg<f32>,
}

impl Camera {
    pub fn new<V: Into<Point3<f32>>, Y: Into<Deg<f32>>, P: Into<Deg<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        let mut camera = Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: Deg(0.0),
        };
        let pitch: Deg<f32> = pitch.into();
        camera.look(pitch.0);
        camera
    }

    /// Horizontal unit vector the camera walks along.
    pub fn forward(&self) -> Vector3<f32> {
        let (sin, cos) = Rad::from(self.yaw).sin_cos();
        Vector3::new(sin, 0.0, -cos)
    }

    /// Horizontal unit vector to the camera's right.
    pub fn right(&self) -> Vector3<f32> {
        let (sin, cos) = Rad::from(self.yaw).sin_cos();
        Vector3::new(cos, 0.0, sin)
    }

    pub fn turn(&mut self, degrees: f32) {
        self.yaw += Deg(degrees);
    }

    pub fn look(&mut self, degrees: f32) {
        self.pitch = Deg((self.pitch.0 + degrees).clamp(-PITCH_LIMIT, PITCH_LIMIT));
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_angle_x(self.pitch)
            * Matrix4::from_angle_y(self.yaw)
            * Matrix4::from_translation(-self.position.to_vec())
    }
}

#[derive(Debug)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width.max(1) as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_proj = (projection.calc_matrix() * camera.calc_matrix()).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// GPU side of the camera: the pose that is rendered plus its uniform buffer.
#[derive(Debug)]
pub struct CameraResources {
    pub camera: Camera,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl CameraResources {
    pub fn new(device: &wgpu::Device, camera: Camera, projection: &Projection) -> Self {
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera, projection);

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
            label: Some("camera_bind_group_layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        Self {
            camera,
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }

    /// Recompute the view-projection and upload it.
    pub fn write_to_buffer(&mut self, projection: &Projection, queue: &wgpu::Queue) {
        self.uniform.update_view_proj(&self.camera, projection);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn pitch_is_clamped_on_construction_and_look() {
        let mut camera = Camera::new((0.0, 0.0, 0.0), Deg(0.0), Deg(120.0));
        assert_eq!(camera.pitch, Deg(PITCH_LIMIT));
        for _ in 0..1000 {
            camera.look(-0.8);
        }
        assert_eq!(camera.pitch, Deg(-PITCH_LIMIT));
    }

    #[test]
    fn yaw_is_unbounded() {
        let mut camera = Camera::new((0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
        for _ in 0..500 {
            camera.turn(1.0);
        }
        assert_eq!(camera.yaw, Deg(500.0));
    }

    #[test]
    fn zero_yaw_walks_down_negative_z() {
        let camera = Camera::new((0.0, 20.0, 5.0), Deg(0.0), Deg(0.0));
        assert_eq!(camera.forward(), Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(camera.right(), Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn quarter_turn_right_faces_positive_x() {
        let camera = Camera::new((0.0, 0.0, 0.0), Deg(90.0), Deg(0.0));
        let forward = camera.forward();
        let right = camera.right();
        assert!(close(forward.x, 1.0) && close(forward.z, 0.0));
        assert!(close(right.x, 0.0) && close(right.z, 1.0));
    }

    #[test]
    fn view_moves_camera_to_origin() {
        let camera = Camera::new((3.0, 20.0, -7.0), Deg(37.0), Deg(-12.0));
        let eye = camera.calc_matrix() * camera.position.to_homogeneous();
        assert!(close(eye.x, 0.0) && close(eye.y, 0.0) && close(eye.z, 0.0));
    }

    #[test]
    fn forward_points_into_the_screen() {
        let camera = Camera::new((0.0, 20.0, 0.0), Deg(63.0), Deg(0.0));
        let ahead = camera.position + camera.forward() * 10.0;
        let eye = camera.calc_matrix() * ahead.to_homogeneous();
        // Right-handed view space looks down -Z.
        assert!(close(eye.x, 0.0));
        assert!(close(eye.z, -10.0));
    }
}
