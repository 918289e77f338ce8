//! Render pipelines shared by every flow.
//!
//! - `world` draws camera-space quads: opaque geometry and blended sprites
//! - `gui` draws screen-space quads over the finished scene

pub mod gui;
pub mod world;

#[derive(Debug)]
pub struct Pipelines {
    pub world: wgpu::RenderPipeline,
    pub sprite: wgpu::RenderPipeline,
    pub gui: wgpu::RenderPipeline,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        texture_bind_group_layout: &wgpu::BindGroupLayout,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        Self {
            world: world::mk_world_pipeline(
                device,
                config,
                texture_bind_group_layout,
                camera_bind_group_layout,
            ),
            sprite: world::mk_sprite_pipeline(
                device,
                config,
                texture_bind_group_layout,
                camera_bind_group_layout,
            ),
            gui: gui::mk_gui_pipeline(device, config, texture_bind_group_layout),
        }
    }
}
