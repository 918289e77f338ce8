use crate::data_structures::texture::Texture;

/// A texture bound for drawing: what a [`crate::render::Flat`] takes as its group.
#[derive(Debug)]
pub struct Material {
    pub name: String,
    pub texture: Texture,
    pub bind_group: wgpu::BindGroup,
}

impl Material {
    pub fn new(
        device: &wgpu::Device,
        name: &str,
        texture: Texture,
        layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let bind_group = texture.bind_group(device, layout, name);
        Self {
            name: String::from(name),
            texture,
            bind_group,
        }
    }
}
