//! Screen text drawn after the GUI batch, backed by glyphon.

use std::fmt::Debug;

use glyphon::{
    Attrs, Buffer, Cache, Color, Family, FontSystem, Metrics, Resolution, Shaping, SwashCache,
    TextArea, TextAtlas, TextBounds, TextRenderer, Viewport,
};

use crate::{data_structures::texture::Texture, render::Label};

const FONT_SIZE: f32 = 18.0;
const LINE_HEIGHT: f32 = 24.0;

pub struct TextOverlay {
    font_system: FontSystem,
    swash_cache: SwashCache,
    viewport: Viewport,
    atlas: TextAtlas,
    renderer: TextRenderer,
    // One shaped buffer per label, reused across frames.
    buffers: Vec<Buffer>,
}

impl Debug for TextOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextOverlay")
            .field("buffers", &self.buffers.len())
            .finish_non_exhaustive()
    }
}

impl TextOverlay {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue, format: wgpu::TextureFormat) -> Self {
        let cache = Cache::new(device);
        let viewport = Viewport::new(device, &cache);
        let mut atlas = TextAtlas::new(device, queue, &cache, format);
        // The pass carries the depth texture, so the text pipeline has to declare it too.
        let renderer = TextRenderer::new(
            &mut atlas,
            device,
            wgpu::MultisampleState::default(),
            Some(wgpu::DepthStencilState {
                format: Texture::DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Always,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
        );
        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
            viewport,
            atlas,
            renderer,
            buffers: Vec::new(),
        }
    }

    /// Shape `labels` and upload their glyphs. Must run before the render pass.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        size: [u32; 2],
        labels: &[Label<'_>],
    ) -> anyhow::Result<()> {
        let [width, height] = size;
        self.viewport.update(queue, Resolution { width, height });

        while self.buffers.len() < labels.len() {
            let buffer = Buffer::new(&mut self.font_system, Metrics::new(FONT_SIZE, LINE_HEIGHT));
            self.buffers.push(buffer);
        }
        for (buffer, label) in self.buffers.iter_mut().zip(labels) {
            buffer.set_size(
                &mut self.font_system,
                Some((width as f32 - label.position[0]).max(1.0)),
                Some((height as f32 - label.position[1]).max(1.0)),
            );
            buffer.set_text(
                &mut self.font_system,
                label.text,
                &Attrs::new().family(Family::SansSerif),
                Shaping::Advanced,
                None,
            );
            buffer.shape_until_scroll(&mut self.font_system, false);
        }

        let areas = self.buffers.iter().zip(labels).map(|(buffer, label)| TextArea {
            buffer,
            left: label.position[0],
            top: label.position[1],
            scale: 1.0,
            bounds: TextBounds {
                left: 0,
                top: 0,
                right: width as i32,
                bottom: height as i32,
            },
            default_color: Color::rgb(255, 255, 255),
            custom_glyphs: &[],
        });
        self.renderer.prepare(
            device,
            queue,
            &mut self.font_system,
            &mut self.atlas,
            &self.viewport,
            areas,
            &mut self.swash_cache,
        )?;
        Ok(())
    }

    pub fn render(&self, render_pass: &mut wgpu::RenderPass<'_>) -> anyhow::Result<()> {
        self.renderer
            .render(&self.atlas, &self.viewport, render_pass)?;
        Ok(())
    }

    /// Drop glyphs no label used this frame.
    pub fn trim(&mut self) {
        self.atlas.trim();
    }
}
