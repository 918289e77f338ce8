use std::sync::Arc;

use anyhow::Context as _;
use winit::window::Window;

use crate::{
    camera::{self, CameraResources, Projection},
    data_structures::texture,
    pipelines::Pipelines,
};

const Z_FAR: f32 = 1000.0;

#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub(crate) depth_texture: texture::Texture,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub camera: CameraResources,
    pub projection: Projection,
    pub pipelines: Pipelines,
    /// Layout every texture bind group handed to a [`crate::render::Flat`] must use.
    pub texture_layout: wgpu::BindGroupLayout,
    pub clear_colour: wgpu::Color,
    pub tick_duration_millis: u64,
    #[cfg(feature = "ui")]
    pub(crate) text: crate::text::TextOverlay,
}

impl Context {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            #[cfg(not(target_arch = "wasm32"))]
            backends: wgpu::Backends::PRIMARY,
            #[cfg(target_arch = "wasm32")]
            backends: wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("could not create a surface for the window")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no graphics adapter is compatible with the window surface")?;
        log::debug!("device and queue");
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                // WebGL doesn't support all of wgpu's features, so if
                // we're building for the web we'll have to disable some.
                required_limits: if cfg!(target_arch = "wasm32") {
                    wgpu::Limits::downlevel_webgl2_defaults()
                } else {
                    wgpu::Limits::default()
                },
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("could not open the graphics device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        // Textures are uploaded as sRGB, so prefer an sRGB surface to avoid
        // everything coming out darker.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("the surface reports no texture formats")?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        // Flows overwrite the pose every frame; this is only what the first frame shows.
        let camera = camera::Camera::new((0.0, 20.0, 5.0), cgmath::Deg(0.0), cgmath::Deg(0.0));
        let projection =
            Projection::new(config.width, config.height, cgmath::Deg(45.0), 0.1, Z_FAR);
        let camera = CameraResources::new(&device, camera, &projection);

        let depth_texture = texture::Texture::create_depth_texture(
            &device,
            [config.width, config.height],
            "depth_texture",
        );

        let texture_layout = texture::texture_layout(&device);
        let pipelines = Pipelines::new(&device, &config, &texture_layout, &camera.bind_group_layout);
        #[cfg(feature = "ui")]
        let text = crate::text::TextOverlay::new(&device, &queue, config.format);

        Ok(Self {
            window,
            depth_texture,
            surface,
            device,
            queue,
            config,
            camera,
            projection,
            pipelines,
            texture_layout,
            clear_colour: wgpu::Color::BLACK,
            tick_duration_millis: 16,
            #[cfg(feature = "ui")]
            text,
        })
    }

    /// Current surface size in pixels.
    pub fn viewport(&self) -> [u32; 2] {
        [self.config.width, self.config.height]
    }
}

/// The part of the [`Context`] flow constructors get to load their resources with.
///
/// Device and queue are internally reference counted, so this is cheap to clone.
#[derive(Clone, Debug)]
pub struct InitContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub texture_layout: wgpu::BindGroupLayout,
}

impl From<&Context> for InitContext {
    fn from(ctx: &Context) -> Self {
        Self {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
            texture_layout: ctx.texture_layout.clone(),
        }
    }
}
