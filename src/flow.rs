//! Flow control and application event loop.
//!
//! A "flow" is one self-contained part of a game: the world of a scene, a HUD
//! overlay, ... Flows share one application state `S`, react to window events,
//! advance on fixed ticks and tell the engine what to draw each frame. The
//! engine owns the window, GPU context and the loop driving all flows.
//!
//! # User-facing types
//!
//! - [`GraphicsFlow<S>`] is the trait for flows
//! - [`Out`] lets a hook reconfigure the [`Context`] after it returns
//! - [`FlowConsturctor<S>`] builds a flow asynchronously (e.g. while loading textures)
//!
//! # Lifecycle Flow
//!
//! Each redraw:
//! 1. Window events are handed to every flow's `on_window_events` as they arrive
//! 2. Elapsed time is accumulated and `on_tick` runs once per whole tick
//! 3. `on_update` runs once with the frame's `dt`
//! 4. The camera uniform is uploaded
//! 5. Every flow's `on_render` is collected and batched per pipeline
//! 6. World, then sprite, then GUI batches are drawn, then text with the `ui`
//!    feature, and the frame is presented

use std::{fmt::Debug, iter, pin::Pin, sync::Arc};

use instant::{Duration, Instant};

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::Window,
};

use crate::{
    context::{Context, InitContext},
    data_structures::texture::Texture,
    render::{Batches, Flat},
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Ticks run per redraw at most; a longer stall drops the rest of the backlog.
const MAX_TICKS_PER_FRAME: u32 = 5;

///
/// This is the Output Type for every lifecycle hook.
///
/// `Out::Configure` can be used to modify the Context during runtime for instance to change the tick
/// speed, the clear colour or the pose the camera renders from.
///
/// `Empty` is the default output used when nothing needs to change.
///
pub enum Out {
    Configure(Box<dyn FnOnce(&mut Context)>),
    Empty,
}

impl Default for Out {
    fn default() -> Self {
        Self::Empty
    }
}

/// Trait for implementing one part of a game.
///
/// # Lifecycle
///
/// 1. `on_init()` is called once when the flow is created; configure context (clear colour, etc.)
/// 2. `on_window_events()` is called for each winit window event
/// 3. `on_tick()` is called every `tick_duration_millis` of real time
/// 4. `on_update()` is called every frame
/// 5. `on_render()` is called each frame and specifies how to render `self`
///
pub trait GraphicsFlow<S> {
    /// Initialize the flow and configure the context.
    fn on_init(&mut self, ctx: &mut Context, state: &mut S) -> Out;

    /// Update state every frame.
    ///
    /// Called every frame with the elapsed time `dt`. Use it to mirror state into
    /// GPU buffers and for animations that run in real time.
    fn on_update(&mut self, ctx: &Context, state: &mut S, dt: Duration) -> Out;

    /// Advance the simulation by one fixed step.
    ///
    /// Called once per `tick_duration_millis` (configurable via context),
    /// independently of the frame rate.
    fn on_tick(&mut self, ctx: &Context, state: &mut S) -> Out;

    /// Handle window events (keyboard, focus, resizing, etc.).
    fn on_window_events(&mut self, ctx: &Context, state: &mut S, event: &WindowEvent) -> Out;

    /// Return renderable objects for this flow.
    ///
    /// Called each frame. The engine batches all flows' renders per pipeline.
    fn on_render(&self) -> crate::render::Render<'_>;
}

// Dummy impl to make wasm work
impl<State> Debug for dyn GraphicsFlow<State> + 'static {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GraphicsFlow")
    }
}

/// Type alias for a flow constructor (factory function).
///
/// A flow constructor takes an `InitContext` and asynchronously returns a
/// boxed `GraphicsFlow`. This allows resources to load before the first frame.
pub type FlowConsturctor<S> =
    Box<dyn FnOnce(InitContext) -> Pin<Box<dyn Future<Output = Box<dyn GraphicsFlow<S>>>>>>;

/// Application state bundle: GPU context, app state, and surface status.
#[derive(Debug)]
pub struct AppState<State: 'static> {
    pub(crate) ctx: Context,
    state: State,
    is_surface_configured: bool,
}

impl<State: Default> AppState<State> {
    async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let ctx = Context::new(window).await?;
        Ok(Self {
            ctx,
            state: State::default(),
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.ctx.config.width = width;
            self.ctx.config.height = height;
            self.is_surface_configured = true;
            self.ctx.projection.resize(width, height);
            self.ctx
                .surface
                .configure(&self.ctx.device, &self.ctx.config);
            self.ctx.depth_texture = Texture::create_depth_texture(
                &self.ctx.device,
                [self.ctx.config.width, self.ctx.config.height],
                "depth_texture",
            );
        }
    }

    fn render(&mut self, graphics_flows: &[Box<dyn GraphicsFlow<State>>]) -> Result<(), wgpu::SurfaceError> {
        // invoke main render loop
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        let mut batches = Batches::default();
        graphics_flows
            .iter()
            .for_each(|flow| flow.on_render().set_pipelines(&mut batches));

        #[cfg(feature = "ui")]
        {
            let size = self.ctx.viewport();
            let ctx = &mut self.ctx;
            if let Err(e) = ctx.text.prepare(&ctx.device, &ctx.queue, size, &batches.labels) {
                log::error!("Unable to prepare text: {e:#}");
            }
        }

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.ctx.pipelines.world);
            render_pass.set_bind_group(1, &self.ctx.camera.bind_group, &[]);
            draw_flats(&mut render_pass, &batches.worlds);

            render_pass.set_pipeline(&self.ctx.pipelines.sprite);
            render_pass.set_bind_group(1, &self.ctx.camera.bind_group, &[]);
            draw_flats(&mut render_pass, &batches.sprites);

            render_pass.set_pipeline(&self.ctx.pipelines.gui);
            draw_flats(&mut render_pass, &batches.guis);

            #[cfg(feature = "ui")]
            if let Err(e) = self.ctx.text.render(&mut render_pass) {
                log::error!("Unable to render text: {e:#}");
            }
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        #[cfg(feature = "ui")]
        self.ctx.text.trim();
        Ok(())
    }
}

fn draw_flats(render_pass: &mut wgpu::RenderPass<'_>, flats: &[Flat<'_>]) {
    for flat in flats {
        if flat.amount == 0 {
            continue;
        }
        render_pass.set_bind_group(0, flat.group, &[]);
        render_pass.set_vertex_buffer(0, flat.vertex.slice(..));
        render_pass.set_index_buffer(flat.index.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..flat.amount as u32, 0, 0..1);
    }
}

pub struct App<State: 'static> {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    #[cfg(target_arch = "wasm32")]
    proxy: winit::event_loop::EventLoopProxy<FlowEvent<State>>,
    state: Option<AppState<State>>,
    // This will hold the fully initialized flows once they are ready.
    graphics_flows: Vec<Box<dyn GraphicsFlow<State>>>,
    // This holds the constructors at the start.
    // We use Option to `take()` it after use.
    constructors: Option<Vec<FlowConsturctor<State>>>,
    last_time: Instant,
    time_since_tick: Duration,
}

impl<State: 'static + Default> App<State> {
    fn new(
        #[allow(unused_variables)] event_loop: &EventLoop<FlowEvent<State>>,
        constructors: Vec<FlowConsturctor<State>>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime: tokio::runtime::Runtime::new()?,
            #[cfg(target_arch = "wasm32")]
            proxy: event_loop.create_proxy(),
            state: None,
            graphics_flows: Vec::new(),
            constructors: Some(constructors),
            last_time: Instant::now(),
            time_since_tick: Duration::ZERO,
        })
    }

    /// Hand the initialized state and flows to the app and run every `on_init`.
    fn initialized(&mut self, mut app_state: AppState<State>, flows: Vec<Box<dyn GraphicsFlow<State>>>) {
        self.graphics_flows = flows;
        let size = app_state.ctx.window.inner_size();
        app_state.resize(size.width, size.height);
        self.graphics_flows.iter_mut().for_each(|flow| {
            let out = flow.on_init(&mut app_state.ctx, &mut app_state.state);
            handle_flow_output(&mut app_state.ctx, out);
        });
        app_state.ctx.window.request_redraw();
        self.last_time = Instant::now();
        self.time_since_tick = Duration::ZERO;
        self.state = Some(app_state);
    }

    /// Run the fixed-step ticks that fit into the accumulated time, then one update.
    fn advance(&mut self, dt: Duration) {
        let Some(state) = &mut self.state else {
            return;
        };
        let tick = Duration::from_millis(state.ctx.tick_duration_millis.max(1));
        self.time_since_tick += dt;

        let mut ticks = 0;
        while self.time_since_tick >= tick {
            if ticks == MAX_TICKS_PER_FRAME {
                log::debug!("dropping {:?} of tick backlog", self.time_since_tick);
                self.time_since_tick = Duration::ZERO;
                break;
            }
            self.graphics_flows.iter_mut().for_each(|f| {
                let out = f.on_tick(&state.ctx, &mut state.state);
                handle_flow_output(&mut state.ctx, out);
            });
            self.time_since_tick -= tick;
            ticks += 1;
        }

        self.graphics_flows.iter_mut().for_each(|f| {
            let out = f.on_update(&state.ctx, &mut state.state, dt);
            handle_flow_output(&mut state.ctx, out);
        });

        let ctx = &mut state.ctx;
        ctx.camera.write_to_buffer(&ctx.projection, &ctx.queue);
    }
}

pub(crate) enum FlowEvent<State: 'static> {
    #[allow(dead_code)]
    Initialized {
        state: AppState<State>,
        flows: Vec<Box<dyn GraphicsFlow<State>>>,
    },
}

impl<State> Debug for FlowEvent<State> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized { state: _, flows } => {
                f.debug_struct("Initialized").field("flows", flows).finish()
            }
        }
    }
}

impl<State: 'static + Default> ApplicationHandler<FlowEvent<State>> for App<State> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(constructors) = self.constructors.take() else {
            return;
        };

        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title("quad-flow");

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            const CANVAS_ID: &str = "canvas";

            let window = wgpu::web_sys::window().unwrap_throw();
            let document = window.document().unwrap_throw();
            let canvas = document.get_element_by_id(CANVAS_ID).unwrap_throw();
            let html_canvas_element = canvas.unchecked_into();
            window_attributes = window_attributes.with_canvas(Some(html_canvas_element));
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Could not create a window: {e}");
                event_loop.exit();
                return;
            }
        };

        let init_future = async move {
            let app_state = AppState::<State>::new(window).await?;

            let flow_futures: Vec<_> = constructors
                .into_iter()
                .map(|constructor| constructor((&app_state.ctx).into()))
                .collect();
            let flows: Vec<_> = futures::future::join_all(flow_futures).await;
            anyhow::Ok((app_state, flows))
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            match self.async_runtime.block_on(init_future) {
                Ok((app_state, flows)) => self.initialized(app_state, flows),
                Err(e) => {
                    log::error!("App initialization failed: {e:#}");
                    event_loop.exit();
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match init_future.await {
                    Ok((state, flows)) => {
                        if proxy
                            .send_event(FlowEvent::Initialized { state, flows })
                            .is_err()
                        {
                            log::error!("Event loop closed before initialization finished");
                        }
                    }
                    Err(e) => log::error!("App initialization failed: {e:#}"),
                }
            });
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: FlowEvent<State>) {
        match event {
            // This is the message from our wasm `spawn_local`
            FlowEvent::Initialized { state, flows } => self.initialized(state, flows),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        self.graphics_flows.iter_mut().for_each(|f| {
            let out = f.on_window_events(&state.ctx, &mut state.state, &event);
            handle_flow_output(&mut state.ctx, out);
        });

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();
                self.advance(dt);

                let Some(state) = &mut self.state else {
                    return;
                };
                match state.render(&self.graphics_flows) {
                    Ok(_) => (),
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }
            }
            _ => {}
        }
    }
}

fn handle_flow_output(ctx: &mut Context, out: Out) {
    match out {
        Out::Configure(f) => f(ctx),
        Out::Empty => (),
    }
}

pub fn run<State: 'static + Default>(constructors: Vec<FlowConsturctor<State>>) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_log::init_with_level(log::Level::Info).unwrap_throw();
    }

    let event_loop: EventLoop<FlowEvent<State>> = EventLoop::with_user_event().build()?;

    let mut app = App::new(&event_loop, constructors)?;

    event_loop.run_app(&mut app)?;

    Ok(())
}
