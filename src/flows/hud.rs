//! Screen-space overlays: the shooter's health bar, the skater's pose preview
//! and, with the `ui` feature, the captions of either game.

use instant::Duration;
use winit::event::WindowEvent;

use crate::{
    context::{Context, InitContext},
    data_structures::{material::Material, quad::QuadMesh, texture::Texture},
    flow::{FlowConsturctor, GraphicsFlow, Out},
    flows::{loaded, shooter::ShooterState, skate::SkateState},
    game::{geometry, preview::Pose},
    render::Render,
    resources::texture::load_texture,
};

const PREVIEW_SIZE: f32 = 128.0;
const PREVIEW_MARGIN: f32 = 10.0;
pub const POSE_DIR: &str = "tex/birb";

/// Grey background with a red fill proportional to the displayed health.
pub struct HealthBar {
    background: Material,
    fill: Material,
    background_mesh: QuadMesh,
    fill_mesh: QuadMesh,
}

impl HealthBar {
    pub fn new(ctx: InitContext) -> Self {
        let swatch = |rgba, name| {
            let texture = Texture::from_colour(&ctx.device, &ctx.queue, rgba, name);
            Material::new(&ctx.device, name, texture, &ctx.texture_layout)
        };
        Self {
            background: swatch([40, 40, 40, 200], "Health Background"),
            fill: swatch([220, 30, 30, 255], "Health Fill"),
            background_mesh: QuadMesh::with_capacity(&ctx.device, "Health Background", 1),
            fill_mesh: QuadMesh::with_capacity(&ctx.device, "Health Fill", 1),
        }
    }

    pub fn constructor() -> FlowConsturctor<ShooterState> {
        Box::new(|ctx| Box::pin(async move { Box::new(HealthBar::new(ctx)) as Box<dyn GraphicsFlow<_>> }))
    }
}

impl GraphicsFlow<ShooterState> for HealthBar {
    fn on_init(&mut self, _: &mut Context, _: &mut ShooterState) -> Out {
        Out::Empty
    }

    fn on_update(&mut self, ctx: &Context, state: &mut ShooterState, _: Duration) -> Out {
        match state.scene() {
            Some(scene) => {
                let (background, fill) = geometry::health_bar(ctx.viewport(), scene.health_fraction());
                let viewport = ctx.viewport();
                self.background_mesh.write_quads(ctx, &[background.to_quad(viewport)]);
                self.fill_mesh.write_quads(ctx, &[fill.to_quad(viewport)]);
            }
            None => {
                self.background_mesh.write_quads(ctx, &[]);
                self.fill_mesh.write_quads(ctx, &[]);
            }
        }
        Out::Empty
    }

    fn on_tick(&mut self, _: &Context, _: &mut ShooterState) -> Out {
        Out::Empty
    }

    fn on_window_events(&mut self, _: &Context, _: &mut ShooterState, _: &WindowEvent) -> Out {
        Out::Empty
    }

    fn on_render(&self) -> Render<'_> {
        Render::Composed(vec![
            Render::GUI(self.background_mesh.flat(&self.background.bind_group)),
            Render::GUI(self.fill_mesh.flat(&self.fill.bind_group)),
        ])
    }
}

/// Board sprite in the bottom-right corner showing what the skater is doing.
pub struct PosePreview {
    poses: Vec<(Pose, Material)>,
    mesh: QuadMesh,
    shown: Option<Pose>,
}

impl PosePreview {
    pub async fn new(ctx: InitContext) -> Self {
        let loads = Pose::ALL.map(|pose| {
            let ctx = &ctx;
            async move {
                let path = format!("{POSE_DIR}/{}", pose.file_name());
                let material = load_texture(&path, wgpu::AddressMode::ClampToEdge, ctx).await;
                loaded(&path, material).map(|material| (pose, material))
            }
        });
        let poses = futures::future::join_all(loads).await.into_iter().flatten().collect();
        Self {
            poses,
            mesh: QuadMesh::with_capacity(&ctx.device, "Pose Preview", 1),
            shown: None,
        }
    }

    pub fn constructor() -> FlowConsturctor<SkateState> {
        Box::new(|ctx| {
            Box::pin(async move { Box::new(PosePreview::new(ctx).await) as Box<dyn GraphicsFlow<_>> })
        })
    }
}

impl GraphicsFlow<SkateState> for PosePreview {
    fn on_init(&mut self, _: &mut Context, _: &mut SkateState) -> Out {
        Out::Empty
    }

    fn on_update(&mut self, ctx: &Context, state: &mut SkateState, _: Duration) -> Out {
        self.shown = state.scene().map(|scene| scene.pose());
        let rect = geometry::corner_preview(ctx.viewport(), PREVIEW_SIZE, PREVIEW_MARGIN);
        self.mesh.write_quads(ctx, &[rect.to_quad(ctx.viewport())]);
        Out::Empty
    }

    fn on_tick(&mut self, _: &Context, _: &mut SkateState) -> Out {
        Out::Empty
    }

    fn on_window_events(&mut self, _: &Context, _: &mut SkateState, _: &WindowEvent) -> Out {
        Out::Empty
    }

    fn on_render(&self) -> Render<'_> {
        self.shown
            .and_then(|shown| self.poses.iter().find(|(pose, _)| *pose == shown))
            .map(|(_, material)| Render::GUI(self.mesh.flat(&material.bind_group)))
            .into()
    }
}

/// Draws the state's captions as text: stats, combo label and phase prompts.
#[cfg(feature = "ui")]
pub struct Captions {
    lines: Vec<([f32; 2], String)>,
}

#[cfg(feature = "ui")]
impl Captions {
    pub fn constructor<S: crate::game::readout::Readout + 'static>() -> FlowConsturctor<S> {
        Box::new(|_| Box::pin(async { Box::new(Captions { lines: Vec::new() }) as Box<dyn GraphicsFlow<S>> }))
    }
}

#[cfg(feature = "ui")]
impl<S: crate::game::readout::Readout> GraphicsFlow<S> for Captions {
    fn on_init(&mut self, _: &mut Context, _: &mut S) -> Out {
        Out::Empty
    }

    fn on_update(&mut self, ctx: &Context, state: &mut S, _: Duration) -> Out {
        let viewport = ctx.viewport();
        self.lines = state
            .captions()
            .into_iter()
            .map(|caption| (caption.anchor.origin(viewport), caption.text))
            .collect();
        Out::Empty
    }

    fn on_tick(&mut self, _: &Context, _: &mut S) -> Out {
        Out::Empty
    }

    fn on_window_events(&mut self, _: &Context, _: &mut S, _: &WindowEvent) -> Out {
        Out::Empty
    }

    fn on_render(&self) -> Render<'_> {
        Render::Composed(
            self.lines
                .iter()
                .map(|(position, text)| {
                    Render::Text(crate::render::Label {
                        text,
                        position: *position,
                    })
                })
                .collect(),
        )
    }
}
