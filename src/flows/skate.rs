//! World of the skate demos: the endless floor and, in third person, the skater.

use instant::Duration;
use winit::event::WindowEvent;

use crate::{
    context::{Context, InitContext},
    data_structures::{material::Material, quad::QuadMesh},
    flow::{FlowConsturctor, GraphicsFlow, Out},
    flows::{follow_scene, handle_input, loaded, phase_colour},
    game::{animation::FrameTimer, config::SkateConfig, geometry, session::Session, skate::SkateScene},
    render::Render,
    resources::texture::{load_sprite_sheet, load_texture},
};

pub type SkateState = Session<SkateScene>;

pub const FLOOR_TEXTURE: &str = "tex/brick.png";
pub const AVATAR_SHEET: &str = "tex/birb/thirdperson.gif";

pub struct SkateFlow {
    config: SkateConfig,
    floor: Option<Material>,
    avatar_frames: Vec<Material>,
    floor_mesh: QuadMesh,
    avatar_mesh: QuadMesh,
    animation: FrameTimer,
}

impl SkateFlow {
    pub async fn new(ctx: InitContext, config: SkateConfig) -> Self {
        let (floor, avatar_frames) = futures::join!(
            load_texture(FLOOR_TEXTURE, wgpu::AddressMode::Repeat, &ctx),
            load_sprite_sheet(AVATAR_SHEET, &ctx),
        );
        let avatar_frames = loaded("third person avatar", avatar_frames).unwrap_or_default();

        Self {
            config,
            floor: loaded("floor", floor),
            animation: FrameTimer::new(avatar_frames.len(), config.avatar_frame_interval),
            avatar_frames,
            floor_mesh: QuadMesh::new(&ctx.device, "Floor", &[geometry::floor()]),
            avatar_mesh: QuadMesh::with_capacity(&ctx.device, "Avatar", 1),
        }
    }

    pub fn constructor(config: SkateConfig) -> FlowConsturctor<SkateState> {
        Box::new(move |ctx| {
            Box::pin(async move { Box::new(SkateFlow::new(ctx, config).await) as Box<dyn GraphicsFlow<_>> })
        })
    }
}

impl GraphicsFlow<SkateState> for SkateFlow {
    fn on_init(&mut self, ctx: &mut Context, state: &mut SkateState) -> Out {
        let config = self.config;
        *state = Session::new(move || SkateScene::new(config));
        ctx.clear_colour = phase_colour(state.phase());
        log::info!("Press Return to start. W push, S brake, A/D carve, Space ollie, T third person.");
        Out::Empty
    }

    fn on_update(&mut self, ctx: &Context, state: &mut SkateState, _: Duration) -> Out {
        let Some(scene) = state.scene() else {
            self.avatar_mesh.write_quads(ctx, &[]);
            return Out::Empty;
        };

        if scene.is_third_person() {
            self.avatar_mesh
                .write_quads(ctx, &[geometry::avatar(scene.camera().position)]);
            self.animation.update(state.now());
        } else {
            self.avatar_mesh.write_quads(ctx, &[]);
        }

        log::trace!(
            "{} | Speed: {:.2} | {}",
            scene.stats(),
            scene.speed(),
            scene.board().label().unwrap_or_default()
        );
        follow_scene(state)
    }

    fn on_tick(&mut self, ctx: &Context, state: &mut SkateState) -> Out {
        state.tick(Duration::from_millis(ctx.tick_duration_millis));
        Out::Empty
    }

    fn on_window_events(&mut self, _: &Context, state: &mut SkateState, event: &WindowEvent) -> Out {
        handle_input(state, event)
    }

    fn on_render(&self) -> Render<'_> {
        let floor = self
            .floor
            .as_ref()
            .map(|m| Render::World(self.floor_mesh.flat(&m.bind_group)));
        let avatar = self
            .avatar_frames
            .get(self.animation.current())
            .map(|m| Render::Sprite(self.avatar_mesh.flat(&m.bind_group)));
        Render::Composed(vec![floor.into(), avatar.into()])
    }
}
