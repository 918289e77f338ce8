//! World of the arena shooter: floor, brick walls and the enemy billboards.

use instant::Duration;
use winit::event::WindowEvent;

use crate::{
    context::{Context, InitContext},
    data_structures::{material::Material, quad::QuadMesh},
    flow::{FlowConsturctor, GraphicsFlow, Out},
    flows::{follow_scene, handle_input, loaded, phase_colour},
    game::{
        animation::FrameSkip,
        config::ShooterConfig,
        geometry,
        session::Session,
        shooter::ShooterScene,
    },
    render::Render,
    resources::texture::{load_sprite_sheet, load_texture},
};

pub type ShooterState = Session<ShooterScene>;

pub const FLOOR_TEXTURE: &str = "tex/brick.png";
pub const WALL_TEXTURE: &str = "tex/sky.png";
pub const ENEMY_SHEET: &str = "tex/enemy.gif";

pub struct ShooterFlow {
    floor: Option<Material>,
    walls: Option<Material>,
    enemy_frames: Vec<Material>,
    floor_mesh: QuadMesh,
    wall_mesh: QuadMesh,
    enemy_mesh: QuadMesh,
    animation: FrameSkip,
}

impl ShooterFlow {
    pub async fn new(ctx: InitContext) -> Self {
        let (floor, walls, enemy_frames) = futures::join!(
            load_texture(FLOOR_TEXTURE, wgpu::AddressMode::Repeat, &ctx),
            load_texture(WALL_TEXTURE, wgpu::AddressMode::Repeat, &ctx),
            load_sprite_sheet(ENEMY_SHEET, &ctx),
        );
        let enemy_frames = loaded("enemy sprites", enemy_frames).unwrap_or_default();
        let skip = ShooterConfig::DEFAULT.enemy.frame_skip;

        Self {
            floor: loaded("floor", floor),
            walls: loaded("walls", walls),
            animation: FrameSkip::new(enemy_frames.len(), skip),
            enemy_frames,
            floor_mesh: QuadMesh::new(&ctx.device, "Floor", &[geometry::floor()]),
            wall_mesh: QuadMesh::new(&ctx.device, "Walls", &geometry::skybox()),
            enemy_mesh: QuadMesh::with_capacity(&ctx.device, "Enemies", 16),
        }
    }

    pub fn constructor() -> FlowConsturctor<ShooterState> {
        Box::new(|ctx| {
            Box::pin(async move { Box::new(ShooterFlow::new(ctx).await) as Box<dyn GraphicsFlow<_>> })
        })
    }
}

impl GraphicsFlow<ShooterState> for ShooterFlow {
    fn on_init(&mut self, ctx: &mut Context, state: &mut ShooterState) -> Out {
        ctx.clear_colour = phase_colour(state.phase());
        log::info!("Press Return to start. WASD move, Shift sprint, arrows look, H spawns, Space shoots.");
        Out::Empty
    }

    fn on_update(&mut self, ctx: &Context, state: &mut ShooterState, _: Duration) -> Out {
        let Some(scene) = state.scene() else {
            self.enemy_mesh.write_quads(ctx, &[]);
            return Out::Empty;
        };

        let camera = scene.camera();
        let height = geometry::enemy_height(camera.position.y);
        let billboards: Vec<_> = scene
            .enemies()
            .iter()
            .map(|enemy| geometry::billboard(enemy.position, height, camera.yaw))
            .collect();
        self.enemy_mesh.write_quads(ctx, &billboards);
        self.animation.advance();

        log::trace!("{} | Health: {}", scene.stats(), scene.displayed_health());
        follow_scene(state)
    }

    fn on_tick(&mut self, ctx: &Context, state: &mut ShooterState) -> Out {
        state.tick(Duration::from_millis(ctx.tick_duration_millis));
        Out::Empty
    }

    fn on_window_events(&mut self, _: &Context, state: &mut ShooterState, event: &WindowEvent) -> Out {
        handle_input(state, event)
    }

    fn on_render(&self) -> Render<'_> {
        let floor = self
            .floor
            .as_ref()
            .map(|m| Render::World(self.floor_mesh.flat(&m.bind_group)));
        let walls = self
            .walls
            .as_ref()
            .map(|m| Render::World(self.wall_mesh.flat(&m.bind_group)));
        let enemies = self
            .enemy_frames
            .get(self.animation.current())
            .map(|m| Render::Sprite(self.enemy_mesh.flat(&m.bind_group)));
        Render::Composed(vec![floor.into(), walls.into(), enemies.into()])
    }
}
