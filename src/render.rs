//! Render composition and pipeline batching.
//!
//! Flows describe what they want drawn with a [`Render`]. The engine walks
//! every flow's render tree once per frame and sorts the leaves into one batch
//! per pipeline, so each pipeline is bound once no matter how many flows use it.
//!
//! # Key types
//!
//! - [`Render<'a>`] is the enum describing what to draw and with which pipeline
//! - [`Flat<'a>`] is one indexed quad batch (vertex + index buffers and a texture)
//! - [`Label<'a>`] is a line of screen text (`ui` feature)
//!

/// Data for one indexed draw: vertex and index buffers with a texture bind group.
///
/// `amount` is the number of indices to draw; a zero amount is skipped.
pub struct Flat<'a> {
    pub vertex: &'a wgpu::Buffer,
    pub index: &'a wgpu::Buffer,
    pub group: &'a wgpu::BindGroup,
    pub amount: usize,
}

/// Text drawn over everything, top-left corner at `position` in pixels.
#[cfg(feature = "ui")]
pub struct Label<'a> {
    pub text: &'a str,
    pub position: [f32; 2],
}

/// Specifies how a flow's quads should be rendered.
///
/// # Variants
///
/// - `None` renders nothing
/// - `World(Flat)` renders opaque world geometry (floor, walls) with depth writes
/// - `Sprite(Flat)` renders alpha-blended world sprites after all world geometry
/// - `GUI(Flat)` renders screen-space quads on top of everything
/// - `Text(Label)` renders text over the GUI (`ui` feature)
/// - `Composed(Vec<Render>)` recursively renders a composition of renders
///
pub enum Render<'a> {
    None,
    World(Flat<'a>),
    Sprite(Flat<'a>),
    GUI(Flat<'a>),
    #[cfg(feature = "ui")]
    Text(Label<'a>),
    Composed(Vec<Render<'a>>),
}

/// Per-pipeline batches collected from all flows in one frame.
#[derive(Default)]
pub(crate) struct Batches<'a> {
    pub(crate) worlds: Vec<Flat<'a>>,
    pub(crate) sprites: Vec<Flat<'a>>,
    pub(crate) guis: Vec<Flat<'a>>,
    #[cfg(feature = "ui")]
    pub(crate) labels: Vec<Label<'a>>,
}

impl<'a> Render<'a> {
    pub(crate) fn set_pipelines(self, batches: &mut Batches<'a>) {
        match self {
            Render::World(flat) => batches.worlds.push(flat),
            Render::Sprite(flat) => batches.sprites.push(flat),
            Render::GUI(flat) => batches.guis.push(flat),
            #[cfg(feature = "ui")]
            Render::Text(label) => batches.labels.push(label),
            Render::Composed(renders) => renders
                .into_iter()
                .for_each(|render| render.set_pipelines(batches)),
            Render::None => (),
        }
    }
}

impl<'a> From<Option<Render<'a>>> for Render<'a> {
    fn from(render: Option<Render<'a>>) -> Self {
        render.unwrap_or(Render::None)
    }
}
