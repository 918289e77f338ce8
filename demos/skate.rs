use quad_flow::{
    flows::{hud::PosePreview, skate::SkateFlow},
    game::config::SkateConfig,
};

fn main() -> anyhow::Result<()> {
    #[allow(unused_mut)]
    let mut flows = vec![
        SkateFlow::constructor(SkateConfig::COMBO),
        PosePreview::constructor(),
    ];
    #[cfg(feature = "ui")]
    flows.push(quad_flow::flows::hud::Captions::constructor());
    quad_flow::flow::run(flows)
}
