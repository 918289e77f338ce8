use quad_flow::flows::{hud::HealthBar, shooter::ShooterFlow};

fn main() -> anyhow::Result<()> {
    #[allow(unused_mut)]
    let mut flows = vec![ShooterFlow::constructor(), HealthBar::constructor()];
    #[cfg(feature = "ui")]
    flows.push(quad_flow::flows::hud::Captions::constructor());
    quad_flow::flow::run(flows)
}
