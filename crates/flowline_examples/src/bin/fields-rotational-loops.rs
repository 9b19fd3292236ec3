use flowline::prelude::*;
use flowline_examples::{init_tracing, render_streamlines_to_png, RenderConfig};
use glam::Vec2;
use tracing::info;

/// Solid-body rotation around the origin: U = -y, V = x.
struct Swirl;

impl VelocitySource for Swirl {
    fn velocity(&self, p: mint::Vector2<f32>) -> mint::Vector2<f32> {
        Vec2::new(-p.y, p.x).into()
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let min = Vec2::new(-3.0, -3.0);
    let max = Vec2::new(3.0, 3.0);
    let grid = Grid::from_bounds(min, max, 100, 100)?;
    let field = VectorField::from_source(grid, &Swirl);

    // Fixed-step orbits drift slowly outward, so inner lines wind many times
    // before leaving the domain or hitting the point cap; loop detection cuts
    // the ones that close up near the stationary center.
    let base = TracerConfig::new().with_res(0.5).with_max_len(10_000);

    let capped = trace_field(&field, base.clone().with_detect_loops(false))?;
    info!(
        "detect_loops=false: {} streamlines, longest {} points.",
        capped.streamlines.len(),
        capped.streamlines.iter().map(|s| s.len()).max().unwrap_or(0)
    );

    let detected = trace_field(&field, base.with_detect_loops(true))?;
    info!(
        "detect_loops=true: {} streamlines, longest {} points.",
        detected.streamlines.len(),
        detected.streamlines.iter().map(|s| s.len()).max().unwrap_or(0)
    );

    let config = RenderConfig::new((1000, 1000), min, max).with_line_width(3.0);
    render_streamlines_to_png(&capped, &config, "fields-rotational-loops-capped.png")?;
    render_streamlines_to_png(&detected, &config, "fields-rotational-loops-detected.png")?;
    Ok(())
}
