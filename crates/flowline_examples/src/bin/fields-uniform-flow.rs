use flowline::prelude::*;
use flowline_examples::{init_tracing, render_streamlines_to_png, RenderConfig};
use glam::Vec2;
use tracing::info;

/// Constant flow; every streamline is a straight line at the same angle.
struct Uniform {
    velocity: Vec2,
}

impl VelocitySource for Uniform {
    fn velocity(&self, _p: mint::Vector2<f32>) -> mint::Vector2<f32> {
        self.velocity.into()
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let min = Vec2::new(0.0, 0.0);
    let max = Vec2::new(4.0, 3.0);
    let grid = Grid::from_bounds(min, max, 80, 60)?;
    let field = VectorField::from_source(
        grid,
        &Uniform {
            velocity: Vec2::new(1.0, 0.4),
        },
    );

    let result = trace_field(&field, TracerConfig::new().with_spacing(3))?;
    info!("{} parallel streamlines.", result.streamlines.len());

    let config = RenderConfig::new((1200, 900), min, max)
        .with_background([236, 238, 242])
        .with_line_width(4.0);
    render_streamlines_to_png(&result, &config, "fields-uniform-flow.png")?;
    Ok(())
}
