use flowline::prelude::*;
use flowline_examples::{init_tracing, render_streamlines_to_png, RenderConfig};
use glam::Vec2;
use tracing::info;

/// The windmap showcase field: U = -1 - x^2 + y, V = 1 + x - x * y^2.
struct PolyWind;

impl VelocitySource for PolyWind {
    fn velocity(&self, p: mint::Vector2<f32>) -> mint::Vector2<f32> {
        let (x, y) = (p.x, p.y);
        Vec2::new(-1.0 - x * x + y, 1.0 + x - x * y * y).into()
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let min = Vec2::new(-3.0, -3.0);
    let max = Vec2::new(3.0, 3.0);
    let grid = Grid::from_bounds(min, max, 100, 100)?;
    let field = VectorField::from_source(grid, &PolyWind);

    let result = trace_field(&field, TracerConfig::default())?;
    info!(
        "{} streamlines, {} points total.",
        result.streamlines.len(),
        result.streamlines.iter().map(|s| s.len()).sum::<usize>()
    );

    let config = RenderConfig::new((1000, 1000), min, max).with_line_width(3.0);
    render_streamlines_to_png(&result, &config, "fields-polynomial-windmap.png")?;
    Ok(())
}
