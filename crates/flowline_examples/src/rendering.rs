//! PNG rendering for traced streamlines.
//!
//! Each streamline is drawn as variable-width segments whose color and width
//! follow cumulative arclength, wrapped modulo 1 into a repeating gradient
//! and taper. A random per-line phase offset breaks up the pattern; that
//! randomization lives here, never in the tracer.
use anyhow::Result;
use flowline::trace::tracer::TraceResult;
use glam::Vec2;
use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Initialize a tracing subscriber for example binaries.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

/// Configuration for rendering a trace result to an image.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output image size in pixels (width, height).
    pub image_size: (u32, u32),
    /// Lower-left corner of the rendered domain.
    pub domain_min: Vec2,
    /// Upper-right corner of the rendered domain.
    pub domain_max: Vec2,
    /// Background color.
    pub background: [u8; 3],
    /// Maximum stroke width in pixels.
    pub line_width: f32,
    /// Arclength multiplier before the modulo-1 wrap; higher values repeat
    /// the gradient more often along a line.
    pub cycle: f32,
    /// Seed for the per-line phase offsets.
    pub phase_seed: u64,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), domain_min: Vec2, domain_max: Vec2) -> Self {
        Self {
            image_size,
            domain_min,
            domain_max,
            background: [255, 255, 255],
            line_width: 4.0,
            cycle: 1.5,
            phase_seed: 42,
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_line_width(mut self, line_width: f32) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn with_cycle(mut self, cycle: f32) -> Self {
        self.cycle = cycle;
        self
    }

    pub fn with_phase_seed(mut self, phase_seed: u64) -> Self {
        self.phase_seed = phase_seed;
        self
    }
}

/// Render every streamline of `result` into a PNG at `path`.
pub fn render_streamlines_to_png(
    result: &TraceResult,
    config: &RenderConfig,
    path: &str,
) -> Result<()> {
    let (w, h) = config.image_size;
    let mut img = RgbImage::from_pixel(w, h, Rgb(config.background));
    let mut rng = StdRng::seed_from_u64(config.phase_seed);

    for line in &result.streamlines {
        let arcs = line.arc_lengths();
        let phase = rand01(&mut rng);
        let points = line.points();

        for k in 0..points.len().saturating_sub(1) {
            let t = (arcs[k + 1] * config.cycle + phase).fract();
            let color = blues(t);
            let width = config.line_width * (2.0 - t) / 2.0;
            draw_segment(
                &mut img,
                world_to_px(config, points[k]),
                world_to_px(config, points[k + 1]),
                width,
                color,
            );
        }
    }

    img.save(path)?;
    Ok(())
}

fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

fn world_to_px(config: &RenderConfig, p: Vec2) -> Vec2 {
    let extent = config.domain_max - config.domain_min;
    let u = (p.x - config.domain_min.x) / extent.x;
    let v = (p.y - config.domain_min.y) / extent.y;
    Vec2::new(
        u * config.image_size.0 as f32,
        // Image rows grow downward.
        (1.0 - v) * config.image_size.1 as f32,
    )
}

/// Blues-style gradient from deep blue at 0 toward pale blue at 1.
fn blues(t: f32) -> Rgb<u8> {
    const STOPS: [[f32; 3]; 3] = [
        [8.0, 48.0, 107.0],
        [66.0, 146.0, 198.0],
        [222.0, 235.0, 247.0],
    ];
    let t = t.clamp(0.0, 1.0) * (STOPS.len() - 1) as f32;
    let i = (t.floor() as usize).min(STOPS.len() - 2);
    let f = t - i as f32;
    let mix = |a: f32, b: f32| (a + (b - a) * f).round() as u8;
    Rgb([
        mix(STOPS[i][0], STOPS[i + 1][0]),
        mix(STOPS[i][1], STOPS[i + 1][1]),
        mix(STOPS[i][2], STOPS[i + 1][2]),
    ])
}

fn draw_segment(img: &mut RgbImage, a: Vec2, b: Vec2, width: f32, color: Rgb<u8>) {
    let len = a.distance(b);
    let steps = len.ceil().max(1.0) as usize;
    for s in 0..=steps {
        let p = a.lerp(b, s as f32 / steps as f32);
        stamp_disk(img, p, width * 0.5, color);
    }
}

fn stamp_disk(img: &mut RgbImage, center: Vec2, radius: f32, color: Rgb<u8>) {
    let radius = radius.max(0.5);
    let (w, h) = img.dimensions();
    let x0 = ((center.x - radius).floor() as i64).max(0);
    let y0 = ((center.y - radius).floor() as i64).max(0);
    let x1 = ((center.x + radius).ceil() as i64).min(w as i64 - 1);
    let y1 = ((center.y + radius).ceil() as i64).min(h as i64 - 1);
    let r2 = radius * radius;

    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f32 + 0.5 - center.x;
            let dy = y as f32 + 0.5 - center.y;
            if dx * dx + dy * dy <= r2 {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}
