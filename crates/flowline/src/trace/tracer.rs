//! The space-filling streamline tracer.
//!
//! Seeds a streamline at the first uncovered grid cell, grows it in both
//! directions along the interpolated flow, marks visited cells, and repeats
//! until the coverage mask is full.
use glam::Vec2;
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::field::grid::Grid;
use crate::field::VectorField;
use crate::trace::mask::CoverageMask;
use crate::trace::streamline::Streamline;
use crate::trace::{LOOP_CHECK_INTERVAL, LOOP_CLOSE_FACTOR};

/// Configuration for tracing streamlines over a field.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct TracerConfig {
    /// Arclength between successive points, in units of sqrt(dx * dy).
    pub res: f32,
    /// Side length, in grid cells, of the block covered around each
    /// interpolation. Larger values yield fewer, more separated streamlines.
    pub spacing: usize,
    /// Cap on total points per streamline, split evenly between the forward
    /// and backward extensions.
    pub max_len: usize,
    /// Whether to periodically stop extension when a streamline closes a loop
    /// or reaches a stationary node.
    pub detect_loops: bool,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            res: 0.125,
            spacing: 2,
            max_len: 2500,
            detect_loops: false,
        }
    }
}

impl TracerConfig {
    /// Creates a new [`TracerConfig`] with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the step resolution.
    pub fn with_res(mut self, res: f32) -> Self {
        self.res = res;
        self
    }

    /// Sets the coverage block spacing.
    pub fn with_spacing(mut self, spacing: usize) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sets the per-streamline point cap.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Enables or disables loop detection.
    pub fn with_detect_loops(mut self, detect_loops: bool) -> Self {
        self.detect_loops = detect_loops;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.res.is_finite() || self.res <= 0.0 {
            return Err(Error::InvalidConfig("res must be > 0 and finite".into()));
        }
        if self.spacing == 0 {
            return Err(Error::InvalidConfig("spacing must be >= 1".into()));
        }
        if self.max_len < 2 {
            return Err(Error::InvalidConfig("max_len must be >= 2".into()));
        }
        Ok(())
    }
}

/// Result of tracing a field.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct TraceResult {
    /// Streamlines in seeding order.
    pub streamlines: Vec<Streamline>,
    /// Number of seeds used, one per streamline.
    pub seeds: usize,
    /// Covered cells on exit; equals `cells_total` on success.
    pub cells_covered: usize,
    /// Total cells in the coverage mask.
    pub cells_total: usize,
}

pub struct StreamlineTracer<'a> {
    /// Tracer configuration applied to this tracer.
    pub config: TracerConfig,
    /// The field to trace.
    pub field: &'a VectorField,
}

impl<'a> StreamlineTracer<'a> {
    pub fn try_new(config: TracerConfig, field: &'a VectorField) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, field })
    }

    pub fn new(config: TracerConfig, field: &'a VectorField) -> Self {
        debug_assert!(
            config.res.is_finite() && config.res > 0.0,
            "res must be > 0 and finite"
        );
        debug_assert!(config.spacing >= 1, "spacing must be >= 1");
        debug_assert!(config.max_len >= 2, "max_len must be >= 2");

        Self { config, field }
    }

    /// Traces streamlines until the coverage mask is full.
    pub fn trace(&self) -> Result<TraceResult> {
        let grid = self.field.grid();
        let (w, h) = (grid.width(), grid.height());

        let mut mask = CoverageMask::new(w, h);
        mask.mark_border();
        for j in 0..h {
            for i in 0..w {
                if self.field.is_stationary(i, j) {
                    mask.mark(i, j);
                }
            }
        }

        let dr = self.config.res * (grid.dx() * grid.dy()).sqrt();
        let cells_total = mask.len();

        info!(
            "Tracing {}x{} grid | step {} | spacing {}.",
            w, h, dr, self.config.spacing
        );

        let mut streamlines = Vec::new();
        let mut seeds = 0;
        while let Some((i, j)) = mask.first_uncovered() {
            if seeds >= cells_total {
                return Err(Error::NonTermination { seeds });
            }
            seeds += 1;

            // The first interpolation covers the seed cell in exact
            // arithmetic; mark it here as well so progress survives the
            // fractional index rounding down into the neighboring cell.
            mask.mark(i, j);

            let seed = Vec2::new(grid.x(i), grid.y(j));
            debug!("Seed {} at cell ({}, {}).", seeds, i, j);
            streamlines.push(self.grow(&mut mask, seed, dr)?);
        }

        info!("Traced {} streamlines from {} seeds.", streamlines.len(), seeds);

        Ok(TraceResult {
            streamlines,
            seeds,
            cells_covered: mask.covered_count(),
            cells_total,
        })
    }

    /// Grows one streamline in both directions from the seed.
    fn grow(&self, mask: &mut CoverageMask, seed: Vec2, dr: f32) -> Result<Streamline> {
        let forward = self.extend(mask, seed, dr, 1.0)?;
        let mut backward = self.extend(mask, seed, dr, -1.0)?;

        backward.reverse();
        let seed_index = backward.len();

        let mut points = backward;
        points.push(seed);
        points.extend(forward);

        Ok(Streamline::new(points, seed_index))
    }

    /// Grows a half-streamline in one direction from the seed.
    ///
    /// Interpolation only happens strictly inside the bounding box, and a
    /// point stepping onto or past the border is discarded, so no output
    /// point ever lies on or outside the box.
    fn extend(&self, mask: &mut CoverageMask, seed: Vec2, dr: f32, sign: f32) -> Result<Vec<Vec2>> {
        let grid = self.field.grid();
        let half_cap = self.config.max_len / 2;

        let mut points = Vec::new();
        let mut p = seed;
        let mut steps = 0;

        while grid.contains_strict(p) {
            let vel = self.interp(grid, mask, p)?;
            let theta = vel.y.atan2(vel.x);

            p += Vec2::new(theta.cos(), theta.sin()) * (sign * dr);
            if !grid.contains_strict(p) {
                break;
            }
            points.push(p);
            steps += 1;

            if self.config.detect_loops
                && steps % LOOP_CHECK_INTERVAL == 0
                && closes_loop(&points, dr)
            {
                break;
            }
            if steps > half_cap {
                break;
            }
        }

        Ok(points)
    }

    /// Interpolates the field at `p` and marks the surrounding coverage block.
    fn interp(&self, grid: &Grid, mask: &mut CoverageMask, p: Vec2) -> Result<Vec2> {
        let cell = grid.cell_index(p)?;
        mask.mark_block(cell.ix, cell.iy, self.config.spacing);
        Ok(self.field.bilinear_in_cell(cell))
    }
}

/// Whether the newest point lies within `0.9 * dr` of any earlier point of
/// the same half-streamline: a closed loop or a stationary node.
fn closes_loop(points: &[Vec2], dr: f32) -> bool {
    let Some((newest, earlier)) = points.split_last() else {
        return false;
    };
    let limit = LOOP_CLOSE_FACTOR * dr;
    earlier.iter().any(|q| newest.distance(*q) < limit)
}

/// Traces `field` with `config`, validating the configuration first.
pub fn trace_field(field: &VectorField, config: TracerConfig) -> Result<TraceResult> {
    StreamlineTracer::try_new(config, field)?.trace()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Grid, VelocitySource};

    /// The windmap showcase field: a polynomial flow with curls and exits.
    struct PolyWind;

    impl VelocitySource for PolyWind {
        fn velocity(&self, p: mint::Vector2<f32>) -> mint::Vector2<f32> {
            let (x, y) = (p.x, p.y);
            Vec2::new(-1.0 - x * x + y, 1.0 + x - x * y * y).into()
        }
    }

    /// Everything flows into the origin, a stationary node.
    struct Sink;

    impl VelocitySource for Sink {
        fn velocity(&self, p: mint::Vector2<f32>) -> mint::Vector2<f32> {
            Vec2::new(-p.x, -p.y).into()
        }
    }

    fn poly_field(n: usize) -> VectorField {
        let grid = Grid::from_bounds(Vec2::new(-3.0, -3.0), Vec2::new(3.0, 3.0), n, n).unwrap();
        VectorField::from_source(grid, &PolyWind)
    }

    fn uniform_field(u: f32, v: f32) -> VectorField {
        let grid = Grid::from_bounds(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), 11, 11).unwrap();
        let n = 11 * 11;
        VectorField::new(grid, vec![u; n], vec![v; n]).unwrap()
    }

    #[test]
    fn validate_rejects_zero_spacing() {
        let err = TracerConfig::new().with_spacing(0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn validate_rejects_non_positive_res() {
        let err = TracerConfig::new().with_res(0.0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        let err = TracerConfig::new().with_res(f32::NAN).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn try_new_propagates_invalid_config() {
        let field = uniform_field(1.0, 0.0);
        let config = TracerConfig::new().with_max_len(1);
        assert!(StreamlineTracer::try_new(config, &field).is_err());
    }

    #[test]
    fn trace_terminates_with_full_coverage() {
        let field = poly_field(24);
        let result = trace_field(&field, TracerConfig::default()).unwrap();

        assert!(!result.streamlines.is_empty());
        assert_eq!(result.cells_covered, result.cells_total);
        assert_eq!(result.seeds, result.streamlines.len());
    }

    #[test]
    fn trace_stays_strictly_inside_the_bounding_box() {
        let field = poly_field(24);
        let result = trace_field(&field, TracerConfig::default()).unwrap();

        let min = field.grid().min();
        let max = field.grid().max();
        for line in &result.streamlines {
            for p in line.iter() {
                assert!(min.x < p.x && p.x < max.x, "x on or outside box: {p:?}");
                assert!(min.y < p.y && p.y < max.y, "y on or outside box: {p:?}");
            }
        }
    }

    #[test]
    fn uniform_field_yields_straight_streamlines() {
        let field = uniform_field(1.0, 1.0);
        let result = trace_field(&field, TracerConfig::default()).unwrap();

        // Flow direction is atan2(1, 1) everywhere; every segment must be
        // parallel to it in one sign or the other.
        let dir = Vec2::new(1.0, 1.0).normalize();
        for line in &result.streamlines {
            for pair in line.points().windows(2) {
                let seg = pair[1] - pair[0];
                assert!(seg.perp_dot(dir).abs() < 1e-4, "bent segment: {seg:?}");
            }
        }
    }

    #[test]
    fn stationary_cells_never_seed_streamlines() {
        let grid = Grid::from_bounds(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), 9, 9).unwrap();
        let n = 9 * 9;
        let mut u = vec![1.0; n];
        let mut v = vec![0.5; n];
        u[4 * 9 + 4] = 0.0;
        v[4 * 9 + 4] = 0.0;
        let field = VectorField::new(grid, u, v).unwrap();

        let zero_point = Vec2::new(field.grid().x(4), field.grid().y(4));
        let result = trace_field(&field, TracerConfig::default()).unwrap();
        for line in &result.streamlines {
            assert_ne!(line.seed(), zero_point);
        }
    }

    #[test]
    fn loop_detection_halts_at_a_stationary_node() {
        let grid = Grid::from_bounds(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0), 21, 21).unwrap();
        let field = VectorField::from_source(grid, &Sink);
        let config = TracerConfig::new().with_res(1.0).with_max_len(400);

        let with_detection = trace_field(&field, config.clone().with_detect_loops(true)).unwrap();
        let without = trace_field(&field, config.with_detect_loops(false)).unwrap();

        // Every inward half runs to the cap without detection; with it, the
        // oscillation around the node is caught within a few check intervals.
        let capped = &without.streamlines[0];
        let halted = &with_detection.streamlines[0];
        assert!(capped.len() > 200, "expected cap-limited line, got {}", capped.len());
        assert!(
            halted.len() < capped.len() / 2,
            "loop detection did not shorten the line: {} vs {}",
            halted.len(),
            capped.len()
        );
    }

    #[test]
    fn out_of_bounds_never_surfaces_from_tracing() {
        // Fields that push streamlines across the border from every seed.
        for (u, v) in [(10.0, 0.0), (0.0, -3.0), (5.0, 5.0)] {
            let field = uniform_field(u, v);
            assert!(trace_field(&field, TracerConfig::default()).is_ok());
        }
        assert!(trace_field(&poly_field(32), TracerConfig::default()).is_ok());
    }

    #[test]
    fn trace_is_deterministic() {
        let field = poly_field(20);
        let a = trace_field(&field, TracerConfig::default()).unwrap();
        let b = trace_field(&field, TracerConfig::default()).unwrap();

        assert_eq!(a.streamlines.len(), b.streamlines.len());
        for (la, lb) in a.streamlines.iter().zip(&b.streamlines) {
            assert_eq!(la, lb);
        }
    }

    #[test]
    fn larger_spacing_yields_fewer_streamlines() {
        let field = poly_field(40);
        let sparse = trace_field(&field, TracerConfig::new().with_spacing(4)).unwrap();
        let dense = trace_field(&field, TracerConfig::new().with_spacing(1)).unwrap();
        assert!(sparse.streamlines.len() < dense.streamlines.len());
    }
}
