//! Uniform rectangular grid definition.
//!
//! A [`Grid`] stores the x and y coordinate axes of the lattice the vector
//! field is sampled on. Spacing is derived from the first and last coordinate
//! of each axis; regular spacing is an assumed precondition, not something the
//! grid verifies per cell. Irregularly spaced axes pass validation but distort
//! interpolation.
use glam::Vec2;

use crate::error::{Error, Result};

/// Integer cell plus fractional offsets resolved from a continuous position.
///
/// `ix`/`iy` index the lower-left corner of the surrounding cell; `ax`/`ay`
/// are the fractional offsets in [0, 1] toward the next grid line. The
/// resolving [`Grid::cell_index`] guarantees `ix + 1` and `iy + 1` are valid
/// sample indices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellIndex {
    pub ix: usize,
    pub iy: usize,
    pub ax: f32,
    pub ay: f32,
}

/// Coordinate axes of a uniform rectangular lattice.
#[derive(Clone, Debug)]
pub struct Grid {
    xs: Vec<f32>,
    ys: Vec<f32>,
    dx: f32,
    dy: f32,
}

impl Grid {
    /// Build a grid from explicit coordinate axes.
    ///
    /// Both axes must hold at least two finite, strictly increasing values.
    pub fn from_axes(xs: Vec<f32>, ys: Vec<f32>) -> Result<Self> {
        validate_axis(&xs, "x")?;
        validate_axis(&ys, "y")?;

        let dx = (xs[xs.len() - 1] - xs[0]) / (xs.len() - 1) as f32;
        let dy = (ys[ys.len() - 1] - ys[0]) / (ys.len() - 1) as f32;

        Ok(Self { xs, ys, dx, dy })
    }

    /// Build a grid spanning `[min, max]` with `nx` by `ny` evenly spaced points.
    pub fn from_bounds(min: Vec2, max: Vec2, nx: usize, ny: usize) -> Result<Self> {
        if nx < 2 || ny < 2 {
            return Err(Error::InvalidGrid(format!(
                "grid needs at least 2 points per axis, got {nx}x{ny}"
            )));
        }
        let xs = linspace(min.x, max.x, nx);
        let ys = linspace(min.y, max.y, ny);
        Self::from_axes(xs, ys)
    }

    /// Build a grid from flattened row-major 2D mesh-grid arrays.
    ///
    /// `x` repeats its first row down every row and `y` repeats its first
    /// column across every column; only the first row of `x` and the first
    /// column of `y` are read.
    pub fn from_meshgrid(x: &[f32], y: &[f32], cols: usize, rows: usize) -> Result<Self> {
        let expected = cols.checked_mul(rows).ok_or_else(|| {
            Error::InvalidGrid(format!("mesh-grid shape {cols}x{rows} overflows"))
        })?;
        if x.len() != expected || y.len() != expected {
            return Err(Error::InvalidGrid(format!(
                "mesh-grid arrays must hold {cols}x{rows} = {expected} values, got {} and {}",
                x.len(),
                y.len()
            )));
        }
        let xs = x[..cols].to_vec();
        let ys = (0..rows).map(|j| y[j * cols]).collect();
        Self::from_axes(xs, ys)
    }

    /// Number of grid points along x.
    pub fn width(&self) -> usize {
        self.xs.len()
    }

    /// Number of grid points along y.
    pub fn height(&self) -> usize {
        self.ys.len()
    }

    /// Derived spacing along x.
    pub fn dx(&self) -> f32 {
        self.dx
    }

    /// Derived spacing along y.
    pub fn dy(&self) -> f32 {
        self.dy
    }

    /// x coordinate of column `i`.
    pub fn x(&self, i: usize) -> f32 {
        self.xs[i]
    }

    /// y coordinate of row `j`.
    pub fn y(&self, j: usize) -> f32 {
        self.ys[j]
    }

    /// Lower-left corner of the bounding box.
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.xs[0], self.ys[0])
    }

    /// Upper-right corner of the bounding box.
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.xs[self.xs.len() - 1], self.ys[self.ys.len() - 1])
    }

    /// Whether `p` lies strictly inside the bounding box (never on it).
    pub fn contains_strict(&self, p: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        min.x < p.x && p.x < max.x && min.y < p.y && p.y < max.y
    }

    /// Resolve a continuous position to the surrounding cell and fractional
    /// offsets.
    ///
    /// Errors with [`Error::OutOfBounds`] when `p` lies outside the closed
    /// bounding box. Inside it the cell always resolves: a fractional index
    /// that rounds onto or past the last grid line is clamped into the final
    /// cell, so the `+1` neighbor lookups stay in bounds.
    pub fn cell_index(&self, p: Vec2) -> Result<CellIndex> {
        let min = self.min();
        let max = self.max();
        let inside =
            min.x <= p.x && p.x <= max.x && min.y <= p.y && p.y <= max.y;
        if !inside {
            return Err(Error::OutOfBounds { x: p.x, y: p.y });
        }

        let fx = (p.x - self.xs[0]) / self.dx;
        let fy = (p.y - self.ys[0]) / self.dy;
        let ix = (fx.floor().max(0.0) as usize).min(self.xs.len() - 2);
        let iy = (fy.floor().max(0.0) as usize).min(self.ys.len() - 2);

        Ok(CellIndex {
            ix,
            iy,
            ax: (fx - ix as f32).clamp(0.0, 1.0),
            ay: (fy - iy as f32).clamp(0.0, 1.0),
        })
    }
}

fn validate_axis(axis: &[f32], name: &str) -> Result<()> {
    if axis.len() < 2 {
        return Err(Error::InvalidGrid(format!(
            "{name} axis needs at least 2 points, got {}",
            axis.len()
        )));
    }
    if axis.iter().any(|v| !v.is_finite()) {
        return Err(Error::InvalidGrid(format!(
            "{name} axis contains non-finite values"
        )));
    }
    if axis.windows(2).any(|w| w[1] <= w[0]) {
        return Err(Error::InvalidGrid(format!(
            "{name} axis must be strictly increasing"
        )));
    }
    Ok(())
}

fn linspace(start: f32, end: f32, n: usize) -> Vec<f32> {
    let step = (end - start) / (n - 1) as f32;
    (0..n).map(|i| start + i as f32 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_grid() -> Grid {
        Grid::from_bounds(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), 5, 5).unwrap()
    }

    #[test]
    fn from_axes_derives_spacing() {
        let grid = Grid::from_axes(vec![0.0, 0.5, 1.0], vec![-1.0, 0.0, 1.0, 2.0]).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.dx(), 0.5);
        assert_eq!(grid.dy(), 1.0);
    }

    #[test]
    fn from_axes_rejects_short_axis() {
        let err = Grid::from_axes(vec![0.0], vec![0.0, 1.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidGrid(_)));
    }

    #[test]
    fn from_axes_rejects_non_monotonic_axis() {
        let err = Grid::from_axes(vec![0.0, 2.0, 1.0], vec![0.0, 1.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidGrid(_)));
    }

    #[test]
    fn from_meshgrid_extracts_first_row_and_column() {
        // 3x2 mesh of x in {0,1,2}, y in {10, 20}
        let x = vec![0.0, 1.0, 2.0, 0.0, 1.0, 2.0];
        let y = vec![10.0, 10.0, 10.0, 20.0, 20.0, 20.0];
        let grid = Grid::from_meshgrid(&x, &y, 3, 2).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.x(2), 2.0);
        assert_eq!(grid.y(1), 20.0);
    }

    #[test]
    fn from_meshgrid_rejects_mismatched_length() {
        let err = Grid::from_meshgrid(&[0.0, 1.0], &[0.0, 1.0], 3, 2).unwrap_err();
        assert!(matches!(err, Error::InvalidGrid(_)));
    }

    #[test]
    fn contains_strict_excludes_the_border() {
        let grid = unit_grid();
        assert!(grid.contains_strict(Vec2::new(0.5, 0.5)));
        assert!(!grid.contains_strict(Vec2::new(0.0, 0.5)));
        assert!(!grid.contains_strict(Vec2::new(0.5, 1.0)));
        assert!(!grid.contains_strict(Vec2::new(1.5, 0.5)));
    }

    #[test]
    fn cell_index_resolves_interior_positions() {
        let grid = unit_grid();
        let cell = grid.cell_index(Vec2::new(0.3, 0.6)).unwrap();
        assert_eq!((cell.ix, cell.iy), (1, 2));
        assert!((cell.ax - 0.2).abs() < 1e-5);
        assert!((cell.ay - 0.4).abs() < 1e-5);
    }

    #[test]
    fn cell_index_clamps_the_last_grid_line_into_the_final_cell() {
        let grid = unit_grid();
        let cell = grid.cell_index(Vec2::new(1.0, 1.0)).unwrap();
        assert_eq!((cell.ix, cell.iy), (3, 3));
        assert_eq!((cell.ax, cell.ay), (1.0, 1.0));
    }

    #[test]
    fn cell_index_rejects_outside_positions() {
        let grid = unit_grid();
        let err = grid.cell_index(Vec2::new(1.1, 0.5)).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { .. }));
    }
}
