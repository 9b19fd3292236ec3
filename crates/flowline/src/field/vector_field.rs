//! Vector field storage and bilinear sampling.
//!
//! A [`VectorField`] owns the [`Grid`] it is sampled on plus row-major `u`
//! and `v` component arrays (row = y index, column = x index).
use glam::Vec2;

use super::grid::{CellIndex, Grid};
use super::VelocitySource;
use crate::error::{Error, Result};

/// Velocity components sampled on a uniform rectangular grid.
#[derive(Clone, Debug)]
pub struct VectorField {
    grid: Grid,
    u: Vec<f32>,
    v: Vec<f32>,
}

impl VectorField {
    /// Build a field from row-major component arrays matching the grid shape.
    pub fn new(grid: Grid, u: Vec<f32>, v: Vec<f32>) -> Result<Self> {
        let expected = grid.width() * grid.height();
        if u.len() != expected || v.len() != expected {
            return Err(Error::InvalidGrid(format!(
                "component arrays must hold {}x{} = {expected} values, got {} and {}",
                grid.width(),
                grid.height(),
                u.len(),
                v.len()
            )));
        }
        Ok(Self { grid, u, v })
    }

    /// Build a field by evaluating `source` at every grid point.
    pub fn from_source(grid: Grid, source: &dyn VelocitySource) -> Self {
        let (w, h) = (grid.width(), grid.height());
        let mut u = Vec::with_capacity(w * h);
        let mut v = Vec::with_capacity(w * h);
        for j in 0..h {
            for i in 0..w {
                let vel = source.velocity(Vec2::new(grid.x(i), grid.y(j)).into());
                u.push(vel.x);
                v.push(vel.y);
            }
        }
        Self { grid, u, v }
    }

    /// The grid this field is sampled on.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// u component at column `i`, row `j`.
    pub fn u_at(&self, i: usize, j: usize) -> f32 {
        self.u[j * self.grid.width() + i]
    }

    /// v component at column `i`, row `j`.
    pub fn v_at(&self, i: usize, j: usize) -> f32 {
        self.v[j * self.grid.width() + i]
    }

    /// Whether both components are exactly zero at column `i`, row `j`.
    pub fn is_stationary(&self, i: usize, j: usize) -> bool {
        self.u_at(i, j) == 0.0 && self.v_at(i, j) == 0.0
    }

    /// Bilinearly interpolated velocity at a continuous position.
    pub fn bilinear(&self, p: Vec2) -> Result<Vec2> {
        Ok(self.bilinear_in_cell(self.grid.cell_index(p)?))
    }

    /// Bilinearly interpolated velocity for an already resolved cell.
    ///
    /// Area-weighted sum of the four surrounding samples; the [`CellIndex`]
    /// contract keeps the `+1` lookups in bounds.
    pub fn bilinear_in_cell(&self, cell: CellIndex) -> Vec2 {
        let CellIndex { ix, iy, ax, ay } = cell;

        let w00 = (1.0 - ax) * (1.0 - ay);
        let w10 = ax * (1.0 - ay);
        let w01 = (1.0 - ax) * ay;
        let w11 = ax * ay;

        let u = self.u_at(ix, iy) * w00
            + self.u_at(ix + 1, iy) * w10
            + self.u_at(ix, iy + 1) * w01
            + self.u_at(ix + 1, iy + 1) * w11;
        let v = self.v_at(ix, iy) * w00
            + self.v_at(ix + 1, iy) * w10
            + self.v_at(ix, iy + 1) * w01
            + self.v_at(ix + 1, iy + 1) * w11;

        Vec2::new(u, v)
    }
}
