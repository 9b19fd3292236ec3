//! Grid and vector field inputs for streamline tracing.
//!
//! This module defines the uniform rectangular [`Grid`], the [`VectorField`]
//! sampled on it, and the [`VelocitySource`] seam for filling a field from an
//! analytic velocity function.
use mint::Vector2;

pub mod grid;
pub mod vector_field;

pub use grid::{CellIndex, Grid};
pub use vector_field::VectorField;

/// Trait for caller-supplied velocity functions, evaluated per grid point when
/// building a [`VectorField`] with [`VectorField::from_source`].
pub trait VelocitySource: Send + Sync {
    fn velocity(&self, p: Vector2<f32>) -> Vector2<f32>;
}
