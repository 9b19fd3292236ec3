#![forbid(unsafe_code)]
//! flowline: Space-filling streamline generation for 2D vector fields on regular grids.
//!
//! Modules:
//! - field: grid definition, vector field storage, bilinear sampling
//! - trace: coverage mask, streamline polylines, the tracing algorithm
//!
//! The tracer repeatedly seeds a streamline at the first uncovered grid cell,
//! grows it forward and backward along the locally interpolated flow direction,
//! and marks visited regions until the whole grid is covered. Output favors
//! visual coverage over integration accuracy; rendering is left to the caller.
pub mod error;
pub mod field;
pub mod trace;

/// Convenient re-exports for common types. Import with `use flowline::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::field::grid::{CellIndex, Grid};
    pub use crate::field::vector_field::VectorField;
    pub use crate::field::VelocitySource;
    pub use crate::trace::mask::CoverageMask;
    pub use crate::trace::streamline::Streamline;
    pub use crate::trace::tracer::{trace_field, StreamlineTracer, TraceResult, TracerConfig};
}
