//! Streamline tracing over a vector field: coverage bookkeeping, polyline
//! output, and the space-filling seeding algorithm.
pub mod mask;
pub mod streamline;
pub mod tracer;

pub use mask::CoverageMask;
pub use streamline::Streamline;
pub use tracer::{trace_field, StreamlineTracer, TraceResult, TracerConfig};

/// Steps between loop-detection checks during half-streamline extension.
pub const LOOP_CHECK_INTERVAL: usize = 10;

/// Fraction of the step length below which a revisited point counts as a
/// closed loop or stationary node.
pub const LOOP_CLOSE_FACTOR: f32 = 0.9;
