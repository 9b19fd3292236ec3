//! Streamline polylines produced by the tracer.
use glam::Vec2;

/// An immutable polyline through a seed point.
///
/// Points run from one endpoint to the other: the backward extension in
/// reverse, then the seed, then the forward extension. `seed_index` locates
/// the seed within `points`.
#[derive(Clone, Debug, PartialEq)]
pub struct Streamline {
    points: Vec<Vec2>,
    seed_index: usize,
}

impl Streamline {
    pub(crate) fn new(points: Vec<Vec2>, seed_index: usize) -> Self {
        debug_assert!(seed_index < points.len());
        Self { points, seed_index }
    }

    /// All points in order.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the streamline holds no points. Never true for tracer output,
    /// which always contains at least the seed.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the points in order.
    pub fn iter(&self) -> impl Iterator<Item = &Vec2> {
        self.points.iter()
    }

    /// The seed point the streamline was grown from.
    pub fn seed(&self) -> Vec2 {
        self.points[self.seed_index]
    }

    /// Index of the seed point within [`Streamline::points`].
    pub fn seed_index(&self) -> usize {
        self.seed_index
    }

    /// Cumulative arclength at each point, starting at 0.0.
    ///
    /// Renderers map color and width off these values; the polyline itself
    /// carries no styling.
    pub fn arc_lengths(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.points.len());
        let mut total = 0.0;
        out.push(0.0);
        for pair in self.points.windows(2) {
            total += pair[0].distance(pair[1]);
            out.push(total);
        }
        out
    }
}
