//! Coverage bookkeeping for the seeding loop.
//!
//! The mask records which grid cells are already represented by a streamline,
//! a border cell, or a zero-velocity cell. Cells only ever transition from
//! uncovered to covered; the API has no way to clear a cell, which is what
//! guarantees the seeding loop's uncovered set strictly shrinks.

/// Boolean grid matching the vector field shape.
#[derive(Clone, Debug)]
pub struct CoverageMask {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    covered: usize,
}

impl CoverageMask {
    /// Create a fully uncovered mask of `width` by `height` cells.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
            covered: 0,
        }
    }

    /// Number of cells in the mask.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the mask holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of covered cells.
    pub fn covered_count(&self) -> usize {
        self.covered
    }

    /// Whether every cell is covered.
    pub fn is_full(&self) -> bool {
        self.covered == self.cells.len()
    }

    /// Whether the cell at column `i`, row `j` is covered.
    pub fn covered(&self, i: usize, j: usize) -> bool {
        self.cells[j * self.width + i]
    }

    /// Cover the cell at column `i`, row `j`. Returns true if it was uncovered.
    pub fn mark(&mut self, i: usize, j: usize) -> bool {
        let idx = j * self.width + i;
        if self.cells[idx] {
            return false;
        }
        self.cells[idx] = true;
        self.covered += 1;
        true
    }

    /// Cover a `spacing` by `spacing` block anchored at column `i`, row `j`,
    /// clipped to the mask bounds. Returns the number of newly covered cells.
    pub fn mark_block(&mut self, i: usize, j: usize, spacing: usize) -> usize {
        let i_end = (i + spacing).min(self.width);
        let j_end = (j + spacing).min(self.height);
        let mut newly = 0;
        for jj in j..j_end {
            for ii in i..i_end {
                if self.mark(ii, jj) {
                    newly += 1;
                }
            }
        }
        newly
    }

    /// Cover the full border ring. No-op on a mask with a zero dimension.
    pub fn mark_border(&mut self) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        for i in 0..self.width {
            self.mark(i, 0);
            self.mark(i, self.height - 1);
        }
        for j in 0..self.height {
            self.mark(0, j);
            self.mark(self.width - 1, j);
        }
    }

    /// First uncovered cell as `(column, row)` in row-major scan order, rows
    /// outer and columns inner. This ordering is the deterministic seed
    /// selection rule and affects output reproducibility.
    pub fn first_uncovered(&self) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(|&c| !c)
            .map(|idx| (idx % self.width, idx / self.width))
    }
}
