use serde::{Deserialize, Serialize};

use crate::geometry;
use crate::physics_constants::strike_zone;

/// N×N pitch-count matrix. Row 0 is the top of the zone, column 0 the left
/// (catcher's view). Never resized after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatGrid {
    size: usize,
    cells: Vec<u32>,
}

impl Default for HeatGrid {
    fn default() -> Self {
        Self::new(strike_zone::DEFAULT_GRID_SIZE)
    }
}

impl HeatGrid {
    /// Grid with `size` cells per side, clamped to `[1, MAX_GRID_SIZE]`.
    pub fn new(size: usize) -> Self {
        let size = size.clamp(1, strike_zone::MAX_GRID_SIZE);
        Self { size, cells: vec![0; size * size] }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// `(row, col)` for normalized coordinates, clamped into the grid.
    pub fn cell_for(&self, x: f32, z: f32) -> (usize, usize) {
        let x = geometry::clamp(x, -1.0, 1.0);
        let z = geometry::clamp(z, -1.0, 1.0);
        let n = self.size as f32;
        let last = (self.size - 1) as f32;
        let col = geometry::clamp(((x + 1.0) / 2.0 * n).floor(), 0.0, last) as usize;
        // Higher z is nearer the top row.
        let row = geometry::clamp(((1.0 - (z + 1.0) / 2.0) * n).floor(), 0.0, last) as usize;
        (row, col)
    }

    /// Count one pitch at normalized `(x, z)`; returns the cell hit.
    pub fn bump(&mut self, x: f32, z: f32) -> (usize, usize) {
        let (row, col) = self.cell_for(x, z);
        if let Some(cell) = self.cells.get_mut(row * self.size + col) {
            *cell = cell.saturating_add(1);
        }
        (row, col)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells.get(row * self.size + col).copied()
    }

    /// Row-major copy for overlay renderers.
    pub fn rows(&self) -> Vec<Vec<u32>> {
        self.cells.chunks(self.size).map(|r| r.to_vec()).collect()
    }

    pub fn total(&self) -> u64 {
        self.cells.iter().map(|&c| u64::from(c)).sum()
    }

    /// Largest count, at least 1 (display divisor).
    pub fn max_value(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0).max(1)
    }

    pub fn reset(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_cells() {
        let grid = HeatGrid::new(3);
        assert_eq!(grid.cell_for(-1.0, -1.0), (2, 0));
        assert_eq!(grid.cell_for(1.0, 1.0), (0, 2));
        assert_eq!(grid.cell_for(0.0, 0.0), (1, 1));
        assert_eq!(grid.cell_for(-1.0, 1.0), (0, 0));
    }

    #[test]
    fn test_corner_cells_any_size() {
        for n in [1, 2, 4, 5, 9] {
            let grid = HeatGrid::new(n);
            assert_eq!(grid.cell_for(-1.0, -1.0), (n - 1, 0));
            assert_eq!(grid.cell_for(1.0, 1.0), (0, n - 1));
        }
        assert_eq!(HeatGrid::new(5).cell_for(0.0, 0.0), (2, 2));
    }

    #[test]
    fn test_out_of_range_and_nan_clamped() {
        let grid = HeatGrid::new(3);
        assert_eq!(grid.cell_for(7.0, -9.0), (2, 2));
        assert_eq!(grid.cell_for(f32::NAN, f32::NAN), (2, 0));
    }

    #[test]
    fn test_bump_increments_by_one() {
        let mut grid = HeatGrid::new(3);
        assert_eq!(grid.bump(0.9, 0.9), (0, 2));
        grid.bump(0.9, 0.9);
        grid.bump(-0.9, -0.9);
        assert_eq!(grid.get(0, 2), Some(2));
        assert_eq!(grid.get(2, 0), Some(1));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.total(), 3);
        assert_eq!(grid.max_value(), 2);
        assert_eq!(grid.rows(), vec![vec![0, 0, 2], vec![0, 0, 0], vec![1, 0, 0]]);
    }

    #[test]
    fn test_size_capped() {
        assert_eq!(HeatGrid::new(0).size(), 1);
        let grid = HeatGrid::new(usize::MAX);
        assert_eq!(grid.size(), strike_zone::MAX_GRID_SIZE);
        assert_eq!(grid.rows().len(), strike_zone::MAX_GRID_SIZE);
    }

    #[test]
    fn test_reset_keeps_size() {
        let mut grid = HeatGrid::new(4);
        grid.bump(0.0, 0.0);
        grid.reset();
        assert_eq!(grid.total(), 0);
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.max_value(), 1);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Counts never decrease between resets and each bump adds exactly one.
            #[test]
            fn prop_monotonic(points in prop::collection::vec((-3.0f32..3.0, -3.0f32..3.0), 1..60), n in 1usize..8) {
                let mut grid = HeatGrid::new(n);
                for (i, (x, z)) in points.iter().enumerate() {
                    let before = grid.rows();
                    let (row, col) = grid.bump(*x, *z);
                    prop_assert!(row < n && col < n);
                    prop_assert_eq!(grid.total(), i as u64 + 1);
                    for (r, cols) in grid.rows().iter().enumerate() {
                        for (c, v) in cols.iter().enumerate() {
                            prop_assert!(*v >= before[r][c]);
                        }
                    }
                }
            }
        }
    }
}
