//! Rules module for the colored Game of Life
//!
//! This module contains the rule parameters and the whole-grid generation step.
//! Cells are colors rather than booleans: a birth takes the blended color of the
//! live neighbors that caused it, and survivors keep their color.

use crate::color::{blend, CellColor};
use crate::grid::Grid;
use crate::neighbors::neighbor_coords;

/// Game of Life standard rules:
/// 1. Any live cell with fewer than two live neighbors dies (underpopulation)
/// 2. Any live cell with two or three live neighbors lives (survival)
/// 3. Any live cell with more than three live neighbors dies (overpopulation)
/// 4. Any dead cell with exactly three live neighbors becomes alive (reproduction)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRules {
    /// Minimum neighbors for a live cell to survive
    pub survival_min: u32,
    /// Maximum neighbors for a live cell to survive
    pub survival_max: u32,
    /// Number of neighbors for a dead cell to become alive
    pub birth_count: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        // Classic Conway's Game of Life rules
        Self {
            survival_min: 2,
            survival_max: 3,
            birth_count: 3,
        }
    }
}

impl GameRules {
    /// Preset for Conway's classic Game of Life (B3/S23)
    pub fn conway() -> Self {
        Self::default()
    }

    /// Next color of a single cell given its current color and its live neighbors.
    pub fn next_color(&self, current: CellColor, live_neighbors: &[CellColor]) -> CellColor {
        let count = live_neighbors.len() as u32;
        if current.is_alive() {
            if count >= self.survival_min && count <= self.survival_max {
                current
            } else {
                CellColor::WHITE
            }
        } else if count == self.birth_count {
            blend(live_neighbors).unwrap_or(CellColor::WHITE)
        } else {
            CellColor::WHITE
        }
    }
}

/// Result of one generation step.
#[derive(Debug, Clone)]
pub struct Generation {
    pub grid: Grid,
    pub births: usize,
    pub deaths: usize,
}

impl Generation {
    pub fn live_cells(&self) -> usize {
        self.grid.live_count()
    }
}

/// Apply the rules to every cell of `input`, producing a complete next grid.
///
/// `input` is only read, so no cell ever sees a partially updated neighbor.
pub fn apply_rules(input: &Grid, rules: &GameRules) -> Generation {
    let size = input.size();
    let mut output = Vec::with_capacity(size * size);
    let mut live = Vec::with_capacity(8);
    let mut births = 0;
    let mut deaths = 0;

    for i in 0..size {
        for j in 0..size {
            let current = input.cells()[i * size + j];

            live.clear();
            live.extend(
                neighbor_coords(size, i, j)
                    .iter()
                    .map(|(ni, nj)| input.cells()[ni * size + nj])
                    .filter(CellColor::is_alive),
            );

            let next = rules.next_color(current, &live);
            match (current.is_alive(), next.is_alive()) {
                (false, true) => births += 1,
                (true, false) => deaths += 1,
                _ => {}
            }
            output.push(next);
        }
    }

    Generation {
        grid: Grid::from_cells(size, output),
        births,
        deaths,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(size: usize, cells: &[(usize, usize, CellColor)]) -> Grid {
        let mut grid = Grid::new(size).unwrap();
        for &(i, j, c) in cells {
            grid.set(i, j, c).unwrap();
        }
        grid
    }

    #[test]
    fn lonely_cell_dies() {
        let grid = grid_with(3, &[(1, 1, CellColor::BLACK)]);
        let next = apply_rules(&grid, &GameRules::conway());
        assert!(next.grid.is_empty());
        assert_eq!(next.deaths, 1);
        assert_eq!(next.births, 0);
    }

    #[test]
    fn crowded_cell_dies() {
        let rules = GameRules::conway();
        let four = [CellColor::BLACK; 4];
        assert_eq!(rules.next_color(CellColor::BLACK, &four), CellColor::WHITE);
    }

    #[test]
    fn survivor_keeps_its_color() {
        let rules = GameRules::conway();
        let own = CellColor::new(0.9, 0.1, 0.4);
        let two = [CellColor::BLACK; 2];
        let three = [CellColor::BLACK; 3];
        assert_eq!(rules.next_color(own, &two), own);
        assert_eq!(rules.next_color(own, &three), own);
    }

    #[test]
    fn birth_blends_parent_colors() {
        let rules = GameRules::conway();
        let parents = [
            CellColor::new(1.0, 0.0, 0.0),
            CellColor::new(0.0, 1.0, 0.0),
            CellColor::new(0.0, 0.0, 1.0),
        ];
        let child = rules.next_color(CellColor::WHITE, &parents);
        for channel in child.to_array() {
            assert!((channel - 1.0 / 3.0).abs() < 1e-6);
        }
    }

    #[test]
    fn dead_cell_without_three_parents_stays_dead() {
        let rules = GameRules::conway();
        for n in [0usize, 1, 2, 4, 5, 8] {
            let parents = vec![CellColor::BLACK; n];
            assert_eq!(rules.next_color(CellColor::WHITE, &parents), CellColor::WHITE);
        }
    }

    #[test]
    fn block_is_a_fixed_point() {
        let c = CellColor::new(0.2, 0.6, 0.2);
        let grid = grid_with(4, &[(1, 1, c), (1, 2, c), (2, 1, c), (2, 2, c)]);
        let next = apply_rules(&grid, &GameRules::conway());
        assert_eq!(next.grid, grid);
        assert_eq!(next.births + next.deaths, 0);
    }

    #[test]
    fn blinker_oscillates() {
        let c = CellColor::BLACK;
        let vertical = grid_with(3, &[(0, 1, c), (1, 1, c), (2, 1, c)]);
        let horizontal = grid_with(3, &[(1, 0, c), (1, 1, c), (1, 2, c)]);

        let once = apply_rules(&vertical, &GameRules::conway());
        assert_eq!(once.grid, horizontal);
        assert_eq!(once.births, 2);
        assert_eq!(once.deaths, 2);

        let twice = apply_rules(&once.grid, &GameRules::conway());
        assert_eq!(twice.grid, vertical);
    }
}
