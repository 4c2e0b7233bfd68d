//! Neighbor resolution without wraparound.
//!
//! Each boundary case lists its neighbors explicitly and in a fixed order rather than
//! clipping a generic 3x3 window; the order is observable through `neighbors` and is
//! kept stable.

use crate::color::CellColor;
use crate::grid::Grid;

/// Up to eight neighbor coordinates, stored inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighborhood {
    coords: [(usize, usize); 8],
    len: usize,
}

impl Neighborhood {
    fn from_slice(list: &[(usize, usize)]) -> Self {
        let mut coords = [(0, 0); 8];
        coords[..list.len()].copy_from_slice(list);
        Self { coords, len: list.len() }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[(usize, usize)] {
        &self.coords[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.as_slice().iter().copied()
    }
}

/// Coordinates of the existing neighbors of `(i, j)` in a `size`×`size` grid.
///
/// `(i, j)` must lie inside the grid. A 1×1 grid has no neighbors.
pub fn neighbor_coords(size: usize, i: usize, j: usize) -> Neighborhood {
    debug_assert!(i < size && j < size, "({i}, {j}) outside {size}x{size}");
    if size <= 1 {
        return Neighborhood::from_slice(&[]);
    }
    let last = size - 1;

    match (i, j) {
        (0, 0) => Neighborhood::from_slice(&[(i, j + 1), (i + 1, j + 1), (i + 1, j)]),
        (0, j) if j == last => Neighborhood::from_slice(&[(i, j - 1), (i + 1, j - 1), (i + 1, j)]),
        (i, 0) if i == last => Neighborhood::from_slice(&[(i, j + 1), (i - 1, j + 1), (i - 1, j)]),
        (i, j) if i == last && j == last => Neighborhood::from_slice(&[(i, j - 1), (i - 1, j - 1), (i - 1, j)]),
        (0, _) => Neighborhood::from_slice(&[
            (i, j - 1),
            (i, j + 1),
            (i + 1, j),
            (i + 1, j - 1),
            (i + 1, j + 1),
        ]),
        (i, _) if i == last => Neighborhood::from_slice(&[
            (i, j - 1),
            (i, j + 1),
            (i - 1, j),
            (i - 1, j - 1),
            (i - 1, j + 1),
        ]),
        (_, 0) => Neighborhood::from_slice(&[
            (i - 1, j),
            (i + 1, j),
            (i, j + 1),
            (i - 1, j + 1),
            (i + 1, j + 1),
        ]),
        (_, j) if j == last => Neighborhood::from_slice(&[
            (i - 1, j),
            (i + 1, j),
            (i, j - 1),
            (i - 1, j - 1),
            (i + 1, j - 1),
        ]),
        _ => Neighborhood::from_slice(&[
            (i, j + 1),
            (i, j - 1),
            (i - 1, j + 1),
            (i - 1, j),
            (i - 1, j - 1),
            (i + 1, j + 1),
            (i + 1, j),
            (i + 1, j - 1),
        ]),
    }
}

/// Colors of every existing neighbor of `(i, j)`, alive or not.
pub fn neighbors(grid: &Grid, i: usize, j: usize) -> Vec<CellColor> {
    neighbor_coords(grid.size(), i, j)
        .iter()
        .filter_map(|(ni, nj)| grid.get(ni, nj))
        .collect()
}

/// Live neighbors of `(i, j)`, in resolver order.
pub fn live_neighbors(grid: &Grid, i: usize, j: usize) -> Vec<CellColor> {
    neighbor_coords(grid.size(), i, j)
        .iter()
        .filter_map(|(ni, nj)| grid.get(ni, nj))
        .filter(CellColor::is_alive)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_have_three_neighbors() {
        for size in [2, 3, 7] {
            let last = size - 1;
            for (i, j) in [(0, 0), (0, last), (last, 0), (last, last)] {
                assert_eq!(neighbor_coords(size, i, j).len(), 3, "size {size} corner ({i}, {j})");
            }
        }
    }

    #[test]
    fn edges_have_five_neighbors() {
        let size = 6;
        let last = size - 1;
        for k in 1..last {
            for (i, j) in [(0, k), (last, k), (k, 0), (k, last)] {
                assert_eq!(neighbor_coords(size, i, j).len(), 5, "edge ({i}, {j})");
            }
        }
    }

    #[test]
    fn interior_has_eight_distinct_neighbors() {
        let size = 5;
        for i in 1..size - 1 {
            for j in 1..size - 1 {
                let hood = neighbor_coords(size, i, j);
                assert_eq!(hood.len(), 8);
                let mut seen: Vec<_> = hood.iter().collect();
                seen.sort_unstable();
                seen.dedup();
                assert_eq!(seen.len(), 8);
                assert!(!seen.contains(&(i, j)));
            }
        }
    }

    #[test]
    fn every_neighbor_is_adjacent_and_in_bounds() {
        let size = 4;
        for i in 0..size {
            for j in 0..size {
                for (ni, nj) in neighbor_coords(size, i, j).iter() {
                    assert!(ni < size && nj < size);
                    assert!(ni.abs_diff(i) <= 1 && nj.abs_diff(j) <= 1);
                    assert_ne!((ni, nj), (i, j));
                }
            }
        }
    }

    #[test]
    fn boundary_lists_keep_their_order() {
        assert_eq!(neighbor_coords(4, 0, 0).as_slice(), &[(0, 1), (1, 1), (1, 0)]);
        assert_eq!(neighbor_coords(4, 0, 3).as_slice(), &[(0, 2), (1, 2), (1, 3)]);
        assert_eq!(neighbor_coords(4, 3, 0).as_slice(), &[(3, 1), (2, 1), (2, 0)]);
        assert_eq!(neighbor_coords(4, 3, 3).as_slice(), &[(3, 2), (2, 2), (2, 3)]);
        assert_eq!(
            neighbor_coords(4, 2, 0).as_slice(),
            &[(1, 0), (3, 0), (2, 1), (1, 1), (3, 1)]
        );
        assert_eq!(
            neighbor_coords(4, 1, 3).as_slice(),
            &[(0, 3), (2, 3), (1, 2), (0, 2), (2, 2)]
        );
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        assert!(neighbor_coords(1, 0, 0).is_empty());
    }

    #[test]
    fn live_neighbors_filters_dead_cells() {
        let mut grid = Grid::new(3).unwrap();
        grid.set(0, 0, CellColor::BLACK).unwrap();
        grid.set(2, 2, CellColor::new(0.5, 0.0, 0.0)).unwrap();
        assert_eq!(neighbors(&grid, 1, 1).len(), 8);
        assert_eq!(live_neighbors(&grid, 1, 1).len(), 2);
        assert_eq!(live_neighbors(&grid, 0, 2).len(), 0);
    }
}
