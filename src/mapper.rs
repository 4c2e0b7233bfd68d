//! Pointer position to grid index mapping.
//!
//! The canvas is split into `matrix_size` contiguous half-open pixel intervals. The
//! table is rebuilt from scratch whenever the grid size, the canvas size or the
//! display density changes.

/// Precomputed pixel-interval → grid-index table for one canvas axis.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateMap {
    /// `edges[k]..edges[k + 1]` is the pixel interval of index `k`; `matrix_size + 1` entries.
    edges: Vec<i64>,
    cell_size_px: f32,
}

impl CoordinateMap {
    /// Builds the table for `matrix_size` cells over `canvas_size` logical units at `density`.
    pub fn rebuild(matrix_size: usize, canvas_size: f32, density: f32) -> Self {
        let matrix_size = matrix_size.max(1);
        let cell_size_px = canvas_size * density / matrix_size as f32;
        let edges = (0..=matrix_size)
            .map(|k| (k as f32 * cell_size_px).round() as i64)
            .collect();
        log::debug!(
            "Rebuilt coordinate map: {} cells of {:.3}px (density {:.2})",
            matrix_size,
            cell_size_px,
            density
        );
        Self { edges, cell_size_px }
    }

    pub fn matrix_size(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn cell_size_px(&self) -> f32 {
        self.cell_size_px
    }

    /// Physical pixel extent covered by the table.
    pub fn canvas_px(&self) -> i64 {
        self.edges[self.edges.len() - 1]
    }

    /// Grid index containing `pixel`, or `None` when no interval holds it.
    pub fn lookup(&self, pixel: f32) -> Option<usize> {
        if !pixel.is_finite() {
            return None;
        }
        let p = pixel.floor() as i64;
        if p < self.edges[0] || p >= self.canvas_px() {
            return None;
        }
        // Last edge at or before `p`; skips empty intervals produced by rounding.
        let k = self.edges.partition_point(|&edge| edge <= p) - 1;
        Some(k.min(self.matrix_size() - 1))
    }

    /// Like [`lookup`](Self::lookup) but falls back to index 0 for unmatched pixels.
    pub fn map_pixel_to_index(&self, pixel: f32) -> usize {
        self.lookup(pixel).unwrap_or_else(|| {
            log::warn!("Pixel {pixel} outside the canvas map, falling back to index 0");
            0
        })
    }
}
