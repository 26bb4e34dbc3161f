//! Mapping positions onto grid cells

use crate::cluster::Cluster;
use crate::error::{NetworkError, PlacementError};
use crate::graph::Node;

/// Tiles a `width` x `height` area with square cells of side `cluster_size`.
///
/// Cells are numbered x-major: all cells of the first column (bottom to top),
/// then the next column. When a dimension is not a multiple of the cell size
/// the last column or row sticks out past the area. Positions beyond the area
/// edge are rejected even when an overhanging cell would cover them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPartitioner {
    width: u32,
    height: u32,
    cluster_size: u32,
}

impl GridPartitioner {
    pub fn new(width: u32, height: u32, cluster_size: u32) -> Result<Self, NetworkError> {
        if width == 0 || height == 0 || cluster_size == 0 {
            return Err(NetworkError::InvalidGrid {
                width,
                height,
                cluster_size,
            });
        }
        Ok(Self {
            width,
            height,
            cluster_size,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cluster_size(&self) -> u32 {
        self.cluster_size
    }

    /// Number of cell columns (along x)
    pub fn columns(&self) -> usize {
        self.width.div_ceil(self.cluster_size) as usize
    }

    /// Number of cell rows (along y)
    pub fn rows(&self) -> usize {
        self.height.div_ceil(self.cluster_size) as usize
    }

    pub fn cell_count(&self) -> usize {
        self.columns() * self.rows()
    }

    /// Instantiate every cell, numbered in x-major order
    pub fn build_clusters(&self) -> Vec<Cluster> {
        let step = self.cluster_size as usize;
        let size = self.cluster_size as f64;
        let mut clusters = Vec::with_capacity(self.cell_count());
        let mut next_id = 0u32;

        for x in (0..self.width).step_by(step) {
            for y in (0..self.height).step_by(step) {
                clusters.push(Cluster::new(next_id, x as f64, y as f64, size));
                next_id += 1;
            }
        }

        clusters
    }

    /// Cell index containing the node
    pub fn locate(&self, node: &Node) -> Result<usize, PlacementError> {
        let out_of_bounds = || PlacementError::OutOfBounds {
            node: node.id,
            x: node.x,
            y: node.y,
        };

        // Also rejects NaN coordinates
        let inside = node.x >= 0.0
            && node.x < self.width as f64
            && node.y >= 0.0
            && node.y < self.height as f64;
        if !inside {
            return Err(out_of_bounds());
        }

        let size = self.cluster_size as f64;
        let cell_x = (node.x / size).floor() as usize;
        let cell_y = (node.y / size).floor() as usize;
        if cell_x >= self.columns() || cell_y >= self.rows() {
            return Err(out_of_bounds());
        }

        let index = cell_x * self.rows() + cell_y;
        if index >= self.cell_count() {
            return Err(out_of_bounds());
        }
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64) -> Node {
        Node::new(0, x, y, 1.0, 1.0, 1.0)
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(matches!(
            GridPartitioner::new(20, 20, 0),
            Err(NetworkError::InvalidGrid { .. })
        ));
        assert!(GridPartitioner::new(0, 20, 5).is_err());
        assert!(GridPartitioner::new(20, 0, 5).is_err());
    }

    #[test]
    fn square_grid_has_sixteen_cells_in_x_major_order() {
        let grid = GridPartitioner::new(20, 20, 5).unwrap();
        let clusters = grid.build_clusters();

        assert_eq!(clusters.len(), 16);
        let ids: Vec<u32> = clusters.iter().map(|c| c.id).collect();
        assert_eq!(ids, (0..16).collect::<Vec<u32>>());
        assert_eq!((clusters[0].x, clusters[0].y), (0.0, 0.0));
        assert_eq!((clusters[1].x, clusters[1].y), (0.0, 5.0));
        assert_eq!((clusters[4].x, clusters[4].y), (5.0, 0.0));
        assert_eq!((clusters[15].x, clusters[15].y), (15.0, 15.0));
    }

    #[test]
    fn corners_map_to_first_and_last_cell() {
        let grid = GridPartitioner::new(20, 20, 5).unwrap();
        assert_eq!(grid.locate(&at(1.0, 1.0)), Ok(0));
        assert_eq!(grid.locate(&at(19.0, 19.0)), Ok(15));
    }

    #[test]
    fn located_cell_contains_the_position() {
        for (w, h, s) in [(20, 20, 5), (22, 13, 5), (30, 10, 4), (7, 7, 7)] {
            let grid = GridPartitioner::new(w, h, s).unwrap();
            let clusters = grid.build_clusters();
            assert_eq!(clusters.len(), grid.cell_count());

            let mut x = 0.0;
            while x < w as f64 {
                let mut y = 0.0;
                while y < h as f64 {
                    let idx = grid.locate(&at(x, y)).unwrap();
                    assert!(
                        clusters[idx].contains(x, y),
                        "({x}, {y}) placed in cell {idx} of {w}x{h}/{s}"
                    );
                    y += 0.75;
                }
                x += 0.75;
            }
        }
    }

    #[test]
    fn positions_outside_the_area_are_rejected() {
        let grid = GridPartitioner::new(22, 20, 5).unwrap();
        for (x, y) in [
            (-0.1, 1.0),
            (1.0, -3.0),
            (22.0, 1.0),
            (23.0, 1.0),
            (1.0, 20.0),
            (f64::NAN, 1.0),
            (1.0, f64::INFINITY),
        ] {
            assert!(
                matches!(grid.locate(&at(x, y)), Err(PlacementError::OutOfBounds { .. })),
                "({x}, {y}) should be out of bounds"
            );
        }
        // inside the area but in the overhanging last column
        assert!(grid.locate(&at(21.5, 1.0)).is_ok());
    }
}
