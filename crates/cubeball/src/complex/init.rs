//! Start configurations.

use tracing::debug;

use crate::geom::Dir3;

use super::Ball;

impl Ball {
    /// Grow the seed cube into an `n×n×n` block by direct commits.
    ///
    /// Cubes are added row by row, x fastest, then y, then z, each glued onto
    /// the previously placed cube of its row, column or layer. Dense ids
    /// therefore follow `z*n² + y*n + x`. `n <= 1` leaves the seed alone.
    pub fn fill_block(&mut self, n: usize) {
        assert_eq!(self.volume(), 1, "fill_block starts from the seed cube");
        if n <= 1 {
            return;
        }
        assert!(
            n * n * n <= self.capacity(),
            "a {n}^3 block does not fit into capacity {}",
            self.capacity()
        );
        for z in 0..n {
            for y in 0..n {
                for x in 0..n {
                    let (base, dir) = match (x, y, z) {
                        (0, 0, 0) => continue,
                        (0, 0, z) => ((z - 1) * n * n, Dir3::PZ),
                        (0, y, z) => (z * n * n + (y - 1) * n, Dir3::PY),
                        (x, y, z) => (z * n * n + y * n + x - 1, Dir3::PX),
                    };
                    let face = self.face_at(self.cube_by_id(base), dir);
                    self.grow_cube(face);
                }
            }
        }
        debug!(
            n,
            volume = self.volume(),
            boundary = self.boundary_len(),
            "start block ready"
        );
    }
}
