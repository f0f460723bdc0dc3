//! Full structural consistency pass.
//!
//! Walks every cube, face and registry entry and reports the first violated
//! invariant. Linear in the size of the complex; never called on the move
//! path.

use std::fmt;

use crate::geom::Dir3;

use super::{Ball, FaceKey};

/// First invariant violation found by [`Ball::check_consistency`].
///
/// Cubes and faces are named by dense id, boundary faces also by bid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConsistencyError {
    /// `boundary[bid]` names a face that disagrees about its bid.
    RegistryMismatch { bid: usize, face: usize },
    /// A registered face is not flagged as boundary or has no outward axis.
    NotBoundary { face: usize },
    /// Registry size differs from the number of faces flagged as boundary.
    BoundaryCount { flagged: usize, registered: usize },
    /// An interior face still carries a bid or a non-zero outward vector.
    StaleInterior { face: usize },
    /// A boundary face's owner does not hold it in the outward direction.
    OwnerMismatch { face: usize, cube: usize },
    /// A boundary face's owner has a neighbour cube beyond the face.
    CubeBeyondBoundary { face: usize, cube: usize },
    /// A cube is missing one of its 6 faces.
    MissingCubeFace { cube: usize, dir: Dir3 },
    /// A cube lists a face that does not list the cube back.
    FaceCubeMismatch { cube: usize, face: usize, dir: Dir3 },
    /// `a` lists `b` at `offset` but `b` does not list `a` at `-offset`.
    AsymmetricNeighbor { a: usize, b: usize, offset: Dir3 },
    /// A cube near a boundary face occupies the cell the face would grow into.
    OccupiedFreeSpot { face: usize, cube: usize },
    /// A boundary face lacks an adjacent face in one of its 4 directions.
    MissingAdjacent { face: usize, dir: Dir3 },
    /// Adjacent slot set along the outward axis.
    AdjacentAlongNormal { face: usize, dir: Dir3 },
    /// An adjacent face does not point back at the face.
    BrokenBackReference { face: usize, neighbor: usize, dir: Dir3 },
    /// `2·faces != 6·cubes + boundary`.
    EulerCount {
        faces: usize,
        cubes: usize,
        boundary: usize,
    },
}

impl fmt::Display for ConsistencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ConsistencyError::*;
        match self {
            RegistryMismatch { bid, face } => {
                write!(f, "boundary slot {bid} holds face {face} with a different bid")
            }
            NotBoundary { face } => {
                write!(f, "registered face {face} is not a proper boundary face")
            }
            BoundaryCount {
                flagged,
                registered,
            } => write!(
                f,
                "{flagged} faces flagged as boundary but {registered} registered"
            ),
            StaleInterior { face } => {
                write!(f, "interior face {face} still carries boundary data")
            }
            OwnerMismatch { face, cube } => {
                write!(f, "boundary face {face} is not held by its owner cube {cube}")
            }
            CubeBeyondBoundary { face, cube } => write!(
                f,
                "cube {cube} has a neighbour beyond its boundary face {face}"
            ),
            MissingCubeFace { cube, dir } => {
                write!(f, "cube {cube} has no face in direction {}", dir.label())
            }
            FaceCubeMismatch { cube, face, dir } => write!(
                f,
                "cube {cube} lists face {face} in direction {} but the face disagrees",
                dir.label()
            ),
            AsymmetricNeighbor { a, b, offset } => write!(
                f,
                "cube {a} lists cube {b} at offset {offset} without the reverse link"
            ),
            OccupiedFreeSpot { face, cube } => write!(
                f,
                "cube {cube} occupies the free cell beyond boundary face {face}"
            ),
            MissingAdjacent { face, dir } => {
                let dir = dir.label();
                write!(f, "boundary face {face} has no adjacent face in direction {dir}")
            }
            AdjacentAlongNormal { face, dir } => {
                let dir = dir.label();
                write!(f, "boundary face {face} has an adjacent face along its normal {dir}")
            }
            BrokenBackReference {
                face,
                neighbor,
                dir,
            } => write!(
                f,
                "face {neighbor} (adjacent to {face} in direction {}) does not point back",
                dir.label()
            ),
            EulerCount {
                faces,
                cubes,
                boundary,
            } => write!(
                f,
                "face count {faces} does not match 6*{cubes} cubes + {boundary} boundary faces"
            ),
        }
    }
}

impl std::error::Error for ConsistencyError {}

impl Ball {
    /// Verify every structural invariant; `Err` carries the first violation.
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        self.check_registry()?;
        self.check_cube_faces()?;
        self.check_cube_neighbors()?;
        for bid in 0..self.boundary_len() {
            let face = self.boundary_face(bid);
            self.check_owner(face)?;
            self.check_free_spot(face)?;
            self.check_adjacency(face)?;
        }
        let (faces, cubes, boundary) = (self.face_count(), self.volume(), self.boundary_len());
        if 2 * faces != 6 * cubes + boundary {
            return Err(ConsistencyError::EulerCount {
                faces,
                cubes,
                boundary,
            });
        }
        Ok(())
    }

    /// [`Ball::check_consistency`] that panics with the violation.
    pub fn assert_consistent(&self) {
        if let Err(e) = self.check_consistency() {
            panic!("inconsistent complex: {e}");
        }
    }

    fn check_registry(&self) -> Result<(), ConsistencyError> {
        for (bid, (_, face)) in self.boundary_faces().enumerate() {
            if face.bid() != Some(bid) {
                return Err(ConsistencyError::RegistryMismatch {
                    bid,
                    face: face.id(),
                });
            }
            if !face.is_boundary() || face.cube_count() != 1 || !face.outward().is_axis_aligned() {
                return Err(ConsistencyError::NotBoundary { face: face.id() });
            }
        }
        let mut flagged = 0;
        for (_, face) in self.faces() {
            if face.is_boundary() {
                flagged += 1;
            } else if face.bid().is_some() || !face.outward().is_zero() || face.cube_count() != 2 {
                return Err(ConsistencyError::StaleInterior { face: face.id() });
            }
        }
        if flagged != self.boundary_len() {
            return Err(ConsistencyError::BoundaryCount {
                flagged,
                registered: self.boundary_len(),
            });
        }
        Ok(())
    }

    fn check_cube_faces(&self) -> Result<(), ConsistencyError> {
        for (key, cube) in self.cubes() {
            for dir in Dir3::AXES {
                let Some(f) = cube.face(dir) else {
                    return Err(ConsistencyError::MissingCubeFace {
                        cube: cube.id(),
                        dir,
                    });
                };
                // seen from the face, the cube lies opposite the face direction
                if self.face(f).cube(-dir) != Some(key) {
                    return Err(ConsistencyError::FaceCubeMismatch {
                        cube: cube.id(),
                        face: self.face(f).id(),
                        dir,
                    });
                }
            }
        }
        Ok(())
    }

    fn check_cube_neighbors(&self) -> Result<(), ConsistencyError> {
        for (key, cube) in self.cubes() {
            for (offset, other) in cube.neighbors() {
                if self.nb(other, -offset) != Some(key) {
                    return Err(ConsistencyError::AsymmetricNeighbor {
                        a: cube.id(),
                        b: self.cube(other).id(),
                        offset,
                    });
                }
            }
        }
        Ok(())
    }

    fn check_owner(&self, face: FaceKey) -> Result<(), ConsistencyError> {
        let f = self.face(face);
        let Some(owner) = f.sole_cube() else {
            return Err(ConsistencyError::NotBoundary { face: f.id() });
        };
        let d = f.outward();
        if self.face_of(owner, d) != Some(face) {
            return Err(ConsistencyError::OwnerMismatch {
                face: f.id(),
                cube: self.cube(owner).id(),
            });
        }
        if self.nb(owner, d).is_some() {
            return Err(ConsistencyError::CubeBeyondBoundary {
                face: f.id(),
                cube: self.cube(owner).id(),
            });
        }
        Ok(())
    }

    /// No cube in the owner's neighbourhood may claim the cell beyond `face`.
    fn check_free_spot(&self, face: FaceKey) -> Result<(), ConsistencyError> {
        let owner = self.owner(face);
        let d = self.outward(face);
        let o = d.orthogonal();
        for j in 0..4 {
            let next = o[(j + 1) % 4];
            // (step from owner, step from that cube back into the free cell)
            let back_links = [
                (o[j], d - o[j]),
                (o[j] + next, d - o[j] - next),
                (o[j] + d, -o[j]),
                (o[j] + next + d, -o[j] - next),
            ];
            for (there, back) in back_links {
                let Some(c) = self.nb(owner, there) else {
                    continue;
                };
                if self.nb(c, back).is_some() {
                    return Err(ConsistencyError::OccupiedFreeSpot {
                        face: self.face(face).id(),
                        cube: self.cube(c).id(),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_adjacency(&self, face: FaceKey) -> Result<(), ConsistencyError> {
        let f = self.face(face);
        let d = f.outward();
        for n in [d, -d] {
            if f.adjacent(n).is_some() {
                return Err(ConsistencyError::AdjacentAlongNormal { face: f.id(), dir: n });
            }
        }
        for o in d.orthogonal() {
            let Some(g) = f.adjacent(o) else {
                return Err(ConsistencyError::MissingAdjacent { face: f.id(), dir: o });
            };
            let other = self.face(g);
            let back_dir = if other.outward() == d {
                -o
            } else if other.outward() == o {
                d
            } else {
                -d
            };
            if !other.is_boundary() || other.adjacent(back_dir) != Some(face) {
                return Err(ConsistencyError::BrokenBackReference {
                    face: f.id(),
                    neighbor: other.id(),
                    dir: o,
                });
            }
        }
        Ok(())
    }
}
