//! Cube and face records with slot-based adjacency.
//!
//! Kept as plain data: every cross-reference is an arena key owned by
//! [`super::Ball`]. Writers are crate-private so only the pool and the surgery
//! code can change the structure.

use nalgebra::Vector3;

use crate::geom::{Dir3, AXIS_SLOTS, NEIGHBOR_SLOTS};

use super::pool::{PoolKey, Pooled};

/// Stable arena key of a cube (unchanged while the cube is alive).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubeKey(pub(crate) u32);

/// Stable arena key of a face (unchanged while the face is alive).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceKey(pub(crate) u32);

impl PoolKey for CubeKey {
    #[inline]
    fn from_slot(slot: usize) -> Self {
        CubeKey(slot as u32)
    }
    #[inline]
    fn slot(self) -> usize {
        self.0 as usize
    }
}

impl PoolKey for FaceKey {
    #[inline]
    fn from_slot(slot: usize) -> Self {
        FaceKey(slot as u32)
    }
    #[inline]
    fn slot(self) -> usize {
        self.0 as usize
    }
}

/// A unit cube: 6 face slots by axis direction, 27 neighbour slots by offset.
#[derive(Clone, Debug)]
pub struct Cube {
    pub(crate) id: usize,
    pub(crate) coord: Vector3<i32>,
    faces: [Option<FaceKey>; AXIS_SLOTS],
    neighbors: [Option<CubeKey>; NEIGHBOR_SLOTS],
}

impl Default for Cube {
    fn default() -> Self {
        Self {
            id: usize::MAX,
            coord: Vector3::zeros(),
            faces: [None; AXIS_SLOTS],
            neighbors: [None; NEIGHBOR_SLOTS],
        }
    }
}

impl Pooled for Cube {
    fn id(&self) -> usize {
        self.id
    }
    fn set_id(&mut self, id: usize) {
        self.id = id;
    }
}

impl Cube {
    /// Dense id in `0..volume`; may change when another cube is deleted.
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Lattice coordinate of the cube's corner (diagnostic only).
    #[inline]
    pub fn coord(&self) -> Vector3<i32> {
        self.coord
    }

    #[inline]
    pub fn face(&self, dir: Dir3) -> Option<FaceKey> {
        self.faces[dir.axis_index()]
    }

    #[inline]
    pub fn neighbor(&self, offset: Dir3) -> Option<CubeKey> {
        self.neighbors[offset.neighbor_index()]
    }

    /// Occupied neighbour slots as `(offset, neighbour)`.
    pub fn neighbors(&self) -> impl Iterator<Item = (Dir3, CubeKey)> + '_ {
        self.neighbors
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.map(|c| (Dir3::from_neighbor_index(i), c)))
    }

    /// Occupied face slots as `(direction, face)`.
    pub fn faces(&self) -> impl Iterator<Item = (Dir3, FaceKey)> + '_ {
        self.faces
            .iter()
            .enumerate()
            .filter_map(|(i, f)| f.map(|f| (Dir3::from_axis_index(i), f)))
    }

    pub(crate) fn set_face(&mut self, dir: Dir3, face: FaceKey) {
        let slot = &mut self.faces[dir.axis_index()];
        assert!(
            slot.is_none(),
            "cube {} already has a face in direction {dir}",
            self.id
        );
        *slot = Some(face);
    }

    pub(crate) fn unset_face(&mut self, dir: Dir3) {
        self.faces[dir.axis_index()] = None;
    }

    pub(crate) fn set_neighbor(&mut self, offset: Dir3, cube: CubeKey) {
        let slot = &mut self.neighbors[offset.neighbor_index()];
        assert!(
            slot.is_none(),
            "cube {} already has a neighbour at offset {offset}",
            self.id
        );
        *slot = Some(cube);
    }

    pub(crate) fn unset_neighbor(&mut self, offset: Dir3) {
        self.neighbors[offset.neighbor_index()] = None;
    }
}

/// A square face shared by one (boundary) or two (interior) cubes.
///
/// Cube slots are indexed by the direction from the face to the cube.
/// Adjacent-face slots are indexed by the direction along the boundary surface
/// and are only meaningful while the face is on the boundary.
#[derive(Clone, Debug)]
pub struct Face {
    pub(crate) id: usize,
    pub(crate) bid: Option<usize>,
    boundary: bool,
    cubes: [Option<CubeKey>; AXIS_SLOTS],
    cube_count: u8,
    outward: Dir3,
    adjacent: [Option<FaceKey>; AXIS_SLOTS],
}

impl Default for Face {
    fn default() -> Self {
        Self {
            id: usize::MAX,
            bid: None,
            boundary: true,
            cubes: [None; AXIS_SLOTS],
            cube_count: 0,
            outward: Dir3::ZERO,
            adjacent: [None; AXIS_SLOTS],
        }
    }
}

impl Pooled for Face {
    fn id(&self) -> usize {
        self.id
    }
    fn set_id(&mut self, id: usize) {
        self.id = id;
    }
}

impl Face {
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Position in the boundary registry, `None` for interior faces.
    #[inline]
    pub fn bid(&self) -> Option<usize> {
        self.bid
    }

    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.boundary
    }

    /// Outward axis direction of a boundary face; zero for interior faces.
    #[inline]
    pub fn outward(&self) -> Dir3 {
        self.outward
    }

    #[inline]
    pub fn cube_count(&self) -> u8 {
        self.cube_count
    }

    #[inline]
    pub fn cube(&self, dir: Dir3) -> Option<CubeKey> {
        self.cubes[dir.axis_index()]
    }

    /// The single cube of a boundary face.
    pub fn sole_cube(&self) -> Option<CubeKey> {
        if self.boundary && self.cube_count == 1 {
            self.cubes.iter().flatten().next().copied()
        } else {
            None
        }
    }

    pub fn cubes(&self) -> impl Iterator<Item = CubeKey> + '_ {
        self.cubes.iter().flatten().copied()
    }

    #[inline]
    pub fn adjacent(&self, dir: Dir3) -> Option<FaceKey> {
        self.adjacent[dir.axis_index()]
    }

    /// Populated adjacent-face slots as `(direction, face)`.
    pub fn adjacent_faces(&self) -> impl Iterator<Item = (Dir3, FaceKey)> + '_ {
        self.adjacent
            .iter()
            .enumerate()
            .filter_map(|(i, f)| f.map(|f| (Dir3::from_axis_index(i), f)))
    }

    pub(crate) fn set_outward(&mut self, dir: Dir3) {
        assert!(dir.is_axis_aligned(), "outward direction must be an axis, got {dir}");
        self.outward = dir;
    }

    pub(crate) fn clear_outward(&mut self) {
        self.outward = Dir3::ZERO;
    }

    /// Attach a cube lying in `dir` from the face. A second cube makes the
    /// face interior and zeroes its outward direction.
    pub(crate) fn set_cube(&mut self, dir: Dir3, cube: CubeKey) {
        assert!(
            self.cube_count < 2,
            "face {} already borders two cubes",
            self.id
        );
        let slot = &mut self.cubes[dir.axis_index()];
        assert!(
            slot.is_none(),
            "face {} already has a cube in direction {dir}",
            self.id
        );
        *slot = Some(cube);
        self.cube_count += 1;
        if self.cube_count == 1 {
            self.boundary = true;
        } else {
            self.outward = Dir3::ZERO;
            self.boundary = false;
        }
    }

    pub(crate) fn unset_cube(&mut self, dir: Dir3) {
        if self.cubes[dir.axis_index()].take().is_some() {
            self.cube_count -= 1;
            if self.cube_count == 1 {
                self.boundary = true;
            }
        }
    }

    pub(crate) fn set_adjacent(&mut self, dir: Dir3, face: FaceKey) {
        self.adjacent[dir.axis_index()] = Some(face);
    }

    pub(crate) fn clear_adjacent(&mut self) {
        self.adjacent = [None; AXIS_SLOTS];
    }
}
