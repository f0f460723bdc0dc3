//! The complex itself: cube and face pools plus the boundary registry.
//!
//! Low-level wiring helpers live here so the surgery code reads as a sequence
//! of named link/unlink steps. Helpers panic on any broken precondition; a
//! failure means the structure is already corrupt.

use nalgebra::Vector3;
use tracing::trace;

use crate::geom::Dir3;
use crate::rng::RandomSource;

use super::pool::Pool;
use super::types::{Cube, CubeKey, Face, FaceKey};

/// Pool bound used by [`Ball::new`], for cubes and faces alike.
pub const DEFAULT_CAPACITY: usize = 100_000;

/// A cubical ball: the sole owner of every cube and face.
#[derive(Clone, Debug)]
pub struct Ball {
    pub(crate) cubes: Pool<CubeKey, Cube>,
    pub(crate) faces: Pool<FaceKey, Face>,
    boundary: Vec<FaceKey>,
    pub(crate) pool_warned: bool,
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

impl Ball {
    /// Single seed cube at the origin with [`DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Single seed cube; both pools are bounded by `capacity`.
    ///
    /// Each of the 6 faces is a boundary face whose adjacent slots point at the
    /// 4 faces in its orthogonal directions.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity >= 6, "capacity {capacity} cannot hold a single cube");
        let mut ball = Self {
            cubes: Pool::with_capacity(capacity),
            faces: Pool::with_capacity(capacity),
            boundary: Vec::new(),
            pool_warned: false,
        };
        let cube = ball.create_cube(Vector3::zeros());
        let faces: Vec<FaceKey> = Dir3::AXES.iter().map(|_| ball.create_face()).collect();
        for (&dir, &face) in Dir3::AXES.iter().zip(&faces) {
            ball.attach_boundary_face(cube, face, dir);
        }
        for (i, &dir) in Dir3::AXES.iter().enumerate() {
            for o in dir.orthogonal() {
                let other = faces[o.axis_index()];
                ball.faces.get_mut(faces[i]).set_adjacent(o, other);
            }
        }
        ball
    }

    /// Seed cube grown into an `n×n×n` block (x fastest, then y, then z).
    pub fn with_start_size(n: usize) -> Self {
        let mut ball = Self::new();
        ball.fill_block(n);
        ball
    }

    #[inline]
    pub fn volume(&self) -> usize {
        self.cubes.len()
    }

    #[inline]
    pub fn boundary_len(&self) -> usize {
        self.boundary.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.cubes.capacity()
    }

    /// True when the pools can take `cubes` more cubes and `faces` more faces.
    #[inline]
    pub fn has_room(&self, cubes: usize, faces: usize) -> bool {
        self.cubes.has_room(cubes) && self.faces.has_room(faces)
    }

    #[inline]
    pub fn cube(&self, key: CubeKey) -> &Cube {
        self.cubes.get(key)
    }

    #[inline]
    pub fn face(&self, key: FaceKey) -> &Face {
        self.faces.get(key)
    }

    /// Key of the cube with dense id `id < volume()`.
    #[inline]
    pub fn cube_by_id(&self, id: usize) -> CubeKey {
        self.cubes.key_at(id)
    }

    /// Key of the face with dense id `id < face_count()`.
    #[inline]
    pub fn face_by_id(&self, id: usize) -> FaceKey {
        self.faces.key_at(id)
    }

    /// Face registered under boundary id `bid < boundary_len()`.
    #[inline]
    pub fn boundary_face(&self, bid: usize) -> FaceKey {
        self.boundary[bid]
    }

    /// Live cubes in dense-id order.
    pub fn cubes(&self) -> impl Iterator<Item = (CubeKey, &Cube)> + '_ {
        self.cubes.keys().iter().map(|&k| (k, self.cubes.get(k)))
    }

    /// Live faces in dense-id order.
    pub fn faces(&self) -> impl Iterator<Item = (FaceKey, &Face)> + '_ {
        self.faces.keys().iter().map(|&k| (k, self.faces.get(k)))
    }

    /// Boundary faces in registry (bid) order.
    pub fn boundary_faces(&self) -> impl Iterator<Item = (FaceKey, &Face)> + '_ {
        self.boundary.iter().map(|&k| (k, self.faces.get(k)))
    }

    /// Uniformly random boundary face; one `uniform_int` draw.
    pub fn random_boundary_face(&self, rng: &mut impl RandomSource) -> FaceKey {
        self.boundary[rng.uniform_int(self.boundary.len())]
    }

    /// True when one of the cube's faces is on the boundary.
    pub fn is_boundary_cube(&self, key: CubeKey) -> bool {
        self.cube(key)
            .faces()
            .any(|(_, f)| self.face(f).is_boundary())
    }

    // ---- pool lifecycle -------------------------------------------------

    pub(crate) fn create_cube(&mut self, coord: Vector3<i32>) -> CubeKey {
        let key = self.cubes.create();
        self.cubes.get_mut(key).coord = coord;
        key
    }

    /// New face, registered on the boundary with no cube attached yet.
    pub(crate) fn create_face(&mut self) -> FaceKey {
        let key = self.faces.create();
        self.add_face_boundary(key);
        key
    }

    pub(crate) fn delete_cube(&mut self, key: CubeKey) {
        self.cubes.delete(key);
    }

    pub(crate) fn delete_face(&mut self, key: FaceKey) {
        assert!(
            self.faces.get(key).bid.is_none(),
            "face {} is still registered on the boundary",
            self.faces.get(key).id
        );
        self.faces.delete(key);
    }

    // ---- boundary registry ----------------------------------------------

    pub(crate) fn add_face_boundary(&mut self, key: FaceKey) {
        let face = self.faces.get_mut(key);
        assert!(face.bid.is_none(), "face {} registered twice", face.id);
        face.bid = Some(self.boundary.len());
        self.boundary.push(key);
    }

    /// Swap-remove from the registry; also drops the face's adjacency.
    pub(crate) fn remove_face_boundary(&mut self, key: FaceKey) {
        let face = self.faces.get_mut(key);
        let bid = match face.bid.take() {
            Some(bid) => bid,
            None => panic!("face {} is not registered on the boundary", face.id),
        };
        face.clear_adjacent();
        self.boundary.swap_remove(bid);
        if let Some(&moved) = self.boundary.get(bid) {
            self.faces.get_mut(moved).bid = Some(bid);
        }
    }

    pub(crate) fn restore_face_boundary(&mut self, key: FaceKey, outward: Dir3) {
        self.add_face_boundary(key);
        self.faces.get_mut(key).set_outward(outward);
    }

    // ---- navigation -----------------------------------------------------

    #[inline]
    pub(crate) fn nb(&self, cube: CubeKey, offset: Dir3) -> Option<CubeKey> {
        self.cubes.get(cube).neighbor(offset)
    }

    #[inline]
    pub(crate) fn face_of(&self, cube: CubeKey, dir: Dir3) -> Option<FaceKey> {
        self.cubes.get(cube).face(dir)
    }

    /// Like [`Ball::face_of`] for slots the structure guarantees are filled.
    pub(crate) fn face_at(&self, cube: CubeKey, dir: Dir3) -> FaceKey {
        match self.face_of(cube, dir) {
            Some(f) => f,
            None => panic!("cube {} has no face in direction {dir}", self.cube(cube).id),
        }
    }

    /// Owning cube of a boundary face.
    pub(crate) fn owner(&self, face: FaceKey) -> CubeKey {
        match self.faces.get(face).sole_cube() {
            Some(c) => c,
            None => panic!("face {} has no single owning cube", self.face(face).id),
        }
    }

    #[inline]
    pub(crate) fn outward(&self, face: FaceKey) -> Dir3 {
        self.faces.get(face).outward()
    }

    pub(crate) fn adjacent_of(&self, face: FaceKey, dir: Dir3) -> FaceKey {
        match self.faces.get(face).adjacent(dir) {
            Some(f) => f,
            None => panic!(
                "boundary face {} has no adjacent face in direction {dir}",
                self.face(face).id
            ),
        }
    }

    // ---- wiring ---------------------------------------------------------

    /// Mutual neighbour slots: `b` sits at `offset` from `a`.
    pub(crate) fn link_cubes(&mut self, a: CubeKey, b: CubeKey, offset: Dir3) {
        self.cubes.get_mut(a).set_neighbor(offset, b);
        self.cubes.get_mut(b).set_neighbor(-offset, a);
    }

    pub(crate) fn unlink_cubes(&mut self, a: CubeKey, b: CubeKey, offset: Dir3) {
        self.cubes.get_mut(a).unset_neighbor(offset);
        self.cubes.get_mut(b).unset_neighbor(-offset);
    }

    /// Face-adjacent cubes sharing `face`, which already belongs to `b`.
    pub(crate) fn join_through_face(&mut self, a: CubeKey, b: CubeKey, face: FaceKey, dir: Dir3) {
        self.link_cubes(a, b, dir);
        self.cubes.get_mut(a).set_face(dir, face);
        self.faces.get_mut(face).set_cube(-dir, a);
    }

    /// Inverse of [`Ball::join_through_face`]; the face stays with `b`.
    pub(crate) fn split_through_face(&mut self, a: CubeKey, b: CubeKey, dir: Dir3) {
        self.unlink_cubes(a, b, dir);
        self.cubes.get_mut(a).unset_face(dir);
        let shared = self.face_at(b, -dir);
        self.faces.get_mut(shared).unset_cube(-dir);
    }

    /// Give `cube` a fresh boundary face facing `dir`.
    pub(crate) fn attach_boundary_face(&mut self, cube: CubeKey, face: FaceKey, dir: Dir3) {
        let f = self.faces.get_mut(face);
        f.set_outward(dir);
        f.set_cube(-dir, cube);
        self.cubes.get_mut(cube).set_face(dir, face);
    }

    pub(crate) fn detach_boundary_face(&mut self, cube: CubeKey, face: FaceKey, dir: Dir3) {
        let f = self.faces.get_mut(face);
        f.clear_outward();
        f.unset_cube(-dir);
        self.cubes.get_mut(cube).unset_face(dir);
    }

    /// `b` becomes `a`'s neighbour in `dir_a` and `a` becomes `b`'s in `dir_b`.
    pub(crate) fn link_faces(&mut self, a: FaceKey, b: FaceKey, dir_a: Dir3, dir_b: Dir3) {
        assert!(a != b, "face {} cannot be adjacent to itself", self.face(a).id);
        trace!(a = self.face(a).id, b = self.face(b).id, %dir_a, %dir_b, "link_faces");
        self.faces.get_mut(a).set_adjacent(dir_a, b);
        self.faces.get_mut(b).set_adjacent(dir_b, a);
    }
}
