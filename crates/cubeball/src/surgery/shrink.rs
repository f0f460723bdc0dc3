//! Shrink: remove a cube that owns a boundary face.

use std::array::from_fn;

use crate::complex::{Ball, CubeKey, FaceKey};

use super::{next, opposite, MoveCandidate};

impl Ball {
    /// Decide whether the cube owning `face` may be removed.
    ///
    /// The removal is analysed from the side opposite the cube's bottom
    /// neighbour; when the sampled face has no cube behind it the move is
    /// re-targeted to a face that has.
    pub fn check_valid_shrink(&self, face: FaceKey) -> Option<MoveCandidate> {
        let cube = self.owner(face);
        let mut face = face;
        let mut d = self.outward(face);

        if self.nb(cube, -d).is_none() {
            let o = d.orthogonal();
            let present: [bool; 4] = from_fn(|i| self.nb(cube, o[i]).is_some());
            let towards = match present {
                [true, _, false, _] => o[2],
                [false, _, true, _] => o[0],
                [_, true, _, false] => o[3],
                [_, false, _, true] => o[1],
                _ => return None,
            };
            face = self.face_at(cube, towards);
            if !self.face(face).is_boundary() {
                return None;
            }
            d = towards;
        }

        let o = d.orthogonal();
        let layer: [Option<CubeKey>; 4] = from_fn(|i| self.nb(cube, o[i]));
        let corner_layer: [Option<CubeKey>; 4] = from_fn(|i| self.nb(cube, o[i] + o[next(i)]));
        let below: [Option<CubeKey>; 4] = from_fn(|i| self.nb(cube, o[i] - d));
        let k = layer.iter().flatten().count() as i32;

        for i in 0..4 {
            let (n, op) = (next(i), opposite(i));
            if layer[i].is_some() && below[i].is_none() {
                return None;
            }
            // the cube is a bridge between two opposite columns
            if k == 2
                && layer[i].is_some()
                && layer[op].is_some()
                && below[i].is_some()
                && below[op].is_some()
            {
                return None;
            }
            if layer[i].is_some() && layer[n].is_some() && corner_layer[i].is_none() {
                return None;
            }
        }

        Some(MoveCandidate {
            face,
            delta_area: -4 + 2 * k,
        })
    }

    /// Commit a shrink validated by [`Ball::check_valid_shrink`] on `face`.
    pub(crate) fn shrink_cube(&mut self, face: FaceKey) {
        let cube = self.owner(face);
        let d = self.outward(face);
        let o = d.orthogonal();
        let bottom_face = self.face_at(cube, -d);
        let Some(bottom_cube) = self.nb(cube, -d) else {
            panic!(
                "shrink of cube {} without a cube below face {}",
                self.cube(cube).id(),
                self.face(face).id()
            );
        };

        let layer: [Option<CubeKey>; 4] = from_fn(|i| self.nb(cube, o[i]));
        let corner_layer: [Option<CubeKey>; 4] = from_fn(|i| self.nb(cube, o[i] + o[next(i)]));
        let above: [Option<CubeKey>; 4] = from_fn(|i| self.nb(cube, o[i] + d));
        let corner_above: [Option<CubeKey>; 4] = from_fn(|i| self.nb(cube, o[i] + o[next(i)] + d));
        let below: [Option<CubeKey>; 4] = from_fn(|i| self.nb(cube, o[i] - d));
        let corner_below: [Option<CubeKey>; 4] = from_fn(|i| self.nb(cube, o[i] + o[next(i)] - d));
        let side: [FaceKey; 4] = from_fn(|i| self.face_at(cube, o[i]));
        let adjacent: [FaceKey; 4] = from_fn(|i| self.adjacent_of(face, o[i]));

        for i in 0..4 {
            let corner = o[i] + o[next(i)];
            if let Some(c) = above[i] {
                self.unlink_cubes(cube, c, o[i] + d);
            }
            if let Some(c) = corner_above[i] {
                self.unlink_cubes(cube, c, corner + d);
            }
            match layer[i] {
                Some(l) => self.split_through_face(cube, l, o[i]),
                None => self.detach_boundary_face(cube, side[i], o[i]),
            }
            if let Some(c) = corner_layer[i] {
                self.unlink_cubes(cube, c, corner);
            }
            if let Some(c) = below[i] {
                self.unlink_cubes(cube, c, o[i] - d);
            }
            if let Some(c) = corner_below[i] {
                self.unlink_cubes(cube, c, corner - d);
            }
        }
        self.split_through_face(cube, bottom_cube, -d);

        self.remove_face_boundary(face);
        for i in 0..4 {
            match layer[i] {
                Some(_) => self.restore_face_boundary(side[i], -o[i]),
                None => {
                    self.remove_face_boundary(side[i]);
                    self.delete_face(side[i]);
                }
            }
        }
        self.restore_face_boundary(bottom_face, d);

        for i in 0..4 {
            let n = next(i);
            if layer[i].is_some() {
                let back = if above[i].is_some() { -d } else { -o[i] };
                self.link_faces(side[i], adjacent[i], d, back);
            }
            match (layer[i], layer[n]) {
                (Some(_), Some(_)) => self.link_faces(side[i], side[n], o[n], o[i]),
                (Some(l), None) => match corner_layer[i] {
                    Some(c) => {
                        let other = self.face_at(c, -o[i]);
                        self.link_faces(side[i], other, o[n], -o[n]);
                    }
                    None => {
                        let other = self.face_at(l, o[n]);
                        self.link_faces(side[i], other, o[n], -o[i]);
                    }
                },
                (None, Some(l)) => match corner_layer[i] {
                    Some(c) => {
                        let other = self.face_at(c, -o[n]);
                        self.link_faces(side[n], other, o[i], -o[i]);
                    }
                    None => {
                        let other = self.face_at(l, o[i]);
                        self.link_faces(side[n], other, o[i], -o[n]);
                    }
                },
                (None, None) => {}
            }
            match (layer[i], below[i]) {
                (Some(_), _) => self.link_faces(bottom_face, side[i], o[i], -d),
                (None, Some(b)) => {
                    let other = self.face_at(b, d);
                    self.link_faces(bottom_face, other, o[i], -o[i]);
                }
                (None, None) => {
                    let other = self.face_at(bottom_cube, o[i]);
                    self.link_faces(bottom_face, other, o[i], d);
                }
            }
        }

        self.delete_face(face);
        self.delete_cube(cube);
    }
}
