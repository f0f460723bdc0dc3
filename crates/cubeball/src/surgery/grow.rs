//! Grow: attach a new cube onto a boundary face.

use std::array::from_fn;

use nalgebra::Vector3;

use crate::complex::{Ball, CubeKey, FaceKey};

use super::{next, opposite, prev, MoveCandidate};

impl Ball {
    /// Decide whether a cube may be glued onto `face`.
    ///
    /// When the cell two steps above the face is already occupied the move is
    /// re-targeted to a side face of a layer cube, so the returned face can
    /// differ from the input. `None` means the move would break the ball.
    pub fn check_valid_grow(&self, face: FaceKey) -> Option<MoveCandidate> {
        let mut face = face;
        let mut base = self.owner(face);
        let mut d = self.outward(face);
        let mut o = d.orthogonal();

        let layer: [Option<CubeKey>; 4] = from_fn(|i| self.nb(base, o[i] + d));
        let top = (0..4).find_map(|i| layer[i].and_then(|l| self.nb(l, d - o[i])));
        if let Some(top) = top {
            for i in 0..4 {
                if layer[i].is_none() && self.nb(top, o[i] - d).is_some() {
                    return None;
                }
            }
            let (via, towards) = match layer {
                [Some(l), _, None, _] => (l, o[2]),
                [None, _, Some(l), _] => (l, o[0]),
                [_, Some(l), _, None] => (l, o[3]),
                [_, None, _, Some(l)] => (l, o[1]),
                _ => return None,
            };
            face = self.face_at(via, towards);
            if !self.face(face).is_boundary() {
                return None;
            }
            base = via;
            d = towards;
            o = d.orthogonal();
        }

        let below: [Option<CubeKey>; 4] = from_fn(|i| self.nb(base, o[i]));
        let layer: [Option<CubeKey>; 4] = from_fn(|i| self.nb(base, o[i] + d));
        let corner_layer: [Option<CubeKey>; 4] = from_fn(|i| self.nb(base, o[i] + o[next(i)] + d));
        let mut above: [Option<CubeKey>; 4] = from_fn(|i| layer[i].and_then(|c| self.nb(c, d)));
        let mut corner_above: [Option<CubeKey>; 4] =
            from_fn(|i| corner_layer[i].and_then(|c| self.nb(c, d)));

        // Cubes on the upper level that are only reachable through a layer cube.
        for i in 0..4 {
            let Some(l) = layer[i] else { continue };
            let (n, p) = (next(i), prev(i));
            corner_above[i] = corner_above[i].or_else(|| self.nb(l, o[n] + d));
            corner_above[p] = corner_above[p].or_else(|| self.nb(l, o[p] + d));
            above[n] = above[n].or_else(|| self.nb(l, o[n] - o[i] + d));
            above[p] = above[p].or_else(|| self.nb(l, o[p] - o[i] + d));
        }

        // Corner cubes reached through an above cube must agree with the grid.
        for i in 0..4 {
            let (n, p) = (next(i), prev(i));
            if let Some(a) = above[i] {
                if corner_above[i].is_none() {
                    corner_above[i] = self.nb(a, o[n]);
                    if let Some(ca) = corner_above[i] {
                        if above[n].is_none() && self.nb(ca, -o[i]).is_some() {
                            return None;
                        }
                    }
                }
                if corner_above[p].is_none() {
                    corner_above[p] = self.nb(a, o[p]);
                    if let Some(ca) = corner_above[p] {
                        if above[p].is_none() && self.nb(ca, -o[i]).is_some() {
                            return None;
                        }
                    }
                }
            }
            if let Some(ca) = corner_above[i] {
                if above[i].is_none() && self.nb(ca, -o[n]).is_some() {
                    return None;
                }
                if above[n].is_none() && self.nb(ca, -o[i]).is_some() {
                    return None;
                }
            }
        }

        // Edge-only contacts and tunnels.
        for i in 0..4 {
            let (n, op) = (next(i), opposite(i));
            if above[i].is_some() && layer[i].is_none() {
                return None;
            }
            if corner_layer[i].is_some() && layer[i].is_none() && layer[n].is_none() {
                return None;
            }
            if corner_above[i].is_some()
                && !(layer[i].is_some()
                    && above[i].is_some()
                    && layer[n].is_some()
                    && above[n].is_some())
            {
                return None;
            }
            if layer[i].is_some()
                && layer[op].is_some()
                && !(below[i].is_some() && below[op].is_some())
            {
                return None;
            }
        }

        let k = layer.iter().flatten().count() as i32;
        Some(MoveCandidate {
            face,
            delta_area: 4 - 2 * k,
        })
    }

    /// Commit a grow validated by [`Ball::check_valid_grow`] on `face`.
    ///
    /// Creates the cube beyond `face` and `5 - k` faces (one per side without
    /// a layer cube plus the top). Returns the new cube.
    pub(crate) fn grow_cube(&mut self, face: FaceKey) -> CubeKey {
        let base = self.owner(face);
        let d = self.outward(face);
        let o = d.orthogonal();
        let coord = self.cube(base).coord() + Vector3::from(d);
        let new = self.create_cube(coord);

        let below: [Option<CubeKey>; 4] = from_fn(|i| self.nb(base, o[i]));
        let layer: [Option<CubeKey>; 4] = from_fn(|i| self.nb(base, o[i] + d));
        let corner_below: [Option<CubeKey>; 4] = from_fn(|i| self.nb(base, o[i] + o[next(i)]));
        let corner_layer: [Option<CubeKey>; 4] = from_fn(|i| self.nb(base, o[i] + o[next(i)] + d));
        let above: [Option<CubeKey>; 4] = from_fn(|i| layer[i].and_then(|c| self.nb(c, d)));
        let mut corner_above: [Option<CubeKey>; 4] =
            from_fn(|i| corner_layer[i].and_then(|c| self.nb(c, d)));
        for i in 0..4 {
            if let Some(a) = above[i] {
                corner_above[i] = corner_above[i].or_else(|| self.nb(a, o[next(i)]));
                corner_above[prev(i)] = corner_above[prev(i)].or_else(|| self.nb(a, o[prev(i)]));
            }
        }

        let k = layer.iter().flatten().count();
        let mut fresh = [face; 5];
        for slot in fresh.iter_mut().take(5 - k) {
            *slot = self.create_face();
        }

        // The consumed face becomes the shared face between base and new.
        self.cubes.get_mut(new).set_face(-d, face);
        self.faces.get_mut(face).set_cube(d, new);
        self.link_cubes(base, new, d);
        self.attach_boundary_face(new, fresh[4 - k], d);

        let mut used = 0;
        for i in 0..4 {
            let corner = o[i] + o[next(i)];
            if let Some(c) = corner_below[i] {
                self.link_cubes(new, c, corner - d);
            }
            if let Some(c) = corner_layer[i] {
                self.link_cubes(new, c, corner);
            }
            if let Some(c) = corner_above[i] {
                self.link_cubes(new, c, corner + d);
            }
            if let Some(c) = above[i] {
                self.link_cubes(new, c, o[i] + d);
            }
            if let Some(c) = below[i] {
                self.link_cubes(new, c, o[i] - d);
            }
            match layer[i] {
                Some(l) => {
                    let shared = self.face_at(l, -o[i]);
                    self.join_through_face(new, l, shared, o[i]);
                }
                None => {
                    self.attach_boundary_face(new, fresh[used], o[i]);
                    used += 1;
                }
            }
        }

        let side: [FaceKey; 4] = from_fn(|i| self.face_at(new, o[i]));
        let top = self.face_at(new, d);
        let adjacent: [FaceKey; 4] = from_fn(|i| self.adjacent_of(face, o[i]));

        // down: fresh side faces meet the old surface below them
        for i in 0..4 {
            if layer[i].is_none() {
                let back = if below[i].is_none() { d } else { -o[i] };
                self.link_faces(side[i], adjacent[i], -d, back);
            }
        }

        // sideways: around the vertical edges of the new cube
        for i in 0..4 {
            let n = next(i);
            let back_corner = corner_layer[i].is_some();
            match (layer[i], layer[n]) {
                (None, None) => self.link_faces(side[i], side[n], o[n], o[i]),
                (None, Some(_)) => {
                    let other = self.adjacent_of(adjacent[n], o[i]);
                    let back = if back_corner { -o[i] } else { -o[n] };
                    self.link_faces(side[i], other, o[n], back);
                }
                (Some(_), None) => {
                    let other = self.adjacent_of(adjacent[i], o[n]);
                    let back = if back_corner { -o[n] } else { -o[i] };
                    self.link_faces(side[n], other, o[i], back);
                }
                (Some(_), Some(_)) => {}
            }
        }

        // up: the top face meets the fresh sides or the surface above a layer
        for i in 0..4 {
            match layer[i] {
                None => self.link_faces(top, side[i], o[i], d),
                Some(_) => {
                    let other = self.adjacent_of(side[i], d);
                    let back = if above[i].is_some() { -d } else { -o[i] };
                    self.link_faces(top, other, o[i], back);
                }
            }
        }

        self.remove_face_boundary(face);
        for i in 0..4 {
            if layer[i].is_some() {
                self.remove_face_boundary(side[i]);
            }
        }
        new
    }
}
