//! Local surgery on the complex: attach a cube to a boundary face (grow) and
//! remove a boundary cube (shrink).
//!
//! Purpose
//! - `check_valid_*` inspect the 3×3×3 neighbourhood of the target cell and
//!   decide whether the move keeps the complex a ball with one connected
//!   boundary. They never mutate and return the (possibly re-targeted) face
//!   with the boundary-area change ΔA.
//! - `grow_cube` / `shrink_cube` commit a validated move and rebuild the
//!   boundary adjacency around it.
//!
//! Grid naming, relative to the cube `C` owning the target face with outward
//! `d` and `o = d.orthogonal()`:
//! - below/side `C+o[i]`, layer `C+o[i]+d`, above `C+o[i]+2d` for grow;
//! - corners sit between `o[i]` and `o[(i+1)%4]` on each level.
//!
//! The rules are a local sufficient condition. Global topology is never
//! recomputed.

mod grow;
mod shrink;

use crate::complex::FaceKey;

/// A move that passed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveCandidate {
    /// Face the commit must act on (may differ from the sampled face).
    pub face: FaceKey,
    /// Boundary-area change the commit will produce: one of -4, -2, 0, 2, 4.
    pub delta_area: i32,
}

#[inline]
fn next(i: usize) -> usize {
    (i + 1) % 4
}

#[inline]
fn prev(i: usize) -> usize {
    (i + 3) % 4
}

#[inline]
fn opposite(i: usize) -> usize {
    (i + 2) % 4
}
