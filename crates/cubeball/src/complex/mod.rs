//! Cubical cell complex.
//!
//! Purpose
//! - Hold the cubes and faces of a ball in two fixed-capacity pools addressed
//!   by stable keys, with dense ids compacted on deletion.
//! - Keep the boundary registry: every boundary face sits at `boundary[bid]`,
//!   so a uniformly random boundary face costs one draw.
//! - Check the whole structure on demand ([`Ball::check_consistency`]).
//!
//! Orientation conventions
//! - A cube's face slot `dir` holds the face on its `dir` side.
//! - A face's cube slot `dir` holds the cube lying in `dir` from the face, so
//!   a cube's face at `dir` lists the cube at `-dir`.
//! - A boundary face with outward `d` keeps 4 adjacent faces, one per
//!   direction in `d.orthogonal()`.
//!
//! Code cross-refs: `surgery` (the only mutator besides construction),
//! `mc` (move driver), `dump` (diagnostic files).

mod ball;
mod checks;
mod init;
pub(crate) mod pool;
mod types;

pub use ball::{Ball, DEFAULT_CAPACITY};
pub use checks::ConsistencyError;
pub use types::{Cube, CubeKey, Face, FaceKey};

#[cfg(test)]
mod tests;
