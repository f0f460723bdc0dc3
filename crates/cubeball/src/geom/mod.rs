//! Lattice geometry primitive.
//!
//! Purpose
//! - Name the 6 face directions and 26 neighbour offsets of a unit cube and map
//!   them to fixed slot indices for O(1) array lookup.
//! - Provide the cyclic order of the 4 directions orthogonal to a face; the
//!   surgery code reads `(i+1)%4` as "next around the face".
//!
//! Code cross-refs: `complex::{Cube, Face}` slot arrays, `surgery` neighbour grids.

mod direction;

pub use direction::{Dir3, AXIS_SLOTS, CENTER_SLOT, NEIGHBOR_SLOTS};

#[cfg(test)]
mod tests;
