//! Random cubical balls sampled by local surgery moves.
//!
//! A [`Ball`](complex::Ball) is an assembly of unit cubes glued along faces,
//! kept homeomorphic to a 3-ball with one connected boundary surface. The
//! chain grows a cube onto a boundary face or removes a boundary cube; each
//! move is validated from local adjacency alone and accepted by a Metropolis
//! rule on the action `S = α·A + λ·V + ε·(V - V̄)²`.
//!
//! Layout
//! - `geom`: lattice directions and neighbour-offset indexing.
//! - `complex`: cube/face arenas, the boundary registry, consistency checks.
//! - `surgery`: validity analysis and commit of grow/shrink.
//! - `mc`: acceptance weights, move driver, coupling feedback.
//! - `observables`, `dump`: measurements and text dumps.
//!
//! API Policy
//! - Project-internal crate; the CLI is the only consumer. Breaking changes
//!   are fine when they improve the design.

pub mod complex;
pub mod dump;
pub mod geom;
pub mod mc;
pub mod observables;
pub mod rng;
pub mod surgery;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use complex::Ball;
pub use geom::Dir3;

/// Common exports for the driver.
pub mod prelude {
    pub use crate::complex::{Ball, ConsistencyError, DEFAULT_CAPACITY};
    pub use crate::geom::Dir3;
    pub use crate::mc::tuning::{tune_area, tune_volume, TuneMode};
    pub use crate::mc::{Couplings, MoveKind, MoveOutcome, MoveStats};
    pub use crate::observables::{radius_moments, RadiusMoments};
    pub use crate::rng::RandomSource;
}
