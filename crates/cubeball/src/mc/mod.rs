//! Metropolis acceptance for grow and shrink moves.
//!
//! Purpose
//! - Weight a validated move by the ratio of selection probabilities (area
//!   bias and degeneracy factor) times `exp(-ΔS)`, with the action
//!   `S = α·A + λ·V + ε·(V - V̄)²`.
//! - Drive one move end to end: sample a boundary face, validate, accept or
//!   reject, commit.
//!
//! A grow and the shrink that undoes it have weights whose product is 1, so
//! the chain satisfies detailed balance with respect to `exp(-S)`.
//!
//! Code cross-refs: `surgery` (validation and commit), `tuning` (feedback on
//! `λ` and `α`), `rng::RandomSource`.

pub mod tuning;

use tracing::warn;

use crate::complex::Ball;
use crate::rng::RandomSource;

/// Coupling constants and targets of the action.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Couplings {
    /// Boundary-area coupling α.
    pub alpha: f64,
    /// Volume coupling λ.
    pub lambda: f64,
    /// Strength ε of the quadratic volume fixing term.
    pub epsilon: f64,
    /// Target volume V̄.
    pub target_volume: i64,
    /// Target boundary area Ā, used only by the area controller.
    pub target_area: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Grow,
    Shrink,
}

/// Result of one attempted move. Infeasible moves are values, not errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Valid and committed; the boundary changed by `delta_area`.
    Accepted { delta_area: i32 },
    /// Valid but turned down by the Metropolis draw.
    Rejected { delta_area: i32 },
    /// The sampled face fails the topology rules.
    Invalid,
    /// Nothing to attempt (shrink of a single cube).
    NoMove,
    /// The pools cannot hold another cube and its faces.
    PoolExhausted,
}

impl MoveOutcome {
    #[inline]
    pub fn is_accepted(self) -> bool {
        matches!(self, MoveOutcome::Accepted { .. })
    }

    /// True for moves that passed validation (accepted or rejected).
    #[inline]
    pub fn is_valid(self) -> bool {
        matches!(
            self,
            MoveOutcome::Accepted { .. } | MoveOutcome::Rejected { .. }
        )
    }

    pub fn delta_area(self) -> Option<i32> {
        match self {
            MoveOutcome::Accepted { delta_area } | MoveOutcome::Rejected { delta_area } => {
                Some(delta_area)
            }
            _ => None,
        }
    }
}

/// Tally of move outcomes, used for per-sweep diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveStats {
    pub accepted: u64,
    pub rejected: u64,
    pub invalid: u64,
    pub no_move: u64,
    pub exhausted: u64,
}

impl MoveStats {
    pub fn record(&mut self, outcome: MoveOutcome) {
        match outcome {
            MoveOutcome::Accepted { .. } => self.accepted += 1,
            MoveOutcome::Rejected { .. } => self.rejected += 1,
            MoveOutcome::Invalid => self.invalid += 1,
            MoveOutcome::NoMove => self.no_move += 1,
            MoveOutcome::PoolExhausted => self.exhausted += 1,
        }
    }

    pub fn attempts(&self) -> u64 {
        self.accepted + self.rejected + self.invalid + self.no_move + self.exhausted
    }

    /// Accepted share of all attempts; 0 when nothing was attempted.
    pub fn acceptance_rate(&self) -> f64 {
        match self.attempts() {
            0 => 0.0,
            n => self.accepted as f64 / n as f64,
        }
    }
}

/// Ratio of the number of ways to undo a move to the ways to make it.
///
/// A grow with ΔA = 4 on a flat face can be undone from any of the 5 exposed
/// faces of the new cube, hence 5; the table is symmetric under reversal.
pub fn degeneracy_factor(delta_area: i32) -> f64 {
    match delta_area {
        4 => 5.0,
        2 => 2.0,
        0 => 1.0,
        -2 => 0.5,
        -4 => 0.2,
        other => panic!("area change {other} cannot come from a single move"),
    }
}

/// Ratio of face-sampling probabilities before and after the move.
#[inline]
pub fn area_bias(boundary: usize, delta_area: i32) -> f64 {
    let b = boundary as f64;
    b / (b + f64::from(delta_area))
}

/// `-ΔS` of a grow at volume `volume`.
pub fn grow_exponent(c: &Couplings, volume: usize, delta_area: i32) -> f64 {
    let v = volume as f64;
    let v_bar = c.target_volume as f64;
    -c.alpha * f64::from(delta_area) - c.lambda + c.epsilon * (2.0 * (v_bar - v) - 1.0)
}

/// `-ΔS` of a shrink at volume `volume`.
pub fn shrink_exponent(c: &Couplings, volume: usize, delta_area: i32) -> f64 {
    let v = volume as f64;
    let v_bar = c.target_volume as f64;
    -c.alpha * f64::from(delta_area) + c.lambda + c.epsilon * (2.0 * (v - v_bar) - 1.0)
}

/// Unnormalised acceptance weight of a validated move from the state
/// `(volume, boundary)`.
pub fn move_weight(
    kind: MoveKind,
    c: &Couplings,
    volume: usize,
    boundary: usize,
    delta_area: i32,
) -> f64 {
    let exponent = match kind {
        MoveKind::Grow => grow_exponent(c, volume, delta_area),
        MoveKind::Shrink => shrink_exponent(c, volume, delta_area),
    };
    degeneracy_factor(delta_area) * area_bias(boundary, delta_area) * exponent.exp()
}

/// Accept outright when `weight > 1`, otherwise against one uniform draw.
pub fn metropolis(weight: f64, rng: &mut impl RandomSource) -> bool {
    weight > 1.0 || weight > rng.uniform_real()
}

impl Ball {
    /// Attempt to glue a cube onto a random boundary face.
    pub fn perform_grow(&mut self, c: &Couplings, rng: &mut impl RandomSource) -> MoveOutcome {
        if !self.has_room(1, 5) {
            if !self.pool_warned {
                warn!(
                    capacity = self.capacity(),
                    volume = self.volume(),
                    faces = self.face_count(),
                    "object pools exhausted; grow moves are skipped"
                );
                self.pool_warned = true;
            }
            return MoveOutcome::PoolExhausted;
        }
        let face = self.random_boundary_face(rng);
        let Some(cand) = self.check_valid_grow(face) else {
            return MoveOutcome::Invalid;
        };
        let w = move_weight(
            MoveKind::Grow,
            c,
            self.volume(),
            self.boundary_len(),
            cand.delta_area,
        );
        if metropolis(w, rng) {
            self.grow_cube(cand.face);
            MoveOutcome::Accepted {
                delta_area: cand.delta_area,
            }
        } else {
            MoveOutcome::Rejected {
                delta_area: cand.delta_area,
            }
        }
    }

    /// Attempt to remove the cube behind a random boundary face.
    pub fn perform_shrink(&mut self, c: &Couplings, rng: &mut impl RandomSource) -> MoveOutcome {
        if self.volume() == 1 {
            return MoveOutcome::NoMove;
        }
        let face = self.random_boundary_face(rng);
        let Some(cand) = self.check_valid_shrink(face) else {
            return MoveOutcome::Invalid;
        };
        let w = move_weight(
            MoveKind::Shrink,
            c,
            self.volume(),
            self.boundary_len(),
            cand.delta_area,
        );
        if metropolis(w, rng) {
            self.shrink_cube(cand.face);
            MoveOutcome::Accepted {
                delta_area: cand.delta_area,
            }
        } else {
            MoveOutcome::Rejected {
                delta_area: cand.delta_area,
            }
        }
    }

    /// Grow or shrink with equal probability.
    pub fn perform_random_move(
        &mut self,
        c: &Couplings,
        rng: &mut impl RandomSource,
    ) -> (MoveKind, MoveOutcome) {
        if 0.5 > rng.uniform_real() {
            (MoveKind::Grow, self.perform_grow(c, rng))
        } else {
            (MoveKind::Shrink, self.perform_shrink(c, rng))
        }
    }
}

#[cfg(test)]
mod tests;
