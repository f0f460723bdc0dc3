use super::*;
use crate::geom::Dir3;
use proptest::prelude::*;
use std::collections::VecDeque;

/// Replays fixed draws and panics when a test consumes more than it scripted.
struct ScriptedSource {
    ints: VecDeque<usize>,
    reals: VecDeque<f64>,
}

impl ScriptedSource {
    fn new(ints: &[usize], reals: &[f64]) -> Self {
        Self {
            ints: ints.iter().copied().collect(),
            reals: reals.iter().copied().collect(),
        }
    }

    fn exhausted(&self) -> bool {
        self.ints.is_empty() && self.reals.is_empty()
    }
}

impl RandomSource for ScriptedSource {
    fn uniform_int(&mut self, n: usize) -> usize {
        let i = self.ints.pop_front().expect("unscripted uniform_int");
        assert!(i < n, "scripted {i} outside [0, {n})");
        i
    }

    fn uniform_real(&mut self) -> f64 {
        self.reals.pop_front().expect("unscripted uniform_real")
    }
}

fn free() -> Couplings {
    Couplings {
        alpha: 0.0,
        lambda: 0.0,
        epsilon: 0.0,
        target_volume: 0,
        target_area: 0,
    }
}

#[test]
fn degeneracy_table() {
    assert_eq!(degeneracy_factor(4), 5.0);
    assert_eq!(degeneracy_factor(2), 2.0);
    assert_eq!(degeneracy_factor(0), 1.0);
    assert_eq!(degeneracy_factor(-2), 0.5);
    assert_eq!(degeneracy_factor(-4), 0.2);
}

#[test]
#[should_panic(expected = "cannot come from a single move")]
fn odd_area_change_panics() {
    degeneracy_factor(3);
}

#[test]
fn exponents_match_action_differences() {
    let c = Couplings {
        alpha: 0.3,
        lambda: 1.1,
        epsilon: 0.05,
        target_volume: 40,
        target_area: 0,
    };
    let action = |v: f64, a: f64| c.alpha * a + c.lambda * v + c.epsilon * (v - 40.0).powi(2);
    let (v, a) = (25.0, 60.0);
    let g = grow_exponent(&c, 25, 2);
    assert!((g + (action(v + 1.0, a + 2.0) - action(v, a))).abs() < 1e-12);
    let s = shrink_exponent(&c, 25, -2);
    assert!((s + (action(v - 1.0, a - 2.0) - action(v, a))).abs() < 1e-12);
}

#[test]
fn weight_above_one_accepts_without_a_draw() {
    let mut rng = ScriptedSource::new(&[], &[]);
    assert!(metropolis(1.5, &mut rng));
    let mut rng = ScriptedSource::new(&[], &[0.3]);
    assert!(metropolis(0.5, &mut rng));
    let mut rng = ScriptedSource::new(&[], &[0.7]);
    assert!(!metropolis(0.5, &mut rng));
    assert!(rng.exhausted());
}

#[test]
fn free_grow_on_seed_is_accepted() {
    let mut ball = Ball::new();
    // w = 5 * 6/10 = 3 > 1, so only the face draw is consumed
    let mut rng = ScriptedSource::new(&[2], &[]);
    let out = ball.perform_grow(&free(), &mut rng);
    assert_eq!(out, MoveOutcome::Accepted { delta_area: 4 });
    assert!(rng.exhausted());
    assert_eq!(ball.volume(), 2);
    assert_eq!(ball.boundary_len(), 10);
    ball.assert_consistent();
}

#[test]
fn expensive_grow_is_rejected() {
    let mut ball = Ball::new();
    let c = Couplings {
        alpha: 5.0,
        ..free()
    };
    let mut rng = ScriptedSource::new(&[0], &[0.5]);
    let out = ball.perform_grow(&c, &mut rng);
    assert_eq!(out, MoveOutcome::Rejected { delta_area: 4 });
    assert!(!out.is_accepted());
    assert!(out.is_valid());
    assert_eq!(ball.volume(), 1);
    assert_eq!(ball.boundary_len(), 6);
}

#[test]
fn shrink_of_single_cube_is_no_move() {
    let mut ball = Ball::new();
    let mut rng = ScriptedSource::new(&[], &[]);
    assert_eq!(ball.perform_shrink(&free(), &mut rng), MoveOutcome::NoMove);
    assert!(rng.exhausted());
}

#[test]
fn full_pools_report_exhaustion_without_drawing() {
    let mut ball = Ball::with_capacity(6);
    let mut rng = ScriptedSource::new(&[], &[]);
    assert_eq!(ball.perform_grow(&free(), &mut rng), MoveOutcome::PoolExhausted);
    assert_eq!(ball.perform_grow(&free(), &mut rng), MoveOutcome::PoolExhausted);
    assert!(ball.pool_warned);
    assert_eq!(ball.volume(), 1);
}

#[test]
fn shrink_after_grow_returns_to_seed() {
    let mut ball = Ball::new();
    let mut rng = ScriptedSource::new(&[0], &[]);
    ball.perform_grow(&free(), &mut rng);
    // the +x face of the new cube is registered last
    let top = ball.cube(ball.cube_by_id(1)).face(Dir3::PX).unwrap();
    let bid = ball.face(top).bid().unwrap();
    // w = 0.2 * 10/6 = 1/3, so the real draw decides
    let mut rng = ScriptedSource::new(&[bid], &[0.1]);
    let out = ball.perform_shrink(&free(), &mut rng);
    assert_eq!(out, MoveOutcome::Accepted { delta_area: -4 });
    assert_eq!(ball.volume(), 1);
    ball.assert_consistent();
}

#[test]
fn random_move_picks_kind_from_first_draw() {
    let mut ball = Ball::new();
    let mut rng = ScriptedSource::new(&[], &[0.9]);
    let (kind, out) = ball.perform_random_move(&free(), &mut rng);
    assert_eq!(kind, MoveKind::Shrink);
    assert_eq!(out, MoveOutcome::NoMove);

    let mut rng = ScriptedSource::new(&[1], &[0.1]);
    let (kind, out) = ball.perform_random_move(&free(), &mut rng);
    assert_eq!(kind, MoveKind::Grow);
    assert!(out.is_accepted());
}

#[test]
fn stats_tally_outcomes() {
    let mut stats = MoveStats::default();
    assert_eq!(stats.acceptance_rate(), 0.0);
    stats.record(MoveOutcome::Accepted { delta_area: 2 });
    stats.record(MoveOutcome::Rejected { delta_area: 0 });
    stats.record(MoveOutcome::Invalid);
    stats.record(MoveOutcome::Accepted { delta_area: -2 });
    assert_eq!(stats.attempts(), 4);
    assert_eq!(stats.acceptance_rate(), 0.5);
    assert_eq!(MoveOutcome::Invalid.delta_area(), None);
}

proptest! {
    #[test]
    fn grow_and_reverse_shrink_weights_multiply_to_one(
        alpha in -2.0f64..2.0,
        lambda in -2.0f64..2.0,
        epsilon in 0.0f64..0.1,
        target in 1i64..2000,
        volume in 1usize..2000,
        boundary in 6usize..5000,
        k in 0i32..=4,
    ) {
        let delta = 4 - 2 * k;
        prop_assume!(boundary as i32 + delta > 0);
        let c = Couplings { alpha, lambda, epsilon, target_volume: target, target_area: 0 };
        let forward = move_weight(MoveKind::Grow, &c, volume, boundary, delta);
        let back = move_weight(
            MoveKind::Shrink,
            &c,
            volume + 1,
            (boundary as i32 + delta) as usize,
            -delta,
        );
        let product = forward * back;
        prop_assert!((product - 1.0).abs() < 1e-9 * product.max(1.0), "product {}", product);
    }
}
