//! Run phases: inflation, mixing, thermalization with coupling feedback, and
//! fixed-coupling measurement sweeps.

use anyhow::{Context, Result};
use cubeball::mc::tuning::TuneMode;
use cubeball::mc::{Couplings, MoveStats};
use cubeball::rng::RandomSource;
use cubeball::Ball;
use std::io::Write;
use tracing::{debug, info};

use crate::config::SimConfig;
use crate::output::MeasurementWriter;

/// Moves per volume-averaging window during thermalization.
pub const WINDOW: usize = 10;

/// Sweep lengths and checks of one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Schedule {
    /// Length of the inflation and of the mixing phase.
    pub inflate: usize,
    pub steps: usize,
    pub thermal: usize,
    pub sweeps: usize,
    /// Run the consistency checker after every `n`-th sweep.
    pub check_every: Option<usize>,
}

impl Schedule {
    pub fn from_config(cfg: &SimConfig, check_every: Option<usize>) -> Self {
        Self {
            inflate: cfg.target_volume.max(0) as usize,
            steps: cfg.steps,
            thermal: cfg.thermal,
            sweeps: cfg.sweeps,
            check_every: check_every.filter(|&n| n > 0),
        }
    }
}

/// Counters reported at the end of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunReport {
    pub stats: MoveStats,
    pub rows: usize,
    pub checks: usize,
    pub final_volume: usize,
    pub final_boundary: usize,
}

/// Owns the chain state; the random source and row sink are passed in.
pub struct Driver {
    pub ball: Ball,
    pub couplings: Couplings,
    pub tune: TuneMode,
    stats: MoveStats,
    checks: usize,
}

impl Driver {
    pub fn new(cfg: &SimConfig) -> Self {
        let mut ball = Ball::with_capacity(cfg.capacity);
        ball.fill_block(cfg.start_size);
        Self {
            ball,
            couplings: cfg.couplings(),
            tune: cfg.tune,
            stats: MoveStats::default(),
            checks: 0,
        }
    }

    pub fn stats(&self) -> MoveStats {
        self.stats
    }

    fn mixed_move(&mut self, rng: &mut impl RandomSource) {
        let (_, outcome) = self.ball.perform_random_move(&self.couplings, rng);
        self.stats.record(outcome);
    }

    /// `n` grow attempts, one row after each.
    pub fn inflate<W: Write>(
        &mut self,
        n: usize,
        rng: &mut impl RandomSource,
        rows: &mut MeasurementWriter<W>,
    ) -> Result<()> {
        for _ in 0..n {
            let outcome = self.ball.perform_grow(&self.couplings, rng);
            self.stats.record(outcome);
            rows.record(&self.ball, &self.couplings)?;
        }
        Ok(())
    }

    /// `n` mixed moves, one row after each.
    pub fn mix<W: Write>(
        &mut self,
        n: usize,
        rng: &mut impl RandomSource,
        rows: &mut MeasurementWriter<W>,
    ) -> Result<()> {
        for _ in 0..n {
            self.mixed_move(rng);
            rows.record(&self.ball, &self.couplings)?;
        }
        Ok(())
    }

    /// One thermalization sweep of `steps / WINDOW` windows; returns the mean
    /// volume over the last window (current volume when no window ran).
    pub fn thermal_sweep(&mut self, steps: usize, rng: &mut impl RandomSource) -> f64 {
        let mut mean = self.ball.volume() as f64;
        for _ in 0..steps / WINDOW {
            let mut sum = 0usize;
            for _ in 0..WINDOW {
                self.mixed_move(rng);
                sum += self.ball.volume();
            }
            mean = sum as f64 / WINDOW as f64;
        }
        mean
    }

    /// `steps` mixed moves with fixed couplings.
    pub fn measurement_sweep(&mut self, steps: usize, rng: &mut impl RandomSource) {
        for _ in 0..steps {
            self.mixed_move(rng);
        }
    }

    fn maybe_check(&mut self, sweep: usize, every: Option<usize>) -> Result<()> {
        let Some(n) = every else {
            return Ok(());
        };
        if (sweep + 1) % n == 0 {
            self.ball
                .check_consistency()
                .with_context(|| format!("consistency check after sweep {}", sweep + 1))?;
            self.checks += 1;
        }
        Ok(())
    }

    /// All phases in order.
    pub fn run<W: Write>(
        &mut self,
        schedule: &Schedule,
        rng: &mut impl RandomSource,
        rows: &mut MeasurementWriter<W>,
    ) -> Result<RunReport> {
        info!(
            moves = schedule.inflate,
            volume = self.ball.volume(),
            "inflation"
        );
        self.inflate(schedule.inflate, rng, rows)?;
        info!(moves = schedule.inflate, volume = self.ball.volume(), "mixing");
        self.mix(schedule.inflate, rng, rows)?;

        info!(sweeps = schedule.thermal, steps = schedule.steps, tune = %self.tune, "thermalization");
        for sweep in 0..schedule.thermal {
            let mean_volume = self.thermal_sweep(schedule.steps, rng);
            rows.record(&self.ball, &self.couplings)?;
            let (d_lambda, d_alpha) =
                self.tune
                    .apply(&mut self.couplings, mean_volume, self.ball.boundary_len());
            debug!(
                sweep,
                mean_volume,
                volume = self.ball.volume(),
                boundary = self.ball.boundary_len(),
                lambda = self.couplings.lambda,
                alpha = self.couplings.alpha,
                d_lambda,
                d_alpha,
                acceptance = self.stats.acceptance_rate(),
                "thermal sweep"
            );
            self.maybe_check(sweep, schedule.check_every)?;
        }

        info!(sweeps = schedule.sweeps, steps = schedule.steps, "measurement");
        for sweep in 0..schedule.sweeps {
            self.measurement_sweep(schedule.steps, rng);
            let m = rows.record(&self.ball, &self.couplings)?;
            debug!(
                sweep,
                volume = m.volume,
                boundary = m.boundary,
                mean_r = m.moments.mean_r,
                "measurement sweep"
            );
            self.maybe_check(schedule.thermal + sweep, schedule.check_every)?;
        }

        let report = RunReport {
            stats: self.stats,
            rows: rows.rows(),
            checks: self.checks,
            final_volume: self.ball.volume(),
            final_boundary: self.ball.boundary_len(),
        };
        info!(
            volume = report.final_volume,
            boundary = report.final_boundary,
            accepted = report.stats.accepted,
            attempts = report.stats.attempts(),
            rows = report.rows,
            "run finished"
        );
        Ok(report)
    }
}
