//! Feedback controllers that steer the couplings towards the targets.
//!
//! Both controllers use coarse step tables: large deviations move the
//! coupling fast, small ones leave it (almost) alone.

use std::fmt;
use std::str::FromStr;

use super::Couplings;

/// Which controllers run after a thermalization sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TuneMode {
    /// Volume controller only.
    #[default]
    Volume,
    /// Volume and area controllers.
    Both,
    /// Couplings stay fixed.
    None,
}

impl TuneMode {
    /// Run the selected controllers; returns `(Δλ, Δα)`.
    pub fn apply(self, c: &mut Couplings, mean_volume: f64, boundary: usize) -> (f64, f64) {
        match self {
            TuneMode::Volume => (tune_volume(c, mean_volume), 0.0),
            TuneMode::Both => (tune_volume(c, mean_volume), tune_area(c, boundary)),
            TuneMode::None => (0.0, 0.0),
        }
    }
}

impl FromStr for TuneMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "volume" => Ok(TuneMode::Volume),
            "both" => Ok(TuneMode::Both),
            "none" => Ok(TuneMode::None),
            other => Err(format!("unknown tune mode {other:?} (expected volume|both|none)")),
        }
    }
}

impl fmt::Display for TuneMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TuneMode::Volume => "volume",
            TuneMode::Both => "both",
            TuneMode::None => "none",
        })
    }
}

/// Nudge λ so the mean volume approaches V̄; returns the change applied.
///
/// Too few cubes (V̄ above the mean) lowers λ, which makes growth cheaper.
pub fn tune_volume(c: &mut Couplings, mean_volume: f64) -> f64 {
    let diff = c.target_volume as f64 - mean_volume;
    let step = match diff.abs() {
        a if a > 100.0 => 0.2,
        a if a > 40.0 => 0.02,
        a if a > 10.0 => 0.002,
        _ => 0.0,
    };
    let delta = if diff > 0.0 { -step } else { step };
    c.lambda += delta;
    delta
}

/// Nudge α so the boundary approaches Ā; returns the change applied.
pub fn tune_area(c: &mut Couplings, boundary: usize) -> f64 {
    let diff = c.target_area - boundary as i64;
    let step = match diff.abs() {
        a if a > 100 => 1.0,
        a if a > 10 => 0.1,
        _ => 0.01,
    };
    let delta = match diff.signum() {
        1 => -step,
        -1 => step,
        _ => 0.0,
    };
    c.alpha += delta;
    delta
}
