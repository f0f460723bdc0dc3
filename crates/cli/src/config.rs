//! Run configuration: a whitespace-delimited list of `key value` pairs.
//!
//! ```text
//! seed 17  A 0  V 2000  startsize 4
//! lambda 0.0  alpha 0.0  epsilon 0.01
//! steps 10000  thermal 50  sweeps 20
//! name demo
//! ```
//!
//! Line breaks carry no meaning. Repeated keys keep the last value; unknown
//! keys are ignored with a warning.

use anyhow::{Context, Result};
use cubeball::mc::tuning::TuneMode;
use cubeball::mc::Couplings;
use cubeball::prelude::DEFAULT_CAPACITY;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

const REQUIRED: [&str; 11] = [
    "seed",
    "A",
    "V",
    "startsize",
    "lambda",
    "alpha",
    "epsilon",
    "steps",
    "thermal",
    "sweeps",
    "name",
];
const OPTIONAL: [&str; 2] = ["capacity", "tune"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    OddTokenCount(usize),
    MissingKey(&'static str),
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::OddTokenCount(n) => {
                write!(f, "expected key/value pairs, found {n} tokens")
            }
            ConfigError::MissingKey(k) => write!(f, "missing required key `{k}`"),
            ConfigError::InvalidValue { key, value, reason } => {
                write!(f, "invalid value {value:?} for `{key}`: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parameters of one simulation run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimConfig {
    pub seed: u64,
    /// Target boundary area Ā (`A`).
    pub target_area: i64,
    /// Target volume V̄ (`V`); also the length of the inflation and mixing phases.
    pub target_volume: i64,
    /// Edge length of the starting block (`startsize`).
    pub start_size: usize,
    pub lambda: f64,
    pub alpha: f64,
    pub epsilon: f64,
    /// Moves per sweep.
    pub steps: usize,
    /// Thermalization sweeps (couplings tuned after each).
    pub thermal: usize,
    /// Measurement sweeps (couplings fixed).
    pub sweeps: usize,
    pub name: String,
    pub capacity: usize,
    #[serde(serialize_with = "as_display")]
    pub tune: TuneMode,
}

fn as_display<S: Serializer, T: fmt::Display>(v: &T, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(v)
}

impl SimConfig {
    pub fn couplings(&self) -> Couplings {
        Couplings {
            alpha: self.alpha,
            lambda: self.lambda,
            epsilon: self.epsilon,
            target_volume: self.target_volume,
            target_area: self.target_area,
        }
    }

    /// Read and parse a config file; errors carry the path.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        text.parse::<SimConfig>()
            .with_context(|| format!("parsing config {}", path.display()))
    }
}

impl FromStr for SimConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        if tokens.len() % 2 != 0 {
            return Err(ConfigError::OddTokenCount(tokens.len()));
        }
        let dict: HashMap<&str, &str> = tokens.chunks(2).map(|kv| (kv[0], kv[1])).collect();
        for key in dict.keys() {
            if !REQUIRED.contains(key) && !OPTIONAL.contains(key) {
                tracing::warn!(key, "ignoring unknown config key");
            }
        }
        let get = |key: &'static str| dict.get(key).copied().ok_or(ConfigError::MissingKey(key));

        let cfg = SimConfig {
            seed: parse(get("seed")?, "seed")?,
            target_area: parse(get("A")?, "A")?,
            target_volume: parse(get("V")?, "V")?,
            start_size: parse(get("startsize")?, "startsize")?,
            lambda: parse(get("lambda")?, "lambda")?,
            alpha: parse(get("alpha")?, "alpha")?,
            epsilon: parse(get("epsilon")?, "epsilon")?,
            steps: parse(get("steps")?, "steps")?,
            thermal: parse(get("thermal")?, "thermal")?,
            sweeps: parse(get("sweeps")?, "sweeps")?,
            name: get("name")?.to_string(),
            capacity: match dict.get("capacity") {
                Some(v) => parse(v, "capacity")?,
                None => DEFAULT_CAPACITY,
            },
            tune: match dict.get("tune") {
                Some(v) => parse(v, "tune")?,
                None => TuneMode::default(),
            },
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

fn parse<T>(value: &str, key: &'static str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

impl SimConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &'static str, value: String, reason: &str| ConfigError::InvalidValue {
            key,
            value,
            reason: reason.to_string(),
        };
        if self.target_volume < 0 {
            return Err(invalid("V", self.target_volume.to_string(), "must be >= 0"));
        }
        if self.capacity < 6 {
            return Err(invalid("capacity", self.capacity.to_string(), "must be >= 6"));
        }
        if self.start_size.checked_pow(3).map_or(true, |n| n > self.capacity) {
            return Err(invalid(
                "startsize",
                self.start_size.to_string(),
                "block does not fit into the pool capacity",
            ));
        }
        if self.name.contains(['/', '\\']) {
            return Err(invalid("name", self.name.clone(), "must not contain path separators"));
        }
        Ok(())
    }
}
