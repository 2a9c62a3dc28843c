//! C1: decay kernel. Pure, total, deterministic functions mapping
//! (hops, age, domain-distance) to multiplicative weights. Modeled as a
//! closed, tagged set rather than dynamic dispatch on closures so the
//! propagator's hot inner loop stays monomorphic.

use serde::{Deserialize, Serialize};

pub const DEFAULT_EXPONENTIAL_LAMBDA: f64 = 0.7;
pub const DEFAULT_LINEAR_DELTA: f64 = 0.25;
pub const DEFAULT_HARD_CUTOFF_HOPS: u32 = 4;
pub const DEFAULT_RECENCY_HALF_LIFE_DAYS: f64 = 365.0;

/// The closed set of hop-decay families a query may select.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DecayFunction {
    Exponential,
    Linear,
    HardCutoff,
}

impl Default for DecayFunction {
    fn default() -> Self {
        DecayFunction::Exponential
    }
}

/// Multiplicative weight for traversing to a node `hops` edges from the
/// viewer, under `function` parameterized by `param`. `hops = 1` (a direct
/// edge) always returns `1.0` for every family.
pub fn hop_decay(function: DecayFunction, param: f64, hops: u32) -> f64 {
    if hops <= 1 {
        return 1.0;
    }
    match function {
        DecayFunction::Exponential => param.powi((hops - 1) as i32),
        DecayFunction::Linear => (1.0 - (hops - 1) as f64 * param).max(0.0),
        DecayFunction::HardCutoff => {
            if hops <= param as u32 {
                1.0
            } else {
                0.0
            }
        }
    }
}

/// Recency decay over an endorsement's age, in days, with a configurable
/// half-life. `age = 0` returns `1.0`.
pub fn recency_decay(age_days: f64, half_life_days: f64) -> f64 {
    0.5_f64.powf(age_days / half_life_days)
}

/// Domain-distance decay: `depth` is the 1-based ancestor position of the
/// declared domain within the queried domain's ancestor chain. `depth = 0`
/// (the identity case — exact match) returns `1.0`.
pub fn domain_distance_decay(depth: u32, domain_distance_factor: f64) -> f64 {
    domain_distance_factor.powi(depth as i32)
}
