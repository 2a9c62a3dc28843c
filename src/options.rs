//! Per-call option record and its defaults (spec §4.7). No global engine
//! state, no environment variables, no CLI — every knob travels with the
//! call.

use crate::aggregation::Aggregation;
use crate::decay::{
    DecayFunction, DEFAULT_EXPONENTIAL_LAMBDA, DEFAULT_RECENCY_HALF_LIFE_DAYS,
};
use crate::domain_resolver::DEFAULT_DOMAIN_DISTANCE_FACTOR;
use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_HOPS: u32 = 4;
pub const DEFAULT_MIN_TRUST_THRESHOLD: f64 = 0.01;
pub const DEFAULT_VERIFICATION_BOOST: f64 = 1.5;

pub const MAX_HOPS_BOUNDS: (u32, u32) = (1, 8);
pub const VERIFICATION_BOOST_BOUNDS: (f64, f64) = (1.0, 5.0);

/// Options accepted by every public facade operation. Absent fields are
/// filled from defaults by [`EngineOptions::resolve`]; a partially-specified
/// record is the normal calling convention (`EngineOptions { max_hops: Some(2),
/// ..Default::default() }`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineOptions {
    pub max_hops: Option<u32>,
    pub decay_function: Option<DecayFunction>,
    pub decay_parameter: Option<f64>,
    pub aggregation: Option<Aggregation>,
    pub min_trust_threshold: Option<f64>,
    pub verification_boost: Option<f64>,
    pub recency_half_life_days: Option<f64>,
    pub domain_distance_factor: Option<f64>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_hops: None,
            decay_function: None,
            decay_parameter: None,
            aggregation: None,
            min_trust_threshold: None,
            verification_boost: None,
            recency_half_life_days: None,
            domain_distance_factor: None,
        }
    }
}

/// The fully-resolved, bounds-checked form of [`EngineOptions`] every
/// component operates on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedOptions {
    pub max_hops: u32,
    pub decay_function: DecayFunction,
    pub decay_parameter: f64,
    pub aggregation: Aggregation,
    pub min_trust_threshold: f64,
    pub verification_boost: f64,
    pub recency_half_life_days: f64,
    pub domain_distance_factor: f64,
}

impl EngineOptions {
    /// Fill absent fields from defaults, then validate bounds.
    pub fn resolve(&self) -> EngineResult<ResolvedOptions> {
        let resolved = ResolvedOptions {
            max_hops: self.max_hops.unwrap_or(DEFAULT_MAX_HOPS),
            decay_function: self.decay_function.unwrap_or_default(),
            decay_parameter: self.decay_parameter.unwrap_or(DEFAULT_EXPONENTIAL_LAMBDA),
            aggregation: self.aggregation.unwrap_or_default(),
            min_trust_threshold: self
                .min_trust_threshold
                .unwrap_or(DEFAULT_MIN_TRUST_THRESHOLD),
            verification_boost: self
                .verification_boost
                .unwrap_or(DEFAULT_VERIFICATION_BOOST),
            recency_half_life_days: self
                .recency_half_life_days
                .unwrap_or(DEFAULT_RECENCY_HALF_LIFE_DAYS),
            domain_distance_factor: self
                .domain_distance_factor
                .unwrap_or(DEFAULT_DOMAIN_DISTANCE_FACTOR),
        };
        resolved.validate()?;
        Ok(resolved)
    }
}

impl ResolvedOptions {
    fn validate(&self) -> EngineResult<()> {
        let (min_hops, max_hops) = MAX_HOPS_BOUNDS;
        if !(min_hops..=max_hops).contains(&self.max_hops) {
            return Err(EngineError::invalid_options(format!(
                "max_hops must be in [{min_hops}, {max_hops}], got {}",
                self.max_hops
            )));
        }
        if !(0.0..=1.0).contains(&self.min_trust_threshold) {
            return Err(EngineError::invalid_options(format!(
                "min_trust_threshold must be in [0, 1], got {}",
                self.min_trust_threshold
            )));
        }
        if !(self.decay_parameter > 0.0 && self.decay_parameter <= 1.0) {
            return Err(EngineError::invalid_options(format!(
                "decay_parameter must be in (0, 1], got {}",
                self.decay_parameter
            )));
        }
        let (min_boost, max_boost) = VERIFICATION_BOOST_BOUNDS;
        if !(min_boost..=max_boost).contains(&self.verification_boost) {
            return Err(EngineError::invalid_options(format!(
                "verification_boost must be in [{min_boost}, {max_boost}], got {}",
                self.verification_boost
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_successfully() {
        let resolved = EngineOptions::default().resolve().unwrap();
        assert_eq!(resolved.max_hops, DEFAULT_MAX_HOPS);
        assert_eq!(resolved.aggregation, Aggregation::Maximum);
        assert_eq!(resolved.decay_function, DecayFunction::Exponential);
    }

    #[test]
    fn max_hops_out_of_bounds_is_rejected() {
        let options = EngineOptions {
            max_hops: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            options.resolve(),
            Err(EngineError::InvalidOptions(_))
        ));

        let options = EngineOptions {
            max_hops: Some(9),
            ..Default::default()
        };
        assert!(options.resolve().is_err());
    }

    #[test]
    fn min_trust_threshold_out_of_bounds_is_rejected() {
        let options = EngineOptions {
            min_trust_threshold: Some(-0.1),
            ..Default::default()
        };
        assert!(options.resolve().is_err());

        let options = EngineOptions {
            min_trust_threshold: Some(1.1),
            ..Default::default()
        };
        assert!(options.resolve().is_err());
    }

    #[test]
    fn decay_parameter_must_be_in_unit_interval_excluding_zero() {
        let options = EngineOptions {
            decay_parameter: Some(0.0),
            ..Default::default()
        };
        assert!(options.resolve().is_err());

        let options = EngineOptions {
            decay_parameter: Some(1.0),
            ..Default::default()
        };
        assert!(options.resolve().is_ok());
    }

    #[test]
    fn verification_boost_out_of_bounds_is_rejected() {
        let options = EngineOptions {
            verification_boost: Some(0.5),
            ..Default::default()
        };
        assert!(options.resolve().is_err());

        let options = EngineOptions {
            verification_boost: Some(5.1),
            ..Default::default()
        };
        assert!(options.resolve().is_err());
    }
}
