//! C2: domain resolver.
//!
//! Computes the weight of a declared edge-domain against a queried domain.
//! The resolver is intentionally asymmetric: a specific edge does not
//! propagate trust for a more general query except via the wildcard rule.

use crate::principal::Domain;

/// Default per-level penalty applied when the declared domain is an
/// ancestor of the queried domain rather than an exact match.
pub const DEFAULT_DOMAIN_DISTANCE_FACTOR: f64 = 0.9;

/// Resolve `declared` (an edge's domain) against `queried` (the domain a
/// caller asked about), returning a multiplier in `[0, 1]`. `0.0` means the
/// edge is ineligible for this query.
pub fn resolve(declared: &Domain, queried: &Domain, domain_distance_factor: f64) -> f64 {
    if declared == queried {
        return 1.0;
    }
    if declared.is_wildcard() {
        return 1.0;
    }
    match queried
        .ancestors()
        .iter()
        .position(|ancestor| ancestor == declared)
    {
        Some(index) => domain_distance_factor.powi((index + 1) as i32),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_is_full_weight() {
        let d = Domain::new("food.restaurants.pizza");
        assert_eq!(resolve(&d, &d, DEFAULT_DOMAIN_DISTANCE_FACTOR), 1.0);
    }

    #[test]
    fn wildcard_declared_is_full_weight_for_any_query() {
        let wildcard = Domain::wildcard();
        let queried = Domain::new("food.restaurants.pizza");
        assert_eq!(
            resolve(&wildcard, &queried, DEFAULT_DOMAIN_DISTANCE_FACTOR),
            1.0
        );
    }

    #[test]
    fn ancestor_declared_gets_per_level_penalty() {
        let declared = Domain::new("food");
        let queried = Domain::new("food.restaurants.pizza");
        let weight = resolve(&declared, &queried, DEFAULT_DOMAIN_DISTANCE_FACTOR);
        assert!((weight - 0.81).abs() < 1e-9);
    }

    #[test]
    fn unrelated_declared_domain_is_ineligible() {
        let declared = Domain::new("retail.clothing");
        let queried = Domain::new("food.restaurants.pizza");
        assert_eq!(resolve(&declared, &queried, DEFAULT_DOMAIN_DISTANCE_FACTOR), 0.0);
    }

    #[test]
    fn immediate_parent_gets_single_level_penalty() {
        let declared = Domain::new("food.restaurants");
        let queried = Domain::new("food.restaurants.pizza");
        let weight = resolve(&declared, &queried, DEFAULT_DOMAIN_DISTANCE_FACTOR);
        assert!((weight - 0.9).abs() < 1e-9);
    }
}
