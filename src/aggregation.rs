//! C4: aggregator. Combines multiple paths to the same node under a chosen
//! strategy. Modeled as a closed, tagged set of pure merge functions, not
//! dynamic dispatch, for the same monomorphism reason as the decay kernels.

use crate::principal::Principal;
use serde::{Deserialize, Serialize};

/// One entry of a [`crate::propagation::TrustNeighborhood`].
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborEntry {
    pub trust: f64,
    pub paths: Vec<Vec<Principal>>,
    pub min_hops: u32,
}

/// The closed set of path-aggregation strategies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Aggregation {
    /// `max(existing, incoming)`; update only on strict improvement or a
    /// tie (ties retain both paths, per the engine's tie-breaking rule).
    Maximum,
    /// `1 - (1 - existing)(1 - incoming)`, treating paths as independent
    /// evidence — an upper bound on correlated OR. Always updates.
    Probabilistic,
    /// `min(1, existing + incoming)`, for diagnostic use. Always updates.
    Sum,
}

impl Default for Aggregation {
    fn default() -> Self {
        Aggregation::Maximum
    }
}

/// Merge an incoming path's trust into a node that has no prior entry, or
/// fold it into an existing one. Returns the new entry and whether it
/// differs from `existing` (the propagator only overwrites and re-enqueues
/// when this is `true`).
pub fn aggregate(
    existing: Option<&NeighborEntry>,
    incoming_trust: f64,
    incoming_path: Vec<Principal>,
    hops: u32,
    strategy: Aggregation,
) -> (NeighborEntry, bool) {
    let Some(existing) = existing else {
        return (
            NeighborEntry {
                trust: incoming_trust,
                paths: vec![incoming_path],
                min_hops: hops,
            },
            true,
        );
    };

    match strategy {
        Aggregation::Maximum => {
            if incoming_trust > existing.trust {
                (
                    NeighborEntry {
                        trust: incoming_trust,
                        paths: vec![incoming_path],
                        min_hops: hops,
                    },
                    true,
                )
            } else if incoming_trust == existing.trust {
                let mut paths = existing.paths.clone();
                paths.push(incoming_path);
                (
                    NeighborEntry {
                        trust: existing.trust,
                        paths,
                        min_hops: existing.min_hops.min(hops),
                    },
                    true,
                )
            } else {
                (existing.clone(), false)
            }
        }
        Aggregation::Probabilistic | Aggregation::Sum => {
            let merged_trust = merge_trust(existing.trust, incoming_trust, strategy);
            let mut paths = existing.paths.clone();
            paths.push(incoming_path);
            (
                NeighborEntry {
                    trust: merged_trust,
                    paths,
                    min_hops: existing.min_hops.min(hops),
                },
                true,
            )
        }
    }
}

/// The scalar merge rule alone, exposed for direct testing against the
/// worked examples in spec §8.
pub fn merge_trust(existing: f64, incoming: f64, strategy: Aggregation) -> f64 {
    match strategy {
        Aggregation::Maximum => existing.max(incoming),
        Aggregation::Probabilistic => 1.0 - (1.0 - existing) * (1.0 - incoming),
        Aggregation::Sum => (existing + incoming).min(1.0),
    }
}
