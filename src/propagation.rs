//! C3: bounded propagator. Breadth-first exploration of the trust graph
//! outward from a viewer, shadowing distrusted candidates, decaying weight by
//! hop and domain distance, and merging parallel paths under the chosen
//! [`Aggregation`] strategy.

use std::collections::{HashMap, VecDeque};

use log::{debug, warn};

use crate::aggregation::{aggregate, NeighborEntry};
use crate::decay::hop_decay;
use crate::domain_resolver;
use crate::error::EngineResult;
use crate::graph::GraphSource;
use crate::options::ResolvedOptions;
use crate::principal::{Domain, Principal};

/// Every node reachable from the viewer within the configured hop and trust
/// bounds, keyed by target principal. Does not include the viewer itself.
pub type TrustNeighborhood = HashMap<Principal, NeighborEntry>;

struct Frontier {
    node: Principal,
    path: Vec<Principal>,
    path_trust: f64,
    hops: u32,
}

/// Walk outward from `viewer` in `queried_domain`, bounded by
/// `options.max_hops` and pruned below `options.min_trust_threshold`.
///
/// Enqueues using the path's own multiplicative trust (`path_trust`), never
/// the aggregated neighborhood value — a node reached twice explores both
/// continuations independently, and aggregation only decides what is
/// reported, not what is explored further.
pub async fn propagate(
    source: &dyn GraphSource,
    viewer: &Principal,
    queried_domain: &Domain,
    options: &ResolvedOptions,
) -> EngineResult<TrustNeighborhood> {
    let mut neighborhood: TrustNeighborhood = HashMap::new();
    let mut queue: VecDeque<Frontier> = VecDeque::new();
    queue.push_back(Frontier {
        node: viewer.clone(),
        path: vec![viewer.clone()],
        path_trust: 1.0,
        hops: 0,
    });

    while let Some(current) = queue.pop_front() {
        if current.hops >= options.max_hops {
            continue;
        }

        let edges = source.outgoing_edges(&current.node, queried_domain).await?;
        for edge in edges {
            if edge.target == *viewer || current.path.contains(&edge.target) {
                continue;
            }
            if source
                .is_distrusted(viewer, &edge.target, queried_domain)
                .await?
            {
                continue;
            }

            let hops = current.hops + 1;
            let domain_weight =
                domain_resolver::resolve(&edge.declared_domain, queried_domain, options.domain_distance_factor);
            if domain_weight == 0.0 {
                continue;
            }
            let hop_weight = hop_decay(options.decay_function, options.decay_parameter, hops);
            let path_trust = current.path_trust * edge.weight * domain_weight * hop_weight;

            if path_trust < options.min_trust_threshold {
                continue;
            }

            let mut path = current.path.clone();
            path.push(edge.target.clone());

            let (merged, changed) = aggregate(
                neighborhood.get(&edge.target),
                path_trust,
                path.clone(),
                hops,
                options.aggregation,
            );
            if changed {
                neighborhood.insert(edge.target.clone(), merged);
            }

            queue.push_back(Frontier {
                node: edge.target,
                path,
                path_trust,
                hops,
            });
        }
    }

    debug!(
        "propagate: viewer={viewer} domain={queried_domain} neighborhood_size={}",
        neighborhood.len()
    );
    Ok(neighborhood)
}

/// Convenience wrapper returning only the resolved trust score for `target`,
/// or `0.0` if unreachable. Self-trust (`viewer == target`) is handled by the
/// facade before this is ever called.
pub async fn effective_trust(
    source: &dyn GraphSource,
    viewer: &Principal,
    target: &Principal,
    queried_domain: &Domain,
    options: &ResolvedOptions,
) -> EngineResult<f64> {
    let neighborhood = propagate(source, viewer, queried_domain, options).await?;
    match neighborhood.get(target) {
        Some(entry) => Ok(entry.trust),
        None => {
            warn!("effective_trust: {target} unreachable from {viewer} in {queried_domain}");
            Ok(0.0)
        }
    }
}
