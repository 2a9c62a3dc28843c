//! C6: Sybil assessor. A heuristic, purely local read of a principal's 1-hop
//! subgraph — no propagation, no other collaborator access beyond the
//! pre-assembled [`SybilAnalysisInput`] bundle.

use crate::principal::Principal;
use serde::{Deserialize, Serialize};

/// One outgoing edge as seen by the Sybil assessor: only the facts it needs,
/// not the full [`crate::graph::TrustEdge`].
#[derive(Debug, Clone, PartialEq)]
pub struct LocalOutgoingEdge {
    pub target: Principal,
    pub created_at: i64,
}

/// The pre-assembled local subgraph a caller hands to [`SybilAssessor::assess`].
/// Collecting this bundle (1-hop neighbors, directed edges among them) is the
/// caller's responsibility — it is not a propagation product.
#[derive(Debug, Clone, PartialEq)]
pub struct SybilAnalysisInput {
    pub principal: Principal,
    pub created_at: i64,
    pub outgoing: Vec<LocalOutgoingEdge>,
    pub incoming_count: usize,
    /// Distinct neighbors of either direction.
    pub neighbors: Vec<Principal>,
    /// Directed edges observed directly between two neighbors (not through
    /// `principal`).
    pub edges_among_neighbors: usize,
    /// Of `outgoing`, how many targets are known to have an edge back to
    /// `principal`.
    pub reciprocated_count: usize,
}

/// The five raw local-graph indicators, pre-normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SybilIndicators {
    pub cluster_coefficient: f64,
    pub reciprocity: f64,
    pub edge_velocity: u32,
    pub path_diversity: usize,
    pub account_age_days: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SybilFlag {
    HighClusterCoefficient,
    HighReciprocity,
    RapidEdgeCreation,
    LowPathDiversity,
    NewAccount,
    NoInboundTrust,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SybilAssessment {
    pub principal: Principal,
    pub indicators: SybilIndicators,
    pub flags: Vec<SybilFlag>,
    pub risk: f64,
    pub assessed_at: i64,
}

const VELOCITY_WINDOW_DAYS: i64 = 7;
const RAPID_EDGE_CREATION_THRESHOLD: u32 = 20;
const HIGH_CLUSTER_THRESHOLD: f64 = 0.8;
const HIGH_RECIPROCITY_THRESHOLD: f64 = 0.7;
const LOW_PATH_DIVERSITY_THRESHOLD: usize = 2;
const NEW_ACCOUNT_THRESHOLD_DAYS: f64 = 30.0;

const WEIGHT_CLUSTER: f64 = 0.25;
const WEIGHT_RECIPROCITY: f64 = 0.2;
const WEIGHT_VELOCITY: f64 = 0.2;
const WEIGHT_DIVERSITY: f64 = 0.15;
const WEIGHT_AGE: f64 = 0.2;

/// Stateless Sybil risk assessor.
#[derive(Debug, Default, Clone, Copy)]
pub struct SybilAssessor;

impl SybilAssessor {
    pub fn new() -> Self {
        Self
    }

    pub fn assess(&self, input: &SybilAnalysisInput, now_millis: i64) -> SybilAssessment {
        let indicators = self.compute_indicators(input, now_millis);
        let flags = self.flags(&indicators);
        let risk = self.risk(&indicators);
        SybilAssessment {
            principal: input.principal.clone(),
            indicators,
            flags,
            risk,
            assessed_at: now_millis,
        }
    }

    fn compute_indicators(&self, input: &SybilAnalysisInput, now_millis: i64) -> SybilIndicators {
        let k = input.neighbors.len();
        let cluster_coefficient = if k < 2 {
            0.0
        } else {
            input.edges_among_neighbors as f64 / (k * (k - 1)) as f64
        };

        let reciprocity = if input.outgoing.is_empty() {
            0.0
        } else {
            input.reciprocated_count as f64 / input.outgoing.len() as f64
        };

        let velocity_cutoff = now_millis - VELOCITY_WINDOW_DAYS * 86_400_000;
        let edge_velocity = input
            .outgoing
            .iter()
            .filter(|edge| edge.created_at >= velocity_cutoff)
            .count() as u32;

        let path_diversity = input.incoming_count;

        let account_age_days = ((now_millis - input.created_at).max(0) as f64) / 86_400_000.0;

        SybilIndicators {
            cluster_coefficient,
            reciprocity,
            edge_velocity,
            path_diversity,
            account_age_days,
        }
    }

    fn flags(&self, indicators: &SybilIndicators) -> Vec<SybilFlag> {
        let mut flags = Vec::new();
        if indicators.cluster_coefficient > HIGH_CLUSTER_THRESHOLD {
            flags.push(SybilFlag::HighClusterCoefficient);
        }
        if indicators.reciprocity > HIGH_RECIPROCITY_THRESHOLD {
            flags.push(SybilFlag::HighReciprocity);
        }
        if indicators.edge_velocity > RAPID_EDGE_CREATION_THRESHOLD {
            flags.push(SybilFlag::RapidEdgeCreation);
        }
        if indicators.path_diversity < LOW_PATH_DIVERSITY_THRESHOLD {
            flags.push(SybilFlag::LowPathDiversity);
        }
        if indicators.account_age_days < NEW_ACCOUNT_THRESHOLD_DAYS {
            flags.push(SybilFlag::NewAccount);
        }
        if indicators.path_diversity == 0 {
            flags.push(SybilFlag::NoInboundTrust);
        }
        flags
    }

    /// Weighted sum of normalized indicators. Diversity and age are inverted
    /// (low values are risky) and normalized against the same thresholds
    /// that gate their flags, so a value sitting right at a flag's boundary
    /// contributes risk `1.0` from that term.
    fn risk(&self, indicators: &SybilIndicators) -> f64 {
        let cluster = indicators.cluster_coefficient.clamp(0.0, 1.0);
        let reciprocity = indicators.reciprocity.clamp(0.0, 1.0);
        let velocity = (indicators.edge_velocity as f64 / RAPID_EDGE_CREATION_THRESHOLD as f64).min(1.0);
        let diversity = 1.0 / (1.0 + indicators.path_diversity as f64);
        let age = (1.0 - indicators.account_age_days / NEW_ACCOUNT_THRESHOLD_DAYS).clamp(0.0, 1.0);

        cluster * WEIGHT_CLUSTER
            + reciprocity * WEIGHT_RECIPROCITY
            + velocity * WEIGHT_VELOCITY
            + diversity * WEIGHT_DIVERSITY
            + age * WEIGHT_AGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(name: &str) -> Principal {
        Principal::from(name)
    }

    #[test]
    fn low_activity_account_is_low_risk() {
        let input = SybilAnalysisInput {
            principal: principal("p"),
            created_at: 0,
            outgoing: vec![LocalOutgoingEdge {
                target: principal("a"),
                created_at: 0,
            }],
            incoming_count: 5,
            neighbors: vec![principal("a"), principal("b"), principal("c")],
            edges_among_neighbors: 0,
            reciprocated_count: 0,
        };
        let now = 400 * 86_400_000;
        let assessment = SybilAssessor::new().assess(&input, now);
        assert!(assessment.flags.is_empty());
        assert!(assessment.risk < 0.3);
    }

    #[test]
    fn worked_example_produces_expected_flags_and_high_risk() {
        let now = 5 * 86_400_000;
        let outgoing: Vec<LocalOutgoingEdge> = (0..25)
            .map(|i| LocalOutgoingEdge {
                target: principal(&format!("n{i}")),
                created_at: now - i * 86_400_000 / 10,
            })
            .collect();
        let neighbors: Vec<Principal> = (0..4).map(|i| principal(&format!("k{i}"))).collect();
        let input = SybilAnalysisInput {
            principal: principal("p"),
            created_at: 0,
            outgoing,
            incoming_count: 1,
            neighbors,
            edges_among_neighbors: 6,
            reciprocated_count: 22,
        };
        let assessment = SybilAssessor::new().assess(&input, now);

        assert!((assessment.indicators.cluster_coefficient - 0.5).abs() < 1e-9);
        assert!(assessment.indicators.reciprocity > 0.7);
        assert_eq!(assessment.indicators.edge_velocity, 25);
        assert_eq!(assessment.indicators.path_diversity, 1);

        assert!(assessment.flags.contains(&SybilFlag::HighReciprocity));
        assert!(assessment.flags.contains(&SybilFlag::RapidEdgeCreation));
        assert!(assessment.flags.contains(&SybilFlag::LowPathDiversity));
        assert!(assessment.flags.contains(&SybilFlag::NewAccount));
        assert!(!assessment.flags.contains(&SybilFlag::HighClusterCoefficient));
        assert!(!assessment.flags.contains(&SybilFlag::NoInboundTrust));

        assert!(assessment.risk > 0.6 && assessment.risk < 0.8);
    }

    #[test]
    fn cluster_coefficient_is_zero_with_fewer_than_two_neighbors() {
        let input = SybilAnalysisInput {
            principal: principal("p"),
            created_at: 0,
            outgoing: vec![],
            incoming_count: 0,
            neighbors: vec![principal("a")],
            edges_among_neighbors: 0,
            reciprocated_count: 0,
        };
        let assessment = SybilAssessor::new().assess(&input, 0);
        assert_eq!(assessment.indicators.cluster_coefficient, 0.0);
        assert!(assessment.flags.contains(&SybilFlag::NoInboundTrust));
    }

    #[test]
    fn reciprocity_is_zero_with_no_outgoing_edges() {
        let input = SybilAnalysisInput {
            principal: principal("p"),
            created_at: 0,
            outgoing: vec![],
            incoming_count: 3,
            neighbors: vec![principal("a"), principal("b")],
            edges_among_neighbors: 0,
            reciprocated_count: 0,
        };
        let assessment = SybilAssessor::new().assess(&input, 0);
        assert_eq!(assessment.indicators.reciprocity, 0.0);
    }
}
