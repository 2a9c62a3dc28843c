//! C5: endorsement scorer. Turns a viewer's trust neighborhood and a
//! subject's endorsements into a personalized, explainable score, plus feed
//! ranking over many endorsements.

use crate::decay::recency_decay;
use crate::graph::Endorsement;
use crate::options::ResolvedOptions;
use crate::principal::Principal;
use crate::propagation::TrustNeighborhood;
use serde::{Deserialize, Serialize};

/// A qualitative read on how much of the candidate endorsement set actually
/// contributed, expressed as a fraction of `endorsement_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkCoverage {
    /// < 20% of endorsements contributed (0 total counts as sparse).
    Sparse,
    /// < 50%.
    Moderate,
    /// >= 50%.
    Dense,
}

/// One endorsement that cleared `min_trust_threshold` and contributed to a
/// [`ScoreResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    pub author: Principal,
    pub trust: f64,
    pub rating: f64,
    pub hops: u32,
    pub verified: bool,
    pub paths: Vec<Vec<Principal>>,
}

/// Human-auditable breakdown of how a score was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub summary: String,
    pub primary_path: Option<Vec<Principal>>,
    pub network_coverage: NetworkCoverage,
}

/// The outcome of scoring a single subject for a single viewer. `score` is
/// `None` when no endorsement's author cleared `min_trust_threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: Option<f64>,
    pub confidence: f64,
    pub endorsement_count: usize,
    pub network_endorsement_count: usize,
    pub top_contributors: Vec<Contributor>,
    pub explanation: Explanation,
}

/// One row of a [`crate::facade::TrustEngine::feed`] result: a single
/// endorsement plus the viewer's read on its author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub endorsement: Endorsement,
    pub author_trust: f64,
    pub hop_distance: u32,
    pub author_display_name: String,
}

/// The field a feed is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    Trust,
    Date,
    Rating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Trust
    }
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Descending
    }
}

const TOP_CONTRIBUTORS: usize = 10;

/// Stateless endorsement scorer. Carries no data of its own; every method
/// takes the neighborhood and endorsements it needs as arguments.
#[derive(Debug, Default, Clone, Copy)]
pub struct EndorsementScorer;

impl EndorsementScorer {
    pub fn new() -> Self {
        Self
    }

    /// Weighted-mean personalized score of `endorsements` (all assumed to be
    /// for the same subject) against `neighborhood`, per spec §4.5 steps 1-5.
    pub fn score(
        &self,
        endorsements: &[Endorsement],
        neighborhood: &TrustNeighborhood,
        options: &ResolvedOptions,
        now_millis: i64,
    ) -> ScoreResult {
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;
        let mut contributors: Vec<Contributor> = Vec::new();

        for endorsement in endorsements {
            let Some(entry) = neighborhood.get(&endorsement.author) else {
                continue;
            };
            if entry.trust < options.min_trust_threshold {
                continue;
            }
            let age_days = ((now_millis - endorsement.created_at).max(0) as f64) / 86_400_000.0;
            let recency = recency_decay(age_days, options.recency_half_life_days);
            let mut weight = entry.trust;
            if endorsement.is_verified() {
                weight *= options.verification_boost;
            }
            weight *= recency;

            weighted_sum += weight * endorsement.rating.score;
            total_weight += weight;
            contributors.push(Contributor {
                author: endorsement.author.clone(),
                trust: entry.trust,
                rating: endorsement.rating.score,
                hops: entry.min_hops,
                verified: endorsement.is_verified(),
                paths: entry.paths.clone(),
            });
        }

        let endorsement_count = endorsements.len();
        let network_endorsement_count = contributors.len();

        let score = if total_weight > 0.0 {
            Some(weighted_sum / total_weight)
        } else {
            None
        };

        contributors.sort_by(|a, b| b.trust.partial_cmp(&a.trust).unwrap_or(std::cmp::Ordering::Equal));
        // All paths recorded for a contributor already tie for that contributor's
        // maximal trust value (see aggregation::aggregate), so the first one
        // recorded stands in for "highest-trust path".
        let primary_path = contributors.first().and_then(|top| top.paths.first()).cloned();
        contributors.truncate(TOP_CONTRIBUTORS);

        let confidence = self.confidence(network_endorsement_count, total_weight);
        let network_coverage = self.network_coverage(network_endorsement_count, endorsement_count);
        let summary = match score {
            Some(value) => format!(
                "{network_endorsement_count}/{endorsement_count} endorsements contributed, score {value:.2}"
            ),
            None => "no endorsement author was reachable within the trust threshold".to_string(),
        };

        ScoreResult {
            score,
            confidence,
            endorsement_count,
            network_endorsement_count,
            top_contributors: contributors,
            explanation: Explanation {
                summary,
                primary_path,
                network_coverage,
            },
        }
    }

    /// Confidence grows with both the number of independent contributors and
    /// the total trust weight behind them, saturating toward `1.0`.
    fn confidence(&self, contributor_count: usize, total_weight: f64) -> f64 {
        let count_term = 1.0 - (-(contributor_count as f64) / 3.0).exp();
        let weight_term = 1.0 - (-total_weight / 2.0).exp();
        (count_term + weight_term) / 2.0
    }

    fn network_coverage(&self, network_endorsement_count: usize, endorsement_count: usize) -> NetworkCoverage {
        if endorsement_count == 0 {
            return NetworkCoverage::Sparse;
        }
        let fraction = network_endorsement_count as f64 / endorsement_count as f64;
        if fraction >= 0.5 {
            NetworkCoverage::Dense
        } else if fraction >= 0.2 {
            NetworkCoverage::Moderate
        } else {
            NetworkCoverage::Sparse
        }
    }

    /// Order `entries` by `key`/`direction`, breaking ties by the
    /// endorsement's `created_at` descending.
    pub fn rank_feed(
        &self,
        mut entries: Vec<FeedEntry>,
        key: SortKey,
        direction: SortDirection,
    ) -> Vec<FeedEntry> {
        entries.sort_by(|a, b| {
            let primary = match key {
                SortKey::Trust => a
                    .author_trust
                    .partial_cmp(&b.author_trust)
                    .unwrap_or(std::cmp::Ordering::Equal),
                SortKey::Rating => a
                    .endorsement
                    .rating
                    .score
                    .partial_cmp(&b.endorsement.rating.score)
                    .unwrap_or(std::cmp::Ordering::Equal),
                SortKey::Date => a.endorsement.created_at.cmp(&b.endorsement.created_at),
            };
            let primary = match direction {
                SortDirection::Ascending => primary,
                SortDirection::Descending => primary.reverse(),
            };
            primary.then_with(|| b.endorsement.created_at.cmp(&a.endorsement.created_at))
        });
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::NeighborEntry;
    use crate::graph::Rating;
    use crate::options::EngineOptions;
    use std::collections::HashMap;

    fn neighborhood_with(author: &str, trust: f64) -> TrustNeighborhood {
        let mut map = HashMap::new();
        map.insert(
            Principal::from(author),
            NeighborEntry {
                trust,
                paths: vec![vec![Principal::from(author)]],
                min_hops: 1,
            },
        );
        map
    }

    fn endorsement(author: &str, rating: f64, created_at: i64) -> Endorsement {
        Endorsement {
            author: Principal::from(author),
            subject: Principal::from("subject"),
            domain: crate::principal::Domain::wildcard(),
            rating: Rating::new(rating),
            content: String::new(),
            created_at,
            updated_at: created_at,
            context: None,
        }
    }

    #[test]
    fn score_is_none_with_no_reachable_endorsers() {
        let neighborhood = TrustNeighborhood::new();
        let options = EngineOptions::default().resolve().unwrap();
        let result = EndorsementScorer::new().score(
            &[endorsement("ghost", 1.0, 0)],
            &neighborhood,
            &options,
            0,
        );
        assert_eq!(result.score, None);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.network_endorsement_count, 0);
    }

    #[test]
    fn endorsers_below_min_trust_threshold_are_excluded() {
        let neighborhood = neighborhood_with("alice", 0.001);
        let options = EngineOptions::default().resolve().unwrap();
        let result = EndorsementScorer::new().score(
            &[endorsement("alice", 1.0, 0)],
            &neighborhood,
            &options,
            0,
        );
        assert_eq!(result.score, None);
    }

    #[test]
    fn score_weights_by_trust_and_ignores_unreachable_authors() {
        let neighborhood = neighborhood_with("alice", 0.8);
        let options = EngineOptions::default().resolve().unwrap();
        let endorsements = vec![endorsement("alice", 1.0, 0), endorsement("ghost", 0.0, 0)];
        let result = EndorsementScorer::new().score(&endorsements, &neighborhood, &options, 0);
        assert!((result.score.unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(result.network_endorsement_count, 1);
        assert_eq!(result.endorsement_count, 2);
    }

    #[test]
    fn recency_decay_lowers_the_contribution_of_old_endorsements() {
        let neighborhood = neighborhood_with("alice", 1.0);
        let options = EngineOptions::default().resolve().unwrap();
        let fresh = EndorsementScorer::new().score(
            &[endorsement("alice", 1.0, 0)],
            &neighborhood,
            &options,
            0,
        );
        let stale = EndorsementScorer::new().score(
            &[endorsement("alice", 1.0, 0)],
            &neighborhood,
            &options,
            365 * 86_400_000,
        );
        assert!(stale.confidence < fresh.confidence);
    }

    #[test]
    fn verification_boost_increases_effective_weight() {
        let neighborhood = neighborhood_with("alice", 1.0);
        let options = EngineOptions::default().resolve().unwrap();
        let mut verified = endorsement("alice", 1.0, 0);
        verified.context = Some(crate::graph::EndorsementContext {
            verified: true,
            relationship: None,
        });
        let unverified = endorsement("alice", 1.0, 0);

        let verified_result = EndorsementScorer::new().score(&[verified], &neighborhood, &options, 0);
        let unverified_result = EndorsementScorer::new().score(&[unverified], &neighborhood, &options, 0);
        assert!(verified_result.confidence > unverified_result.confidence);
    }

    #[test]
    fn network_coverage_reflects_fraction_of_contributing_endorsements() {
        let neighborhood = neighborhood_with("alice", 1.0);
        let options = EngineOptions::default().resolve().unwrap();
        let endorsements = vec![
            endorsement("alice", 1.0, 0),
            endorsement("ghost1", 1.0, 0),
            endorsement("ghost2", 1.0, 0),
            endorsement("ghost3", 1.0, 0),
            endorsement("ghost4", 1.0, 0),
        ];
        let result = EndorsementScorer::new().score(&endorsements, &neighborhood, &options, 0);
        assert_eq!(result.explanation.network_coverage, NetworkCoverage::Sparse);
    }

    #[test]
    fn top_contributors_are_sorted_by_trust_and_capped_at_ten() {
        let mut neighborhood = TrustNeighborhood::new();
        let mut endorsements = Vec::new();
        for i in 0..15 {
            let name = format!("author{i}");
            neighborhood.insert(
                Principal::from(name.as_str()),
                NeighborEntry {
                    trust: 0.1 + 0.01 * i as f64,
                    paths: vec![vec![Principal::from(name.as_str())]],
                    min_hops: 1,
                },
            );
            endorsements.push(endorsement(&name, 1.0, 0));
        }
        let options = EngineOptions::default().resolve().unwrap();
        let result = EndorsementScorer::new().score(&endorsements, &neighborhood, &options, 0);
        assert_eq!(result.top_contributors.len(), TOP_CONTRIBUTORS);
        assert_eq!(result.network_endorsement_count, 15);
        for pair in result.top_contributors.windows(2) {
            assert!(pair[0].trust >= pair[1].trust);
        }
    }

    #[test]
    fn rank_feed_orders_by_trust_descending_with_recency_tiebreak() {
        let scorer = EndorsementScorer::new();
        let older = endorsement("a", 1.0, 100);
        let newer = endorsement("a", 1.0, 200);
        let entries = vec![
            FeedEntry {
                endorsement: older,
                author_trust: 0.5,
                hop_distance: 1,
                author_display_name: "a".into(),
            },
            FeedEntry {
                endorsement: newer,
                author_trust: 0.5,
                hop_distance: 1,
                author_display_name: "a".into(),
            },
        ];
        let ranked = scorer.rank_feed(entries, SortKey::Trust, SortDirection::Descending);
        assert_eq!(ranked[0].endorsement.created_at, 200);
    }
}
