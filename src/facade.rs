//! C7: engine facade. The only entry point external code should use — every
//! other module is reachable but exists to make this layer's behavior
//! explainable and testable in isolation.

use std::collections::HashMap;

use log::{debug, warn};

use crate::error::EngineResult;
use crate::graph::{Endorsement, GraphSource};
use crate::metrics;
use crate::options::EngineOptions;
use crate::principal::{Domain, Principal};
use crate::propagation::{self, TrustNeighborhood};
use crate::scoring::{EndorsementScorer, FeedEntry, ScoreResult, SortDirection, SortKey};
use crate::sybil::{SybilAnalysisInput, SybilAssessment, SybilAssessor};
use crate::time::{SystemTimeProvider, TimeProvider};

/// Result of [`TrustEngine::effective_trust`]: the resolved trust value, the
/// paths that produced it, and the shortest hop count among them. `hops` is
/// `-1` when `target` is unreachable — there is no path to measure.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveTrustResult {
    pub trust: f64,
    pub paths: Vec<Vec<Principal>>,
    pub hops: i64,
}

/// Owns no graph state and no mutable per-query state — only an immutable
/// clock abstraction, swappable for deterministic tests via
/// [`TrustEngine::with_time_provider`].
pub struct TrustEngine {
    time_provider: Box<dyn TimeProvider>,
    scorer: EndorsementScorer,
    sybil: SybilAssessor,
}

impl Default for TrustEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TrustEngine {
    pub fn new() -> Self {
        Self::with_time_provider(SystemTimeProvider)
    }

    pub fn with_time_provider(time_provider: impl TimeProvider + 'static) -> Self {
        Self {
            time_provider: Box::new(time_provider),
            scorer: EndorsementScorer::new(),
            sybil: SybilAssessor::new(),
        }
    }

    /// Trust of `target` as perceived by `viewer` in `domain`. `viewer ==
    /// target` short-circuits to `{1.0, [[viewer]], 0}` without touching the
    /// collaborator — a principal trusts itself completely by definition.
    pub async fn effective_trust(
        &self,
        source: &dyn GraphSource,
        viewer: &Principal,
        target: &Principal,
        domain: &Domain,
        options: &EngineOptions,
    ) -> EngineResult<EffectiveTrustResult> {
        metrics::EFFECTIVE_TRUST_QUERIES.inc();
        if viewer == target {
            return Ok(EffectiveTrustResult {
                trust: 1.0,
                paths: vec![vec![viewer.clone()]],
                hops: 0,
            });
        }

        let resolved = options.resolve()?;
        let neighborhood = propagation::propagate(source, viewer, domain, &resolved).await?;
        Ok(match neighborhood.get(target) {
            Some(entry) => EffectiveTrustResult {
                trust: entry.trust,
                paths: entry.paths.clone(),
                hops: entry.min_hops as i64,
            },
            None => {
                warn!("effective_trust: {target} unreachable from {viewer} in {domain}");
                EffectiveTrustResult {
                    trust: 0.0,
                    paths: Vec::new(),
                    hops: -1,
                }
            }
        })
    }

    /// The full trust neighborhood reachable from `viewer` in `domain`.
    pub async fn trust_neighborhood(
        &self,
        source: &dyn GraphSource,
        viewer: &Principal,
        domain: &Domain,
        options: &EngineOptions,
    ) -> EngineResult<TrustNeighborhood> {
        metrics::EFFECTIVE_TRUST_QUERIES.inc();
        let resolved = options.resolve()?;
        let neighborhood = propagation::propagate(source, viewer, domain, &resolved).await?;
        metrics::LAST_NEIGHBORHOOD_SIZE.set(neighborhood.len() as i64);
        debug!(
            "trust_neighborhood: viewer={viewer} domain={domain} size={}",
            neighborhood.len()
        );
        Ok(neighborhood)
    }

    /// Personalized score of `subject` for `viewer`, from `endorsements`
    /// (expected to all be authored about `subject`; callers filter
    /// upstream).
    pub async fn personalized_score(
        &self,
        source: &dyn GraphSource,
        viewer: &Principal,
        subject: &Principal,
        domain: &Domain,
        endorsements: &[Endorsement],
        options: &EngineOptions,
    ) -> EngineResult<ScoreResult> {
        let resolved = options.resolve()?;
        let neighborhood = propagation::propagate(source, viewer, domain, &resolved).await?;
        metrics::SCORE_QUERIES.inc();
        let now = self.time_provider.now_millis();
        let result = self.scorer.score(endorsements, &neighborhood, &resolved, now);
        debug!(
            "personalized_score: viewer={viewer} subject={subject} score={:?} confidence={:.3}",
            result.score, result.confidence
        );
        Ok(result)
    }

    /// Score many subjects for the same viewer, building the trust
    /// neighborhood exactly once and reusing it across all of them.
    pub async fn personalized_scores_batch(
        &self,
        source: &dyn GraphSource,
        viewer: &Principal,
        subjects: &[(Principal, Vec<Endorsement>)],
        domain: &Domain,
        options: &EngineOptions,
    ) -> EngineResult<HashMap<Principal, ScoreResult>> {
        let resolved = options.resolve()?;
        let neighborhood = propagation::propagate(source, viewer, domain, &resolved).await?;
        let now = self.time_provider.now_millis();

        let mut results = HashMap::with_capacity(subjects.len());
        for (subject, endorsements) in subjects {
            metrics::SCORE_QUERIES.inc();
            let result = self.scorer.score(endorsements, &neighborhood, &resolved, now);
            results.insert(subject.clone(), result);
        }
        Ok(results)
    }

    /// Network-wide endorsement listing: a simple projection of the scorer
    /// over every endorsement whose author is in the viewer's trust
    /// neighborhood (endorsements from unreachable authors are dropped, not
    /// scored at zero).
    pub async fn feed(
        &self,
        source: &dyn GraphSource,
        viewer: &Principal,
        endorsements: &[Endorsement],
        domain: &Domain,
        options: &EngineOptions,
        key: SortKey,
        direction: SortDirection,
    ) -> EngineResult<Vec<FeedEntry>> {
        let resolved = options.resolve()?;
        let neighborhood = propagation::propagate(source, viewer, domain, &resolved).await?;

        let entries: Vec<FeedEntry> = endorsements
            .iter()
            .filter_map(|endorsement| {
                let entry = neighborhood.get(&endorsement.author)?;
                Some(FeedEntry {
                    endorsement: endorsement.clone(),
                    author_trust: entry.trust,
                    hop_distance: entry.min_hops,
                    author_display_name: endorsement.author.to_string(),
                })
            })
            .collect();
        metrics::SCORE_QUERIES.inc_by(entries.len() as u64);

        Ok(self.scorer.rank_feed(entries, key, direction))
    }

    /// Heuristic Sybil risk assessment. Purely local to the pre-assembled
    /// `input` bundle — performs no propagation and is therefore
    /// synchronous, unlike every other public operation.
    pub fn assess_sybil(&self, input: &SybilAnalysisInput) -> SybilAssessment {
        metrics::SYBIL_ASSESSMENTS.inc();
        let now = self.time_provider.now_millis();
        let assessment = self.sybil.assess(input, now);
        if !assessment.flags.is_empty() {
            debug!(
                "assess_sybil: principal={} risk={:.3} flags={:?}",
                assessment.principal, assessment.risk, assessment.flags
            );
        }
        assessment
    }
}
