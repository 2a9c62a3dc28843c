//! Process-wide observability counters, in the pattern the rest of this
//! lineage uses for its reputation subsystem: `prometheus_client` types
//! behind `once_cell::sync::Lazy` statics, updated inline by the facade.

use once_cell::sync::Lazy;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::gauge::Gauge;

/// Counts calls to `effective_trust` and `trust_neighborhood`.
pub static EFFECTIVE_TRUST_QUERIES: Lazy<Counter> = Lazy::new(Counter::default);

/// Counts calls to `personalized_score` and `personalized_scores_batch`
/// (one increment per subject scored).
pub static SCORE_QUERIES: Lazy<Counter> = Lazy::new(Counter::default);

/// Counts calls to `assess_sybil`.
pub static SYBIL_ASSESSMENTS: Lazy<Counter> = Lazy::new(Counter::default);

/// Size of the most recently built trust neighborhood.
pub static LAST_NEIGHBORHOOD_SIZE: Lazy<Gauge> = Lazy::new(Gauge::default);
