#![doc = include_str!("../README.md")]

pub mod aggregation;
pub mod decay;
pub mod domain_resolver;
pub mod error;
pub mod facade;
pub mod graph;
pub mod metrics;
pub mod options;
pub mod principal;
pub mod propagation;
pub mod scoring;
pub mod sybil;
pub mod time;

pub use aggregation::{Aggregation, NeighborEntry};
pub use decay::DecayFunction;
pub use error::{EngineError, EngineResult};
pub use facade::{EffectiveTrustResult, TrustEngine};
pub use graph::{
    DistrustEdge, DistrustReason, Endorsement, EndorsementContext, GraphSource, OutgoingEdge,
    Rating, Subject, TrustEdge,
};
pub use options::EngineOptions;
pub use principal::{Domain, Principal};
pub use propagation::TrustNeighborhood;
pub use scoring::{
    Contributor, EndorsementScorer, Explanation, FeedEntry, NetworkCoverage, ScoreResult,
    SortDirection, SortKey,
};
pub use sybil::{LocalOutgoingEdge, SybilAnalysisInput, SybilAssessment, SybilAssessor, SybilFlag, SybilIndicators};
pub use time::{FixedTimeProvider, SystemTimeProvider, TimeProvider};
