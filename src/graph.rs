//! The signed graph's data model (spec §3) and the collaborator contract
//! through which the engine reads it (spec §6). The engine never owns or
//! mutates this data; it is handed a borrowed view per call.

use crate::error::EngineResult;
use crate::principal::{Domain, Principal};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A signed, directed, weighted, domain-scoped trust relationship.
///
/// Invariants enforced by callers/collaborators, not re-checked here:
/// `from != to`; at most one active edge per `(from, to, domain)` (a newer
/// edge supersedes the prior one); active iff `expires_at` is absent or in
/// the future.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustEdge {
    pub from: Principal,
    pub to: Principal,
    pub weight: f64,
    pub domain: Domain,
    pub created_at: i64,
    pub expires_at: Option<i64>,
    pub evidence: Option<String>,
}

impl TrustEdge {
    pub fn new(from: Principal, to: Principal, weight: f64, domain: Domain, created_at: i64) -> Self {
        Self {
            from,
            to,
            weight: weight.clamp(0.0, 1.0),
            domain,
            created_at,
            expires_at: None,
            evidence: None,
        }
    }

    pub fn with_expiry(mut self, expires_at: i64) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// An edge is active iff it has no expiry or the expiry is in the future.
    pub fn is_active(&self, now_millis: i64) -> bool {
        self.expires_at.map_or(true, |expires| expires > now_millis)
    }
}

/// Categorical reason a principal distrusts another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistrustReason {
    Spam,
    Malicious,
    Incompetent,
    ConflictOfInterest,
    Other,
}

/// A signed directional exclusion. When active it shadows `to` out of
/// `from`'s propagated neighborhood for `domain` (and every domain when
/// `domain` is the wildcard). Distrust edges carry no expiry of their own —
/// their activity is decided entirely by `GraphSource::is_distrusted`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrustEdge {
    pub from: Principal,
    pub to: Principal,
    pub domain: Domain,
    pub reason: DistrustReason,
    pub created_at: i64,
}

/// An entity being evaluated. The engine does not consume `tags` itself;
/// routing endorsements by tag is an external concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: Principal,
    pub tags: Vec<String>,
}

/// A normalized opinion rating in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub score: f64,
}

impl Rating {
    pub fn new(score: f64) -> Self {
        Self {
            score: score.clamp(0.0, 1.0),
        }
    }
}

/// Optional endorsement provenance consulted by the scorer (verification
/// boosts weight; relationship is carried through for explanation/audit
/// only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EndorsementContext {
    pub verified: bool,
    pub relationship: Option<String>,
}

/// A signed opinion of a subject by a principal, carrying a rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endorsement {
    pub author: Principal,
    pub subject: Principal,
    pub domain: Domain,
    pub rating: Rating,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub context: Option<EndorsementContext>,
}

impl Endorsement {
    pub fn is_verified(&self) -> bool {
        self.context.as_ref().is_some_and(|c| c.verified)
    }
}

/// One outgoing edge as handed back by a [`GraphSource`]: already filtered
/// to active edges whose declared domain is the queried domain or the
/// wildcard (spec §6). This is intentionally lighter than [`TrustEdge`] —
/// the propagator's hot loop only needs target, weight, and declared
/// domain.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEdge {
    pub target: Principal,
    pub weight: f64,
    pub declared_domain: Domain,
}

/// The engine's sole window onto the persistent, shared graph. Both methods
/// may suspend (e.g. to await a database query) — these are the only
/// suspension points in the engine (spec §5).
#[async_trait]
pub trait GraphSource: Send + Sync {
    /// Active edges outgoing from `node` whose declared domain equals
    /// `queried_domain` or the wildcard. Deterministic per `(node, domain)`
    /// within a single query — re-running the same query against the same
    /// graph state must return edges in the same order.
    async fn outgoing_edges(
        &self,
        node: &Principal,
        queried_domain: &Domain,
    ) -> EngineResult<Vec<OutgoingEdge>>;

    /// True when an active distrust edge `viewer -> candidate` exists in
    /// `queried_domain` or in the wildcard domain.
    async fn is_distrusted(
        &self,
        viewer: &Principal,
        candidate: &Principal,
        queried_domain: &Domain,
    ) -> EngineResult<bool>;
}
