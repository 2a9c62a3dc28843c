//! Engine-visible failure taxonomy (spec §7).

use thiserror::Error;

/// Failures the engine itself can surface. Graph shape (cycles, dangling
/// edges, empty neighborhoods, duplicate edges) is never an error — it is
/// handled as regular control flow, per §7.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A bound in the options table (§4.7) was violated. Fatal to the call;
    /// no partial result is produced.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// A `GraphSource` callback failed. Propagated unchanged; the engine
    /// never retries (retry policy belongs to the caller).
    #[error("collaborator callback failed: {0}")]
    Collaborator(String),
}

impl EngineError {
    pub fn invalid_options<S: Into<String>>(msg: S) -> Self {
        Self::InvalidOptions(msg.into())
    }

    pub fn collaborator<S: Into<String>>(msg: S) -> Self {
        Self::Collaborator(msg.into())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
