//! The two seams of the engine.
//!
//! - `AccessPolicy`: answers access queries (the in-memory `Acl`, or an
//!   `AclHandle` that forwards to the current snapshot)
//! - `DecisionRecorder`: persists one record per audited check
//!
//! The `Gatekeeper` wires one of each together.

use bastion_contracts::{
    decision::{AccessDecision, AccessQuery, DecisionRecord},
    error::AclResult,
};

/// Something that can decide access queries.
///
/// Implementations must be side-effect free and deterministic: the same
/// query against the same rule set always yields the same decision.
pub trait AccessPolicy: Send + Sync {
    /// Decide `query` and report which rule (or the default) produced it.
    ///
    /// Fails with `UnknownRole` / `UnknownResource` when the query names an
    /// identity the policy does not know.
    fn explain(&self, query: &AccessQuery) -> AclResult<AccessDecision>;

    /// Boolean form of `explain`.
    fn is_allowed(&self, query: &AccessQuery) -> AclResult<bool> {
        self.explain(query).map(|d| d.is_allowed())
    }
}

/// An append-only sink for audited decisions.
///
/// A failed write must surface as `AclError::AuditWriteFailed`; the
/// gatekeeper then withholds the decision from its caller.
pub trait DecisionRecorder: Send + Sync {
    fn record(&self, record: &DecisionRecord) -> AclResult<()>;
}
