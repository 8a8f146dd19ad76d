//! The gatekeeper: an audited access check.
//!
//!   Query → AccessPolicy::explain → DecisionRecorder::record → Decision
//!
//! The caller only sees a decision after it has been recorded.  A failed
//! write is fatal for that check.

use tracing::{debug, warn};

use bastion_contracts::{
    decision::{AccessDecision, AccessQuery, DecisionRecord},
    error::AclResult,
};

use crate::traits::{AccessPolicy, DecisionRecorder};

/// Owns a policy and a recorder and runs every check through both.
pub struct Gatekeeper {
    policy: Box<dyn AccessPolicy>,
    recorder: Box<dyn DecisionRecorder>,
}

impl Gatekeeper {
    pub fn new(policy: Box<dyn AccessPolicy>, recorder: Box<dyn DecisionRecorder>) -> Self {
        Self { policy, recorder }
    }

    /// Decide `query`, record the decision, and return it.
    ///
    /// # Errors
    ///
    /// Structural query errors (`UnknownRole`, `UnknownResource`) are
    /// returned as-is and nothing is recorded.  A recorder failure is
    /// returned as `AuditWriteFailed` and the decision is dropped.
    pub fn check(&self, query: &AccessQuery) -> AclResult<AccessDecision> {
        let decision = match self.policy.explain(query) {
            Ok(decision) => decision,
            Err(e) => {
                warn!(query = %query, error = %e, "access query rejected");
                return Err(e);
            }
        };

        let record = DecisionRecord::new(query.clone(), decision.clone());
        self.recorder.record(&record)?;

        debug!(
            decision_id = %record.decision_id,
            query = %query,
            decision = %decision,
            "access decision recorded"
        );

        Ok(decision)
    }

    /// Boolean form of `check`.
    pub fn is_allowed(&self, query: &AccessQuery) -> AclResult<bool> {
        self.check(query).map(|d| d.is_allowed())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use bastion_contracts::{
        effect::Effect,
        error::{AclError, AclResult},
    };

    use crate::acl::Acl;

    use super::*;

    // ── Mock helpers ─────────────────────────────────────────────────────────

    /// Collects records into a shared Vec so tests can inspect them.
    struct CollectingRecorder {
        records: Arc<Mutex<Vec<DecisionRecord>>>,
    }

    impl DecisionRecorder for CollectingRecorder {
        fn record(&self, record: &DecisionRecord) -> AclResult<()> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    /// Always fails, as a full disk would.
    struct FailingRecorder;

    impl DecisionRecorder for FailingRecorder {
        fn record(&self, _record: &DecisionRecord) -> AclResult<()> {
            Err(AclError::AuditWriteFailed {
                reason: "disk full".to_string(),
            })
        }
    }

    fn small_acl() -> Acl {
        let mut acl = Acl::new(Effect::Deny);
        acl.add_role("guest", None, None).unwrap();
        acl.add_resource("index", None, ["index"]).unwrap();
        acl.allow("guest", "index", &["index"]).unwrap();
        acl
    }

    // ── Tests ────────────────────────────────────────────────────────────────

    #[test]
    fn every_check_is_recorded_once() {
        let records = Arc::new(Mutex::new(Vec::new()));
        let gate = Gatekeeper::new(
            Box::new(small_acl()),
            Box::new(CollectingRecorder {
                records: Arc::clone(&records),
            }),
        );

        assert!(gate
            .is_allowed(&AccessQuery::new("guest", "index", "index"))
            .unwrap());
        let denied = gate
            .check(&AccessQuery::new("guest", "index", "other"))
            .unwrap();
        assert!(denied.is_default());

        let records = records.lock().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].query.action, "index");
        assert!(records[0].decision.is_allowed());
        assert!(!records[1].decision.is_allowed());
    }

    #[test]
    fn rejected_queries_are_not_recorded() {
        let records = Arc::new(Mutex::new(Vec::new()));
        let gate = Gatekeeper::new(
            Box::new(small_acl()),
            Box::new(CollectingRecorder {
                records: Arc::clone(&records),
            }),
        );

        let result = gate.check(&AccessQuery::new("admin", "index", "index"));
        assert!(matches!(result, Err(AclError::UnknownRole { .. })));
        assert!(records.lock().unwrap().is_empty());
    }

    #[test]
    fn recorder_failure_withholds_decision() {
        let gate = Gatekeeper::new(Box::new(small_acl()), Box::new(FailingRecorder));

        match gate.check(&AccessQuery::new("guest", "index", "index")) {
            Err(AclError::AuditWriteFailed { reason }) => assert!(reason.contains("disk full")),
            other => panic!("expected AuditWriteFailed, got {:?}", other),
        }
    }
}
