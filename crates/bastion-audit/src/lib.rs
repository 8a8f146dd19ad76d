//! # bastion-audit
//!
//! Append-only, SHA-256 hash-chained log of access decisions.
//!
//! ## Overview
//!
//! Every decision the `Gatekeeper` hands out is first wrapped in an
//! `AuditEvent` linked to the previous event by its hash.  Altering a stored
//! event breaks the chain and is caught by `verify_chain`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bastion_audit::InMemoryDecisionLog;
//! use bastion_core::Gatekeeper;
//!
//! let log = InMemoryDecisionLog::new("frontend");
//! let gate = Gatekeeper::new(Box::new(acl), Box::new(log.clone()));
//! gate.check(&query)?;
//!
//! assert!(log.verify_integrity());
//! let exported = log.export_log()?;
//! ```

pub mod chain;
pub mod event;
pub mod memory;

pub use chain::{hash_event, verify_chain};
pub use event::{AuditEvent, AuditLog};
pub use memory::InMemoryDecisionLog;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use bastion_contracts::{
        decision::{AccessDecision, AccessQuery, DecisionRecord, DecisionSource},
        effect::Effect,
        error::AclError,
    };
    use bastion_core::{traits::DecisionRecorder, Acl, Gatekeeper};

    use super::{AuditEvent, InMemoryDecisionLog};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn make_record(role: &str, effect: Effect) -> DecisionRecord {
        DecisionRecord::new(
            AccessQuery::new(role, "index", "index"),
            AccessDecision {
                effect,
                source: DecisionSource::Default,
            },
        )
    }

    // ── Tests ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_hash_chain_integrity() {
        let log = InMemoryDecisionLog::new("integrity");
        log.record(&make_record("guest", Effect::Allow)).unwrap();
        log.record(&make_record("user", Effect::Deny)).unwrap();
        log.record(&make_record("admin", Effect::Allow)).unwrap();

        assert_eq!(log.len(), 3);
        assert!(log.verify_integrity());
    }

    #[test]
    fn test_tamper_detection() {
        let log = InMemoryDecisionLog::new("tamper");
        log.record(&make_record("guest", Effect::Deny)).unwrap();
        log.record(&make_record("user", Effect::Deny)).unwrap();

        // Flip a stored denial into an allow.
        {
            let mut state = log.state.lock().unwrap();
            state.events[0].record.decision.effect = Effect::Allow;
        }

        assert!(!log.verify_integrity());
    }

    #[test]
    fn test_reordering_is_detected() {
        let log = InMemoryDecisionLog::new("reorder");
        log.record(&make_record("guest", Effect::Allow)).unwrap();
        log.record(&make_record("user", Effect::Allow)).unwrap();

        let mut exported = log.export_log().unwrap();
        exported.events.swap(0, 1);
        assert!(!super::verify_chain(&exported.log_name, &exported.events));
    }

    #[test]
    fn test_genesis_and_sequence() {
        let log = InMemoryDecisionLog::new("sequence");
        for role in ["a", "b", "c"] {
            log.record(&make_record(role, Effect::Deny)).unwrap();
        }

        let exported = log.export_log().unwrap();
        assert_eq!(exported.events[0].prev_hash, AuditEvent::GENESIS_HASH);
        for (idx, event) in exported.events.iter().enumerate() {
            assert_eq!(event.sequence, idx as u64);
        }
        assert_eq!(
            exported.terminal_hash,
            exported.events.last().unwrap().this_hash
        );
    }

    #[test]
    fn test_log_name_is_part_of_the_hash() {
        let log = InMemoryDecisionLog::new("first");
        log.record(&make_record("guest", Effect::Allow)).unwrap();
        let exported = log.export_log().unwrap();

        assert!(super::verify_chain("first", &exported.events));
        assert!(!super::verify_chain("second", &exported.events));
    }

    #[test]
    fn test_empty_log() {
        let log = InMemoryDecisionLog::new("empty");
        assert!(log.is_empty());
        assert!(log.verify_integrity());
        assert_eq!(log.export_log().unwrap().terminal_hash, "");
        assert!(super::verify_chain("empty", &[]));
    }

    #[test]
    fn test_gatekeeper_writes_through_clone() {
        let mut acl = Acl::new(Effect::Deny);
        acl.add_role("guest", None, None).unwrap();
        acl.add_resource("index", None, ["index"]).unwrap();
        acl.allow("guest", "index", &["index"]).unwrap();

        let log = InMemoryDecisionLog::new("gate");
        let gate = Gatekeeper::new(Box::new(acl), Box::new(log.clone()));

        assert!(gate
            .is_allowed(&AccessQuery::new("guest", "index", "index"))
            .unwrap());
        assert!(!gate
            .is_allowed(&AccessQuery::new("guest", "index", "about"))
            .unwrap());
        assert!(gate
            .check(&AccessQuery::new("nobody", "index", "index"))
            .is_err());

        let exported = log.export_log().unwrap();
        assert_eq!(exported.events.len(), 2);
        assert!(exported.events[0].record.decision.is_allowed());
        assert!(exported.events[1].record.decision.is_default());
        assert!(log.verify_integrity());
    }

    #[test]
    fn test_poisoned_log_fails_closed() {
        let log = InMemoryDecisionLog::new("poisoned");
        log.record(&make_record("guest", Effect::Allow)).unwrap();

        let writer = log.clone();
        let crashed = std::thread::spawn(move || {
            let _guard = writer.state.lock().unwrap();
            panic!("writer crashed while holding the log");
        })
        .join();
        assert!(crashed.is_err());

        match log.record(&make_record("user", Effect::Deny)) {
            Err(AclError::AuditWriteFailed { reason }) => {
                assert!(reason.contains("decision log lock poisoned"), "got: {reason}")
            }
            other => panic!("expected AuditWriteFailed, got {:?}", other),
        }
        assert!(matches!(
            log.export_log(),
            Err(AclError::AuditWriteFailed { .. })
        ));
        assert!(!log.verify_integrity());
        assert_eq!(log.len(), 0);
    }
}
