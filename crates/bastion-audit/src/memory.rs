//! In-memory implementation of `DecisionRecorder`.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{debug, info};

use bastion_contracts::{
    decision::DecisionRecord,
    error::{AclError, AclResult},
};
use bastion_core::traits::DecisionRecorder;

use crate::{
    chain::{hash_event, verify_chain},
    event::{AuditEvent, AuditLog},
};

pub(crate) struct LogState {
    pub(crate) events: Vec<AuditEvent>,
    /// `this_hash` of the newest event, or `GENESIS_HASH`.
    pub(crate) last_hash: String,
}

/// An append-only decision log backed by a SHA-256 hash chain.
///
/// Clones share the same underlying chain, so one clone can be boxed into a
/// `Gatekeeper` while another is kept for exporting.
///
/// The log is unbounded: every decision stays in memory until the log is
/// dropped.  Use it for demos and tests, not for long-running services.
///
/// A poisoned lock surfaces as `AuditWriteFailed` from `record` and
/// `export_log`, so a `Gatekeeper` withholds decisions it can no longer audit.
#[derive(Clone)]
pub struct InMemoryDecisionLog {
    log_name: String,
    pub(crate) state: Arc<Mutex<LogState>>,
}

impl InMemoryDecisionLog {
    pub fn new(log_name: impl Into<String>) -> Self {
        Self {
            log_name: log_name.into(),
            state: Arc::new(Mutex::new(LogState {
                events: Vec::new(),
                last_hash: AuditEvent::GENESIS_HASH.to_string(),
            })),
        }
    }

    pub fn log_name(&self) -> &str {
        &self.log_name
    }

    fn lock(&self) -> AclResult<std::sync::MutexGuard<'_, LogState>> {
        self.state.lock().map_err(|e| AclError::AuditWriteFailed {
            reason: format!("decision log lock poisoned: {}", e),
        })
    }

    /// Copy out every event written so far.
    pub fn export_log(&self) -> AclResult<AuditLog> {
        let state = self.lock()?;
        let terminal_hash = state
            .events
            .last()
            .map(|e| e.this_hash.clone())
            .unwrap_or_default();

        info!(
            log_name = %self.log_name,
            event_count = state.events.len(),
            terminal_hash = %terminal_hash,
            "decision log exported"
        );

        Ok(AuditLog {
            log_name: self.log_name.clone(),
            events: state.events.clone(),
            exported_at: Utc::now(),
            terminal_hash,
        })
    }

    /// True if the in-memory chain is intact.  A poisoned lock counts as
    /// not intact.
    pub fn verify_integrity(&self) -> bool {
        self.lock()
            .map(|state| verify_chain(&self.log_name, &state.events))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.lock().map(|state| state.events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DecisionRecorder for InMemoryDecisionLog {
    fn record(&self, record: &DecisionRecord) -> AclResult<()> {
        let mut state = self.lock()?;

        let sequence = state.events.len() as u64;
        let prev_hash = state.last_hash.clone();
        let this_hash = hash_event(&self.log_name, sequence, record, &prev_hash)?;

        debug!(
            log_name = %self.log_name,
            sequence,
            decision_id = %record.decision_id,
            "decision appended"
        );

        state.events.push(AuditEvent {
            sequence,
            record: record.clone(),
            prev_hash,
            this_hash: this_hash.clone(),
        });
        state.last_hash = this_hash;

        Ok(())
    }
}
