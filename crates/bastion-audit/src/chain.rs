//! Hash-chain primitives.
//!
//! Hash input layout (bytes, in order):
//!   1. log name as UTF-8
//!   2. sequence as 8-byte little-endian
//!   3. prev_hash as UTF-8 (64 hex chars)
//!   4. compact JSON of the decision record

use sha2::{Digest, Sha256};

use bastion_contracts::{
    decision::DecisionRecord,
    error::{AclError, AclResult},
};

use crate::event::AuditEvent;

/// SHA-256 of one event, as 64 lowercase hex characters.
///
/// Fails with `AuditWriteFailed` if the record cannot be serialized.
pub fn hash_event(
    log_name: &str,
    sequence: u64,
    record: &DecisionRecord,
    prev_hash: &str,
) -> AclResult<String> {
    let record_json = serde_json::to_vec(record).map_err(|e| AclError::AuditWriteFailed {
        reason: format!("decision record is not serializable: {}", e),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(log_name.as_bytes());
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(&record_json);

    Ok(hex::encode(hasher.finalize()))
}

/// True when every event links to its predecessor and its stored hash
/// matches a fresh computation.  An empty chain is valid.
pub fn verify_chain(log_name: &str, events: &[AuditEvent]) -> bool {
    let mut expected_prev: &str = AuditEvent::GENESIS_HASH;

    for (position, event) in events.iter().enumerate() {
        if event.sequence != position as u64 || event.prev_hash != expected_prev {
            return false;
        }

        match hash_event(log_name, event.sequence, &event.record, &event.prev_hash) {
            Ok(recomputed) if recomputed == event.this_hash => {}
            _ => return false,
        }

        expected_prev = event.this_hash.as_str();
    }

    true
}
