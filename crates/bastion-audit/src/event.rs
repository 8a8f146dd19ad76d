//! Audit event and exported log types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bastion_contracts::decision::DecisionRecord;

/// One decision in the hash chain.
///
/// `this_hash` commits to the log name, `sequence`, `prev_hash` and the
/// full `record`; changing any of them breaks the chain from this event on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Position in the chain, starting at 0.
    pub sequence: u64,

    pub record: DecisionRecord,

    /// Hex SHA-256 of the previous event, or `GENESIS_HASH` for the first.
    pub prev_hash: String,

    /// Hex SHA-256 of this event, see `hash_event`.
    pub this_hash: String,
}

impl AuditEvent {
    /// `prev_hash` of the first event in every chain.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// A point-in-time export of a decision log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    /// Name of the log the events were written to.  Part of every hash.
    pub log_name: String,

    /// Events in chain order.
    pub events: Vec<AuditEvent>,

    pub exported_at: DateTime<Utc>,

    /// `this_hash` of the last event; empty for an empty log.
    pub terminal_hash: String,
}
