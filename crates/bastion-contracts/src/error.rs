//! Error types for the bastion ACL engine.
//!
//! Every fallible operation returns `AclResult<T>`.  All variants are
//! structural: they describe a malformed configuration or a query that names
//! an identity the ACL does not know.  None of them are transient.

use thiserror::Error;

/// The unified error type for the bastion crates.
#[derive(Debug, Error)]
pub enum AclError {
    /// The configuration document is malformed.  Loading stops at the first
    /// violation and no partial ACL is returned.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A role with this name is already registered.
    #[error("role '{role}' is already defined")]
    DuplicateRole { role: String },

    /// A resource with this name is already registered.
    #[error("resource '{resource}' is already defined")]
    DuplicateResource { resource: String },

    /// The role is not present in the role registry.
    #[error("role '{role}' does not exist in the ACL")]
    UnknownRole { role: String },

    /// The resource is not present in the resource registry.
    #[error("resource '{resource}' does not exist in the ACL")]
    UnknownResource { resource: String },

    /// The resource declares an explicit action set and the action is not in it.
    #[error("action '{action}' is not recognized on resource '{resource}'")]
    UnrecognizedAction { resource: String, action: String },

    /// Shared engine state is unusable because a thread panicked while
    /// holding its lock.  The configuration itself may be fine.
    #[error("engine state poisoned: {reason}")]
    StatePoisoned { reason: String },

    /// The decision recorder could not persist a record.
    ///
    /// Fatal for the check that produced it: an unrecorded decision is never
    /// handed back to the caller.
    #[error("audit write failed: {reason}")]
    AuditWriteFailed { reason: String },
}

impl AclError {
    /// Shorthand for building a `ConfigError` from any message.
    pub fn config(reason: impl Into<String>) -> Self {
        AclError::ConfigError {
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the bastion crates.
pub type AclResult<T> = Result<T, AclError>;
