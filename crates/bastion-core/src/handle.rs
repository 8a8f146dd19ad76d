//! A shared, swappable reference to the live ACL.
//!
//! Readers take an `Arc<Acl>` snapshot and evaluate against it without
//! holding any lock.  A rebuilt ACL is installed with `replace`, which swaps
//! the pointer in one step, so no reader ever observes a half-built rule
//! table.

use std::sync::{Arc, RwLock};

use tracing::info;

use bastion_contracts::{
    decision::{AccessDecision, AccessQuery},
    error::{AclError, AclResult},
};

use crate::{acl::Acl, traits::AccessPolicy};

#[derive(Debug)]
pub struct AclHandle {
    current: RwLock<Arc<Acl>>,
}

impl AclHandle {
    pub fn new(acl: Acl) -> Self {
        Self {
            current: RwLock::new(Arc::new(acl)),
        }
    }

    /// The ACL in force right now.
    pub fn snapshot(&self) -> AclResult<Arc<Acl>> {
        let guard = self.current.read().map_err(|e| AclError::StatePoisoned {
            reason: format!("ACL handle lock poisoned: {}", e),
        })?;
        Ok(Arc::clone(&guard))
    }

    /// Install `acl` and return the one it replaces.
    pub fn replace(&self, acl: Acl) -> AclResult<Arc<Acl>> {
        let next = Arc::new(acl);
        let mut guard = self.current.write().map_err(|e| AclError::StatePoisoned {
            reason: format!("ACL handle lock poisoned: {}", e),
        })?;
        let previous = std::mem::replace(&mut *guard, next);

        info!(
            roles = guard.roles().len(),
            resources = guard.resources().len(),
            rules = guard.rules().len(),
            "ACL replaced"
        );

        Ok(previous)
    }
}

impl AccessPolicy for AclHandle {
    fn explain(&self, query: &AccessQuery) -> AclResult<AccessDecision> {
        self.snapshot()?.explain(query)
    }
}
