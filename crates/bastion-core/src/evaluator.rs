//! Access evaluation.
//!
//! Algorithm for (role, resource, action):
//!
//! 1. Resolve the role's ancestor chain, the role itself first.
//! 2. For each role in the chain, ask the rule table for the newest rule
//!    belonging to exactly that role which covers (resource, action).
//! 3. The first role in the chain with any matching rule decides.  Nearer
//!    ancestors therefore shadow farther ones.
//! 4. If nobody in the chain has a rule, the default action applies.

use tracing::{debug, warn};

use bastion_contracts::{
    decision::{AccessDecision, AccessQuery, DecisionSource},
    effect::Effect,
    error::{AclError, AclResult},
};

use crate::{acl::Acl, traits::AccessPolicy};

impl Acl {
    /// Decide whether `role` may perform `action` on `resource`, and say why.
    ///
    /// An action the resource does not declare is not an error here; no rule
    /// can cover it, so the default action decides.
    pub fn decide(&self, role: &str, resource: &str, action: &str) -> AclResult<AccessDecision> {
        if !self.resources.contains(resource) {
            return Err(AclError::UnknownResource {
                resource: resource.to_string(),
            });
        }
        let chain = self.roles.ancestors_of(role)?;

        for ancestor in chain {
            if let Some(hit) = self.rules.find_match(&ancestor.name, resource, action) {
                debug!(
                    role = %role,
                    resource = %resource,
                    action = %action,
                    matched_role = %ancestor.name,
                    rule_index = hit.index,
                    effect = %hit.effect,
                    "rule matched"
                );
                return Ok(AccessDecision {
                    effect: hit.effect,
                    source: DecisionSource::Rule {
                        role: ancestor.name.clone(),
                        index: hit.index,
                    },
                });
            }
        }

        if self.default_action == Effect::Deny {
            warn!(
                role = %role,
                resource = %resource,
                action = %action,
                "no rule matched; denying by default"
            );
        } else {
            debug!(
                role = %role,
                resource = %resource,
                action = %action,
                effect = %self.default_action,
                "no rule matched; applying default action"
            );
        }
        Ok(AccessDecision {
            effect: self.default_action,
            source: DecisionSource::Default,
        })
    }

    /// Boolean form of `decide`.
    pub fn is_allowed(&self, role: &str, resource: &str, action: &str) -> AclResult<bool> {
        self.decide(role, resource, action).map(|d| d.is_allowed())
    }
}

impl AccessPolicy for Acl {
    fn explain(&self, query: &AccessQuery) -> AclResult<AccessDecision> {
        self.decide(&query.role, &query.resource, &query.action)
    }
}
