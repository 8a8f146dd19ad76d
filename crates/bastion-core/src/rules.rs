//! The rule table: an append-only, insertion-ordered list of allow/deny rules.
//!
//! Rules are never deduplicated.  When several rules cover the same
//! (role, resource, action), the most recently inserted one wins; earlier
//! entries stay in the table for inspection.

use tracing::debug;

use bastion_contracts::{
    acl::{ActionPattern, Rule},
    effect::Effect,
    error::{AclError, AclResult},
};

use crate::{resources::ResourceRegistry, roles::RoleRegistry};

/// A rule that matched a lookup, with its insertion position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatch {
    pub index: usize,
    pub effect: Effect,
}

#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule after checking it against the registries.
    ///
    /// Fails with `UnknownRole` or `UnknownResource` for unregistered
    /// identities, and with `UnrecognizedAction` when the resource declares
    /// an action set that does not contain the rule's action.  The wildcard
    /// action always passes.
    pub fn add_rule(
        &mut self,
        roles: &RoleRegistry,
        resources: &ResourceRegistry,
        rule: Rule,
    ) -> AclResult<()> {
        if !roles.contains(&rule.role) {
            return Err(AclError::UnknownRole { role: rule.role });
        }

        if let ActionPattern::Named(action) = &rule.action {
            if !resources.is_action_recognized(&rule.resource, action)? {
                return Err(AclError::UnrecognizedAction {
                    resource: rule.resource,
                    action: action.clone(),
                });
            }
        } else if !resources.contains(&rule.resource) {
            return Err(AclError::UnknownResource {
                resource: rule.resource,
            });
        }

        debug!(
            role = %rule.role,
            resource = %rule.resource,
            action = %rule.action,
            effect = %rule.effect,
            index = self.rules.len(),
            "rule added"
        );
        self.rules.push(rule);
        Ok(())
    }

    /// The newest rule for exactly `role` that covers (`resource`, `action`).
    ///
    /// Inheritance is not consulted here.
    pub fn find_match(&self, role: &str, resource: &str, action: &str) -> Option<RuleMatch> {
        self.rules
            .iter()
            .enumerate()
            .rev()
            .find(|(_, rule)| rule.applies_to(role, resource, action))
            .map(|(index, rule)| RuleMatch {
                index,
                effect: rule.effect,
            })
    }

    pub fn find_effect(&self, role: &str, resource: &str, action: &str) -> Option<Effect> {
        self.find_match(role, resource, action).map(|m| m.effect)
    }

    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    pub fn all_rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
