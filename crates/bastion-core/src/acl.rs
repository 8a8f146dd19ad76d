//! The ACL bundle: registries, rule table, and default action.
//!
//! An `Acl` is mutable only while it is being built.  Once it is handed to
//! readers (typically inside an `Arc`, see `AclHandle`) it is never
//! modified again; rebuild a fresh one to change the policy.

use bastion_contracts::{
    acl::{ActionPattern, Resource, Role, Rule},
    effect::Effect,
    error::AclResult,
};

use crate::{resources::ResourceRegistry, roles::RoleRegistry, rules::RuleTable};

#[derive(Debug, Clone)]
pub struct Acl {
    pub(crate) roles: RoleRegistry,
    pub(crate) resources: ResourceRegistry,
    pub(crate) rules: RuleTable,
    pub(crate) default_action: Effect,
}

impl Acl {
    /// An empty ACL that answers every query on a known identity with
    /// `default_action`.
    pub fn new(default_action: Effect) -> Self {
        Self {
            roles: RoleRegistry::new(),
            resources: ResourceRegistry::new(),
            rules: RuleTable::new(),
            default_action,
        }
    }

    pub fn default_action(&self) -> Effect {
        self.default_action
    }

    // ── Construction ─────────────────────────────────────────────────────────

    /// See `RoleRegistry::add_role`.
    pub fn add_role(
        &mut self,
        name: &str,
        description: Option<&str>,
        parent: Option<&str>,
    ) -> AclResult<&Role> {
        self.roles.add_role(name, description, parent)
    }

    /// See `ResourceRegistry::add_resource`.
    pub fn add_resource<I, S>(
        &mut self,
        name: &str,
        description: Option<&str>,
        actions: I,
    ) -> AclResult<&Resource>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.resources.add_resource(name, description, actions)
    }

    /// Append one rule.  `action` may be the wildcard `"*"`.
    pub fn add_rule(
        &mut self,
        role: &str,
        resource: &str,
        action: &str,
        effect: Effect,
    ) -> AclResult<()> {
        let rule = Rule::new(role, resource, ActionPattern::parse(action), effect);
        self.rules.add_rule(&self.roles, &self.resources, rule)
    }

    /// Allow `role` each of `actions` on `resource`, one rule per action.
    pub fn allow(&mut self, role: &str, resource: &str, actions: &[&str]) -> AclResult<()> {
        for action in actions {
            self.add_rule(role, resource, action, Effect::Allow)?;
        }
        Ok(())
    }

    /// Deny `role` each of `actions` on `resource`, one rule per action.
    pub fn deny(&mut self, role: &str, resource: &str, actions: &[&str]) -> AclResult<()> {
        for action in actions {
            self.add_rule(role, resource, action, Effect::Deny)?;
        }
        Ok(())
    }

    // ── Introspection ────────────────────────────────────────────────────────

    pub fn is_role(&self, name: &str) -> bool {
        self.roles.contains(name)
    }

    pub fn is_resource(&self, name: &str) -> bool {
        self.resources.contains(name)
    }

    pub fn role_registry(&self) -> &RoleRegistry {
        &self.roles
    }

    pub fn resource_registry(&self) -> &ResourceRegistry {
        &self.resources
    }

    pub fn rule_table(&self) -> &RuleTable {
        &self.rules
    }

    pub fn roles(&self) -> &[Role] {
        self.roles.all_roles()
    }

    pub fn resources(&self) -> &[Resource] {
        self.resources.all_resources()
    }

    pub fn rules(&self) -> &[Rule] {
        self.rules.all_rules()
    }
}
