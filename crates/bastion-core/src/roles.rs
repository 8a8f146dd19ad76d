//! The role registry: named roles and their single-parent inheritance edges.
//!
//! A parent must be registered before any child that names it, so the
//! inheritance graph is a forest and every ancestor chain is finite.

use std::collections::HashMap;

use bastion_contracts::{
    acl::Role,
    error::{AclError, AclResult},
};

/// All roles known to an ACL, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct RoleRegistry {
    roles: Vec<Role>,
    index: HashMap<String, usize>,
}

impl RoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a role.
    ///
    /// Fails with `DuplicateRole` if `name` is taken and with `UnknownRole`
    /// if `parent` is given but not registered yet.
    pub fn add_role(
        &mut self,
        name: &str,
        description: Option<&str>,
        parent: Option<&str>,
    ) -> AclResult<&Role> {
        if self.index.contains_key(name) {
            return Err(AclError::DuplicateRole {
                role: name.to_string(),
            });
        }
        if let Some(parent) = parent {
            if !self.index.contains_key(parent) {
                return Err(AclError::UnknownRole {
                    role: parent.to_string(),
                });
            }
        }

        let position = self.roles.len();
        self.roles.push(Role {
            name: name.to_string(),
            description: description.map(str::to_string),
            parent: parent.map(str::to_string),
        });
        self.index.insert(name.to_string(), position);

        Ok(&self.roles[position])
    }

    pub fn get_role(&self, name: &str) -> Option<&Role> {
        self.index.get(name).map(|&i| &self.roles[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// The chain from `name` itself up through each parent to its root.
    pub fn ancestors_of(&self, name: &str) -> AclResult<Vec<&Role>> {
        let mut chain = Vec::new();
        let mut current = Some(name);

        while let Some(role_name) = current {
            let role = self.get_role(role_name).ok_or_else(|| AclError::UnknownRole {
                role: role_name.to_string(),
            })?;
            chain.push(role);
            current = role.parent.as_deref();
        }

        Ok(chain)
    }

    pub fn all_roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(chain: &[&Role]) -> Vec<String> {
        chain.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn add_and_get_role() {
        let mut roles = RoleRegistry::new();
        let guest = roles.add_role("guest", Some("Visitors"), None).unwrap();
        assert_eq!(guest.name, "guest");
        assert_eq!(guest.description.as_deref(), Some("Visitors"));
        assert!(guest.parent.is_none());

        assert!(roles.contains("guest"));
        assert!(roles.get_role("admin").is_none());
    }

    #[test]
    fn duplicate_role_is_rejected() {
        let mut roles = RoleRegistry::new();
        roles.add_role("guest", None, None).unwrap();

        match roles.add_role("guest", None, None) {
            Err(AclError::DuplicateRole { role }) => assert_eq!(role, "guest"),
            other => panic!("expected DuplicateRole, got {:?}", other),
        }
        assert_eq!(roles.len(), 1);
    }

    #[test]
    fn parent_must_exist_first() {
        let mut roles = RoleRegistry::new();

        match roles.add_role("user", None, Some("guest")) {
            Err(AclError::UnknownRole { role }) => assert_eq!(role, "guest"),
            other => panic!("expected UnknownRole, got {:?}", other),
        }
        // Failed insert leaves nothing behind.
        assert!(roles.is_empty());
    }

    #[test]
    fn self_inheritance_is_impossible() {
        let mut roles = RoleRegistry::new();
        assert!(matches!(
            roles.add_role("loop", None, Some("loop")),
            Err(AclError::UnknownRole { .. })
        ));
    }

    #[test]
    fn ancestors_run_from_self_to_root() {
        let mut roles = RoleRegistry::new();
        roles.add_role("guest", None, None).unwrap();
        roles.add_role("user", None, Some("guest")).unwrap();
        roles.add_role("editor", None, Some("user")).unwrap();
        roles.add_role("auditor", None, Some("guest")).unwrap();

        assert_eq!(
            names(&roles.ancestors_of("editor").unwrap()),
            vec!["editor", "user", "guest"]
        );
        assert_eq!(
            names(&roles.ancestors_of("auditor").unwrap()),
            vec!["auditor", "guest"]
        );
        assert_eq!(names(&roles.ancestors_of("guest").unwrap()), vec!["guest"]);

        // Restartable: same answer on a second call.
        assert_eq!(
            names(&roles.ancestors_of("editor").unwrap()),
            vec!["editor", "user", "guest"]
        );
    }

    #[test]
    fn ancestors_of_unknown_role_fails() {
        let roles = RoleRegistry::new();
        assert!(matches!(
            roles.ancestors_of("nobody"),
            Err(AclError::UnknownRole { .. })
        ));
    }

    #[test]
    fn all_roles_keeps_insertion_order() {
        let mut roles = RoleRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            roles.add_role(name, None, None).unwrap();
        }
        let listed: Vec<&str> = roles.all_roles().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(listed, vec!["zeta", "alpha", "mid"]);
    }
}
