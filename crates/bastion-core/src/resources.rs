//! The resource registry: protected resources and their recognized actions.

use std::collections::HashMap;

use bastion_contracts::{
    acl::Resource,
    error::{AclError, AclResult},
};

/// All resources known to an ACL, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    resources: Vec<Resource>,
    index: HashMap<String, usize>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource.  An empty `actions` iterator leaves the
    /// resource's action set unrestricted.
    ///
    /// Fails with `DuplicateResource` if `name` is taken.
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
        if self.index.contains_key(name) {
            return Err(AclError::DuplicateResource {
                resource: name.to_string(),
            });
        }

        let position = self.resources.len();
        self.resources.push(Resource {
            name: name.to_string(),
            description: description.map(str::to_string),
            actions: actions.into_iter().map(Into::into).collect(),
        });
        self.index.insert(name.to_string(), position);

        Ok(&self.resources[position])
    }

    pub fn get_resource(&self, name: &str) -> Option<&Resource> {
        self.index.get(name).map(|&i| &self.resources[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// True if the resource declares no action set, or `action` is in it.
    ///
    /// Fails with `UnknownResource` if the resource is not registered.
    pub fn is_action_recognized(&self, resource: &str, action: &str) -> AclResult<bool> {
        self.get_resource(resource)
            .map(|r| r.recognizes(action))
            .ok_or_else(|| AclError::UnknownResource {
                resource: resource.to_string(),
            })
    }

    pub fn all_resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
