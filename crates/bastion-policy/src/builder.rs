//! Builds an `Acl` from a configuration document.
//!
//! Expected shape (TOML shown; JSON is equivalent):
//!
//! ```toml
//! defaultAction = 0                 # 0 = deny, 1 = allow
//!
//! [resource.index]
//! description = "Landing page"      # optional
//! actions = ["index"]               # optional; absent or empty = unrestricted
//!
//! [role.guest]
//! description = "Visitors"          # optional
//! [role.guest.allow.index]
//! actions = ["index"]               # required, non-empty; "*" = any action
//!
//! [role.user]
//! inherit = "guest"                 # optional; must be declared above
//! [role.user.deny.index]
//! actions = ["*"]
//! ```
//!
//! Load order:
//!
//! 1. `defaultAction`
//! 2. every entry of `resource`
//! 3. every entry of `role`, in document order; each role is registered
//!    before its own `allow` / `deny` rules are added
//!
//! The first violation aborts the build.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use bastion_contracts::{
    effect::Effect,
    error::{AclError, AclResult},
};
use bastion_core::{Acl, AclHandle};

use crate::document::{parse_json, parse_toml, ConfigValue};

const DEFAULT_ACTION_KEY: &str = "defaultAction";
const RESOURCE_KEY: &str = "resource";
const ROLE_KEY: &str = "role";
const DESCRIPTION_KEY: &str = "description";
const ACTIONS_KEY: &str = "actions";
const INHERIT_KEY: &str = "inherit";

/// Turns configuration documents into ready-to-query `Acl`s.
///
/// ```rust,ignore
/// use bastion_policy::ConfigBuilder;
///
/// let acl = ConfigBuilder::from_file(Path::new("policies/acl.toml"))?;
/// assert!(acl.is_allowed("guest", "index", "index")?);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigBuilder;

impl ConfigBuilder {
    /// Build an `Acl` from an already-parsed document.
    pub fn build(doc: &ConfigValue) -> AclResult<Acl> {
        let result = Self::build_inner(doc);
        match &result {
            Ok(acl) => info!(
                default_action = %acl.default_action(),
                roles = acl.roles().len(),
                resources = acl.resources().len(),
                rules = acl.rules().len(),
                "ACL built from configuration"
            ),
            Err(e) => warn!(error = %e, "ACL configuration rejected"),
        }
        result
    }

    /// Parse `s` as TOML and build an `Acl` from it.
    pub fn from_toml_str(s: &str) -> AclResult<Acl> {
        Self::build(&parse_toml(s)?)
    }

    /// Parse `s` as JSON and build an `Acl` from it.
    pub fn from_json_str(s: &str) -> AclResult<Acl> {
        Self::build(&parse_json(s)?)
    }

    /// Read `path` and build an `Acl` from it.  The format is chosen by
    /// extension: `.toml` or `.json`.
    pub fn from_file(path: &Path) -> AclResult<Acl> {
        let contents = std::fs::read_to_string(path).map_err(|e| AclError::ConfigError {
            reason: format!("failed to read ACL file '{}': {}", path.display(), e),
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::from_toml_str(&contents),
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_str(&contents),
            _ => Err(AclError::config(format!(
                "unsupported ACL file '{}'; expected a .toml or .json extension",
                path.display()
            ))),
        }
    }

    /// Build a fresh `Acl` from `doc` and install it in `handle`.
    ///
    /// On failure the handle keeps serving the ACL it already had.
    pub fn rebuild(handle: &AclHandle, doc: &ConfigValue) -> AclResult<Arc<Acl>> {
        let acl = Self::build(doc)?;
        handle.replace(acl)
    }

    fn build_inner(doc: &ConfigValue) -> AclResult<Acl> {
        let mut acl = Acl::new(read_default_action(doc)?);
        load_resources(&mut acl, doc)?;
        load_roles(&mut acl, doc)?;
        Ok(acl)
    }
}

fn read_default_action(doc: &ConfigValue) -> AclResult<Effect> {
    let value = doc
        .get(DEFAULT_ACTION_KEY)
        .filter(|v| v.as_number().is_some())
        .ok_or_else(|| AclError::config("defaultAction must exist and be numeric"))?;

    value
        .as_integer()
        .and_then(Effect::from_code)
        .ok_or_else(|| {
            AclError::config(format!(
                "defaultAction must be {} (deny) or {} (allow), got {}",
                Effect::DENY_CODE,
                Effect::ALLOW_CODE,
                value.scalar_string().unwrap_or_default()
            ))
        })
}

fn load_resources(acl: &mut Acl, doc: &ConfigValue) -> AclResult<()> {
    let section = doc
        .get(RESOURCE_KEY)
        .filter(|s| s.is_traversable())
        .and_then(ConfigValue::as_map)
        .ok_or_else(|| AclError::config("resource key must exist and be traversable"))?;

    for (name, settings) in section {
        if settings.as_map().is_none() {
            return Err(AclError::config(format!(
                "Resource \"{}\" must be a map of settings.",
                name
            )));
        }

        let description = optional_string(settings, DESCRIPTION_KEY, "Resource", name)?;
        let actions = match settings.get(ACTIONS_KEY) {
            None | Some(ConfigValue::Null) => Vec::new(),
            Some(list) => action_names(list).ok_or_else(|| {
                AclError::config(format!(
                    "Resource \"{}\" actions must be a list of names.",
                    name
                ))
            })?,
        };

        acl.add_resource(name, description.as_deref(), actions)?;
        debug!(resource = %name, "resource loaded");
    }

    Ok(())
}

fn load_roles(acl: &mut Acl, doc: &ConfigValue) -> AclResult<()> {
    let section = doc
        .get(ROLE_KEY)
        .filter(|s| s.is_traversable())
        .and_then(ConfigValue::as_map)
        .ok_or_else(|| AclError::config("role key must exist and be traversable"))?;

    for (name, settings) in section {
        let entries = settings.as_map().ok_or_else(|| {
            AclError::config(format!("Role \"{}\" must be a map of settings.", name))
        })?;

        let description = optional_string(settings, DESCRIPTION_KEY, "Role", name)?;
        let parent = optional_string(settings, INHERIT_KEY, "Role", name)?
            .filter(|p| !p.is_empty());

        if let Some(parent) = &parent {
            if !acl.is_role(parent) {
                return Err(AclError::config(format!(
                    "Role \"{}\" cannot inherit non-existent role \"{}\". Either such role does \
                     not exist or it is set to be inherited before it is actually defined.",
                    name, parent
                )));
            }
        }
        acl.add_role(name, description.as_deref(), parent.as_deref())?;
        debug!(role = %name, parent = ?parent, "role loaded");

        for (key, rules) in entries {
            if key == INHERIT_KEY || key == DESCRIPTION_KEY {
                continue;
            }
            let effect = access_method(key)?;
            load_role_rules(acl, name, effect, rules)?;
        }
    }

    Ok(())
}

/// Map an access-method key to its effect.
fn access_method(key: &str) -> AclResult<Effect> {
    match key {
        "allow" => Ok(Effect::Allow),
        "deny" => Ok(Effect::Deny),
        other => Err(AclError::config(format!(
            "Wrong access method given. Expected \"allow\" or \"deny\" but \"{}\" was set.",
            other
        ))),
    }
}

fn load_role_rules(acl: &mut Acl, role: &str, effect: Effect, rules: &ConfigValue) -> AclResult<()> {
    let per_resource = rules.as_map().ok_or_else(|| {
        AclError::config(format!(
            "Access method \"{}\" of role \"{}\" must map resources to actions.",
            effect, role
        ))
    })?;

    for (resource, settings) in per_resource {
        let actions = settings
            .get(ACTIONS_KEY)
            .filter(|a| a.is_traversable())
            .and_then(action_names)
            .ok_or_else(|| AclError::config("Key \"actions\" must exist and must be traversable."))?;

        for action in &actions {
            acl.add_rule(role, resource, action, effect)?;
        }
    }

    Ok(())
}

/// Names in an action list.  `None` if the value is not a list of scalars.
fn action_names(list: &ConfigValue) -> Option<Vec<String>> {
    list.items()?
        .into_iter()
        .map(ConfigValue::scalar_string)
        .collect()
}

fn optional_string(
    settings: &ConfigValue,
    key: &str,
    kind: &str,
    name: &str,
) -> AclResult<Option<String>> {
    match settings.get(key) {
        None | Some(ConfigValue::Null) => Ok(None),
        Some(value) => value.scalar_string().map(Some).ok_or_else(|| {
            AclError::config(format!("{} \"{}\" {} must be a string.", kind, name, key))
        }),
    }
}
