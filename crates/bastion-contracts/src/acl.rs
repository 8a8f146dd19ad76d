//! Identity and rule types: roles, resources, action patterns and rules.
//!
//! These are plain data.  The registries in bastion-core own them and
//! enforce the uniqueness and referential-integrity invariants.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::effect::Effect;

/// A named subject category with at most one parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    pub description: Option<String>,
    /// Name of the role this one inherits from.
    pub parent: Option<String>,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            parent: None,
        }
    }
}

/// A protected entity and the actions recognized on it.
///
/// An empty `actions` set means the action set is unrestricted: every
/// action name is recognized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub description: Option<String>,
    pub actions: BTreeSet<String>,
}

impl Resource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            actions: BTreeSet::new(),
        }
    }

    /// True when the resource does not restrict its action names.
    pub fn is_unrestricted(&self) -> bool {
        self.actions.is_empty()
    }

    /// True if `action` may be used in a rule or query on this resource.
    pub fn recognizes(&self, action: &str) -> bool {
        self.is_unrestricted() || self.actions.contains(action)
    }
}

/// The action part of a rule: a single named action or the wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionPattern {
    /// Matches every action on the resource.
    Any,
    Named(String),
}

impl ActionPattern {
    /// The spelling of the wildcard in configuration documents.
    pub const WILDCARD: &'static str = "*";

    /// `"*"` becomes `Any`; everything else is taken literally.
    pub fn parse(action: &str) -> Self {
        if action == Self::WILDCARD {
            ActionPattern::Any
        } else {
            ActionPattern::Named(action.to_string())
        }
    }

    pub fn matches(&self, action: &str) -> bool {
        match self {
            ActionPattern::Any => true,
            ActionPattern::Named(name) => name == action,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, ActionPattern::Any)
    }
}

impl fmt::Display for ActionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionPattern::Any => f.write_str(Self::WILDCARD),
            ActionPattern::Named(name) => f.write_str(name),
        }
    }
}

/// One entry of the rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub role: String,
    pub resource: String,
    pub action: ActionPattern,
    pub effect: Effect,
}

impl Rule {
    pub fn new(
        role: impl Into<String>,
        resource: impl Into<String>,
        action: ActionPattern,
        effect: Effect,
    ) -> Self {
        Self {
            role: role.into(),
            resource: resource.into(),
            action,
            effect,
        }
    }

    /// Exact role match, exact resource match, exact-or-wildcard action match.
    pub fn applies_to(&self, role: &str, resource: &str, action: &str) -> bool {
        self.role == role && self.resource == resource && self.action.matches(action)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} on {}",
            self.effect, self.role, self.action, self.resource
        )
    }
}
