//! Access queries, decisions, and the records written for audited checks.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::effect::Effect;

/// "May `role` perform `action` on `resource`?"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessQuery {
    pub role: String,
    pub resource: String,
    pub action: String,
}

impl AccessQuery {
    pub fn new(
        role: impl Into<String>,
        resource: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            resource: resource.into(),
            action: action.into(),
        }
    }
}

impl fmt::Display for AccessQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}:{}", self.role, self.resource, self.action)
    }
}

/// Where an `AccessDecision` came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecisionSource {
    /// A rule belonging to `role` (the queried role or one of its
    /// ancestors) matched.  `index` is the rule's insertion position.
    Rule { role: String, index: usize },

    /// Nothing in the inheritance chain matched; the default action applied.
    Default,
}

/// The evaluator's answer to an `AccessQuery`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    pub effect: Effect,
    pub source: DecisionSource,
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        self.effect.is_allow()
    }

    pub fn is_default(&self) -> bool {
        self.source == DecisionSource::Default
    }
}

impl fmt::Display for AccessDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            DecisionSource::Rule { role, index } => {
                write!(f, "{} (rule #{} of role '{}')", self.effect, index, role)
            }
            DecisionSource::Default => write!(f, "{} (default action)", self.effect),
        }
    }
}

/// One audited check: the query, its decision, and when it was made.
///
/// The gatekeeper writes exactly one of these per successful check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub decision_id: Uuid,
    pub query: AccessQuery,
    pub decision: AccessDecision,
    pub recorded_at: DateTime<Utc>,
}

impl DecisionRecord {
    /// Stamp a decision with a fresh id and the current UTC time.
    pub fn new(query: AccessQuery, decision: AccessDecision) -> Self {
        Self {
            decision_id: Uuid::new_v4(),
            query,
            decision,
            recorded_at: Utc::now(),
        }
    }
}
