//! Rule effects and the default action.
//!
//! The numeric codes follow the convention of the configuration format:
//! `0` is deny, `1` is allow.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AclError;

/// The outcome of a matched rule, or of the default action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    Deny,
    Allow,
}

impl Effect {
    /// Numeric code of the deny effect.
    pub const DENY_CODE: i64 = 0;

    /// Numeric code of the allow effect.
    pub const ALLOW_CODE: i64 = 1;

    /// Map a numeric code to an effect.  Returns `None` for anything other
    /// than `0` or `1`.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            Self::DENY_CODE => Some(Effect::Deny),
            Self::ALLOW_CODE => Some(Effect::Allow),
            _ => None,
        }
    }

    /// The numeric code of this effect.
    pub fn code(self) -> i64 {
        match self {
            Effect::Deny => Self::DENY_CODE,
            Effect::Allow => Self::ALLOW_CODE,
        }
    }

    pub fn is_allow(self) -> bool {
        self == Effect::Allow
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Allow => f.write_str("allow"),
            Effect::Deny => f.write_str("deny"),
        }
    }
}

/// Parses the symbolic (`allow` / `deny`, any case) or numeric (`1` / `0`)
/// spelling of an effect.
impl FromStr for Effect {
    type Err = AclError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("allow") {
            return Ok(Effect::Allow);
        }
        if trimmed.eq_ignore_ascii_case("deny") {
            return Ok(Effect::Deny);
        }
        trimmed
            .parse::<i64>()
            .ok()
            .and_then(Effect::from_code)
            .ok_or_else(|| {
                AclError::config(format!(
                    "'{}' is not a valid effect; expected allow, deny, 1 or 0",
                    s
                ))
            })
    }
}
