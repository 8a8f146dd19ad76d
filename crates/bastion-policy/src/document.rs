//! A format-neutral configuration document.
//!
//! The builder never looks at TOML or JSON directly.  Both are first
//! converted into a `ConfigValue` tree whose maps keep document order, which
//! matters because roles may only inherit from roles declared above them.

use bastion_contracts::error::{AclError, AclResult};

/// A parsed configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<ConfigValue>),
    /// Key/value pairs in document order.
    Map(Vec<(String, ConfigValue)>),
}

impl ConfigValue {
    /// Look up `key` if this is a map.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        match self {
            ConfigValue::Map(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(String, ConfigValue)]> {
        match self {
            ConfigValue::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The items of a sequence, or the values of a map.  `None` for scalars.
    pub fn items(&self) -> Option<Vec<&ConfigValue>> {
        match self {
            ConfigValue::Sequence(items) => Some(items.iter().collect()),
            ConfigValue::Map(entries) => Some(entries.iter().map(|(_, v)| v).collect()),
            _ => None,
        }
    }

    /// True for a non-empty sequence or map.
    pub fn is_traversable(&self) -> bool {
        self.items().is_some_and(|items| !items.is_empty())
    }

    /// Integer value of a "numeric" scalar: an integer, an integral float,
    /// or a string holding either.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(i) => Some(*i),
            ConfigValue::Float(f) => integral(*f),
            ConfigValue::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(integral))
            }
            _ => None,
        }
    }

    /// Finite numeric value of an integer, a float, or a string holding
    /// either.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            ConfigValue::Integer(i) => *i as f64,
            ConfigValue::Float(f) => *f,
            ConfigValue::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        n.is_finite().then_some(n)
    }

    /// String form of a string or numeric scalar.
    pub fn scalar_string(&self) -> Option<String> {
        match self {
            ConfigValue::String(s) => Some(s.clone()),
            ConfigValue::Integer(i) => Some(i.to_string()),
            ConfigValue::Float(f) => Some(f.to_string()),
            _ => None,
        }
    }
}

/// `f` as an `i64`, if it is whole and inside the `i64` range.
fn integral(f: f64) -> Option<i64> {
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.is_finite() && f.fract() == 0.0 && in_range).then_some(f as i64)
}

impl From<toml::Value> for ConfigValue {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => ConfigValue::String(s),
            toml::Value::Integer(i) => ConfigValue::Integer(i),
            toml::Value::Float(f) => ConfigValue::Float(f),
            toml::Value::Boolean(b) => ConfigValue::Bool(b),
            toml::Value::Datetime(dt) => ConfigValue::String(dt.to_string()),
            toml::Value::Array(items) => {
                ConfigValue::Sequence(items.into_iter().map(ConfigValue::from).collect())
            }
            toml::Value::Table(table) => ConfigValue::Map(
                table
                    .into_iter()
                    .map(|(k, v)| (k, ConfigValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for ConfigValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ConfigValue::Null,
            serde_json::Value::Bool(b) => ConfigValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => ConfigValue::Integer(i),
                None => ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => ConfigValue::String(s),
            serde_json::Value::Array(items) => {
                ConfigValue::Sequence(items.into_iter().map(ConfigValue::from).collect())
            }
            serde_json::Value::Object(object) => ConfigValue::Map(
                object
                    .into_iter()
                    .map(|(k, v)| (k, ConfigValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Parse a TOML document.
pub fn parse_toml(s: &str) -> AclResult<ConfigValue> {
    let table: toml::Table = toml::from_str(s).map_err(|e| AclError::ConfigError {
        reason: format!("failed to parse ACL TOML: {}", e),
    })?;
    Ok(ConfigValue::from(toml::Value::Table(table)))
}

/// Parse a JSON document.
pub fn parse_json(s: &str) -> AclResult<ConfigValue> {
    let value: serde_json::Value = serde_json::from_str(s).map_err(|e| AclError::ConfigError {
        reason: format!("failed to parse ACL JSON: {}", e),
    })?;
    Ok(ConfigValue::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(value: &ConfigValue) -> Vec<&str> {
        value
            .as_map()
            .unwrap()
            .iter()
            .map(|(k, _)| k.as_str())
            .collect()
    }

    #[test]
    fn toml_keeps_document_order() {
        let doc = parse_toml(
            r#"
            [role.zeta]
            [role.alpha]
            [role.mid]
        "#,
        )
        .unwrap();

        assert_eq!(keys(doc.get("role").unwrap()), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn json_keeps_document_order() {
        let doc = parse_json(r#"{ "role": { "zeta": {}, "alpha": {}, "mid": {} } }"#).unwrap();
        assert_eq!(keys(doc.get("role").unwrap()), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn numeric_scalars() {
        assert_eq!(ConfigValue::Integer(1).as_integer(), Some(1));
        assert_eq!(ConfigValue::Float(0.0).as_integer(), Some(0));
        assert_eq!(ConfigValue::Float(0.5).as_integer(), None);
        assert_eq!(ConfigValue::Float(1e30).as_integer(), None);
        assert_eq!(ConfigValue::Float(-1e30).as_integer(), None);
        assert_eq!(ConfigValue::String("1e30".to_string()).as_integer(), None);
        assert_eq!(ConfigValue::String(" 1 ".to_string()).as_integer(), Some(1));
        assert_eq!(ConfigValue::String("1.0".to_string()).as_integer(), Some(1));
        assert_eq!(ConfigValue::String("allow".to_string()).as_integer(), None);
        assert_eq!(ConfigValue::Bool(true).as_integer(), None);
        assert_eq!(ConfigValue::Null.as_integer(), None);

        assert_eq!(ConfigValue::Float(1e30).as_number(), Some(1e30));
        assert_eq!(ConfigValue::String(" 2 ".to_string()).as_number(), Some(2.0));
        assert_eq!(ConfigValue::Float(f64::NAN).as_number(), None);
        assert_eq!(ConfigValue::Bool(false).as_number(), None);
    }

    #[test]
    fn traversable_means_non_empty_collection() {
        assert!(ConfigValue::Sequence(vec![ConfigValue::Null]).is_traversable());
        assert!(!ConfigValue::Sequence(vec![]).is_traversable());
        assert!(!ConfigValue::Map(vec![]).is_traversable());
        assert!(!ConfigValue::String("index".to_string()).is_traversable());
    }

    #[test]
    fn parse_errors_are_config_errors() {
        match parse_toml("this is not valid toml ][[[") {
            Err(AclError::ConfigError { reason }) => {
                assert!(reason.contains("failed to parse ACL TOML"))
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
        match parse_json("{ not json") {
            Err(AclError::ConfigError { reason }) => {
                assert!(reason.contains("failed to parse ACL JSON"))
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }
}
