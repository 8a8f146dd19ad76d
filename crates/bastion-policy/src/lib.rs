//! # bastion-policy
//!
//! Builds a bastion `Acl` from a declarative configuration document.
//!
//! ## Overview
//!
//! TOML and JSON documents are parsed into a format-neutral
//! [`ConfigValue`] tree (document order preserved) and handed to
//! [`ConfigBuilder`], which validates the document and drives the role
//! registry, resource registry, and rule table of a fresh `Acl`.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use bastion_policy::ConfigBuilder;
//!
//! let acl = ConfigBuilder::from_file(Path::new("policies/acl.toml"))?;
//! let allowed = acl.is_allowed("user", "test", "index")?;
//! ```
//!
//! ## Precedence
//!
//! A role's own rules beat inherited ones, nearer ancestors beat farther
//! ones, and within one role the most recently declared rule wins.  When
//! nothing matches, `defaultAction` decides.

pub mod builder;
pub mod document;

pub use builder::ConfigBuilder;
pub use document::{parse_json, parse_toml, ConfigValue};

// ── Tests ─────────────────────────────────────────────────────────────────────
