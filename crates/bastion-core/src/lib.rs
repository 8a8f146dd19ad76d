//! # bastion-core
//!
//! The in-memory ACL engine.
//!
//! This crate provides:
//! - `RoleRegistry`, `ResourceRegistry` and `RuleTable`, which own the
//!   identities and rules and enforce their invariants on insertion
//! - `Acl`, which bundles them with a default action and evaluates queries
//! - The `AccessPolicy` and `DecisionRecorder` traits, the `Gatekeeper`
//!   that wires one of each together, and the swappable `AclHandle`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bastion_contracts::Effect;
//! use bastion_core::Acl;
//!
//! let mut acl = Acl::new(Effect::Deny);
//! acl.add_role("guest", None, None)?;
//! acl.add_resource("index", None, ["index"])?;
//! acl.allow("guest", "index", &["index"])?;
//! assert!(acl.is_allowed("guest", "index", "index")?);
//! ```

pub mod acl;
pub mod evaluator;
pub mod gatekeeper;
pub mod handle;
pub mod resources;
pub mod roles;
pub mod rules;
pub mod traits;

pub use acl::Acl;
pub use gatekeeper::Gatekeeper;
pub use handle::AclHandle;
pub use resources::ResourceRegistry;
pub use roles::RoleRegistry;
pub use rules::{RuleMatch, RuleTable};
pub use traits::{AccessPolicy, DecisionRecorder};
