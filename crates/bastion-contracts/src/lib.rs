//! # bastion-contracts
//!
//! Shared types, decisions, and errors for the bastion ACL engine.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate, only data definitions and error types.

pub mod acl;
pub mod decision;
pub mod effect;
pub mod error;

pub use acl::{ActionPattern, Resource, Role, Rule};
pub use decision::{AccessDecision, AccessQuery, DecisionRecord, DecisionSource};
pub use effect::Effect;
pub use error::{AclError, AclResult};
