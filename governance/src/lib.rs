//! Governance registry for the curation protocol.
//!
//! A single owner, fixed at deployment, controls the mutable protocol
//! parameters. There is no role hierarchy: authorization is an equality test
//! against the owner identity.

pub mod registry;

pub use registry::GovernanceRegistry;
