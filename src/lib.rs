//! dmtopo - topology engine for DM cluster deployments
//!
//! Decodes cluster topology documents, fills in defaults, validates them for
//! directory, port and platform conflicts, merges scale-out fragments and
//! expands relative directories into absolute ones.

pub mod config;
pub mod error;
pub mod spec;
pub mod suggest;

// Re-exports for convenience
pub use config::Config;
pub use error::{Conflict, ConflictKind, ConfigError, TopologyError, TopologyResult};
pub use spec::{
    merge_topology, parse_topology_yaml, DecodeOptions, InstanceSpec, Role, Specification,
    TopologyWarning,
};
