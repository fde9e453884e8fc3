//! DM cluster topology model
//!
//! Decoding, default hydration, conflict validation, scale-out merging and
//! directory expansion for DM cluster topologies. Everything here works on
//! plain strings; no host filesystem access happens outside the loader.

pub mod expand;
pub mod global;
pub mod hydrate;
pub mod instance;
pub mod loader;
pub mod paths;
pub mod platform;
pub mod topology;
pub mod validate;

pub use global::{GlobalOptions, MonitoredOptions};
pub use hydrate::{hydrate, hydrate_specification};
pub use instance::{
    AlertmanagerSpec, GrafanaSpec, InstanceBase, InstanceSpec, MasterSpec, PortBinding,
    PrometheusSpec, Role, WorkerSpec,
};
pub use loader::{merge_topology, parse_topology_yaml, DecodeOptions, TopologyWarning};
pub use platform::{ArchAliases, Platform};
pub use topology::Specification;
pub use validate::{validate, validate_with};

/// serde helper: unset ports are omitted on output
pub(crate) fn is_zero(v: &u16) -> bool {
    *v == 0
}
