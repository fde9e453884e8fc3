//! Default hydration
//!
//! Fills every unset instance field from the global options and the
//! `<role>-<main-port>` naming convention. Runs once, right after decoding.

use log::debug;

use super::global::GlobalOptions;
use super::instance::InstanceSpec;
use super::paths;
use super::platform::{normalize_os, ArchAliases};
use super::topology::Specification;

/// Hydrate one instance against already-defaulted global options.
///
/// Explicit per-instance values are never recomposed.
pub fn hydrate<I: InstanceSpec>(mut instance: I, global: &GlobalOptions, aliases: &ArchAliases) -> I {
    instance.apply_port_defaults();

    let dir_name = instance.dir_name();
    let host = instance.host().to_string();
    let main_port = instance.main_port();

    if let Some(name) = instance.name_mut() {
        if name.is_empty() {
            *name = format!("dm-{}-{}", host, main_port);
        }
    }

    let base = instance.base_mut();

    if base.user.trim().is_empty() {
        base.user = global.user.clone();
    }

    if base.ssh_port == 0 {
        base.ssh_port = global.ssh_port;
    }

    if base.deploy_dir.is_empty() {
        base.deploy_dir = paths::join(&global.deploy_dir, &dir_name);
    }

    if base.data_dir.is_empty() {
        base.data_dir = default_data_dir(&global.data_dir, &dir_name);
    }

    if base.log_dir.is_empty() {
        base.log_dir = global.log_dir.clone();
    }

    base.os = if base.os.is_empty() {
        global.os.clone()
    } else {
        normalize_os(&base.os)
    };
    base.arch = if base.arch.is_empty() {
        global.arch.clone()
    } else {
        aliases.normalize(&base.arch)
    };

    debug!(
        "hydrated {} on {}: deploy_dir={} data_dir={}",
        dir_name, host, base.deploy_dir, base.data_dir
    );

    instance
}

/// Data directory for an instance that does not set one.
///
/// An absolute global dir gets a per-instance subdirectory; a relative one is
/// kept as is so it resolves inside the instance's own deploy dir.
fn default_data_dir(global_data_dir: &str, dir_name: &str) -> String {
    if paths::is_absolute(global_data_dir) {
        paths::join(global_data_dir, dir_name)
    } else if global_data_dir.is_empty() {
        "data".to_string()
    } else {
        global_data_dir.to_string()
    }
}

fn hydrate_all<I: InstanceSpec>(instances: &mut Vec<I>, global: &GlobalOptions, aliases: &ArchAliases) {
    *instances = std::mem::take(instances)
        .into_iter()
        .map(|instance| hydrate(instance, global, aliases))
        .collect();
}

/// Apply built-in defaults to the cluster-wide options, then hydrate every
/// instance against them.
pub fn hydrate_specification(spec: &mut Specification, aliases: &ArchAliases) {
    spec.global.apply_defaults(aliases);
    spec.monitored.apply_defaults(&spec.global);

    let global = &spec.global;
    hydrate_all(&mut spec.masters, global, aliases);
    hydrate_all(&mut spec.workers, global, aliases);
    hydrate_all(&mut spec.monitors, global, aliases);
    hydrate_all(&mut spec.grafanas, global, aliases);
    hydrate_all(&mut spec.alertmanagers, global, aliases);
}
