//! Conflict validation
//!
//! Checks a hydrated topology for instances on one host that share a
//! directory or a port, and for hosts declared with two platforms.
//!
//! Iteration order is fixed (role groups in declaration order, instances in
//! document order, then the monitoring agent of every host in first-seen
//! order), so the same input always reports the same first conflict.

use std::collections::{HashMap, HashSet};

use crate::error::{Conflict, ConflictKind, TopologyError, TopologyResult};

use super::expand::{data_dir_entries, resolve_deploy_dir, resolve_nested_dir};
use super::global::MONITORED_GROUP;
use super::instance::PortBinding;
use super::platform::{ArchAliases, Platform};
use super::topology::Specification;

/// Validate with the built-in architecture aliases
pub fn validate(spec: &Specification) -> TopologyResult<()> {
    validate_with(spec, &ArchAliases::default())
}

/// Validate a hydrated topology. Never mutates it.
pub fn validate_with(spec: &Specification, aliases: &ArchAliases) -> TopologyResult<()> {
    check_hosts(spec)?;
    check_directories(spec)?;
    check_ports(spec)?;
    check_platforms(spec, aliases)?;
    Ok(())
}

fn check_hosts(spec: &Specification) -> TopologyResult<()> {
    match spec.instances().find(|i| i.host().trim().is_empty()) {
        Some(instance) => Err(TopologyError::EmptyHost {
            group: instance.role().group().to_string(),
        }),
        None => Ok(()),
    }
}

/// Hosts in first-seen order
fn hosts(spec: &Specification) -> Vec<&str> {
    let mut seen = HashSet::new();
    spec.instances()
        .map(|i| i.host())
        .filter(|host| seen.insert(*host))
        .collect()
}

fn location(group: &str, host: &str, field: &str) -> String {
    format!("{}:{}.{}", group, host, field)
}

/// First owner of every `(host, value)` pair
struct Claims<K> {
    owners: HashMap<(String, K), String>,
}

impl<K: std::hash::Hash + Eq + Clone + ToString> Claims<K> {
    fn new() -> Self {
        Self {
            owners: HashMap::new(),
        }
    }

    fn claim(&mut self, kind: ConflictKind, host: &str, value: K, owner: String) -> Result<(), Conflict> {
        let key = (host.to_string(), value);
        if let Some(previous) = self.owners.get(&key) {
            return Err(Conflict {
                kind,
                value: key.1.to_string(),
                lhs: previous.clone(),
                rhs: owner,
            });
        }
        self.owners.insert(key, owner);
        Ok(())
    }
}

fn check_directories(spec: &Specification) -> TopologyResult<()> {
    let mut claims = Claims::new();

    for instance in spec.instances() {
        let group = instance.role().group();
        let host = instance.host();
        let deploy_dir = resolve_deploy_dir(instance.user(), instance.deploy_dir());
        let data_dirs: Vec<String> = data_dir_entries(instance.data_dir())
            .map(|d| resolve_nested_dir(&deploy_dir, d))
            .collect();

        claims.claim(
            ConflictKind::Directory,
            host,
            deploy_dir.clone(),
            location(group, host, "deploy_dir"),
        )?;
        for data_dir in data_dirs {
            claims.claim(
                ConflictKind::Directory,
                host,
                data_dir,
                location(group, host, "data_dir"),
            )?;
        }
    }

    let monitored = &spec.monitored;
    let deploy_dir = resolve_deploy_dir(&spec.global.user, &monitored.deploy_dir);
    for host in hosts(spec) {
        claims.claim(
            ConflictKind::Directory,
            host,
            deploy_dir.clone(),
            location(MONITORED_GROUP, host, "deploy_dir"),
        )?;
        for data_dir in data_dir_entries(&monitored.data_dir) {
            claims.claim(
                ConflictKind::Directory,
                host,
                resolve_nested_dir(&deploy_dir, data_dir),
                location(MONITORED_GROUP, host, "data_dir"),
            )?;
        }
    }

    Ok(())
}

fn check_ports(spec: &Specification) -> TopologyResult<()> {
    let mut claims = Claims::new();
    let mut claim = |group: &str, host: &str, binding: PortBinding| {
        claims.claim(
            ConflictKind::Port,
            host,
            binding.port,
            location(group, host, binding.tag),
        )
    };

    for instance in spec.instances() {
        for binding in instance.ports() {
            claim(instance.role().group(), instance.host(), binding)?;
        }
    }

    for host in hosts(spec) {
        for binding in spec.monitored.ports() {
            claim(MONITORED_GROUP, host, binding)?;
        }
    }

    Ok(())
}

fn check_platforms(spec: &Specification, aliases: &ArchAliases) -> TopologyResult<()> {
    let mut seen: HashMap<&str, (Platform, &str)> = HashMap::new();

    for instance in spec.instances() {
        let group = instance.role().group();
        let platform = Platform::new(instance.os(), instance.arch(), aliases);

        match seen.get(instance.host()) {
            Some((previous, previous_group)) if *previous != platform => {
                return Err(Conflict {
                    kind: ConflictKind::Platform,
                    value: instance.host().to_string(),
                    lhs: format!("{}:{}", previous_group, previous),
                    rhs: format!("{}:{}", group, platform),
                }
                .into());
            }
            Some(_) => {}
            None => {
                seen.insert(instance.host(), (platform, group));
            }
        }
    }

    Ok(())
}
