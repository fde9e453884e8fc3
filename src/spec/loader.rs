//! Topology loading
//!
//! The single "load and validate" entry points: read a document, decode it,
//! report unknown keys, hydrate defaults and validate. Scale-out fragments
//! go through the same path with the base topology's options as context.

use std::fmt;
use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use crate::error::{TopologyError, TopologyResult};
use crate::suggest::{find_line_number, suggest_key};

use super::hydrate::hydrate_specification;
use super::instance::InstanceSpec;
use super::platform::ArchAliases;
use super::topology::Specification;
use super::validate::validate_with;

/// Every key the topology schema understands, for suggestions
const KNOWN_KEYS: &[&str] = &[
    "global",
    "monitored",
    "server_configs",
    "master_servers",
    "worker_servers",
    "monitoring_servers",
    "grafana_servers",
    "alertmanager_servers",
    "user",
    "host",
    "name",
    "ssh_port",
    "imported",
    "port",
    "peer_port",
    "web_port",
    "cluster_port",
    "node_exporter_port",
    "blackbox_exporter_port",
    "deploy_dir",
    "data_dir",
    "log_dir",
    "os",
    "arch",
    "config",
];

/// Knobs for decoding a topology document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Unknown keys are errors instead of warnings
    pub strict: bool,
    pub arch_aliases: ArchAliases,
}

/// Unknown key found in a topology document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologyWarning {
    /// Last segment of the path
    pub key: String,
    /// Dotted path, e.g. `worker_servers.0.deploy_dri`
    pub path: String,
    pub file: String,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for TopologyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key '{}' in {}", self.path, self.file)?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Read, decode, hydrate and validate a topology file
pub fn parse_topology_yaml(
    path: &Path,
    options: &DecodeOptions,
) -> TopologyResult<(Specification, Vec<TopologyWarning>)> {
    let content = read(path)?;
    decode_str(&content, &path.display().to_string(), options)
}

/// Load a base topology and a scale-out fragment, merge and validate.
///
/// Warnings of both documents are returned in order.
pub fn merge_topology(
    base_path: &Path,
    scale_path: &Path,
    options: &DecodeOptions,
) -> TopologyResult<(Specification, Vec<TopologyWarning>)> {
    let (base, mut warnings) = parse_topology_yaml(base_path, options)?;

    let content = read(scale_path)?;
    let (part, part_warnings) = decode_part(
        &base.new_part(),
        &content,
        &scale_path.display().to_string(),
        options,
    )?;
    warnings.extend(part_warnings);

    let merged = base.merge_with(&part, &options.arch_aliases)?;
    info!(
        "merged {} new instance(s) into {} existing instance(s)",
        part.instance_count(),
        base.instance_count()
    );
    Ok((merged, warnings))
}

/// Decode a standalone topology document
pub fn decode_str(
    yaml: &str,
    file: &str,
    options: &DecodeOptions,
) -> TopologyResult<(Specification, Vec<TopologyWarning>)> {
    let (mut spec, warnings) = decode_raw(yaml, file, options)?;
    hydrate_specification(&mut spec, &options.arch_aliases);
    validate_with(&spec, &options.arch_aliases)?;

    debug!("loaded {} instance(s) from {}", spec.instance_count(), file);
    Ok((spec, warnings))
}

/// Decode a scale-out fragment into `target`, an empty part of the base.
///
/// Options the fragment sets itself overlay the base's while hydrating the
/// fragment; the merged topology keeps the base's options.
pub fn decode_part(
    target: &Specification,
    yaml: &str,
    file: &str,
    options: &DecodeOptions,
) -> TopologyResult<(Specification, Vec<TopologyWarning>)> {
    let (mut part, warnings) = decode_raw(yaml, file, options)?;

    if !part.global.is_unset() {
        warn!("{} overrides global options for its own instances only", file);
    }
    if !part.monitored.is_unset() {
        warn!("{} overrides monitored options for its own instances only", file);
    }
    part.global = target.global.overlay(&part.global);
    part.monitored = target.monitored.overlay(&part.monitored);
    part.server_configs = target.server_configs.clone();

    hydrate_specification(&mut part, &options.arch_aliases);
    validate_with(&part, &options.arch_aliases)?;

    debug!("decoded {} scale-out instance(s) from {}", part.instance_count(), file);
    Ok((part, warnings))
}

fn read(path: &Path) -> TopologyResult<String> {
    fs::read_to_string(path).map_err(|source| TopologyError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Deserialize without hydration, collecting unknown keys
fn decode_raw(
    yaml: &str,
    file: &str,
    options: &DecodeOptions,
) -> TopologyResult<(Specification, Vec<TopologyWarning>)> {
    let text = if yaml.trim().is_empty() { "{}" } else { yaml };

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = serde_yaml_ng::Deserializer::from_str(text);
    let mut spec: Specification = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| TopologyError::Parse {
        file: file.to_string(),
        message: e.to_string(),
    })?;
    unknown_paths.extend(drain_unknown_instance_keys(&mut spec));

    let warnings: Vec<TopologyWarning> = unknown_paths
        .into_iter()
        .map(|path| warning(yaml, file, path))
        .collect();

    for w in &warnings {
        warn!("{}", w);
    }
    if options.strict && !warnings.is_empty() {
        return Err(TopologyError::UnknownKeys {
            file: file.to_string(),
            keys: warnings.into_iter().map(|w| w.path).collect(),
        });
    }

    Ok((spec, warnings))
}

fn warning(content: &str, file: &str, path: String) -> TopologyWarning {
    let key = path
        .split('.')
        .next_back()
        .unwrap_or(path.as_str())
        .to_string();
    TopologyWarning {
        line: find_line_number(content, &key),
        suggestion: suggest_key(&key, KNOWN_KEYS),
        file: file.to_string(),
        path,
        key,
    }
}

fn drain_unknown_instance_keys(spec: &mut Specification) -> Vec<String> {
    let mut found = Vec::new();
    drain_group(&mut spec.masters, &mut found);
    drain_group(&mut spec.workers, &mut found);
    drain_group(&mut spec.monitors, &mut found);
    drain_group(&mut spec.grafanas, &mut found);
    drain_group(&mut spec.alertmanagers, &mut found);
    found
}

fn drain_group<I: InstanceSpec>(instances: &mut [I], found: &mut Vec<String>) {
    for (index, instance) in instances.iter_mut().enumerate() {
        let group = instance.role().group();
        let unknown = std::mem::take(&mut instance.base_mut().unknown);
        found.extend(
            unknown
                .into_keys()
                .map(|key| format!("{}.{}.{}", group, index, key)),
        );
    }
}
