//! The topology aggregate

use serde::{Deserialize, Serialize};
use serde_yaml_ng::Mapping;

use crate::error::{TopologyError, TopologyResult};

use super::expand::{self, data_dir_entries, resolve_deploy_dir, resolve_nested_dir};
use super::global::{GlobalOptions, MonitoredOptions};
use super::instance::{
    AlertmanagerSpec, GrafanaSpec, InstanceSpec, MasterSpec, PrometheusSpec, Role, WorkerSpec,
};
use super::loader::{self, DecodeOptions, TopologyWarning};
use super::paths;
use super::platform::ArchAliases;
use super::validate;

/// A fully resolved cluster topology.
///
/// Role groups keep document order; operators address instances by index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Specification {
    #[serde(default)]
    pub global: GlobalOptions,

    #[serde(default)]
    pub monitored: MonitoredOptions,

    /// Cluster-wide component configuration, passed through untouched
    #[serde(default, skip_serializing_if = "Mapping::is_empty")]
    pub server_configs: Mapping,

    #[serde(rename = "master_servers", default)]
    pub masters: Vec<MasterSpec>,

    #[serde(rename = "worker_servers", default)]
    pub workers: Vec<WorkerSpec>,

    #[serde(rename = "monitoring_servers", default, skip_serializing_if = "Vec::is_empty")]
    pub monitors: Vec<PrometheusSpec>,

    #[serde(rename = "grafana_servers", default, skip_serializing_if = "Vec::is_empty")]
    pub grafanas: Vec<GrafanaSpec>,

    #[serde(rename = "alertmanager_servers", default, skip_serializing_if = "Vec::is_empty")]
    pub alertmanagers: Vec<AlertmanagerSpec>,
}

impl Specification {
    /// Decode, hydrate and validate a topology document
    pub fn from_yaml_str(yaml: &str) -> TopologyResult<Self> {
        Self::from_yaml_str_with(yaml, &DecodeOptions::default()).map(|(spec, _)| spec)
    }

    /// Decode with explicit options, returning unknown-key warnings
    pub fn from_yaml_str_with(
        yaml: &str,
        options: &DecodeOptions,
    ) -> TopologyResult<(Self, Vec<TopologyWarning>)> {
        loader::decode_str(yaml, "<inline>", options)
    }

    /// Encode back to YAML. Unset fields are omitted, so the output decodes
    /// to the same topology.
    pub fn to_yaml_string(&self) -> TopologyResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Every instance, role groups in declaration order
    pub fn instances(&self) -> impl Iterator<Item = &dyn InstanceSpec> + '_ {
        let masters = self.masters.iter().map(|i| i as &dyn InstanceSpec);
        let workers = self.workers.iter().map(|i| i as &dyn InstanceSpec);
        let monitors = self.monitors.iter().map(|i| i as &dyn InstanceSpec);
        let grafanas = self.grafanas.iter().map(|i| i as &dyn InstanceSpec);
        let alertmanagers = self.alertmanagers.iter().map(|i| i as &dyn InstanceSpec);
        masters
            .chain(workers)
            .chain(monitors)
            .chain(grafanas)
            .chain(alertmanagers)
    }

    pub fn instances_mut(&mut self) -> impl Iterator<Item = &mut dyn InstanceSpec> + '_ {
        let masters = self.masters.iter_mut().map(|i| i as &mut dyn InstanceSpec);
        let workers = self.workers.iter_mut().map(|i| i as &mut dyn InstanceSpec);
        let monitors = self.monitors.iter_mut().map(|i| i as &mut dyn InstanceSpec);
        let grafanas = self.grafanas.iter_mut().map(|i| i as &mut dyn InstanceSpec);
        let alertmanagers = self
            .alertmanagers
            .iter_mut()
            .map(|i| i as &mut dyn InstanceSpec);
        masters
            .chain(workers)
            .chain(monitors)
            .chain(grafanas)
            .chain(alertmanagers)
    }

    /// Instances of one role group, in document order
    pub fn group(&self, role: Role) -> Vec<&dyn InstanceSpec> {
        self.instances().filter(|i| i.role() == role).collect()
    }

    pub fn instance_count(&self) -> usize {
        self.instances().count()
    }

    /// Validate against the built-in architecture aliases
    pub fn validate(&self) -> TopologyResult<()> {
        validate::validate(self)
    }

    /// An empty topology sharing this one's cluster-wide options; the decode
    /// target for scale-out fragments.
    pub fn new_part(&self) -> Specification {
        Specification {
            global: self.global.clone(),
            monitored: self.monitored.clone(),
            server_configs: self.server_configs.clone(),
            ..Default::default()
        }
    }

    /// Decode a scale-out fragment so that its unset fields resolve like this
    /// topology's instances do
    pub fn decode_part(
        &self,
        yaml: &str,
        options: &DecodeOptions,
    ) -> TopologyResult<(Specification, Vec<TopologyWarning>)> {
        loader::decode_part(&self.new_part(), yaml, "<scale-out>", options)
    }

    /// Merge a decoded fragment and validate the result
    pub fn merge(&self, part: &Specification) -> TopologyResult<Specification> {
        self.merge_with(part, &ArchAliases::default())
    }

    /// Merge a decoded fragment, validating with a custom alias table.
    ///
    /// Conflicts are reported as [`TopologyError::Merge`].
    pub fn merge_with(
        &self,
        part: &Specification,
        aliases: &ArchAliases,
    ) -> TopologyResult<Specification> {
        let merged = self.concat(part);
        validate::validate_with(&merged, aliases).map_err(TopologyError::into_merge)?;
        Ok(merged)
    }

    /// Per-group `self ++ part`, with this topology's instances marked as
    /// imported. Not validated.
    pub(crate) fn concat(&self, part: &Specification) -> Specification {
        Specification {
            global: self.global.clone(),
            monitored: self.monitored.clone(),
            server_configs: self.server_configs.clone(),
            masters: concat_group(&self.masters, &part.masters),
            workers: concat_group(&self.workers, &part.workers),
            monitors: concat_group(&self.monitors, &part.monitors),
            grafanas: concat_group(&self.grafanas, &part.grafanas),
            alertmanagers: concat_group(&self.alertmanagers, &part.alertmanagers),
        }
    }

    /// Expand relative directories in place
    pub fn expand_relative_dirs(&mut self) {
        expand::expand_relative_dirs(self);
    }

    /// Copy of this topology with relative directories expanded
    pub fn expanded(&self) -> Specification {
        let mut spec = self.clone();
        spec.expand_relative_dirs();
        spec
    }

    /// Count resolved directories on `host` that equal `path` or lie below it.
    ///
    /// Deploy, data and log directories of every instance on the host are
    /// counted; an empty log dir stands for the deploy dir. A relative `path`
    /// is anchored at the global deployment user's home; an empty one
    /// matches everything on the host. Instance dirs resolve against each
    /// instance's own user.
    pub fn count_dir(&self, host: &str, path: &str) -> usize {
        let prefix = if path.trim().is_empty() {
            None
        } else {
            Some(paths::abs(&self.global.user, path))
        };

        self.instances()
            .filter(|i| i.host() == host)
            .flat_map(resolved_dirs)
            .filter(|dir| match &prefix {
                Some(prefix) => paths::is_within(dir, prefix),
                None => true,
            })
            .count()
    }
}

fn concat_group<I: InstanceSpec + Clone>(base: &[I], part: &[I]) -> Vec<I> {
    base.iter()
        .cloned()
        .map(|mut instance| {
            instance.base_mut().imported = true;
            instance
        })
        .chain(part.iter().cloned())
        .collect()
}

/// Deploy, data and log directories of an instance, as absolute paths
fn resolved_dirs(instance: &dyn InstanceSpec) -> Vec<String> {
    let deploy_dir = resolve_deploy_dir(instance.user(), instance.deploy_dir());
    let mut dirs: Vec<String> = data_dir_entries(instance.data_dir())
        .map(|d| resolve_nested_dir(&deploy_dir, d))
        .collect();
    dirs.push(resolve_nested_dir(&deploy_dir, instance.log_dir()));
    dirs.push(deploy_dir);
    dirs
}
