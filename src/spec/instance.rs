//! Per-role instance specifications
//!
//! Each role is its own struct so that role-specific ports keep their own
//! field names (and serialization tags, which conflict messages echo). The
//! [`InstanceSpec`] trait is the capability surface shared by all roles.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_yaml_ng::{Mapping, Value};

use super::is_zero;

/// Closed set of deployable roles, in declaration order of the topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Master,
    Worker,
    Prometheus,
    Grafana,
    Alertmanager,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Master,
        Role::Worker,
        Role::Prometheus,
        Role::Grafana,
        Role::Alertmanager,
    ];

    /// Role name, also the prefix of generated directory names
    pub fn name(self) -> &'static str {
        match self {
            Role::Master => "dm-master",
            Role::Worker => "dm-worker",
            Role::Prometheus => "prometheus",
            Role::Grafana => "grafana",
            Role::Alertmanager => "alertmanager",
        }
    }

    /// Key of the role group in the topology document
    pub fn group(self) -> &'static str {
        match self {
            Role::Master => "master_servers",
            Role::Worker => "worker_servers",
            Role::Prometheus => "monitoring_servers",
            Role::Grafana => "grafana_servers",
            Role::Alertmanager => "alertmanager_servers",
        }
    }

    pub fn from_group(group: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|r| r.group() == group)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A declared port and the serialization tag of the field declaring it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortBinding {
    pub tag: &'static str,
    pub port: u16,
}

impl PortBinding {
    pub fn new(tag: &'static str, port: u16) -> Self {
        Self { tag, port }
    }

    /// Field name without serialization options
    pub fn key(&self) -> &'static str {
        self.tag.split(',').next().unwrap_or(self.tag)
    }
}

/// Fields shared by every role
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstanceBase {
    pub host: String,

    /// Deployment user; inherited from `global.user` when unset
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user: String,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub ssh_port: u16,

    /// Set on instances that already existed before a scale-out
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub imported: bool,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub deploy_dir: String,

    /// May hold several comma-separated directories
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data_dir: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub log_dir: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub os: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub arch: String,

    /// Component configuration, passed through untouched
    #[serde(default, skip_serializing_if = "Mapping::is_empty")]
    pub config: Mapping,

    /// Keys no role understands; drained into warnings while loading
    #[serde(flatten)]
    pub(crate) unknown: BTreeMap<String, Value>,
}

impl InstanceBase {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }
}

/// Capability surface shared by every role
pub trait InstanceSpec {
    fn role(&self) -> Role;

    fn base(&self) -> &InstanceBase;

    fn base_mut(&mut self) -> &mut InstanceBase;

    /// Declared ports, main port first
    fn ports(&self) -> Vec<PortBinding>;

    /// Replace unset ports with the role defaults
    fn apply_port_defaults(&mut self);

    /// Instance name, for roles that carry one
    fn name_mut(&mut self) -> Option<&mut String> {
        None
    }

    fn main_port(&self) -> u16 {
        self.ports().first().map_or(0, |p| p.port)
    }

    /// Generated directory leaf: `<role>-<main-port>`
    fn dir_name(&self) -> String {
        format!("{}-{}", self.role().name(), self.main_port())
    }

    fn host(&self) -> &str {
        &self.base().host
    }

    fn user(&self) -> &str {
        &self.base().user
    }

    fn ssh_port(&self) -> u16 {
        self.base().ssh_port
    }

    fn deploy_dir(&self) -> &str {
        &self.base().deploy_dir
    }

    fn data_dir(&self) -> &str {
        &self.base().data_dir
    }

    fn log_dir(&self) -> &str {
        &self.base().log_dir
    }

    fn os(&self) -> &str {
        &self.base().os
    }

    fn arch(&self) -> &str {
        &self.base().arch
    }

    fn is_imported(&self) -> bool {
        self.base().imported
    }
}

/// `dm-master` instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MasterSpec {
    #[serde(flatten)]
    pub base: InstanceBase,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub port: u16,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub peer_port: u16,
}

impl MasterSpec {
    pub const DEFAULT_PORT: u16 = 8261;
    pub const DEFAULT_PEER_PORT: u16 = 8291;
}

impl InstanceSpec for MasterSpec {
    fn role(&self) -> Role {
        Role::Master
    }

    fn base(&self) -> &InstanceBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut InstanceBase {
        &mut self.base
    }

    fn ports(&self) -> Vec<PortBinding> {
        vec![
            PortBinding::new("port,omitempty", self.port),
            PortBinding::new("peer_port,omitempty", self.peer_port),
        ]
    }

    fn apply_port_defaults(&mut self) {
        default_port(&mut self.port, Self::DEFAULT_PORT);
        default_port(&mut self.peer_port, Self::DEFAULT_PEER_PORT);
    }

    fn name_mut(&mut self) -> Option<&mut String> {
        Some(&mut self.name)
    }
}

/// `dm-worker` instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkerSpec {
    #[serde(flatten)]
    pub base: InstanceBase,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub port: u16,
}

impl WorkerSpec {
    pub const DEFAULT_PORT: u16 = 8262;
}

impl InstanceSpec for WorkerSpec {
    fn role(&self) -> Role {
        Role::Worker
    }

    fn base(&self) -> &InstanceBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut InstanceBase {
        &mut self.base
    }

    fn ports(&self) -> Vec<PortBinding> {
        vec![PortBinding::new("port,omitempty", self.port)]
    }

    fn apply_port_defaults(&mut self) {
        default_port(&mut self.port, Self::DEFAULT_PORT);
    }

    fn name_mut(&mut self) -> Option<&mut String> {
        Some(&mut self.name)
    }
}

/// Prometheus server (`monitoring_servers`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrometheusSpec {
    #[serde(flatten)]
    pub base: InstanceBase,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub port: u16,
}

impl PrometheusSpec {
    pub const DEFAULT_PORT: u16 = 9090;
}

impl InstanceSpec for PrometheusSpec {
    fn role(&self) -> Role {
        Role::Prometheus
    }

    fn base(&self) -> &InstanceBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut InstanceBase {
        &mut self.base
    }

    fn ports(&self) -> Vec<PortBinding> {
        vec![PortBinding::new("port,omitempty", self.port)]
    }

    fn apply_port_defaults(&mut self) {
        default_port(&mut self.port, Self::DEFAULT_PORT);
    }
}

/// Grafana server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrafanaSpec {
    #[serde(flatten)]
    pub base: InstanceBase,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub port: u16,
}

impl GrafanaSpec {
    pub const DEFAULT_PORT: u16 = 3000;
}

impl InstanceSpec for GrafanaSpec {
    fn role(&self) -> Role {
        Role::Grafana
    }

    fn base(&self) -> &InstanceBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut InstanceBase {
        &mut self.base
    }

    fn ports(&self) -> Vec<PortBinding> {
        vec![PortBinding::new("port,omitempty", self.port)]
    }

    fn apply_port_defaults(&mut self) {
        default_port(&mut self.port, Self::DEFAULT_PORT);
    }
}

/// Alertmanager server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertmanagerSpec {
    #[serde(flatten)]
    pub base: InstanceBase,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub web_port: u16,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub cluster_port: u16,
}

impl AlertmanagerSpec {
    pub const DEFAULT_WEB_PORT: u16 = 9093;
    pub const DEFAULT_CLUSTER_PORT: u16 = 9094;
}

impl InstanceSpec for AlertmanagerSpec {
    fn role(&self) -> Role {
        Role::Alertmanager
    }

    fn base(&self) -> &InstanceBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut InstanceBase {
        &mut self.base
    }

    fn ports(&self) -> Vec<PortBinding> {
        vec![
            PortBinding::new("web_port,omitempty", self.web_port),
            PortBinding::new("cluster_port,omitempty", self.cluster_port),
        ]
    }

    fn apply_port_defaults(&mut self) {
        default_port(&mut self.web_port, Self::DEFAULT_WEB_PORT);
        default_port(&mut self.cluster_port, Self::DEFAULT_CLUSTER_PORT);
    }
}

fn default_port(port: &mut u16, default: u16) {
    if *port == 0 {
        *port = default;
    }
}
