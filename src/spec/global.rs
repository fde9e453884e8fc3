//! Cluster-wide options: `global:` and `monitored:` sections

use serde::{Deserialize, Serialize};

use super::paths;
use super::platform::{normalize_os, ArchAliases};
use super::{is_zero, PortBinding};

pub const DEFAULT_USER: &str = "tidb";
pub const DEFAULT_SSH_PORT: u16 = 22;
pub const DEFAULT_DEPLOY_DIR: &str = "deploy";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_OS: &str = "linux";
pub const DEFAULT_ARCH: &str = "amd64";

pub const DEFAULT_NODE_EXPORTER_PORT: u16 = 9100;
pub const DEFAULT_BLACKBOX_EXPORTER_PORT: u16 = 9115;
pub const DEFAULT_MONITORED_LOG_DIR: &str = "log";

/// Role name used for the generated monitoring agent directories
pub const MONITOR_ROLE: &str = "monitor";

/// Group label used for monitoring agents in conflict messages
pub const MONITORED_GROUP: &str = "monitored";

/// Defaults inherited by every instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalOptions {
    /// Deployment user; relative directories are anchored at its home
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user: String,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub ssh_port: u16,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub deploy_dir: String,

    /// Absolute: every instance gets its own `<role>-<port>` subdirectory.
    /// Relative: kept as is and resolved inside each instance's deploy dir.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data_dir: String,

    /// No built-in default; empty means the component's own location
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub log_dir: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub os: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub arch: String,
}

impl GlobalOptions {
    /// Fill unset fields from built-in constants and normalize the platform
    pub(crate) fn apply_defaults(&mut self, aliases: &ArchAliases) {
        fill(&mut self.user, DEFAULT_USER);
        if self.ssh_port == 0 {
            self.ssh_port = DEFAULT_SSH_PORT;
        }
        fill(&mut self.deploy_dir, DEFAULT_DEPLOY_DIR);
        fill(&mut self.data_dir, DEFAULT_DATA_DIR);
        fill(&mut self.os, DEFAULT_OS);
        fill(&mut self.arch, DEFAULT_ARCH);
        self.os = normalize_os(&self.os);
        self.arch = aliases.normalize(&self.arch);
    }

    /// `self` with every field that `other` sets replaced by `other`'s value
    pub(crate) fn overlay(&self, other: &GlobalOptions) -> GlobalOptions {
        GlobalOptions {
            user: pick(&self.user, &other.user),
            ssh_port: if other.ssh_port != 0 {
                other.ssh_port
            } else {
                self.ssh_port
            },
            deploy_dir: pick(&self.deploy_dir, &other.deploy_dir),
            data_dir: pick(&self.data_dir, &other.data_dir),
            log_dir: pick(&self.log_dir, &other.log_dir),
            os: pick(&self.os, &other.os),
            arch: pick(&self.arch, &other.arch),
        }
    }

    pub(crate) fn is_unset(&self) -> bool {
        *self == GlobalOptions::default()
    }
}

/// Options for the monitoring agents deployed on every host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoredOptions {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub node_exporter_port: u16,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub blackbox_exporter_port: u16,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub deploy_dir: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data_dir: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub log_dir: String,
}

impl MonitoredOptions {
    /// Fill unset fields; `global` must already carry its defaults
    pub(crate) fn apply_defaults(&mut self, global: &GlobalOptions) {
        if self.node_exporter_port == 0 {
            self.node_exporter_port = DEFAULT_NODE_EXPORTER_PORT;
        }
        if self.blackbox_exporter_port == 0 {
            self.blackbox_exporter_port = DEFAULT_BLACKBOX_EXPORTER_PORT;
        }

        let leaf = format!("{}-{}", MONITOR_ROLE, self.node_exporter_port);
        if self.deploy_dir.is_empty() {
            self.deploy_dir = paths::join(&global.deploy_dir, &leaf);
        }
        if self.data_dir.is_empty() {
            self.data_dir = paths::join(&global.data_dir, &leaf);
        }

        fill(&mut self.log_dir, DEFAULT_MONITORED_LOG_DIR);
        let deploy_dir = paths::clean(&self.deploy_dir);
        let log_dir = paths::clean(&self.log_dir);
        if !paths::is_absolute(&log_dir) && !paths::is_within(&log_dir, &deploy_dir) {
            self.log_dir = paths::join(&self.deploy_dir, &self.log_dir);
        }
    }

    pub(crate) fn overlay(&self, other: &MonitoredOptions) -> MonitoredOptions {
        MonitoredOptions {
            node_exporter_port: if other.node_exporter_port != 0 {
                other.node_exporter_port
            } else {
                self.node_exporter_port
            },
            blackbox_exporter_port: if other.blackbox_exporter_port != 0 {
                other.blackbox_exporter_port
            } else {
                self.blackbox_exporter_port
            },
            deploy_dir: pick(&self.deploy_dir, &other.deploy_dir),
            data_dir: pick(&self.data_dir, &other.data_dir),
            log_dir: pick(&self.log_dir, &other.log_dir),
        }
    }

    pub(crate) fn is_unset(&self) -> bool {
        *self == MonitoredOptions::default()
    }

    /// Ports bound by the agents on every host
    pub fn ports(&self) -> Vec<PortBinding> {
        vec![
            PortBinding::new("node_exporter_port,omitempty", self.node_exporter_port),
            PortBinding::new("blackbox_exporter_port,omitempty", self.blackbox_exporter_port),
        ]
    }
}

fn fill(field: &mut String, default: &str) {
    if field.is_empty() {
        *field = default.to_string();
    }
}

fn pick(base: &str, over: &str) -> String {
    if over.is_empty() {
        base.to_string()
    } else {
        over.to_string()
    }
}
