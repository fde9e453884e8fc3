//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;
use crate::spec::{ArchAliases, DecodeOptions};

use super::loader::{self, ConfigWarning};

/// Topology decoding configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TopologyConfig {
    /// Reject unknown topology keys instead of warning about them
    #[serde(default)]
    pub strict: bool,
}

/// Platform normalization configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Extra architecture aliases (`alias = "canonical"`), layered over the
    /// built-in `x86_64`/`aarch64` table
    #[serde(default)]
    pub arch_aliases: BTreeMap<String, String>,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub topology: TopologyConfig,

    #[serde(default)]
    pub platform: PlatformConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> ConfigResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from an explicit path, the user config, or defaults; then apply
    /// environment overrides
    pub fn load_or_default(explicit: Option<&Path>) -> ConfigResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(explicit)
    }

    /// Apply environment variable overrides (DMTOPO_* prefix)
    pub fn with_env_overrides(self) -> ConfigResult<Self> {
        loader::with_env_overrides(self)
    }

    /// Alias table: built-ins plus configured entries
    pub fn arch_aliases(&self) -> ArchAliases {
        let mut aliases = ArchAliases::default();
        aliases.extend(&self.platform.arch_aliases);
        aliases
    }

    /// Options for decoding topologies under this configuration
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            strict: self.topology.strict,
            arch_aliases: self.arch_aliases(),
        }
    }
}
