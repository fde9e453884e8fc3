//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::suggest::{find_line_number, suggest_key};

use super::types::Config;

const CANDIDATES: &[&str] = &["topology", "strict", "platform", "arch_aliases"];

pub const ENV_STRICT: &str = "DMTOPO_STRICT";
pub const ENV_ARCH_ALIASES: &str = "DMTOPO_ARCH_ALIASES";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> ConfigResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ConfigError::Parse {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key, CANDIDATES),
                file: path.to_path_buf(),
                key: path_str,
            }
        })
        .collect();

    debug!("loaded config from {}", path.display());
    Ok((config, warnings))
}

/// Load from an explicit path, the user config, or defaults.
///
/// An explicit path must exist; a missing user config falls back to defaults.
pub fn load_or_default(explicit: Option<&Path>) -> ConfigResult<(Config, Vec<ConfigWarning>)> {
    let (config, warnings) = match explicit {
        Some(path) => load_with_warnings(path)?,
        None => match user_config_path() {
            Some(path) if path.exists() => load_with_warnings(&path)?,
            _ => (Config::default(), Vec::new()),
        },
    };

    for w in &warnings {
        warn!("{}", w);
    }

    Ok((with_env_overrides(config)?, warnings))
}

/// `<config_dir>/dmtopo/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dmtopo").join("config.toml"))
}

/// Apply environment variable overrides (DMTOPO_* prefix)
pub fn with_env_overrides(config: Config) -> ConfigResult<Config> {
    apply_overrides(config, |name| std::env::var(name).ok())
}

pub(crate) fn apply_overrides(
    mut config: Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> ConfigResult<Config> {
    // DMTOPO_STRICT
    if let Some(val) = lookup(ENV_STRICT) {
        config.topology.strict = match val.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" => true,
            "0" | "false" | "no" | "" => false,
            _ => {
                return Err(ConfigError::InvalidEnv {
                    var: ENV_STRICT.to_string(),
                    value: val,
                    reason: "expected true or false".to_string(),
                })
            }
        };
    }

    // DMTOPO_ARCH_ALIASES (comma-separated from=to pairs)
    if let Some(val) = lookup(ENV_ARCH_ALIASES) {
        for entry in val.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            match entry.split_once('=') {
                Some((from, to)) if !from.trim().is_empty() && !to.trim().is_empty() => {
                    config
                        .platform
                        .arch_aliases
                        .insert(from.trim().to_string(), to.trim().to_string());
                }
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        var: ENV_ARCH_ALIASES.to_string(),
                        value: entry.to_string(),
                        reason: "expected from=to".to_string(),
                    })
                }
            }
        }
    }

    Ok(config)
}
