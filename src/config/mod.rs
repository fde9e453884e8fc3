//! Configuration module for dmtopo
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (DMTOPO_*)
//! 3. `--config <path>` or user config (~/.config/dmtopo/config.toml)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{user_config_path, ConfigWarning, ENV_ARCH_ALIASES, ENV_STRICT};
pub use types::{Config, PlatformConfig, TopologyConfig};
