//! Error types for dmtopo
//!
//! Uses `thiserror` for library errors. Conflict messages are part of the
//! external contract: scripts grep them, so the rendering must stay stable.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for topology operations
pub type TopologyResult<T> = Result<T, TopologyError>;

/// What a [`Conflict`] collided on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// Two resolved directories are identical on one host
    Directory,
    /// Two declared ports are identical on one host
    Port,
    /// One host is declared with two different os/arch pairs
    Platform,
}

impl ConflictKind {
    fn target(self) -> &'static str {
        match self {
            ConflictKind::Directory => "directory",
            ConflictKind::Port => "port",
            ConflictKind::Platform => "platform",
        }
    }

    fn verb(self) -> &'static str {
        match self {
            ConflictKind::Directory | ConflictKind::Port => "conflict",
            ConflictKind::Platform => "mismatch",
        }
    }
}

/// A single validation failure: the colliding value and both locations.
///
/// `lhs` is always the location seen first in validation order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} {} for '{value}' between '{lhs}' and '{rhs}'", .kind.target(), .kind.verb())]
pub struct Conflict {
    pub kind: ConflictKind,
    pub value: String,
    pub lhs: String,
    pub rhs: String,
}

/// Main error type for topology operations
#[derive(Error, Debug)]
pub enum TopologyError {
    /// Topology file could not be read
    #[error("failed to read topology file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed document (bad YAML, wrong field types, missing host)
    #[error("failed to parse topology {file}: {message}")]
    Parse { file: String, message: String },

    /// Topology could not be written back as YAML
    #[error("failed to encode topology: {0}")]
    Encode(#[from] serde_yaml_ng::Error),

    /// Unknown keys found while strict key checking is enabled
    #[error("unknown keys in topology {file}: {}", keys.join(", "))]
    UnknownKeys { file: String, keys: Vec<String> },

    /// An instance without a host
    #[error("`{group}` contains empty host field")]
    EmptyHost { group: String },

    /// Directory, port or platform conflict found while decoding
    #[error("{0}")]
    Conflict(Conflict),

    /// Conflict introduced by merging a scale-out fragment into a base
    #[error("{0}")]
    Merge(Conflict),
}

impl TopologyError {
    /// The underlying conflict, for both decode and merge failures
    pub fn conflict(&self) -> Option<&Conflict> {
        match self {
            TopologyError::Conflict(c) | TopologyError::Merge(c) => Some(c),
            _ => None,
        }
    }

    /// Re-tag a validation failure as a merge failure; other errors pass through
    pub(crate) fn into_merge(self) -> Self {
        match self {
            TopologyError::Conflict(c) => TopologyError::Merge(c),
            other => other,
        }
    }
}

impl From<Conflict> for TopologyError {
    fn from(conflict: Conflict) -> Self {
        TopologyError::Conflict(conflict)
    }
}

/// Result type alias for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading `dmtopo` configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {message}", file.display())]
    Parse { file: PathBuf, message: String },

    /// An environment override that cannot be interpreted
    #[error("invalid value for {var}: '{value}' ({reason})")]
    InvalidEnv {
        var: String,
        value: String,
        reason: String,
    },
}
