//! Platform identity normalization
//!
//! Hosts are described by an `(os, arch)` pair. Several spellings name the
//! same architecture, so every arch goes through an alias table before it is
//! stored or compared.

use std::collections::BTreeMap;
use std::fmt;

/// Built-in architecture aliases (`alias -> canonical`)
pub const DEFAULT_ARCH_ALIASES: &[(&str, &str)] = &[("x86_64", "amd64"), ("aarch64", "arm64")];

/// Architecture alias table.
///
/// Lookups are case-insensitive; names without an alias are lower-cased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchAliases {
    aliases: BTreeMap<String, String>,
}

impl Default for ArchAliases {
    fn default() -> Self {
        Self {
            aliases: DEFAULT_ARCH_ALIASES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }
}

impl ArchAliases {
    /// An empty table that only lower-cases
    pub fn empty() -> Self {
        Self {
            aliases: BTreeMap::new(),
        }
    }

    /// Add (or replace) an alias
    pub fn with_alias(mut self, from: &str, to: &str) -> Self {
        self.insert(from, to);
        self
    }

    pub fn insert(&mut self, from: &str, to: &str) {
        self.aliases
            .insert(from.trim().to_lowercase(), to.trim().to_lowercase());
    }

    /// Canonical spelling of `arch`
    pub fn normalize(&self, arch: &str) -> String {
        let lower = arch.trim().to_lowercase();
        match self.aliases.get(&lower) {
            Some(canonical) => canonical.clone(),
            None => lower,
        }
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> Extend<(K, V)> for ArchAliases {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (from, to) in iter {
            self.insert(from.as_ref(), to.as_ref());
        }
    }
}

/// Canonical spelling of an operating system name
pub fn normalize_os(os: &str) -> String {
    os.trim().to_lowercase()
}

/// A normalized `(os, arch)` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    pub fn new(os: &str, arch: &str, aliases: &ArchAliases) -> Self {
        Self {
            os: normalize_os(os),
            arch: aliases.normalize(arch),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os, self.arch)
    }
}
