//! Solver configuration (§10.4): a small, `serde`-deserializable settings
//! type following the configuration pattern used by this stack's CLI
//! front-ends, even though no CLI ships in this crate.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which backend a [`crate::Solver`] should be wired to. Purely descriptive:
/// selecting a backend from a loaded config is the embedding application's
/// job, since `Solver<B>` is generic over the concrete backend type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// The in-memory brute-force reference backend (no external process).
    Memory,
    /// The Z3-backed adapter (requires the `backend-z3` feature).
    Z3,
}

/// Hints for sizing the term/type hash-cons pools. Advisory only: the pools
/// themselves grow unbounded regardless, but an embedder with an estimate of
/// its working set can avoid a few early rehashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSizeHints {
    #[serde(default = "default_pool_hint")]
    pub terms: usize,
    #[serde(default = "default_pool_hint")]
    pub types: usize,
}

fn default_pool_hint() -> usize {
    1024
}

impl Default for PoolSizeHints {
    fn default() -> Self {
        PoolSizeHints {
            terms: default_pool_hint(),
            types: default_pool_hint(),
        }
    }
}

/// Top-level solver configuration, loadable from a TOML file or constructed
/// programmatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// `check`'s timeout, in milliseconds. `None` means no timeout (§5:
    /// "the only blocking operation is `check`").
    #[serde(default, with = "duration_millis_option")]
    pub timeout: Option<Duration>,
    #[serde(default = "default_backend")]
    pub backend: BackendKind,
    #[serde(default)]
    pub pool_hints: PoolSizeHints,
}

fn default_backend() -> BackendKind {
    BackendKind::Memory
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            timeout: None,
            backend: default_backend(),
            pool_hints: PoolSizeHints::default(),
        }
    }
}

impl SolverConfig {
    /// Parses a `SolverConfig` from TOML source text.
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Serializes this config back to TOML source text.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

mod duration_millis_option {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        value.map(|d| d.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_no_timeout_and_the_memory_backend() {
        let cfg = SolverConfig::default();
        assert_eq!(cfg.timeout, None);
        assert_eq!(cfg.backend, BackendKind::Memory);
    }

    #[test]
    fn round_trips_through_toml() {
        let cfg = SolverConfig {
            timeout: Some(Duration::from_millis(1500)),
            backend: BackendKind::Z3,
            pool_hints: PoolSizeHints { terms: 4096, types: 256 },
        };
        let text = cfg.to_toml().unwrap();
        let parsed = SolverConfig::from_toml(&text).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed = SolverConfig::from_toml("backend = \"memory\"\n").unwrap();
        assert_eq!(parsed.timeout, None);
        assert_eq!(parsed.pool_hints, PoolSizeHints::default());
    }
}
