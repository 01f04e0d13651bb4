//! Runtime configuration.
//!
//! Values come from, in increasing precedence: built-in defaults, an optional
//! YAML file, `KUBEYAML_*` environment variables, and command-line flags.
//!
//! ```yaml
//! namespace: io.k8s.api
//! group_suffix: .k8s.io
//! versions: ["1.14", "1.13", "1.12"]
//! schema_dir: /usr/share/kubeyaml/schemas
//! parallel: true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::keys::{ApiKeyer, DEFAULT_GROUP_SUFFIX, DEFAULT_NAMESPACE};
use crate::version::{KubeVersion, split_versions};

pub const ENV_VERSIONS: &str = "KUBEYAML_VERSIONS";
pub const ENV_SCHEMA_DIR: &str = "KUBEYAML_SCHEMA_DIR";
pub const ENV_PARALLEL: &str = "KUBEYAML_PARALLEL";

/// Versions checked when nothing else is configured, newest first.
pub const DEFAULT_VERSIONS: &[&str] = &["1.14", "1.13", "1.12", "1.11", "1.10", "1.9", "1.8"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Prefix of every definition key.
    pub namespace: String,
    /// Suffix removed from API group names.
    pub group_suffix: String,
    /// Versions to validate against, in report order.
    pub versions: Vec<String>,
    /// Directory holding `swagger-<version>.json` files.
    pub schema_dir: PathBuf,
    /// Validate versions concurrently.
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            namespace: DEFAULT_NAMESPACE.to_string(),
            group_suffix: DEFAULT_GROUP_SUFFIX.to_string(),
            versions: DEFAULT_VERSIONS.iter().map(|v| v.to_string()).collect(),
            schema_dir: PathBuf::from("schemas"),
            parallel: false,
        }
    }
}

impl Config {
    pub fn from_yaml_str(input: &str) -> Result<Self, ConfigError> {
        if input.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_saphyr::from_str(input).map_err(|e| ConfigError::Invalid {
            message: e.to_string(),
        })?;
        config.validated()
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Config::from_yaml_str(&content)
    }

    /// Override fields from `KUBEYAML_*` environment variables.
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    /// Override fields from a variable lookup. [`Config::apply_env`] reads
    /// the process environment.
    pub fn apply_vars<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(versions) = lookup(ENV_VERSIONS) {
            self.versions = split_versions(&versions);
        }
        if let Some(dir) = lookup(ENV_SCHEMA_DIR) {
            self.schema_dir = PathBuf::from(dir);
        }
        if let Some(parallel) = lookup(ENV_PARALLEL) {
            self.parallel = parse_bool(ENV_PARALLEL, &parallel)?;
        }
        self.validated()
    }

    pub fn keyer(&self) -> ApiKeyer {
        ApiKeyer::new(&self.namespace, &self.group_suffix)
    }

    /// Check every version is `x.y` and at least one is configured.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.versions.is_empty() {
            return Err(ConfigError::Invalid {
                message: "at least one version must be configured".to_string(),
            });
        }
        for v in &self.versions {
            v.parse::<KubeVersion>()?;
        }
        Ok(self)
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::Invalid {
            message: format!("{} must be a boolean, got {:?}", name, other),
        }),
    }
}
