//! Kubernetes `major.minor` version identifiers.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::ConfigError;

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\.([0-9]+)$").unwrap());

/// A `major.minor` release, ordered numerically (`1.9 < 1.10`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KubeVersion {
    pub major: u32,
    pub minor: u32,
}

impl FromStr for KubeVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::Version {
            version: s.to_string(),
        };
        let caps = VERSION_RE.captures(s.trim()).ok_or_else(invalid)?;
        Ok(KubeVersion {
            major: caps[1].parse().map_err(|_| invalid())?,
            minor: caps[2].parse().map_err(|_| invalid())?,
        })
    }
}

impl fmt::Display for KubeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Sort version strings from oldest to newest.
///
/// Fails on the first entry that is not of the form `x.y`.
pub fn sort_versions<S: AsRef<str>>(versions: &[S]) -> Result<Vec<String>, ConfigError> {
    let mut parsed = versions
        .iter()
        .map(|v| v.as_ref().parse::<KubeVersion>())
        .collect::<Result<Vec<_>, _>>()?;
    parsed.sort();
    Ok(parsed.iter().map(KubeVersion::to_string).collect())
}

/// Split a comma-separated version list, dropping empty entries.
pub fn split_versions(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
