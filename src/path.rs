//! Location of a value inside a document.

use serde::{Serialize, Serializer};
use std::fmt;

/// Route from the document root to a value: field names and stringified
/// sequence indices.
///
/// Paths are extended with [`Path::child`], which returns a new path and
/// leaves the parent untouched, so sibling branches of a traversal never see
/// each other's segments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<String>);

impl Path {
    /// The document root (no segments).
    pub fn root() -> Self {
        Path(Vec::new())
    }

    pub fn child(&self, segment: impl Into<String>) -> Path {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend(self.0.iter().cloned());
        segments.push(segment.into());
        Path(segments)
    }

    pub fn index(&self, i: usize) -> Path {
        self.child(i.to_string())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Path(iter.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for Path {
    /// Parse a dot-joined path. The empty string is the root.
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Path::root()
        } else {
            s.split('.').collect()
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
