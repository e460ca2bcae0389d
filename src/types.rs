//! Core types for the migraph migration engine.
//!
//! This module defines the fundamental identifier used throughout the system:
//! the schema [`Version`] a configuration document is tagged with. Versions are
//! the nodes of the migration graph; migrators are its edges.
//!
//! # Versions are opaque
//!
//! A `Version` is an opaque label. Two versions are equal iff their string
//! representations are equal, and that is the *only* relation the engine ever
//! relies on. In particular there is deliberately no `Ord` implementation:
//! version schemes are not required to be numeric or even monotonic, and
//! ordering is defined purely by which migrators connect which versions.
//! Reachability questions are answered by [`find_path`](crate::pathfinder::find_path),
//! never by comparing strings.
//!
//! # Examples
//!
//! ```rust
//! use migraph::types::Version;
//!
//! let v: Version = "1.10.0".into();
//! assert_eq!(v.as_str(), "1.10.0");
//! assert_eq!(v, Version::new("1.10.0"));
//! assert_ne!(v, Version::new("1.9.0"));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque schema version identifier.
///
/// `Version` labels a node in the migration graph. It carries no semantics
/// beyond string equality: `"2.0"` and `"2.0.0"` are distinct versions, and
/// `"1.10"` is neither greater nor less than `"1.9"` as far as the engine is
/// concerned.
///
/// # Examples
///
/// ```rust
/// use migraph::types::Version;
///
/// let from = Version::new("1.9.0");
/// let to: Version = String::from("1.10.0").into();
///
/// assert_eq!(from.to_string(), "1.9.0");
/// assert_ne!(from, to);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(String);

impl Version {
    /// Creates a version from any string-like value.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the version's string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Developer Experience: allow using string literals where a Version is expected.
impl From<&str> for Version {
    fn from(s: &str) -> Self {
        Version(s.to_string())
    }
}

impl From<String> for Version {
    fn from(s: String) -> Self {
        Version(s)
    }
}

impl AsRef<str> for Version {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
