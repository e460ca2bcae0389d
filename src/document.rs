//! Configuration document container and version-tag access.
//!
//! A [`ConfigDocument`] is an opaque YAML mapping plus exactly one field the
//! engine cares about: the version tag stored under [`VERSION_KEY`]. The
//! engine reads that tag once per step boundary and never touches any other
//! field; rewriting fields (including stamping the new version tag) is the
//! business of individual migrators.
//!
//! This module is pure data transformation and (de)serialization glue. It
//! intentionally does NOT perform I/O; reading and writing files belongs to
//! the driver and the artifact store.
//!
//! # Examples
//!
//! ```rust
//! use migraph::document::ConfigDocument;
//!
//! let doc = ConfigDocument::from_yaml_str("_version: 1.9.0\nhostname: registry.local\n")?;
//! assert_eq!(doc.version()?.as_str(), "1.9.0");
//! # Ok::<(), migraph::document::DocumentError>(())
//! ```

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use thiserror::Error;

use crate::types::Version;

/// Well-known key holding a document's schema version.
///
/// Every document entering or leaving the engine carries its version under
/// this key as a YAML string.
pub const VERSION_KEY: &str = "_version";

/// An opaque configuration document tagged with a schema version.
///
/// The engine treats the document body as a black box: only the
/// [`VERSION_KEY`] entry is ever read by the core, and only migrators write
/// it. Documents move by value through the migration chain, so each step's
/// output is a fresh value and no document is mutated after it has been
/// handed to a migrator.
///
/// # Examples
///
/// ```rust
/// use migraph::document::ConfigDocument;
/// use serde_yaml::Value;
///
/// let mut doc = ConfigDocument::new("1.9.0");
/// doc.insert("hostname", Value::from("registry.local"));
///
/// assert_eq!(doc.version().unwrap().as_str(), "1.9.0");
/// assert_eq!(doc.get("hostname"), Some(&Value::from("registry.local")));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigDocument {
    inner: Mapping,
}

impl ConfigDocument {
    /// Creates an empty document tagged with the given version.
    #[must_use]
    pub fn new(version: impl Into<Version>) -> Self {
        let mut inner = Mapping::new();
        inner.insert(
            Value::from(VERSION_KEY),
            Value::from(version.into().as_str()),
        );
        Self { inner }
    }

    /// Wraps an existing YAML mapping without validating its version tag.
    ///
    /// The tag is checked lazily by [`version`](Self::version), which is how
    /// the engine reads it at each step boundary.
    #[must_use]
    pub fn from_mapping(inner: Mapping) -> Self {
        Self { inner }
    }

    /// Parses a document from YAML text.
    pub fn from_yaml_str(s: &str) -> Result<Self, DocumentError> {
        let inner: Mapping = serde_yaml::from_str(s)?;
        Ok(Self { inner })
    }

    /// Renders the document back to YAML text.
    pub fn to_yaml_string(&self) -> Result<String, DocumentError> {
        Ok(serde_yaml::to_string(&self.inner)?)
    }

    /// Reads the document's schema version from its [`VERSION_KEY`] entry.
    ///
    /// # Errors
    ///
    /// - [`DocumentError::MissingVersionTag`] when the entry is absent
    /// - [`DocumentError::NonStringVersionTag`] when it is not a YAML string
    pub fn version(&self) -> Result<Version, DocumentError> {
        match self.inner.get(VERSION_KEY) {
            None => Err(DocumentError::MissingVersionTag),
            Some(Value::String(s)) => Ok(Version::new(s.clone())),
            Some(_) => Err(DocumentError::NonStringVersionTag),
        }
    }

    /// Stamps a new schema version onto the document.
    ///
    /// Writing the tag is a migrator's responsibility; the executor never
    /// calls this. It exists so migrator bodies can fulfil their contract of
    /// returning a document tagged with their declared destination version.
    pub fn set_version(&mut self, version: impl Into<Version>) {
        self.inner.insert(
            Value::from(VERSION_KEY),
            Value::from(version.into().as_str()),
        );
    }

    /// Returns the value stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    /// Inserts a value under `key`, returning the previous value if present.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.inner.insert(Value::from(key.into()), value)
    }

    /// Removes the value under `key`, returning it if present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.inner.remove(key)
    }

    /// Fluent variant of [`insert`](Self::insert) for building fixtures and
    /// migrator outputs.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: Value) -> Self {
        self.insert(key, value);
        self
    }

    /// Borrows the underlying YAML mapping.
    #[must_use]
    pub fn mapping(&self) -> &Mapping {
        &self.inner
    }
}

/// Errors raised while reading or rendering a document.
#[derive(Debug, Error, Diagnostic)]
pub enum DocumentError {
    /// The document carries no version tag at all.
    #[error("document has no `{VERSION_KEY}` tag")]
    #[diagnostic(
        code(migraph::document::missing_version_tag),
        help("Every document entering the engine must carry its schema version under `_version`.")
    )]
    MissingVersionTag,

    /// The version tag exists but is not a YAML string.
    #[error("document `{VERSION_KEY}` tag is not a string")]
    #[diagnostic(code(migraph::document::non_string_version_tag))]
    NonStringVersionTag,

    /// YAML parse or render failure.
    #[error(transparent)]
    #[diagnostic(code(migraph::document::yaml))]
    Yaml(#[from] serde_yaml::Error),
}
