//! Migrator execution framework for the migraph migration engine.
//!
//! This module provides the core abstraction for a single migration step:
//! the [`Migrator`] trait, the [`FnMigrator`] adapter for table-driven
//! registration, and the [`MigratorError`] type migrator bodies return.
//!
//! A migrator is an edge in the migration graph: it declares exactly one
//! source version and exactly one destination version, and transforms a
//! document tagged with the former into a document tagged with the latter.

use async_trait::async_trait;
use miette::Diagnostic;
use thiserror::Error;

use crate::document::{ConfigDocument, DocumentError};
use crate::types::Version;

/// A single version-to-version transformation step.
///
/// Implementations must uphold one invariant: the document returned by
/// [`apply`](Self::apply) is tagged with exactly [`to_version`](Self::to_version).
/// The executor post-checks this at every step and fails the run with an
/// invariant violation when a migrator lies about its output version.
///
/// # Design Principles
///
/// - **One edge each**: a migrator connects exactly one source version to
///   exactly one destination version. Branching schemes register several
///   migrators, never one migrator with several destinations.
/// - **Opaque bodies**: what a migrator does to the fields between the two
///   versions is its own business. The engine only reads the version tag.
/// - **By-value documents**: `apply` consumes its input and returns a fresh
///   document, so no intermediate is ever mutated after it has been handed
///   on.
///
/// # Examples
///
/// ```rust
/// use migraph::document::ConfigDocument;
/// use migraph::migrator::{Migrator, MigratorError};
/// use migraph::types::Version;
/// use async_trait::async_trait;
///
/// /// Renames `http_port` to `port` while moving 1.9.0 -> 1.10.0.
/// struct RenameHttpPort {
///     from: Version,
///     to: Version,
/// }
///
/// #[async_trait]
/// impl Migrator for RenameHttpPort {
///     fn from_version(&self) -> &Version {
///         &self.from
///     }
///
///     fn to_version(&self) -> &Version {
///         &self.to
///     }
///
///     async fn apply(&self, mut doc: ConfigDocument) -> Result<ConfigDocument, MigratorError> {
///         if let Some(port) = doc.remove("http_port") {
///             doc.insert("port", port);
///         }
///         doc.set_version(self.to.clone());
///         Ok(doc)
///     }
/// }
/// ```
#[async_trait]
pub trait Migrator: Send + Sync {
    /// The schema version this migrator consumes.
    fn from_version(&self) -> &Version;

    /// The schema version this migrator produces.
    fn to_version(&self) -> &Version;

    /// Transforms a document from [`from_version`](Self::from_version) to
    /// [`to_version`](Self::to_version).
    async fn apply(&self, document: ConfigDocument) -> Result<ConfigDocument, MigratorError>;
}

/// Transform body used by [`FnMigrator`].
pub type TransformFn =
    Box<dyn Fn(ConfigDocument) -> Result<ConfigDocument, MigratorError> + Send + Sync + 'static>;

/// A migrator built from a plain `(from, to, transform)` triple.
///
/// Migration sets are registered as an explicit table rather than discovered
/// dynamically, and `FnMigrator` is the table row: it pairs the two declared
/// versions with a boxed transform closure. The closure still owns the
/// version-stamping contract; [`FnMigrator::stamped`] wraps a body that only
/// rewrites fields and stamps the destination version afterwards.
///
/// # Examples
///
/// ```rust
/// use migraph::document::ConfigDocument;
/// use migraph::migrator::{FnMigrator, Migrator};
/// use serde_yaml::Value;
///
/// let step = FnMigrator::stamped("1.9.0", "1.10.0", |mut doc| {
///     doc.insert("log_level", Value::from("info"));
///     Ok(doc)
/// });
///
/// assert_eq!(step.from_version().as_str(), "1.9.0");
/// assert_eq!(step.to_version().as_str(), "1.10.0");
/// ```
pub struct FnMigrator {
    from: Version,
    to: Version,
    transform: TransformFn,
}

impl FnMigrator {
    /// Creates a migrator from a transform that handles version stamping
    /// itself.
    pub fn new(
        from: impl Into<Version>,
        to: impl Into<Version>,
        transform: impl Fn(ConfigDocument) -> Result<ConfigDocument, MigratorError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            transform: Box::new(transform),
        }
    }

    /// Creates a migrator whose transform only rewrites fields; the
    /// destination version tag is stamped after the body runs.
    pub fn stamped(
        from: impl Into<Version>,
        to: impl Into<Version>,
        transform: impl Fn(ConfigDocument) -> Result<ConfigDocument, MigratorError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        let to = to.into();
        let stamp_to = to.clone();
        Self {
            from: from.into(),
            to,
            transform: Box::new(move |doc| {
                let mut out = transform(doc)?;
                out.set_version(stamp_to.clone());
                Ok(out)
            }),
        }
    }
}

#[async_trait]
impl Migrator for FnMigrator {
    fn from_version(&self) -> &Version {
        &self.from
    }

    fn to_version(&self) -> &Version {
        &self.to
    }

    async fn apply(&self, document: ConfigDocument) -> Result<ConfigDocument, MigratorError> {
        (self.transform)(document)
    }
}

/// Errors a migrator body can raise while transforming a document.
///
/// These are fatal for the current run: the executor aborts the chain at the
/// failing step and annotates the error with that step's versions. There is
/// no retry inside the engine.
#[derive(Debug, Error, Diagnostic)]
pub enum MigratorError {
    /// A field the transform depends on is missing from the document.
    #[error("missing expected field: {what}")]
    #[diagnostic(
        code(migraph::migrator::missing_field),
        help("Check that the source document really is at this migrator's declared input version.")
    )]
    MissingField { what: &'static str },

    /// A field exists but its value cannot be transformed.
    #[error("invalid field value: {0}")]
    #[diagnostic(code(migraph::migrator::invalid_value))]
    InvalidValue(String),

    /// Version-tag access or YAML codec failure.
    #[error(transparent)]
    #[diagnostic(code(migraph::migrator::document))]
    Document(#[from] DocumentError),
}
