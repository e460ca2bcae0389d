//! RegistryBuilder implementation for assembling migrator registries.
//!
//! This module contains the builder type and its fluent API for collecting
//! migrators, plus the validation that freezes them into an immutable
//! [`MigratorRegistry`].

use std::sync::Arc;

use miette::Diagnostic;
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use super::MigratorRegistry;
use crate::document::ConfigDocument;
use crate::migrator::{FnMigrator, Migrator, MigratorError};
use crate::types::Version;

/// Builder for constructing migrator registries with a fluent API.
///
/// `RegistryBuilder` collects migrators in registration order and validates
/// the whole set in [`build`](Self::build). Registration is append-only;
/// nothing is looked up until validation has passed, so a registry with an
/// ambiguous duplicate edge can never be observed.
///
/// # Examples
///
/// ## Explicit migrator types
///
/// ```rust
/// use migraph::migrator::FnMigrator;
/// use migraph::registry::RegistryBuilder;
///
/// let registry = RegistryBuilder::new()
///     .add_migrator(FnMigrator::stamped("1.9.0", "1.10.0", Ok))
///     .add_migrator(FnMigrator::stamped("1.10.0", "2.0.0", Ok))
///     .build()?;
/// # Ok::<(), migraph::registry::RegistryError>(())
/// ```
///
/// ## Table-driven registration
///
/// ```rust
/// use migraph::registry::RegistryBuilder;
///
/// let registry = RegistryBuilder::new()
///     .add_fn("1.0", "1.1", |mut doc| {
///         doc.set_version("1.1");
///         Ok(doc)
///     })
///     .build()?;
/// # Ok::<(), migraph::registry::RegistryError>(())
/// ```
pub struct RegistryBuilder {
    /// Collected migrators, in registration order.
    migrators: Vec<Arc<dyn Migrator>>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    /// Creates a new, empty registry builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            migrators: Vec::new(),
        }
    }

    /// Adds a migrator to the registry.
    ///
    /// Appends in registration order. Duplicate `(from, to)` pairs are not
    /// detected here; [`build`](Self::build) rejects them so a conflicting
    /// set never becomes a registry.
    #[must_use]
    pub fn add_migrator(mut self, migrator: impl Migrator + 'static) -> Self {
        self.migrators.push(Arc::new(migrator));
        self
    }

    /// Adds an already-shared migrator.
    #[must_use]
    pub fn add_arc(mut self, migrator: Arc<dyn Migrator>) -> Self {
        self.migrators.push(migrator);
        self
    }

    /// Adds a migrator from a `(from, to, transform)` triple.
    ///
    /// Convenience over [`add_migrator`](Self::add_migrator) +
    /// [`FnMigrator::new`] for table-style registration lists. The transform
    /// owns the version-stamping contract; use [`FnMigrator::stamped`]
    /// directly when the body should not have to stamp.
    #[must_use]
    pub fn add_fn(
        self,
        from: impl Into<Version>,
        to: impl Into<Version>,
        transform: impl Fn(ConfigDocument) -> Result<ConfigDocument, MigratorError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.add_migrator(FnMigrator::new(from, to, transform))
    }

    /// Number of migrators collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.migrators.len()
    }

    /// Whether no migrators have been collected yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.migrators.is_empty()
    }

    /// Validates the collected set and freezes it into a [`MigratorRegistry`].
    ///
    /// Two migrators sharing the same `(from, to)` pair would make path
    /// resolution ambiguous with no defined tie-break, so the first such
    /// pair fails the build. On failure no registry value exists at all.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateEdge`] naming the first duplicated pair in
    /// registration order.
    pub fn build(self) -> Result<MigratorRegistry, RegistryError> {
        let mut seen: FxHashSet<(Version, Version)> = FxHashSet::default();
        let mut by_source: FxHashMap<Version, Vec<Arc<dyn Migrator>>> = FxHashMap::default();

        for migrator in &self.migrators {
            let edge = (
                migrator.from_version().clone(),
                migrator.to_version().clone(),
            );
            if !seen.insert(edge.clone()) {
                return Err(RegistryError::DuplicateEdge {
                    from: edge.0,
                    to: edge.1,
                });
            }
            by_source
                .entry(edge.0)
                .or_default()
                .push(Arc::clone(migrator));
        }

        Ok(MigratorRegistry::from_parts(by_source, self.migrators))
    }
}

/// Errors raised while freezing a registry.
#[derive(Debug, Error, Diagnostic)]
pub enum RegistryError {
    /// Two migrators declare the identical `(from, to)` pair.
    #[error("duplicate migrator edge {from} -> {to}")]
    #[diagnostic(
        code(migraph::registry::duplicate_edge),
        help("Each (from, to) pair may be registered at most once; there is no tie-break between two migrators covering the same hop.")
    )]
    DuplicateEdge { from: Version, to: Version },
}
