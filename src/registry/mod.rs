//! Migrator registration and lookup.
//!
//! This module provides the registry of known migrators: the edges of the
//! migration graph. The main entry point is [`RegistryBuilder`], which uses a
//! builder pattern to collect migrators before validating and freezing them
//! into an immutable [`MigratorRegistry`].
//!
//! # Core Concepts
//!
//! - **Migrators**: version-to-version transformation steps implementing the
//!   [`Migrator`](crate::migrator::Migrator) trait
//! - **Edges**: each migrator is one directed edge `from_version -> to_version`
//! - **Validation**: [`RegistryBuilder::build`] rejects duplicate
//!   `(from, to)` pairs before any lookup is possible
//! - **Immutability**: a built registry is read-only for the rest of the run
//!
//! # Quick Start
//!
//! ```rust
//! use migraph::migrator::FnMigrator;
//! use migraph::registry::RegistryBuilder;
//!
//! let registry = RegistryBuilder::new()
//!     .add_migrator(FnMigrator::stamped("1.0", "1.1", Ok))
//!     .add_migrator(FnMigrator::stamped("1.1", "2.0", Ok))
//!     .build()?;
//!
//! assert_eq!(registry.lookup(&"1.0".into()).len(), 1);
//! assert_eq!(registry.all().len(), 2);
//! # Ok::<(), migraph::registry::RegistryError>(())
//! ```

// Internal module declarations
mod builder;


// Public re-exports
pub use builder::{RegistryBuilder, RegistryError};

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::migrator::Migrator;
use crate::types::Version;

/// The full, immutable set of known migrators, indexed by source version.
///
/// Built once per run via [`RegistryBuilder`] and read-only thereafter. A
/// version may have multiple outgoing migrators when the schema graph
/// branches; the typical shape is a single linear chain.
///
/// Lookup order matters: migrators sharing a source version are returned in
/// registration order, which is what makes shortest-path tie-breaks in
/// [`find_path`](crate::pathfinder::find_path) deterministic.
pub struct MigratorRegistry {
    /// Outgoing edges per source version, in registration order.
    by_source: FxHashMap<Version, Vec<Arc<dyn Migrator>>>,
    /// Every registered migrator, in registration order.
    ordered: Vec<Arc<dyn Migrator>>,
}

impl MigratorRegistry {
    /// Starts a fresh [`RegistryBuilder`].
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub(crate) fn from_parts(
        by_source: FxHashMap<Version, Vec<Arc<dyn Migrator>>>,
        ordered: Vec<Arc<dyn Migrator>>,
    ) -> Self {
        Self { by_source, ordered }
    }

    /// Returns every migrator whose source version equals `version`, in
    /// registration order. Unknown versions yield an empty slice; there is
    /// no separate "unknown version" surface.
    #[must_use]
    pub fn lookup(&self, version: &Version) -> &[Arc<dyn Migrator>] {
        self.by_source
            .get(version)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns every registered migrator, in registration order.
    #[must_use]
    pub fn all(&self) -> &[Arc<dyn Migrator>] {
        &self.ordered
    }

    /// Number of registered migrators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Whether the registry holds no migrators at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

impl std::fmt::Debug for MigratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let edges: Vec<String> = self
            .ordered
            .iter()
            .map(|m| format!("{} -> {}", m.from_version(), m.to_version()))
            .collect();
        f.debug_struct("MigratorRegistry")
            .field("edges", &edges)
            .finish()
    }
}
