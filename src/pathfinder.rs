//! Version-path resolution over the migration graph.
//!
//! Given a start version, a target version, and a [`MigratorRegistry`], this
//! module discovers an ordered chain of migrators connecting the two. The
//! graph is directed: versions are nodes, migrators are edges, and a path is
//! a sequence of edges whose destinations chain into the next edge's source.
//!
//! # Algorithm
//!
//! [`find_path`] runs a breadth-first search from the start version. BFS
//! guarantees the discovered path has the fewest migration hops, which is the
//! correct tie-break when multiple routes exist: every hop is a destructive
//! rewrite, so fewer hops means fewer chances to lose data.
//!
//! # Determinism
//!
//! When multiple shortest paths exist, the winner is decided by registration
//! order: [`MigratorRegistry::lookup`] returns outgoing edges in the order
//! they were registered, and the BFS expands them in exactly that order, so
//! the first-registered route to reach the target wins. Map iteration order
//! never participates. This is part of the contract and is covered by tests,
//! not an accident of the implementation.
//!
//! # Examples
//!
//! ```rust
//! use migraph::migrator::FnMigrator;
//! use migraph::pathfinder::find_path;
//! use migraph::registry::RegistryBuilder;
//!
//! let registry = RegistryBuilder::new()
//!     .add_migrator(FnMigrator::stamped("1.0", "1.1", Ok))
//!     .add_migrator(FnMigrator::stamped("1.1", "2.0", Ok))
//!     .build()
//!     .unwrap();
//!
//! let path = find_path(&"1.0".into(), &"2.0".into(), &registry)?;
//! assert_eq!(path.len(), 2);
//! # Ok::<(), migraph::pathfinder::PathFinderError>(())
//! ```

use std::collections::VecDeque;
use std::sync::Arc;

use miette::Diagnostic;
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;
use tracing::instrument;

use crate::migrator::Migrator;
use crate::registry::MigratorRegistry;
use crate::types::Version;

/// An ordered chain of migrators carrying a document from a start version to
/// a target version.
///
/// Invariants (upheld by [`find_path`], enforced at run time by the
/// executor's per-step checks):
///
/// - `steps[0].from_version()` equals the start version
/// - `steps[i].to_version()` equals `steps[i + 1].from_version()`
/// - `steps[last].to_version()` equals the target version
/// - the path is empty iff start equals target
#[derive(Clone, Default)]
pub struct MigrationPath {
    steps: Vec<Arc<dyn Migrator>>,
}

impl MigrationPath {
    /// The empty path: start and target already coincide, nothing to do.
    #[must_use]
    pub fn empty() -> Self {
        Self { steps: Vec::new() }
    }

    /// Builds a path directly from a step sequence.
    ///
    /// The chaining invariants are the caller's responsibility here; the
    /// executor re-checks them step by step at run time, so a malformed
    /// hand-built path fails with an invariant violation rather than
    /// silently misapplying.
    #[must_use]
    pub fn from_steps(steps: Vec<Arc<dyn Migrator>>) -> Self {
        Self { steps }
    }

    /// The steps in application order.
    #[must_use]
    pub fn steps(&self) -> &[Arc<dyn Migrator>] {
        &self.steps
    }

    /// Iterates the steps in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<dyn Migrator>> {
        self.steps.iter()
    }

    /// Number of migration hops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the path is a no-op.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Source version of the first hop, if any.
    #[must_use]
    pub fn start_version(&self) -> Option<&Version> {
        self.steps.first().map(|m| m.from_version())
    }

    /// Destination version of the last hop, if any.
    #[must_use]
    pub fn target_version(&self) -> Option<&Version> {
        self.steps.last().map(|m| m.to_version())
    }
}

impl<'a> IntoIterator for &'a MigrationPath {
    type Item = &'a Arc<dyn Migrator>;
    type IntoIter = std::slice::Iter<'a, Arc<dyn Migrator>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl std::fmt::Debug for MigrationPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MigrationPath(")?;
        match self.steps.first() {
            None => write!(f, "empty")?,
            Some(first) => {
                write!(f, "{}", first.from_version())?;
                for step in &self.steps {
                    write!(f, " -> {}", step.to_version())?;
                }
            }
        }
        write!(f, ")")
    }
}

/// Finds the shortest migrator chain from `start` to `target`.
///
/// Returns the empty path when `start == target`; callers treat that as a
/// successful no-op and skip execution entirely. See the module docs for the
/// shortest-path and determinism guarantees.
///
/// # Errors
///
/// [`PathFinderError::NoMigrationPath`] when no directed route exists. A
/// start version the registry has never heard of fails the same way: the
/// API surface is deliberately uniform, with no separate "unknown version"
/// diagnostic.
#[instrument(skip(registry), fields(start = %start, target = %target))]
pub fn find_path(
    start: &Version,
    target: &Version,
    registry: &MigratorRegistry,
) -> Result<MigrationPath, PathFinderError> {
    if start == target {
        tracing::debug!("start equals target, empty path");
        return Ok(MigrationPath::empty());
    }

    // Standard BFS: `discovered_by` records the edge that first reached each
    // version, which is enough to reconstruct the hop sequence backwards.
    let mut visited: FxHashSet<Version> = FxHashSet::default();
    let mut discovered_by: FxHashMap<Version, Arc<dyn Migrator>> = FxHashMap::default();
    let mut queue: VecDeque<Version> = VecDeque::new();

    visited.insert(start.clone());
    queue.push_back(start.clone());

    while let Some(current) = queue.pop_front() {
        for migrator in registry.lookup(&current) {
            let next = migrator.to_version();
            if !visited.insert(next.clone()) {
                continue;
            }
            discovered_by.insert(next.clone(), Arc::clone(migrator));
            if next == target {
                let path = reconstruct(start, target, &discovered_by);
                tracing::debug!(hops = path.len(), "path found");
                return Ok(path);
            }
            queue.push_back(next.clone());
        }
    }

    Err(PathFinderError::NoMigrationPath {
        start: start.clone(),
        target: target.clone(),
    })
}

fn reconstruct(
    start: &Version,
    target: &Version,
    discovered_by: &FxHashMap<Version, Arc<dyn Migrator>>,
) -> MigrationPath {
    let mut steps: Vec<Arc<dyn Migrator>> = Vec::new();
    let mut cursor = target.clone();
    while &cursor != start {
        let migrator = &discovered_by[&cursor];
        cursor = migrator.from_version().clone();
        steps.push(Arc::clone(migrator));
    }
    steps.reverse();
    MigrationPath::from_steps(steps)
}

/// Errors raised during version-path resolution.
#[derive(Debug, Error, Diagnostic)]
pub enum PathFinderError {
    /// No directed route connects the two versions.
    ///
    /// Terminal and user-visible: there is no retry and no fallback. Raised
    /// identically whether the start version has edges pointing elsewhere or
    /// is entirely unknown to the registry.
    #[error("no migration path from {start} to {target}")]
    #[diagnostic(
        code(migraph::pathfinder::no_migration_path),
        help("Check that a migrator chain is registered connecting these versions; upgrades only follow registered edges.")
    )]
    NoMigrationPath { start: Version, target: Version },
}
