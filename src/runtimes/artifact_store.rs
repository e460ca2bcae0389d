//! Pluggable storage for intermediate migration artifacts.
//!
//! Each step of a migration chain materializes its output before the next
//! step runs, so a crash mid-chain leaves forensic evidence of how far the
//! run got. The [`ArtifactStore`] trait makes that storage injectable: the
//! executor's cleanup guarantee can be tested against [`InMemoryArtifactStore`]
//! without touching the real filesystem, while production runs use
//! [`TempDirStore`].
//!
//! Artifact names derive deterministically from the destination version of
//! the step that produced them, so artifacts from different steps of one run
//! never collide. Concurrent runs each get their own scoped directory;
//! concurrent runs against the same target version inside one shared
//! directory are not synchronized (accepted limitation).

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use miette::Diagnostic;
use parking_lot::RwLock;
use tempfile::TempDir;
use thiserror::Error;

use crate::document::{ConfigDocument, DocumentError};
use crate::types::Version;

/// Storage backend for intermediate migration results.
///
/// The executor persists every step's output through this trait before
/// handing it to the next step, and calls [`clear`](Self::clear) exactly once
/// when the run ends, whether the chain succeeded or aborted.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Materializes one intermediate document, keyed by the destination
    /// version of the step that produced it.
    async fn persist(&self, version: &Version, document: &ConfigDocument)
    -> Result<(), ArtifactError>;

    /// Removes every artifact this store currently holds.
    async fn clear(&self) -> Result<(), ArtifactError>;

    /// Number of artifacts currently held. Used by the executor's tests to
    /// assert the zero-leftover guarantee.
    async fn artifact_count(&self) -> Result<usize, ArtifactError>;
}

/// Filesystem store scoped to a private temporary directory.
///
/// Each intermediate lands at `config.yml.<version>.tmp` inside a directory
/// created for this store alone. Dropping the store removes the directory
/// and anything left in it, so even a run that never reached its cleanup
/// call cannot leak artifacts into the working environment.
///
/// # Examples
///
/// ```rust,no_run
/// use migraph::runtimes::TempDirStore;
///
/// let store = TempDirStore::new()?;
/// println!("intermediates under {}", store.path().display());
/// # Ok::<(), migraph::runtimes::ArtifactError>(())
/// ```
pub struct TempDirStore {
    dir: TempDir,
}

impl TempDirStore {
    /// Creates a store backed by a fresh system temp directory.
    pub fn new() -> Result<Self, ArtifactError> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Creates a store backed by a fresh directory under `base`.
    ///
    /// Useful when intermediates should live near the file being migrated,
    /// e.g. on the same filesystem for rename-based drivers.
    pub fn in_dir(base: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        Ok(Self {
            dir: tempfile::tempdir_in(base)?,
        })
    }

    /// The directory artifacts are written into.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn artifact_path(&self, version: &Version) -> PathBuf {
        self.dir.path().join(format!("config.yml.{version}.tmp"))
    }
}

#[async_trait]
impl ArtifactStore for TempDirStore {
    async fn persist(
        &self,
        version: &Version,
        document: &ConfigDocument,
    ) -> Result<(), ArtifactError> {
        let text = document.to_yaml_string()?;
        tokio::fs::write(self.artifact_path(version), text).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), ArtifactError> {
        let mut entries = tokio::fs::read_dir(self.dir.path()).await?;
        while let Some(entry) = entries.next_entry().await? {
            tokio::fs::remove_file(entry.path()).await?;
        }
        Ok(())
    }

    async fn artifact_count(&self) -> Result<usize, ArtifactError> {
        let mut entries = tokio::fs::read_dir(self.dir.path()).await?;
        let mut count = 0;
        while entries.next_entry().await?.is_some() {
            count += 1;
        }
        Ok(count)
    }
}

#[derive(Default)]
struct MemoryState {
    artifacts: Vec<(Version, ConfigDocument)>,
    clears: usize,
}

/// Volatile artifact store for tests and development.
///
/// Records every persisted intermediate and how many times the store was
/// cleared, so tests can assert both halves of the executor contract: each
/// step materialized before the next ran, and nothing left behind afterwards.
#[derive(Default)]
pub struct InMemoryArtifactStore {
    state: RwLock<MemoryState>,
}

impl InMemoryArtifactStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Destination versions persisted since the last clear, in order.
    #[must_use]
    pub fn persisted_versions(&self) -> Vec<Version> {
        self.state
            .read()
            .artifacts
            .iter()
            .map(|(v, _)| v.clone())
            .collect()
    }

    /// How many times [`ArtifactStore::clear`] has run.
    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.state.read().clears
    }
}

#[async_trait]
impl ArtifactStore for InMemoryArtifactStore {
    async fn persist(
        &self,
        version: &Version,
        document: &ConfigDocument,
    ) -> Result<(), ArtifactError> {
        self.state
            .write()
            .artifacts
            .push((version.clone(), document.clone()));
        Ok(())
    }

    async fn clear(&self) -> Result<(), ArtifactError> {
        let mut state = self.state.write();
        state.artifacts.clear();
        state.clears += 1;
        Ok(())
    }

    async fn artifact_count(&self) -> Result<usize, ArtifactError> {
        Ok(self.state.read().artifacts.len())
    }
}

/// Errors raised while materializing or reclaiming intermediates.
#[derive(Debug, Error, Diagnostic)]
pub enum ArtifactError {
    /// Filesystem failure while writing, listing, or removing artifacts.
    #[error(transparent)]
    #[diagnostic(code(migraph::artifacts::io))]
    Io(#[from] std::io::Error),

    /// The document could not be rendered for storage.
    #[error(transparent)]
    #[diagnostic(code(migraph::artifacts::encode))]
    Encode(#[from] DocumentError),
}
