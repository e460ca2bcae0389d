//! Sequential migration chain execution.
//!
//! [`MigrationExecutor`] drives a resolved [`MigrationPath`]: it feeds each
//! step's output into the next step, materializes every intermediate through
//! the configured [`ArtifactStore`] before moving on, and reclaims all
//! intermediates when the run ends, success or failure. Execution is
//! strictly sequential; each step's input *is* the previous step's output,
//! so there is no parallelism to exploit along the chain.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use crate::document::{ConfigDocument, DocumentError};
use crate::migrator::MigratorError;
use crate::pathfinder::MigrationPath;
use crate::runtimes::artifact_store::{ArtifactError, ArtifactStore, TempDirStore};
use crate::types::Version;

/// One executed hop of a migration run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StepRecord {
    /// Zero-based position in the path.
    pub step: usize,
    /// Version the step consumed.
    pub from: Version,
    /// Version the step produced.
    pub to: Version,
}

/// Summary of a completed migration run.
///
/// # Examples
///
/// ```rust
/// use migraph::runtimes::MigrationReport;
///
/// fn announce(report: &MigrationReport) {
///     println!(
///         "run {} applied {} steps in {}ms",
///         report.run_id,
///         report.steps.len(),
///         (report.finished_at - report.started_at).num_milliseconds(),
///     );
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    /// Identifier for this invocation, distinct across runs.
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// The hops that ran, in order. Empty for a version-already-matches
    /// no-op.
    pub steps: Vec<StepRecord>,
}

impl MigrationReport {
    /// Renders the report as a JSON string for logs or driver output.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Final document plus the run summary.
#[derive(Debug, Clone)]
pub struct MigrationOutcome {
    /// The last step's output, or the untouched input for an empty path.
    pub document: ConfigDocument,
    pub report: MigrationReport,
}

/// Drives a migration path over a document, step by step.
///
/// The executor owns two guarantees:
///
/// 1. **Invariant checks at every step boundary.** Before step `i` runs, the
///    current document's version tag must equal the step's declared source
///    version; after it runs, the output's tag must equal the declared
///    destination. Either mismatch is a fatal
///    [`ExecutorError::InvariantViolation`]; it signals a defect in path
///    construction or a migrator that lied about its output, not a condition
///    to retry.
/// 2. **No leaked intermediates.** Every intermediate is materialized in the
///    [`ArtifactStore`] before the next step starts, and the store is
///    cleared when the run ends, on the success path and the failure path
///    alike.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use migraph::document::ConfigDocument;
/// use migraph::migrator::FnMigrator;
/// use migraph::pathfinder::find_path;
/// use migraph::registry::RegistryBuilder;
/// use migraph::runtimes::{InMemoryArtifactStore, MigrationExecutor};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let registry = RegistryBuilder::new()
///     .add_migrator(FnMigrator::stamped("1.0", "1.1", Ok))
///     .build()?;
/// let path = find_path(&"1.0".into(), &"1.1".into(), &registry)?;
///
/// let executor = MigrationExecutor::new(Arc::new(InMemoryArtifactStore::new()));
/// let outcome = executor.execute(ConfigDocument::new("1.0"), &path).await?;
///
/// assert_eq!(outcome.document.version()?.as_str(), "1.1");
/// assert_eq!(outcome.report.steps.len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct MigrationExecutor {
    store: Arc<dyn ArtifactStore>,
}

impl MigrationExecutor {
    /// Creates an executor over an injected artifact store.
    #[must_use]
    pub fn new(store: Arc<dyn ArtifactStore>) -> Self {
        Self { store }
    }

    /// Creates an executor over a fresh [`TempDirStore`], the default
    /// production shape.
    pub fn with_temp_store() -> Result<Self, ArtifactError> {
        Ok(Self::new(Arc::new(TempDirStore::new()?)))
    }

    /// Applies `path` to `initial`, returning the final document and a run
    /// report.
    ///
    /// An empty path is a successful no-op: the input document is returned
    /// untouched and no artifact is ever created. Otherwise the chain runs
    /// to completion or aborts at the first failing step; in both cases the
    /// store's intermediates are reclaimed before this method returns.
    ///
    /// # Errors
    ///
    /// - [`ExecutorError::InvariantViolation`] on a version mismatch at any
    ///   step boundary
    /// - [`ExecutorError::StepFailed`] when a migrator's transform fails,
    ///   annotated with the step's index and versions
    /// - [`ExecutorError::Artifact`] when materialization or cleanup fails
    #[instrument(skip(self, initial, path), fields(hops = path.len()))]
    pub async fn execute(
        &self,
        initial: ConfigDocument,
        path: &MigrationPath,
    ) -> Result<MigrationOutcome, ExecutorError> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();

        if path.is_empty() {
            tracing::info!(%run_id, "empty path, nothing to migrate");
            return Ok(MigrationOutcome {
                document: initial,
                report: MigrationReport {
                    run_id,
                    started_at,
                    finished_at: Utc::now(),
                    steps: Vec::new(),
                },
            });
        }

        tracing::info!(%run_id, hops = path.len(), "starting migration chain");
        let result = self.run_chain(initial, path).await;

        // Cleanup is the one action guaranteed on both paths. When the chain
        // already failed, a cleanup failure is logged and the chain error
        // wins; after a successful chain a cleanup failure is the error.
        let cleanup = self.store.clear().await;
        match (result, cleanup) {
            (Ok((document, steps)), Ok(())) => Ok(MigrationOutcome {
                document,
                report: MigrationReport {
                    run_id,
                    started_at,
                    finished_at: Utc::now(),
                    steps,
                },
            }),
            (Ok(_), Err(cleanup_err)) => Err(ExecutorError::Artifact(cleanup_err)),
            (Err(chain_err), Ok(())) => Err(chain_err),
            (Err(chain_err), Err(cleanup_err)) => {
                tracing::warn!(%run_id, error = %cleanup_err, "cleanup failed after aborted chain");
                Err(chain_err)
            }
        }
    }

    async fn run_chain(
        &self,
        mut document: ConfigDocument,
        path: &MigrationPath,
    ) -> Result<(ConfigDocument, Vec<StepRecord>), ExecutorError> {
        let mut steps = Vec::with_capacity(path.len());

        for (index, migrator) in path.iter().enumerate() {
            let from = migrator.from_version().clone();
            let to = migrator.to_version().clone();

            let current = document.version()?;
            if current != from {
                return Err(ExecutorError::InvariantViolation {
                    step: index,
                    expected: from,
                    found: current,
                });
            }

            tracing::info!(step = index, %from, %to, "applying migrator");
            let next = migrator.apply(document).await.map_err(|source| {
                ExecutorError::StepFailed {
                    step: index,
                    from: from.clone(),
                    to: to.clone(),
                    source,
                }
            })?;

            let produced = next.version()?;
            if produced != to {
                return Err(ExecutorError::InvariantViolation {
                    step: index,
                    expected: to,
                    found: produced,
                });
            }

            self.store.persist(&to, &next).await?;
            steps.push(StepRecord {
                step: index,
                from,
                to,
            });
            document = next;
        }

        Ok((document, steps))
    }
}

/// Errors raised while driving a migration chain.
#[derive(Debug, Error, Diagnostic)]
pub enum ExecutorError {
    /// A step boundary's version tag did not match the path's declaration.
    ///
    /// Indicates a defect in path construction or a migrator that lied
    /// about its output version. Not recoverable by retry.
    #[error("invariant violation at step {step}: expected version {expected}, found {found}")]
    #[diagnostic(
        code(migraph::executor::invariant_violation),
        help("A migrator must return a document tagged with exactly its declared destination version.")
    )]
    InvariantViolation {
        step: usize,
        expected: Version,
        found: Version,
    },

    /// A migrator's transform failed; the chain aborted at this step.
    #[error("migration step {step} ({from} -> {to}) failed")]
    #[diagnostic(code(migraph::executor::step_failed))]
    StepFailed {
        step: usize,
        from: Version,
        to: Version,
        #[source]
        source: MigratorError,
    },

    /// The version tag could not be read at a step boundary.
    #[error(transparent)]
    #[diagnostic(code(migraph::executor::document))]
    Document(#[from] DocumentError),

    /// Materializing or reclaiming an intermediate failed.
    #[error(transparent)]
    #[diagnostic(code(migraph::executor::artifact))]
    Artifact(#[from] ArtifactError),
}
