//! Migration execution infrastructure: artifact storage and the chain driver.
//!
//! This module provides the runtime components for applying a resolved
//! [`MigrationPath`](crate::pathfinder::MigrationPath) to a document, with
//! every intermediate result materialized before the next step and all
//! intermediates reclaimed when the run ends, on the success path and the
//! failure path alike.
//!
//! # Architecture
//!
//! - **[`MigrationExecutor`]** - drives the chain strictly sequentially,
//!   checking the version invariant at every step boundary
//! - **[`ArtifactStore`]** - pluggable storage for intermediate documents
//! - **[`TempDirStore`]** - default store, scoped to a private temp directory
//! - **[`InMemoryArtifactStore`]** - volatile store for tests
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use migraph::document::ConfigDocument;
//! use migraph::pathfinder::find_path;
//! use migraph::runtimes::MigrationExecutor;
//! # async fn example(
//! #     registry: migraph::registry::MigratorRegistry,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let doc = ConfigDocument::from_yaml_str("_version: 1.0\n")?;
//! let path = find_path(&"1.0".into(), &"2.0".into(), &registry)?;
//!
//! let executor = MigrationExecutor::with_temp_store()?;
//! let outcome = executor.execute(doc, &path).await?;
//! println!("now at {}", outcome.document.version()?);
//! # Ok(())
//! # }
//! ```

pub mod artifact_store;
pub mod executor;

pub use artifact_store::{ArtifactError, ArtifactStore, InMemoryArtifactStore, TempDirStore};
pub use executor::{ExecutorError, MigrationExecutor, MigrationOutcome, MigrationReport, StepRecord};
