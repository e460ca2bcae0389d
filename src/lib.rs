//! # Migraph: Version-Graph Configuration Migration Engine
//!
//! Migraph upgrades a structured configuration document from one declared
//! schema version to another by composing a chain of discrete,
//! version-to-version migration steps. Versions are nodes of a directed
//! graph, migrators are its edges, and an upgrade is a breadth-first-resolved
//! path through that graph applied strictly in sequence.
//!
//! ## Core Concepts
//!
//! - **Documents**: opaque YAML mappings tagged with a schema version
//! - **Migrators**: async units transforming exactly one source version into
//!   exactly one destination version
//! - **Registry**: the immutable, duplicate-validated set of known migrators
//! - **Pathfinder**: BFS resolution of the fewest-hops migrator chain
//! - **Executor**: sequential application with materialized intermediates
//!   and guaranteed cleanup
//!
//! ## Quick Start
//!
//! ```rust
//! use migraph::document::ConfigDocument;
//! use migraph::migrator::FnMigrator;
//! use migraph::pathfinder::find_path;
//! use migraph::registry::RegistryBuilder;
//! use migraph::runtimes::MigrationExecutor;
//! use serde_yaml::Value;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Register the known upgrade steps (an explicit table, validated once).
//! let registry = RegistryBuilder::new()
//!     .add_migrator(FnMigrator::stamped("1.9.0", "1.10.0", |mut doc| {
//!         if let Some(port) = doc.remove("http_port") {
//!             doc.insert("port", port);
//!         }
//!         Ok(doc)
//!     }))
//!     .add_migrator(FnMigrator::stamped("1.10.0", "2.0.0", |mut doc| {
//!         doc.insert("log_level", Value::from("info"));
//!         Ok(doc)
//!     }))
//!     .build()?;
//!
//! // Resolve the chain and run it.
//! let doc = ConfigDocument::from_yaml_str("_version: 1.9.0\nhttp_port: 8080\n")?;
//! let path = find_path(&"1.9.0".into(), &"2.0.0".into(), &registry)?;
//!
//! let executor = MigrationExecutor::with_temp_store()?;
//! let outcome = executor.execute(doc, &path).await?;
//!
//! assert_eq!(outcome.document.version()?.as_str(), "2.0.0");
//! assert_eq!(outcome.document.get("port"), Some(&Value::from(8080)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Guarantees
//!
//! - **Fewest hops, deterministically**: with several shortest routes, the
//!   first-registered route wins, never map iteration order.
//! - **Uniform failure surface**: an unknown start version and a missing
//!   route fail identically with
//!   [`NoMigrationPath`](pathfinder::PathFinderError::NoMigrationPath).
//! - **Checked step boundaries**: the executor verifies every step's input
//!   and output version tags; a migrator that lies fails the run at the
//!   lying step.
//! - **Zero leftovers**: intermediates are materialized during the run and
//!   reclaimed when it ends, whether the chain succeeded or aborted.
//!
//! ## Module Guide
//!
//! - [`types`] - The opaque [`Version`](types::Version) identifier
//! - [`document`] - Configuration document container and version-tag access
//! - [`migrator`] - The [`Migrator`](migrator::Migrator) trait and adapters
//! - [`registry`] - Migrator registration, validation, and lookup
//! - [`pathfinder`] - BFS path resolution over the version graph
//! - [`runtimes`] - Chain execution and intermediate artifact storage
//! - [`telemetry`] - Tracing subscriber setup for drivers and demos

pub mod document;
pub mod migrator;
pub mod pathfinder;
pub mod registry;
pub mod runtimes;
pub mod telemetry;
pub mod types;
