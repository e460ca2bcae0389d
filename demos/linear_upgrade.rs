//! Demo: Linear Upgrade Chain
//!
//! This demonstration walks a configuration document up a linear chain of
//! schema versions, showing the full engine flow: registration, validation,
//! path resolution, and sequential execution with intermediate cleanup.
//!
//! What You'll Learn:
//! 1. Table-driven registration: building a registry from `(from, to, transform)` rows
//! 2. Path resolution: BFS over the version graph
//! 3. Execution: per-step invariant checks and the run report
//!
//! Running This Demo:
//! ```bash
//! cargo run --example linear_upgrade
//! ```

use miette::{IntoDiagnostic, Result};
use serde_yaml::Value;
use tracing::info;

use migraph::document::ConfigDocument;
use migraph::migrator::FnMigrator;
use migraph::pathfinder::find_path;
use migraph::registry::RegistryBuilder;
use migraph::runtimes::MigrationExecutor;

#[tokio::main]
async fn main() -> Result<()> {
    migraph::telemetry::init();

    // The known upgrade steps for this configuration format. Each row is one
    // edge of the version graph; `stamped` relieves the body of tagging its
    // own output.
    let registry = RegistryBuilder::new()
        .add_migrator(FnMigrator::stamped("1.9.0", "1.10.0", |mut doc| {
            // 1.10.0 renamed the listener field.
            if let Some(port) = doc.remove("http_port") {
                doc.insert("port", port);
            }
            Ok(doc)
        }))
        .add_migrator(FnMigrator::stamped("1.10.0", "2.0.0", |mut doc| {
            // 2.0.0 introduced log levels, defaulting to info.
            doc.insert("log_level", Value::from("info"));
            Ok(doc)
        }))
        .build()
        .into_diagnostic()?;

    let doc = ConfigDocument::from_yaml_str(
        "_version: 1.9.0\nhostname: registry.local\nhttp_port: 8080\n",
    )
    .into_diagnostic()?;

    let start = doc.version().into_diagnostic()?;
    let target = "2.0.0".into();
    let path = find_path(&start, &target, &registry).into_diagnostic()?;
    info!(%start, %target, hops = path.len(), "resolved upgrade path");

    let executor = MigrationExecutor::with_temp_store().into_diagnostic()?;
    let outcome = executor.execute(doc, &path).await.into_diagnostic()?;

    println!("--- migrated document ---");
    println!("{}", outcome.document.to_yaml_string().into_diagnostic()?);
    println!("--- run report ---");
    println!("{}", outcome.report.to_json_string().into_diagnostic()?);

    Ok(())
}
