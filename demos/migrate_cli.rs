//! Demo: File-to-File Migration Driver
//!
//! A small driver of the kind that normally wraps this engine: resolve file
//! paths, load the document, skip work when the version already matches,
//! otherwise resolve and run the chain and write the result back out. Any
//! engine error surfaces as a non-zero exit with the error's message.
//!
//! Running This Demo:
//! ```bash
//! cargo run --example migrate_cli -- -i harbor.yml -t 2.0.0
//! ```

use std::path::PathBuf;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use serde_yaml::Value;

use migraph::document::ConfigDocument;
use migraph::migrator::FnMigrator;
use migraph::pathfinder::find_path;
use migraph::registry::{MigratorRegistry, RegistryBuilder};
use migraph::runtimes::MigrationExecutor;

#[derive(Parser)]
#[command(name = "migrate_cli")]
#[command(about = "Upgrade a configuration file to a target schema version")]
struct Cli {
    /// Path of the original config file
    #[arg(short, long)]
    input: PathBuf,

    /// Path of the output config file (defaults to rewriting the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Target schema version
    #[arg(short, long, default_value = "2.0.0")]
    target: String,
}

/// The upgrade steps this driver knows about. A production driver would pull
/// these from its release-specific migration table.
fn sample_registry() -> Result<MigratorRegistry> {
    RegistryBuilder::new()
        .add_migrator(FnMigrator::stamped("1.9.0", "1.10.0", |mut doc| {
            if let Some(port) = doc.remove("http_port") {
                doc.insert("port", port);
            }
            Ok(doc)
        }))
        .add_migrator(FnMigrator::stamped("1.10.0", "2.0.0", |mut doc| {
            doc.insert("log_level", Value::from("info"));
            Ok(doc)
        }))
        .build()
        .into_diagnostic()
}

#[tokio::main]
async fn main() -> Result<()> {
    migraph::telemetry::init();
    let cli = Cli::parse();
    let output = cli.output.clone().unwrap_or_else(|| cli.input.clone());

    let text = std::fs::read_to_string(&cli.input).into_diagnostic()?;
    let doc = ConfigDocument::from_yaml_str(&text).into_diagnostic()?;

    let current = doc.version().into_diagnostic()?;
    let target = cli.target.as_str().into();
    if current == target {
        println!("input already at version {current}, no need to upgrade");
        return Ok(());
    }

    let registry = sample_registry()?;
    let path = find_path(&current, &target, &registry).into_diagnostic()?;

    let executor = MigrationExecutor::with_temp_store().into_diagnostic()?;
    let outcome = executor.execute(doc, &path).await.into_diagnostic()?;

    std::fs::write(
        &output,
        outcome.document.to_yaml_string().into_diagnostic()?,
    )
    .into_diagnostic()?;
    println!("written new values to {}", output.display());

    Ok(())
}
