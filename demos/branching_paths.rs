//! Demo: Branching Version Graphs
//!
//! Version graphs are not always straight lines. This demonstration registers
//! a graph that branches and rejoins, then shows the two path-resolution
//! guarantees: the fewest-hops route wins, and equal-length routes tie-break
//! by registration order.
//!
//! Running This Demo:
//! ```bash
//! cargo run --example branching_paths
//! ```

use miette::{IntoDiagnostic, Result};
use tracing::info;

use migraph::migrator::FnMigrator;
use migraph::pathfinder::find_path;
use migraph::registry::RegistryBuilder;

fn stamped(from: &str, to: &str) -> FnMigrator {
    FnMigrator::stamped(from, to, Ok)
}

fn main() -> Result<()> {
    migraph::telemetry::init();

    // 1.0 can reach 2.0 three ways:
    //   1.0 -> 1.1 -> 1.2 -> 2.0   (three hops)
    //   1.0 -> 1.5 -> 2.0          (two hops, registered first)
    //   1.0 -> 1.6 -> 2.0          (two hops, registered second)
    let registry = RegistryBuilder::new()
        .add_migrator(stamped("1.0", "1.1"))
        .add_migrator(stamped("1.1", "1.2"))
        .add_migrator(stamped("1.2", "2.0"))
        .add_migrator(stamped("1.0", "1.5"))
        .add_migrator(stamped("1.5", "2.0"))
        .add_migrator(stamped("1.0", "1.6"))
        .add_migrator(stamped("1.6", "2.0"))
        .build()
        .into_diagnostic()?;

    let path = find_path(&"1.0".into(), &"2.0".into(), &registry).into_diagnostic()?;
    info!(?path, "shortest route, first-registered tie-break");
    println!("resolved: {path:?}");
    assert_eq!(path.len(), 2);
    assert_eq!(path.steps()[0].to_version().as_str(), "1.5");

    // A downgrade follows no registered edge and fails with the uniform
    // no-path diagnostic.
    match find_path(&"2.0".into(), &"1.0".into(), &registry) {
        Err(err) => println!("downgrade refused: {err}"),
        Ok(_) => unreachable!("no downgrade edges are registered"),
    }

    Ok(())
}
