use serde_yaml::Value;

use migraph::document::ConfigDocument;
use migraph::registry::{MigratorRegistry, RegistryBuilder};

use super::migrators::BumpMigrator;

/// A document at `version` with a couple of opaque body fields.
pub fn doc(version: &str) -> ConfigDocument {
    ConfigDocument::new(version)
        .with_entry("hostname", Value::from("registry.local"))
        .with_entry("port", Value::from(8080))
}

/// The linear chain `1.0 -> 1.1 -> 1.2 -> 2.0`.
pub fn linear_registry() -> MigratorRegistry {
    RegistryBuilder::new()
        .add_migrator(BumpMigrator::new("1.0", "1.1"))
        .add_migrator(BumpMigrator::new("1.1", "1.2"))
        .add_migrator(BumpMigrator::new("1.2", "2.0"))
        .build()
        .expect("linear chain has no duplicate edges")
}

/// The hop order a document takes, read from the `applied` breadcrumb the
/// [`BumpMigrator`] maintains.
pub fn applied_versions(doc: &ConfigDocument) -> Vec<String> {
    match doc.get("applied") {
        Some(Value::Sequence(seq)) => seq
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}
