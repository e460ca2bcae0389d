mod common;

use common::*;
use migraph::registry::{RegistryBuilder, RegistryError};
use migraph::types::Version;

#[test]
fn duplicate_edge_rejected_and_no_registry_exists() {
    let result = RegistryBuilder::new()
        .add_migrator(BumpMigrator::new("1.0", "1.1"))
        .add_migrator(BumpMigrator::new("1.1", "1.2"))
        .add_migrator(BumpMigrator::new("1.0", "1.1"))
        .build();

    let err = result.err().expect("duplicate (from, to) must fail build");
    let RegistryError::DuplicateEdge { from, to } = err;
    assert_eq!(from, Version::new("1.0"));
    assert_eq!(to, Version::new("1.1"));
}

#[test]
fn lookup_returns_outgoing_edges_in_registration_order() {
    let registry = RegistryBuilder::new()
        .add_migrator(BumpMigrator::new("1.0", "1.2"))
        .add_migrator(BumpMigrator::new("1.0", "1.1"))
        .build()
        .unwrap();

    let outgoing = registry.lookup(&Version::new("1.0"));
    let targets: Vec<&str> = outgoing.iter().map(|m| m.to_version().as_str()).collect();
    assert_eq!(targets, vec!["1.2", "1.1"]);
}

#[test]
fn lookup_unknown_version_is_empty_not_an_error() {
    let registry = linear_registry();
    assert!(registry.lookup(&Version::new("0.9")).is_empty());
}

#[test]
fn all_reflects_every_registered_migrator() {
    let registry = linear_registry();
    assert_eq!(registry.all().len(), 3);
    assert_eq!(registry.len(), 3);
    assert!(!registry.is_empty());
}

#[test]
fn empty_registry_builds() {
    let registry = RegistryBuilder::new().build().unwrap();
    assert!(registry.is_empty());
    assert!(registry.lookup(&Version::new("1.0")).is_empty());
}
