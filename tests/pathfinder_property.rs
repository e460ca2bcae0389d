#[macro_use]
extern crate proptest;

mod common;
use common::*;

use proptest::prelude::{Strategy, prop};

use migraph::pathfinder::{PathFinderError, find_path};
use migraph::registry::{MigratorRegistry, RegistryBuilder};
use migraph::types::Version;

/// Generate valid version labels.
///
/// Constraints:
/// - Starts with an alphanumeric
/// - Followed by 0..12 of [A-Za-z0-9._-]
fn version_label_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9][A-Za-z0-9._-]{0,12}").unwrap()
}

/// Generate a deduplicated chain of 2..10 distinct version labels.
fn chain_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(version_label_strategy(), 2..10)
        .prop_map(|mut labels| {
            labels.sort();
            labels.dedup();
            labels
        })
        .prop_filter("need at least two distinct labels", |labels| {
            labels.len() >= 2
        })
}

fn registry_for_chain(labels: &[String]) -> MigratorRegistry {
    let mut builder = RegistryBuilder::new();
    for pair in labels.windows(2) {
        builder = builder.add_migrator(BumpMigrator::new(&pair[0], &pair[1]));
    }
    builder.build().expect("deduped chain has no duplicate edges")
}

proptest! {
    /// `find_path(v, v, R)` is the empty path for every version, registered
    /// or not.
    #[test]
    fn prop_identity_path_is_empty(
        labels in chain_strategy(),
        probe in version_label_strategy(),
    ) {
        let registry = registry_for_chain(&labels);
        let v = Version::new(probe);
        let path = find_path(&v, &v, &registry).unwrap();
        prop_assert!(path.is_empty());
    }

    /// On a linear chain the resolved path visits every hop, in order.
    #[test]
    fn prop_linear_chain_resolves_every_hop(labels in chain_strategy()) {
        let registry = registry_for_chain(&labels);
        let start = Version::new(labels.first().unwrap().clone());
        let target = Version::new(labels.last().unwrap().clone());

        let path = find_path(&start, &target, &registry).unwrap();
        prop_assert_eq!(path.len(), labels.len() - 1);
        prop_assert_eq!(path.start_version(), Some(&start));
        prop_assert_eq!(path.target_version(), Some(&target));

        // Chaining invariant: each hop's destination feeds the next hop.
        for pair in path.steps().windows(2) {
            prop_assert_eq!(pair[0].to_version(), pair[1].from_version());
        }
    }

    /// A target absent from the chain fails with `NoMigrationPath` carrying
    /// both endpoints.
    #[test]
    fn prop_absent_target_has_no_path(labels in chain_strategy()) {
        let registry = registry_for_chain(&labels);
        let start = Version::new(labels.first().unwrap().clone());
        // Suffix guarantees the label is not in the generated set.
        let target = Version::new(format!("{}-absent", labels.last().unwrap()));

        let err = find_path(&start, &target, &registry).unwrap_err();
        let PathFinderError::NoMigrationPath { start: s, target: t } = err;
        prop_assert_eq!(s, start);
        prop_assert_eq!(t, target);
    }

    /// Reversing a directed chain never resolves (no implicit downgrades).
    #[test]
    fn prop_no_implicit_reverse_edges(labels in chain_strategy()) {
        let registry = registry_for_chain(&labels);
        let start = Version::new(labels.last().unwrap().clone());
        let target = Version::new(labels.first().unwrap().clone());

        prop_assert!(find_path(&start, &target, &registry).is_err());
    }
}
