use async_trait::async_trait;
use serde_yaml::Value;

use migraph::document::ConfigDocument;
use migraph::migrator::{Migrator, MigratorError};
use migraph::types::Version;

/// Migrator that retags the document and appends its destination version to
/// an `applied` breadcrumb list, so tests can observe the exact hop order a
/// document travelled.
#[derive(Debug, Clone)]
pub struct BumpMigrator {
    pub from: Version,
    pub to: Version,
}

impl BumpMigrator {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: Version::new(from),
            to: Version::new(to),
        }
    }
}

#[async_trait]
impl Migrator for BumpMigrator {
    fn from_version(&self) -> &Version {
        &self.from
    }

    fn to_version(&self) -> &Version {
        &self.to
    }

    async fn apply(&self, mut doc: ConfigDocument) -> Result<ConfigDocument, MigratorError> {
        let mut applied = match doc.remove("applied") {
            Some(Value::Sequence(seq)) => seq,
            _ => Vec::new(),
        };
        applied.push(Value::from(self.to.as_str()));
        doc.insert("applied", Value::Sequence(applied));
        doc.set_version(self.to.clone());
        Ok(doc)
    }
}

/// Migrator whose transform always fails.
#[derive(Debug, Clone)]
pub struct FailingMigrator {
    pub from: Version,
    pub to: Version,
}

impl FailingMigrator {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: Version::new(from),
            to: Version::new(to),
        }
    }
}

#[async_trait]
impl Migrator for FailingMigrator {
    fn from_version(&self) -> &Version {
        &self.from
    }

    fn to_version(&self) -> &Version {
        &self.to
    }

    async fn apply(&self, _doc: ConfigDocument) -> Result<ConfigDocument, MigratorError> {
        Err(MigratorError::InvalidValue("synthetic transform failure".into()))
    }
}

/// Migrator that declares one destination version but stamps another.
#[derive(Debug, Clone)]
pub struct LyingMigrator {
    pub from: Version,
    pub to: Version,
    pub stamps: Version,
}

impl LyingMigrator {
    pub fn new(from: &str, to: &str, stamps: &str) -> Self {
        Self {
            from: Version::new(from),
            to: Version::new(to),
            stamps: Version::new(stamps),
        }
    }
}

#[async_trait]
impl Migrator for LyingMigrator {
    fn from_version(&self) -> &Version {
        &self.from
    }

    fn to_version(&self) -> &Version {
        &self.to
    }

    async fn apply(&self, mut doc: ConfigDocument) -> Result<ConfigDocument, MigratorError> {
        doc.set_version(self.stamps.clone());
        Ok(doc)
    }
}
