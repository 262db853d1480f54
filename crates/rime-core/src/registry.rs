//! Kind registry and polymorphic construction from DDL.
//!
//! Keys derive from each kind's declared name only, so the registry is the
//! same no matter which order kinds are registered in.

use crate::{
    error::Error,
    parse::header::parse_create_header,
    resource::{
        ACCOUNT, DATABASE, ORGANIZATION, ROLE, ResourceBuilder, ResourceKind, SCHEMA, SEQUENCE,
        WAREHOUSE,
    },
};
use std::{collections::BTreeMap, sync::LazyLock};

/// Built-in kinds, registered once on first access to `registry()`.
pub static BUILTIN_KINDS: &[&ResourceKind] = &[
    &ORGANIZATION,
    &ACCOUNT,
    &DATABASE,
    &SCHEMA,
    &ROLE,
    &WAREHOUSE,
    &SEQUENCE,
];

static REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    let mut registry = Registry::new();
    for kind in BUILTIN_KINDS {
        registry
            .register(kind)
            .expect("built-in resource kinds have unique keys");
    }
    tracing::debug!(kinds = registry.len(), "resource registry initialized");

    registry
});

/// Process-wide registry of built-in kinds; read-only once initialized.
#[must_use]
pub fn registry() -> &'static Registry {
    &REGISTRY
}

///
/// Registry
///

#[derive(Debug, Default)]
pub struct Registry {
    kinds: BTreeMap<String, &'static ResourceKind>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: &'static ResourceKind) -> Result<(), Error> {
        let key = kind.key();
        if self.kinds.contains_key(&key) {
            return Err(Error::KindAlreadyRegistered { key });
        }
        self.kinds.insert(key, kind);

        Ok(())
    }

    pub fn resolve(&self, key: &str) -> Result<&'static ResourceKind, Error> {
        self.kinds
            .get(key)
            .copied()
            .ok_or_else(|| Error::UnknownResourceKind {
                key: key.to_string(),
            })
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.kinds.contains_key(key)
    }

    /// Registered kinds in key order.
    pub fn kinds(&self) -> impl Iterator<Item = &'static ResourceKind> + '_ {
        self.kinds.values().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Tokenize a CREATE statement and build the matching kind from it.
    pub fn from_sql(&self, sql: &str) -> Result<ResourceBuilder, Error> {
        let header = parse_create_header(sql, self)?;
        let kind = header.kind;
        tracing::debug!(kind = kind.name, identifier = ?header.identifier, "dispatching CREATE");

        kind.from_header(header)
    }
}

///
/// TESTS
///
