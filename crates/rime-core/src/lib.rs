//! Core model for Rime: resource kinds, property schemas, scoping, DDL
//! lifecycle generation, and the entity graph that tracks references.
//!
//! Raw DDL flows through `parse::header`, the kind `Registry` and the
//! kind's property schema into a `ResourceBuilder`; `Graph::insert` then
//! resolves scope links, attaches implicit children and records
//! references, and the kind's `Lifecycle` renders statements back out.

// public exports are one module level down
pub mod error;
pub mod export;
pub mod graph;
pub mod identifier;
pub mod lifecycle;
pub mod parse;
pub mod privs;
pub mod props;
pub mod registry;
pub mod resource;
pub mod scope;
pub mod value;

pub use error::{Error, ErrorClass};

///
/// Prelude
///
/// Domain vocabulary only; errors and parsing internals stay one level down.
///

pub mod prelude {
    pub use crate::{
        graph::{Graph, ResourceId, Sql},
        identifier::{Fqn, ResourceName},
        lifecycle::{Change, CreateOptions, DropOptions},
        registry::registry,
        resource::{
            Resource, ResourceBuilder, ResourceKind, account, database, organization, role,
            schema, sequence, warehouse,
        },
        scope::Link,
        value::{PropData, PropValue},
    };
}
