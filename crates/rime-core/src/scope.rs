use crate::{
    graph::ResourceId,
    resource::{ACCOUNT, DATABASE, ORGANIZATION, ResourceKind, SCHEMA},
};
use derive_more::Display;

///
/// Scope
///
/// The parent capability of a resource kind: exactly one parent link field
/// and one FQN rule.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Scope {
    Organization,
    Account,
    Database,
    Schema,
}

impl Scope {
    /// Name of the link field holding the parent.
    #[must_use]
    pub const fn link_field(self) -> &'static str {
        match self {
            Self::Organization => "organization",
            Self::Account => "account",
            Self::Database => "database",
            Self::Schema => "schema",
        }
    }

    #[must_use]
    pub fn parent_kind(self) -> &'static ResourceKind {
        match self {
            Self::Organization => &ORGANIZATION,
            Self::Account => &ACCOUNT,
            Self::Database => &DATABASE,
            Self::Schema => &SCHEMA,
        }
    }

    /// Whether the parent contributes segments to the child's FQN. Account
    /// addressing leaves out organization and account by convention.
    #[must_use]
    pub const fn qualifies_name(self) -> bool {
        matches!(self, Self::Database | Self::Schema)
    }
}

///
/// Link
///
/// Value assigned to a scope or reference field: either a bare name, which
/// is coerced into a fresh stub of the expected kind when assigned, or an
/// entity already in the graph.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Link {
    Named(String),
    Resolved(ResourceId),
}

impl From<&str> for Link {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for Link {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<ResourceId> for Link {
    fn from(id: ResourceId) -> Self {
        Self::Resolved(id)
    }
}
