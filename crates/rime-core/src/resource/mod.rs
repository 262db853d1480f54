//! Resource kinds and entities.
//!
//! A `ResourceKind` is the static descriptor of one platform object kind.
//! Entities are built with a `ResourceBuilder` and owned by a `Graph`.

mod account;
mod database;
mod organization;
mod role;
mod schema;
mod sequence;
mod warehouse;

pub use account::{ACCOUNT, AccountLifecycle, EDITIONS, account};
pub use database::{DATABASE, database};
pub use organization::{ORGANIZATION, organization};
pub use role::{ROLE, role};
pub use schema::{SCHEMA, schema};
pub use sequence::{SEQUENCE, sequence};
pub use warehouse::{SCALING_POLICIES, WAREHOUSE, WAREHOUSE_SIZES, warehouse};

use crate::{
    error::Error,
    graph::{RefSet, ResourceId},
    identifier::{ResourceName, split_qualified},
    lifecycle::Lifecycle,
    parse::header::CreateHeader,
    privs::Privs,
    props::Props,
    scope::{Link, Scope},
    value::{PropData, PropValue},
};
use rime_utils::case::{kind_key, kind_keyword};
use std::{collections::BTreeMap, fmt};

///
/// LinkField
///
/// A reference-bearing field other than the scope link, e.g. `owner`.
///

#[derive(Debug)]
pub struct LinkField {
    pub field: &'static str,
    pub kind: &'static ResourceKind,
    /// Name linked when the caller leaves the field unset.
    pub default: Option<&'static str>,
}

///
/// ImplicitChild
///
/// A child the platform creates alongside its parent.
///

#[derive(Debug)]
pub struct ImplicitChild {
    pub kind: &'static ResourceKind,
    pub name: &'static str,
}

///
/// ResourceKind
///

pub struct ResourceKind {
    /// Declared PascalCase name; the registry key and SQL keyword derive from it.
    pub name: &'static str,
    pub scope: Option<Scope>,
    pub props: Props,
    pub privs: Privs,
    pub links: &'static [LinkField],
    pub implicit_children: &'static [ImplicitChild],
    pub lifecycle: &'static dyn Lifecycle,
}

impl ResourceKind {
    #[must_use]
    pub fn key(&self) -> String {
        kind_key(self.name)
    }

    #[must_use]
    pub fn keyword(&self) -> String {
        kind_keyword(self.name)
    }

    #[must_use]
    pub fn is(&self, other: &Self) -> bool {
        self.name == other.name
    }

    #[must_use]
    pub fn link_field(&self, field: &str) -> Option<&'static LinkField> {
        self.links.iter().find(|l| l.field.eq_ignore_ascii_case(field))
    }

    /// Number of identifier parts that address this kind (`db.schema.name`
    /// for schema-scoped kinds, a bare name for account-level kinds).
    #[must_use]
    pub fn depth(&self) -> usize {
        match self.scope {
            Some(scope) if scope.qualifies_name() => 1 + scope.parent_kind().depth(),
            _ => 1,
        }
    }

    /// Build an entity from a tokenized CREATE header and its property remainder.
    pub fn from_header(&'static self, header: CreateHeader) -> Result<ResourceBuilder, Error> {
        let Some((name, qualifier)) = header.identifier.split_last() else {
            return Err(Error::malformed_header(&header.sql, "missing identifier"));
        };

        let mut builder = ResourceBuilder::from_name(self, name.clone());
        if !qualifier.is_empty() {
            let parent = qualifier
                .iter()
                .map(ResourceName::to_sql)
                .collect::<Vec<_>>()
                .join(".");
            builder = builder.scope(parent)?;
        }

        for word in &header.premodifiers {
            builder = builder.set(word, true)?;
        }

        if !header.remainder.is_empty() {
            let data = self.props.parse(self.name, &header.remainder)?;
            for (field, value) in data {
                builder = builder.set(&field, value)?;
            }
        }

        Ok(builder)
    }
}

impl fmt::Debug for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceKind")
            .field("name", &self.name)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

///
/// ResourceBuilder
///
/// Validated, not-yet-attached entity. Every setter validates immediately;
/// a failure consumes the builder so nothing partial reaches a graph.
///

#[derive(Clone, Debug)]
pub struct ResourceBuilder {
    pub(crate) kind: &'static ResourceKind,
    pub(crate) name: ResourceName,
    pub(crate) scope: Option<Link>,
    pub(crate) links: BTreeMap<&'static str, Link>,
    pub(crate) data: PropData,
    pub(crate) implicit: bool,
}

impl ResourceBuilder {
    pub fn new(kind: &'static ResourceKind, name: &str) -> Result<Self, Error> {
        Ok(Self::from_name(kind, ResourceName::new(name)?))
    }

    pub(crate) fn from_name(kind: &'static ResourceKind, name: ResourceName) -> Self {
        Self {
            kind,
            name,
            scope: None,
            links: BTreeMap::new(),
            data: PropData::new(),
            implicit: false,
        }
    }

    /// Assign the scope parent.
    pub fn scope(mut self, link: impl Into<Link>) -> Result<Self, Error> {
        let link = link.into();
        let Some(scope) = self.kind.scope else {
            return Err(Error::ScopeMismatch {
                kind: self.kind.name.to_string(),
                expected: "none".to_string(),
                found: "a scope link".to_string(),
            });
        };
        check_named_link(scope.parent_kind(), &link)?;

        self.scope = Some(link);
        Ok(self)
    }

    /// Assign a scope or reference link field by name.
    pub fn link(mut self, field: &str, link: impl Into<Link>) -> Result<Self, Error> {
        if self
            .kind
            .scope
            .is_some_and(|s| s.link_field().eq_ignore_ascii_case(field))
        {
            return self.scope(link);
        }

        let Some(link_field) = self.kind.link_field(field) else {
            return Err(Error::UnknownProperty {
                kind: self.kind.name.to_string(),
                field: field.to_string(),
            });
        };
        let link = link.into();
        check_named_link(link_field.kind, &link)?;

        self.links.insert(link_field.field, link);
        Ok(self)
    }

    /// Assign one property value.
    pub fn set(mut self, field: &str, value: impl Into<PropValue>) -> Result<Self, Error> {
        let (prop, value) = self.kind.props.validate(self.kind.name, field, value.into())?;
        self.data.insert(prop.field, value);

        Ok(self)
    }

    #[must_use]
    pub(crate) const fn implicit(mut self) -> Self {
        self.implicit = true;
        self
    }

    #[must_use]
    pub const fn kind(&self) -> &'static ResourceKind {
        self.kind
    }

    #[must_use]
    pub const fn name(&self) -> &ResourceName {
        &self.name
    }

    #[must_use]
    pub const fn data(&self) -> &PropData {
        &self.data
    }
}

// Named links must split into at most as many parts as address the target kind.
pub(crate) fn check_named_link(
    expected: &'static ResourceKind,
    link: &Link,
) -> Result<Vec<ResourceName>, Error> {
    match link {
        Link::Named(text) => {
            let parts = split_qualified(text)?;
            if parts.len() > expected.depth() {
                return Err(Error::InvalidName {
                    name: text.clone(),
                    reason: format!(
                        "{} is addressed by at most {} name part(s)",
                        expected.name,
                        expected.depth()
                    ),
                });
            }

            Ok(parts)
        }
        Link::Resolved(_) => Ok(Vec::new()),
    }
}

///
/// Resource
///
/// An entity owned by a `Graph`. Identity (kind + name) is fixed; property
/// values change only through validated graph assignment.
///

#[derive(Clone, Debug)]
pub struct Resource {
    pub(crate) kind: &'static ResourceKind,
    pub(crate) name: ResourceName,
    pub(crate) scope: Option<ResourceId>,
    pub(crate) links: BTreeMap<&'static str, ResourceId>,
    pub(crate) data: PropData,
    pub(crate) implicit: bool,
    pub(crate) stub: bool,
    pub(crate) refs: RefSet,
}

impl Resource {
    pub(crate) fn new(kind: &'static ResourceKind, name: ResourceName) -> Self {
        Self {
            kind,
            name,
            scope: None,
            links: BTreeMap::new(),
            data: PropData::new(),
            implicit: false,
            stub: false,
            refs: RefSet::new(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static ResourceKind {
        self.kind
    }

    #[must_use]
    pub const fn name(&self) -> &ResourceName {
        &self.name
    }

    #[must_use]
    pub const fn scope(&self) -> Option<ResourceId> {
        self.scope
    }

    #[must_use]
    pub fn link(&self, field: &str) -> Option<ResourceId> {
        self.links.get(field).copied()
    }

    /// Explicitly set property values (defaults not included).
    #[must_use]
    pub const fn data(&self) -> &PropData {
        &self.data
    }

    /// Property value, falling back to the declared default.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<PropValue> {
        let prop = self.kind.props.get(field)?;

        self.data
            .get(prop.field)
            .cloned()
            .or_else(|| prop.default_value())
    }

    #[must_use]
    pub const fn is_implicit(&self) -> bool {
        self.implicit
    }

    #[must_use]
    pub const fn is_stub(&self) -> bool {
        self.stub
    }

    /// References recorded explicitly or through formatted SQL fragments.
    #[must_use]
    pub const fn recorded_refs(&self) -> &RefSet {
        &self.refs
    }
}
