//! Arena that owns every entity of one desired-state description.
//!
//! Scope parents, reference links and recorded references are all
//! `ResourceId`s into the arena, so parent/child and dependency cycles
//! never turn into ownership cycles.

mod refs;


pub use refs::{RefSet, Sql};

use crate::{
    error::Error,
    export::ResourceExport,
    identifier::{Fqn, ResourceName, split_qualified},
    lifecycle::{Change, CreateOptions, DropOptions},
    registry::registry,
    resource::{Resource, ResourceBuilder, ResourceKind, check_named_link},
    scope::{Link, Scope},
    value::PropValue,
};
use derive_more::Display;
use std::ops::Index;

///
/// ResourceId
///
/// Handle issued by a `Graph`; only meaningful for the graph that issued it.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[display("#{_0}")]
pub struct ResourceId(usize);

///
/// Graph
///

#[derive(Clone, Debug, Default)]
pub struct Graph {
    resources: Vec<Resource>,
}

impl Graph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// INSERTION
    ///

    /// Attach a validated builder. Named links become fresh stub chains,
    /// unset link fields fall back to their declared default and the kind's
    /// implicit children are created alongside.
    pub fn insert(&mut self, builder: ResourceBuilder) -> Result<ResourceId, Error> {
        let kind = builder.kind;

        // validate every link before touching the arena
        if let (Some(scope), Some(link)) = (kind.scope, &builder.scope) {
            self.check_link(kind, scope.parent_kind(), link)?;
        }
        for (field, link) in &builder.links {
            if let Some(target) = kind.link_field(field) {
                self.check_link(kind, target.kind, link)?;
            }
        }

        let mut resource = Resource::new(kind, builder.name);
        resource.data = builder.data;
        resource.implicit = builder.implicit;
        if let (Some(scope), Some(link)) = (kind.scope, builder.scope) {
            resource.scope = Some(self.coerce(scope.parent_kind(), link)?);
        }
        for (field, link) in builder.links {
            if let Some(target) = kind.link_field(field) {
                let target = self.coerce(target.kind, link)?;
                resource.links.insert(field, target);
            }
        }
        for target in kind.links {
            if resource.links.contains_key(target.field) {
                continue;
            }
            let Some(default) = target.default else {
                continue;
            };
            let default = self.coerce(target.kind, Link::Named(default.to_string()))?;
            resource.links.insert(target.field, default);
        }

        let id = self.push(resource);
        tracing::debug!(kind = kind.name, %id, fqn = %self.fqn(id), "inserted resource");

        for child in kind.implicit_children {
            let builder = ResourceBuilder::from_name(child.kind, ResourceName::new(child.name)?)
                .implicit()
                .scope(id)?;
            let child_id = self.insert(builder)?;
            tracing::debug!(
                parent = %id,
                child = %child_id,
                kind = child.kind.name,
                name = child.name,
                "attached implicit child"
            );
        }

        Ok(id)
    }

    /// Parse a CREATE statement and insert the resulting entity.
    pub fn from_sql(&mut self, sql: &str) -> Result<ResourceId, Error> {
        let builder = registry().from_sql(sql)?;

        self.insert(builder)
    }

    fn push(&mut self, resource: Resource) -> ResourceId {
        let id = ResourceId(self.resources.len());
        self.resources.push(resource);

        id
    }

    // A resolved link must point at an entity of the expected kind.
    fn check_link(
        &self,
        owner: &ResourceKind,
        expected: &'static ResourceKind,
        link: &Link,
    ) -> Result<(), Error> {
        match link {
            Link::Named(_) => {
                check_named_link(expected, link)?;
            }
            Link::Resolved(id) => {
                let found = match self.get(*id) {
                    Some(target) if target.kind.is(expected) => return Ok(()),
                    Some(target) => format!("{} {}", target.kind.name, self.fqn(*id)),
                    None => format!("unknown resource {id}"),
                };

                return Err(Error::ScopeMismatch {
                    kind: owner.name.to_string(),
                    expected: expected.name.to_string(),
                    found,
                });
            }
        }

        Ok(())
    }

    // Resolve a checked link to an id, creating a stub chain for names.
    fn coerce(&mut self, expected: &'static ResourceKind, link: Link) -> Result<ResourceId, Error> {
        match link {
            Link::Resolved(id) => Ok(id),
            Link::Named(text) => {
                let parts = split_qualified(&text)?;
                self.push_stub(expected, &parts)
            }
        }
    }

    fn push_stub(
        &mut self,
        kind: &'static ResourceKind,
        parts: &[ResourceName],
    ) -> Result<ResourceId, Error> {
        let Some((name, qualifier)) = parts.split_last() else {
            return Err(Error::InvalidName {
                name: String::new(),
                reason: "name is empty".to_string(),
            });
        };

        let scope = match kind.scope {
            Some(scope) if scope.qualifies_name() && !qualifier.is_empty() => {
                Some(self.push_stub(scope.parent_kind(), qualifier)?)
            }
            _ => None,
        };

        let mut stub = Resource::new(kind, name.clone());
        stub.stub = true;
        stub.scope = scope;
        let id = self.push(stub);
        tracing::debug!(kind = kind.name, %id, name = %name, "coerced named link into stub");

        Ok(id)
    }

    ///
    /// LOOKUP
    ///

    #[must_use]
    pub fn get(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.get(id.0)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.resources.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Every entity in the arena, stubs and implicit children included.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceId, &Resource)> {
        self.resources
            .iter()
            .enumerate()
            .map(|(i, r)| (ResourceId(i), r))
    }

    /// Caller-managed entities: neither stubs nor implicit children.
    pub fn resources(&self) -> impl Iterator<Item = (ResourceId, &Resource)> {
        self.iter().filter(|(_, r)| !r.stub && !r.implicit)
    }

    /// Non-stub entity of `kind` whose FQN matches, preferring
    /// caller-managed entities over implicit children.
    #[must_use]
    pub fn find(&self, kind: &ResourceKind, fqn: &Fqn) -> Option<ResourceId> {
        self.iter()
            .filter(|(id, r)| !r.stub && r.kind.is(kind) && &self.fqn(*id) == fqn)
            .min_by_key(|(_, r)| r.implicit)
            .map(|(id, _)| id)
    }

    /// FQN derived from the scope chain. Parents that are not linked leave
    /// their segments out.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this graph.
    #[must_use]
    pub fn fqn(&self, id: ResourceId) -> Fqn {
        let resource = &self[id];
        let fqn = Fqn::new(resource.name.clone());
        let parent = resource.scope.map(|p| &self[p]);

        match (resource.kind.scope, parent) {
            (Some(Scope::Database), Some(database)) => {
                fqn.with_database(Some(database.name.clone()))
            }
            (Some(Scope::Schema), Some(schema)) => fqn
                .with_schema(Some(schema.name.clone()))
                .with_database(schema.scope.map(|d| self[d].name.clone())),
            _ => fqn,
        }
    }

    ///
    /// MUTATION
    ///

    /// Re-parent an entity. A named parent becomes a fresh stub chain.
    pub fn set_scope(&mut self, id: ResourceId, link: impl Into<Link>) -> Result<(), Error> {
        let kind = self.entry(id)?.kind;
        let link = link.into();
        let Some(scope) = kind.scope else {
            return Err(Error::ScopeMismatch {
                kind: kind.name.to_string(),
                expected: "none".to_string(),
                found: "a scope link".to_string(),
            });
        };

        self.check_link(kind, scope.parent_kind(), &link)?;
        let target = match &link {
            Link::Resolved(parent) => Some(*parent),
            Link::Named(_) => None,
        };
        self.check_reparent(id, target)?;
        let parent = self.coerce(scope.parent_kind(), link)?;
        self.resources[id.0].scope = Some(parent);

        Ok(())
    }

    /// Assign a scope or reference link field by name.
    pub fn set_link(
        &mut self,
        id: ResourceId,
        field: &str,
        link: impl Into<Link>,
    ) -> Result<(), Error> {
        let kind = self.entry(id)?.kind;
        if kind
            .scope
            .is_some_and(|s| s.link_field().eq_ignore_ascii_case(field))
        {
            return self.set_scope(id, link);
        }

        let Some(target) = kind.link_field(field) else {
            return Err(Error::UnknownProperty {
                kind: kind.name.to_string(),
                field: field.to_string(),
            });
        };
        let link = link.into();
        self.check_link(kind, target.kind, &link)?;
        let target_id = self.coerce(target.kind, link)?;
        self.resources[id.0].links.insert(target.field, target_id);

        Ok(())
    }

    /// Validated single-property assignment.
    pub fn set_prop(
        &mut self,
        id: ResourceId,
        field: &str,
        value: impl Into<PropValue>,
    ) -> Result<(), Error> {
        let resource = self.definition(id)?;
        let kind = resource.kind;
        let (prop, value) = kind.props.validate(kind.name, field, value.into())?;

        tracing::trace!(kind = kind.name, %id, field = prop.field, "set property");
        self.resources[id.0].data.insert(prop.field, value);

        Ok(())
    }

    /// Apply assignments in order. A failure stops at the offending field;
    /// earlier assignments stay applied.
    pub fn set_props<I, V>(&mut self, id: ResourceId, values: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = (&'static str, V)>,
        V: Into<PropValue>,
    {
        for (field, value) in values {
            self.set_prop(id, field, value)?;
        }

        Ok(())
    }

    /// Return a property to the unset state.
    pub fn unset_prop(&mut self, id: ResourceId, field: &str) -> Result<(), Error> {
        let kind = self.definition(id)?.kind;
        let Some(prop) = kind.props.get(field) else {
            return Err(Error::UnknownProperty {
                kind: kind.name.to_string(),
                field: field.to_string(),
            });
        };
        self.resources[id.0].data.remove(prop.field);

        Ok(())
    }

    /// Store formatted SQL text in a string property and inherit every
    /// resource formatted into it as a reference.
    pub fn set_prop_sql(&mut self, id: ResourceId, field: &str, sql: Sql) -> Result<(), Error> {
        let (text, refs) = sql.into_parts();
        self.set_prop(id, field, text)?;
        self.resources[id.0].refs.merge(&refs);

        Ok(())
    }

    /// Adopt `child` under `parent`. An implicit child with the same kind
    /// and name is detached in favour of the explicit one.
    pub fn add_child(&mut self, parent: ResourceId, child: ResourceId) -> Result<(), Error> {
        let child_kind = self.entry(child)?.kind;
        self.check_link(child_kind, expected_parent(child_kind)?, &Link::Resolved(parent))?;
        self.check_reparent(child, Some(parent))?;

        let replaced = self.children_where(parent, |r| {
            r.implicit && r.kind.is(child_kind) && r.name == self[child].name
        });
        for implicit in replaced.into_iter().filter(|id| *id != child) {
            tracing::debug!(parent = %parent, %implicit, "explicit child replaces implicit child");
            self.resources[implicit.0].scope = None;
        }
        self.resources[child.0].scope = Some(parent);

        Ok(())
    }

    /// Detach `child` from `parent`. Implicit children cannot be removed.
    pub fn remove_child(&mut self, parent: ResourceId, child: ResourceId) -> Result<(), Error> {
        let parent_kind = self.entry(parent)?.kind;
        let resource = self.entry(child)?;
        if resource.scope != Some(parent) {
            return Err(Error::ScopeMismatch {
                kind: resource.kind.name.to_string(),
                expected: format!("{} {}", parent_kind.name, self.fqn(parent)),
                found: resource.scope.map_or_else(
                    || "no parent".to_string(),
                    |p| format!("{} {}", self[p].kind.name, self.fqn(p)),
                ),
            });
        }
        if resource.implicit {
            return Err(Error::ImplicitChild {
                kind: resource.kind.name.to_string(),
                name: resource.name.to_string(),
            });
        }

        self.resources[child.0].scope = None;

        Ok(())
    }

    // Implicit children belong to the parent that created them.
    fn check_reparent(&self, id: ResourceId, parent: Option<ResourceId>) -> Result<(), Error> {
        let resource = self.entry(id)?;
        if resource.implicit && resource.scope.is_some() && resource.scope != parent {
            return Err(Error::ImplicitChild {
                kind: resource.kind.name.to_string(),
                name: resource.name.to_string(),
            });
        }

        Ok(())
    }

    /// Caller-managed children of `parent`.
    #[must_use]
    pub fn children(&self, parent: ResourceId) -> Vec<ResourceId> {
        self.children_where(parent, |r| !r.implicit)
    }

    #[must_use]
    pub fn implicit_children(&self, parent: ResourceId) -> Vec<ResourceId> {
        self.children_where(parent, |r| r.implicit)
    }

    fn children_where(&self, parent: ResourceId, f: impl Fn(&Resource) -> bool) -> Vec<ResourceId> {
        self.iter()
            .filter(|(_, r)| !r.stub && r.scope == Some(parent) && f(r))
            .map(|(id, _)| id)
            .collect()
    }

    /// Rebind links that point at stubs to the authoritative entity with the
    /// same kind and FQN. Returns how many links were rebound.
    pub fn resolve_stubs(&mut self) -> usize {
        let mut rebound = Vec::new();

        for (id, resource) in self.iter() {
            let targets = resource
                .scope
                .map(|p| (None, p))
                .into_iter()
                .chain(resource.links.iter().map(|(f, t)| (Some(*f), *t)));

            for (field, target) in targets {
                if !self[target].stub {
                    continue;
                }
                if let Some(real) = self.find(self[target].kind, &self.fqn(target)) {
                    rebound.push((id, field, real));
                }
            }
        }

        for &(id, field, real) in &rebound {
            let resource = &mut self.resources[id.0];
            match field {
                None => resource.scope = Some(real),
                Some(field) => {
                    resource.links.insert(field, real);
                }
            }
        }
        tracing::debug!(rebound = rebound.len(), "resolved stub links");

        rebound.len()
    }

    ///
    /// REFERENCES
    ///

    /// Record an explicit dependency of `id` on `dep`. Self-references are
    /// ignored.
    pub fn require(&mut self, id: ResourceId, dep: ResourceId) -> Result<(), Error> {
        self.entry(id)?;
        self.entry(dep)?;
        if id != dep {
            self.resources[id.0].refs.insert(dep);
        }

        Ok(())
    }

    /// Everything `id` depends on: its non-stub scope parent and link
    /// targets plus recorded references, never itself.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this graph.
    #[must_use]
    pub fn refs(&self, id: ResourceId) -> RefSet {
        let resource = &self[id];
        let mut refs: RefSet = resource
            .scope
            .into_iter()
            .chain(resource.links.values().copied())
            .filter(|target| !self[*target].stub)
            .collect();

        refs.merge(&resource.refs);
        refs.retain(|target| *target != id);

        refs
    }

    /// `(dependent, dependency)` pairs across every non-stub entity.
    #[must_use]
    pub fn edges(&self) -> Vec<(ResourceId, ResourceId)> {
        self.iter()
            .filter(|(_, r)| !r.stub)
            .flat_map(|(id, _)| self.refs(id).into_iter().map(move |dep| (id, dep)))
            .collect()
    }

    ///
    /// STATEMENTS
    ///

    pub fn create_sql(&self, id: ResourceId, options: CreateOptions) -> Result<String, Error> {
        let resource = self.definition(id)?;
        let sql = resource
            .kind
            .lifecycle
            .create(resource.kind, &self.fqn(id), &resource.data, options)?;
        tracing::debug!(kind = resource.kind.name, %id, %sql, "generated CREATE");

        Ok(sql)
    }

    pub fn drop_sql(&self, id: ResourceId, options: DropOptions) -> Result<String, Error> {
        let resource = self.definition(id)?;
        let sql = resource
            .kind
            .lifecycle
            .delete(resource.kind, &self.fqn(id), options)?;
        tracing::debug!(kind = resource.kind.name, %id, %sql, "generated DROP");

        Ok(sql)
    }

    pub fn update_sql(&self, id: ResourceId, change: &Change) -> Result<String, Error> {
        let resource = self.definition(id)?;
        let sql = resource
            .kind
            .lifecycle
            .update(resource.kind, &self.fqn(id), change)?;
        tracing::debug!(kind = resource.kind.name, %id, %sql, "generated ALTER");

        Ok(sql)
    }

    ///
    /// EXPORT
    ///

    pub fn export(&self, id: ResourceId) -> Result<ResourceExport, Error> {
        let resource = self.definition(id)?;
        let links = resource
            .links
            .iter()
            .map(|(field, target)| ((*field).to_string(), self.fqn(*target).to_string()))
            .collect();

        Ok(ResourceExport::new(
            resource.kind,
            resource.name.clone(),
            links,
            resource.kind.props.resolve(&resource.data),
        ))
    }

    // Ids are plain arena indexes; anything past the end was never issued here.
    fn entry(&self, id: ResourceId) -> Result<&Resource, Error> {
        self.get(id).ok_or_else(|| Error::UnknownResource { id: id.to_string() })
    }

    // Stubs never stand in for a definition.
    fn definition(&self, id: ResourceId) -> Result<&Resource, Error> {
        let resource = self.entry(id)?;
        if resource.stub {
            return Err(Error::StubResource {
                kind: resource.kind.name.to_string(),
                name: resource.name.to_string(),
            });
        }

        Ok(resource)
    }
}

impl Index<ResourceId> for Graph {
    type Output = Resource;

    fn index(&self, id: ResourceId) -> &Resource {
        &self.resources[id.0]
    }
}

fn expected_parent(kind: &'static ResourceKind) -> Result<&'static ResourceKind, Error> {
    kind.scope
        .map(Scope::parent_kind)
        .ok_or_else(|| Error::ScopeMismatch {
            kind: kind.name.to_string(),
            expected: "none".to_string(),
            found: "a parent".to_string(),
        })
}
