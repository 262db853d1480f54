use crate::graph::{Graph, ResourceId};
use derive_more::{Deref, IntoIterator};
use std::{collections::BTreeSet, fmt};

///
/// RefSet
///
/// Identity-based, ordered set of referenced resources.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
pub struct RefSet(BTreeSet<ResourceId>);

impl RefSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn insert(&mut self, id: ResourceId) -> bool {
        self.0.insert(id)
    }

    pub fn merge(&mut self, other: &Self) {
        self.0.extend(other.0.iter().copied());
    }

    pub(crate) fn retain(&mut self, f: impl FnMut(&ResourceId) -> bool) {
        self.0.retain(f);
    }
}

impl FromIterator<ResourceId> for RefSet {
    fn from_iter<T: IntoIterator<Item = ResourceId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

///
/// Sql
///
/// SQL text under construction. Formatting a resource into it writes the
/// resource's FQN and records the resource as a reference, so whoever
/// stores the text inherits the dependency.
///

#[derive(Clone, Debug, Default)]
pub struct Sql {
    text: String,
    refs: RefSet,
}

impl Sql {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_str(&mut self, text: &str) -> &mut Self {
        self.text.push_str(text);
        self
    }

    pub fn push_resource(&mut self, graph: &Graph, id: ResourceId) -> &mut Self {
        self.text.push_str(&graph.fqn(id).to_string());
        self.refs.insert(id);
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn refs(&self) -> &RefSet {
        &self.refs
    }

    #[must_use]
    pub fn into_parts(self) -> (String, RefSet) {
        (self.text, self.refs)
    }
}

impl fmt::Display for Sql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
