use crate::{
    identifier::ResourceName,
    props::Props,
    resource::ResourceKind,
    value::PropData,
};
use serde::Serialize;
use std::collections::BTreeMap;

///
/// ResourceExport
///
/// Serializable view of one definition: kind key, name, reference links by
/// FQN and resolved property values. Implicit/stub flags and the scope
/// back-link are not part of the export.
///

#[derive(Clone, Debug, Serialize)]
pub struct ResourceExport {
    pub kind: String,
    pub name: ResourceName,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub links: BTreeMap<String, String>,
    pub props: PropData,

    #[serde(skip)]
    schema: Props,
}

impl ResourceExport {
    pub(crate) fn new(
        kind: &ResourceKind,
        name: ResourceName,
        links: BTreeMap<String, String>,
        props: PropData,
    ) -> Self {
        Self {
            kind: kind.key(),
            name,
            links,
            props,
            schema: kind.props,
        }
    }

    /// Keep only the values introspection can return, for comparing a
    /// desired definition against fetched state.
    #[must_use]
    pub fn fetchable(mut self) -> Self {
        self.props = self.schema.fetchable(&self.props);
        self
    }
}
