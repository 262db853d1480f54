use crate::{
    error::Error,
    lifecycle::Standard,
    privs::Privs,
    props::Props,
    resource::{ResourceBuilder, ResourceKind},
};

///
/// Organization
///
/// Top of the hierarchy. Carries only a name.
///

pub static ORGANIZATION: ResourceKind = ResourceKind {
    name: "Organization",
    scope: None,
    props: Props::empty(),
    privs: Privs::none(),
    links: &[],
    implicit_children: &[],
    lifecycle: &Standard,
};

pub fn organization(name: &str) -> Result<ResourceBuilder, Error> {
    ResourceBuilder::new(&ORGANIZATION, name)
}
