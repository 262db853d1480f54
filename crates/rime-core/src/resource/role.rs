use crate::{
    error::Error,
    lifecycle::Alterable,
    privs::{GlobalPriv, ObjectPriv, Priv, Privs},
    props::{Prop, Props},
    resource::{ResourceBuilder, ResourceKind},
    scope::Scope,
};

///
/// Role
///
/// CREATE [ OR REPLACE ] ROLE [ IF NOT EXISTS ] <name>
///     [ [ WITH ] TAG ( <tag_name> = '<tag_value>' [ , ... ] ) ]
///     [ COMMENT = '<string_literal>' ]
///

pub static ROLE: ResourceKind = ResourceKind {
    name: "Role",
    scope: Some(Scope::Account),
    props: Props::new(&[Prop::tags(), Prop::string("comment")]),
    privs: Privs::new(
        Priv::Global(GlobalPriv::CreateRole),
        Priv::Object(ObjectPriv::Usage),
        Priv::Object(ObjectPriv::Ownership),
    ),
    links: &[],
    implicit_children: &[],
    lifecycle: &Alterable,
};

pub fn role(name: &str) -> Result<ResourceBuilder, Error> {
    ResourceBuilder::new(&ROLE, name)
}
