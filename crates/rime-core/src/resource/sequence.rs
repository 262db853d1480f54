use crate::{
    error::Error,
    lifecycle::Alterable,
    privs::{Priv, Privs, SchemaPriv},
    props::{DefaultValue, Prop, Props},
    resource::{LinkField, ROLE, ResourceBuilder, ResourceKind},
    scope::Scope,
};

///
/// Sequence
///
/// CREATE [ OR REPLACE ] SEQUENCE [ IF NOT EXISTS ] <name>
///     [ START = <initial_value> ]
///     [ INCREMENT = <sequence_interval> ]
///     [ COMMENT = '<string_literal>' ]
///

pub static SEQUENCE: ResourceKind = ResourceKind {
    name: "Sequence",
    scope: Some(Scope::Schema),
    props: Props::new(&[
        Prop::int("start").with_default(DefaultValue::Int(1)),
        Prop::int("increment").with_default(DefaultValue::Int(1)),
        Prop::string("comment"),
    ]),
    privs: Privs::new(
        Priv::Schema(SchemaPriv::CreateSequence),
        Priv::Schema(SchemaPriv::Usage),
        Priv::Schema(SchemaPriv::Ownership),
    ),
    links: &[LinkField {
        field: "owner",
        kind: &ROLE,
        default: None,
    }],
    implicit_children: &[],
    lifecycle: &Alterable,
};

pub fn sequence(name: &str) -> Result<ResourceBuilder, Error> {
    ResourceBuilder::new(&SEQUENCE, name)
}
