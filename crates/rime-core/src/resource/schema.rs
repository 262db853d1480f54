use crate::{
    error::Error,
    lifecycle::Alterable,
    privs::{DatabasePriv, Priv, Privs, SchemaPriv},
    props::{Prop, Props},
    resource::{LinkField, ROLE, ResourceBuilder, ResourceKind},
    scope::Scope,
};

///
/// Schema
///
/// CREATE [ OR REPLACE ] [ TRANSIENT ] SCHEMA [ IF NOT EXISTS ] <name>
///     [ WITH MANAGED ACCESS ]
///     [ DATA_RETENTION_TIME_IN_DAYS = <integer> ]
///     [ MAX_DATA_EXTENSION_TIME_IN_DAYS = <integer> ]
///     [ DEFAULT_DDL_COLLATION = '<collation_specification>' ]
///     [ [ WITH ] TAG ( <tag_name> = '<tag_value>' [ , ... ] ) ]
///     [ COMMENT = '<string_literal>' ]
///

pub static SCHEMA: ResourceKind = ResourceKind {
    name: "Schema",
    scope: Some(Scope::Database),
    props: Props::new(&[
        Prop::flag("transient").premodifier(),
        Prop::flag("with_managed_access").with_keyword("WITH MANAGED ACCESS"),
        Prop::int("data_retention_time_in_days"),
        Prop::int("max_data_extension_time_in_days"),
        Prop::string("default_ddl_collation"),
        Prop::tags(),
        Prop::string("comment"),
    ]),
    privs: Privs::new(
        Priv::Database(DatabasePriv::CreateSchema),
        Priv::Schema(SchemaPriv::Usage),
        Priv::Schema(SchemaPriv::Ownership),
    ),
    links: &[LinkField {
        field: "owner",
        kind: &ROLE,
        default: Some("SYSADMIN"),
    }],
    implicit_children: &[],
    lifecycle: &Alterable,
};

pub fn schema(name: &str) -> Result<ResourceBuilder, Error> {
    ResourceBuilder::new(&SCHEMA, name)
}
