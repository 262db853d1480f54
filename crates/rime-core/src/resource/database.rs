use crate::{
    error::Error,
    lifecycle::Alterable,
    privs::{DatabasePriv, GlobalPriv, Priv, Privs},
    props::{DefaultValue, Prop, Props},
    resource::{ImplicitChild, LinkField, ROLE, ResourceBuilder, ResourceKind, SCHEMA},
    scope::Scope,
};

///
/// Database
///
/// CREATE [ OR REPLACE ] [ TRANSIENT ] DATABASE [ IF NOT EXISTS ] <name>
///     [ DATA_RETENTION_TIME_IN_DAYS = <integer> ]
///     [ MAX_DATA_EXTENSION_TIME_IN_DAYS = <integer> ]
///     [ DEFAULT_DDL_COLLATION = '<collation_specification>' ]
///     [ [ WITH ] TAG ( <tag_name> = '<tag_value>' [ , ... ] ) ]
///     [ COMMENT = '<string_literal>' ]
///
/// Every database owns the PUBLIC and INFORMATION_SCHEMA schemas.
///

pub static DATABASE: ResourceKind = ResourceKind {
    name: "Database",
    scope: Some(Scope::Account),
    props: Props::new(&[
        Prop::flag("transient").premodifier(),
        Prop::int("data_retention_time_in_days").with_default(DefaultValue::Int(1)),
        Prop::int("max_data_extension_time_in_days").with_default(DefaultValue::Int(14)),
        Prop::string("default_ddl_collation"),
        Prop::tags(),
        Prop::string("comment"),
    ]),
    privs: Privs::new(
        Priv::Global(GlobalPriv::CreateDatabase),
        Priv::Database(DatabasePriv::Usage),
        Priv::Database(DatabasePriv::Ownership),
    ),
    links: &[LinkField {
        field: "owner",
        kind: &ROLE,
        default: Some("SYSADMIN"),
    }],
    implicit_children: &[
        ImplicitChild {
            kind: &SCHEMA,
            name: "PUBLIC",
        },
        ImplicitChild {
            kind: &SCHEMA,
            name: "INFORMATION_SCHEMA",
        },
    ],
    lifecycle: &Alterable,
};

pub fn database(name: &str) -> Result<ResourceBuilder, Error> {
    ResourceBuilder::new(&DATABASE, name)
}

///
/// TESTS
///
