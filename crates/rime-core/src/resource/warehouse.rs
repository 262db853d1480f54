use crate::{
    error::Error,
    lifecycle::Alterable,
    privs::{GlobalPriv, ObjectPriv, Priv, Privs},
    props::{DefaultValue, Prop, Props},
    resource::{LinkField, ROLE, ResourceBuilder, ResourceKind},
    scope::Scope,
};

pub const WAREHOUSE_SIZES: &[&str] = &[
    "XSMALL", "SMALL", "MEDIUM", "LARGE", "XLARGE", "XXLARGE", "XXXLARGE", "X4LARGE", "X5LARGE",
    "X6LARGE",
];

pub const SCALING_POLICIES: &[&str] = &["STANDARD", "ECONOMY"];

///
/// Warehouse
///
/// CREATE [ OR REPLACE ] WAREHOUSE [ IF NOT EXISTS ] <name>
///     [ WAREHOUSE_SIZE = <size> ]
///     [ MAX_CLUSTER_COUNT = <num> ] [ MIN_CLUSTER_COUNT = <num> ]
///     [ SCALING_POLICY = { STANDARD | ECONOMY } ]
///     [ AUTO_SUSPEND = <num> ] [ AUTO_RESUME = { TRUE | FALSE } ]
///     [ INITIALLY_SUSPENDED = { TRUE | FALSE } ]
///     [ ENABLE_QUERY_ACCELERATION = { TRUE | FALSE } ]
///     [ QUERY_ACCELERATION_MAX_SCALE_FACTOR = <num> ]
///     [ [ WITH ] TAG ( ... ) ] [ COMMENT = '<string_literal>' ]
///

pub static WAREHOUSE: ResourceKind = ResourceKind {
    name: "Warehouse",
    scope: Some(Scope::Account),
    props: Props::new(&[
        Prop::enumeration("warehouse_size", WAREHOUSE_SIZES)
            .with_default(DefaultValue::Enum("XSMALL")),
        Prop::int("max_cluster_count"),
        Prop::int("min_cluster_count"),
        Prop::enumeration("scaling_policy", SCALING_POLICIES),
        Prop::int("auto_suspend").with_default(DefaultValue::Int(600)),
        Prop::bool("auto_resume").with_default(DefaultValue::Bool(true)),
        // create-time only; the platform does not report it back
        Prop::bool("initially_suspended").write_only(),
        Prop::bool("enable_query_acceleration").with_default(DefaultValue::Bool(false)),
        Prop::int("query_acceleration_max_scale_factor").with_default(DefaultValue::Int(8)),
        Prop::tags(),
        Prop::string("comment"),
    ]),
    privs: Privs::new(
        Priv::Global(GlobalPriv::CreateWarehouse),
        Priv::Object(ObjectPriv::Usage),
        Priv::Object(ObjectPriv::Ownership),
    ),
    links: &[LinkField {
        field: "owner",
        kind: &ROLE,
        default: None,
    }],
    implicit_children: &[],
    lifecycle: &Alterable,
};

pub fn warehouse(name: &str) -> Result<ResourceBuilder, Error> {
    ResourceBuilder::new(&WAREHOUSE, name)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        identifier::{Fqn, ResourceName},
        lifecycle::{Change, CreateOptions},
        value::PropValue,
    };

    #[test]
    fn create_skips_defaults_and_uppercases_sizes() {
        let builder = warehouse("wh")
            .and_then(|b| b.set("warehouse_size", "large"))
            .and_then(|b| b.set("auto_suspend", 600))
            .and_then(|b| b.set("auto_resume", false))
            .expect("warehouse builder should validate");
        let fqn = Fqn::new(ResourceName::new("wh").expect("valid name"));

        let sql = WAREHOUSE
            .lifecycle
            .create(&WAREHOUSE, &fqn, builder.data(), CreateOptions::default())
            .expect("warehouse create should render");

        assert_eq!(
            sql,
            "CREATE WAREHOUSE WH WAREHOUSE_SIZE = LARGE AUTO_RESUME = FALSE"
        );
    }

    #[test]
    fn unknown_sizes_are_rejected_not_coerced() {
        let err = warehouse("wh")
            .and_then(|b| b.set("warehouse_size", "gigantic"))
            .expect_err("unknown size should fail");

        assert!(matches!(
            err,
            Error::InvalidEnumValue { ref value, .. } if value == "gigantic"
        ));
    }

    #[test]
    fn alter_sets_enum_tokens_unquoted() {
        let fqn = Fqn::new(ResourceName::new("wh").expect("valid name"));
        let sql = WAREHOUSE
            .lifecycle
            .update(
                &WAREHOUSE,
                &fqn,
                &Change::set("warehouse_size", PropValue::from("medium")),
            )
            .expect("warehouse alter should render");

        assert_eq!(sql, "ALTER WAREHOUSE WH SET WAREHOUSE_SIZE = MEDIUM");
    }
}
