use crate::{
    error::Error,
    identifier::Fqn,
    lifecycle::{CreateOptions, DropOptions, Lifecycle},
    privs::{GlobalPriv, Priv, Privs},
    props::{Prop, Props},
    resource::{ResourceBuilder, ResourceKind},
    scope::Scope,
    value::PropData,
};
use rime_utils::sql::tidy_sql;

pub const EDITIONS: &[&str] = &["STANDARD", "ENTERPRISE", "BUSINESS_CRITICAL"];

///
/// Account
///
/// CREATE ACCOUNT <name>
///     ADMIN_NAME = <string>
///     { ADMIN_PASSWORD = '<string>' | ADMIN_RSA_PUBLIC_KEY = <string> }
///     [ FIRST_NAME = <string> ] [ LAST_NAME = <string> ]
///     EMAIL = '<string>'
///     [ MUST_CHANGE_PASSWORD = { TRUE | FALSE } ]
///     EDITION = { STANDARD | ENTERPRISE | BUSINESS_CRITICAL }
///     [ REGION_GROUP = <id> ] [ REGION = <id> ]
///     [ COMMENT = '<string>' ]
///
/// Admin bootstrap values are write-only: introspection never returns them.
///

pub static ACCOUNT: ResourceKind = ResourceKind {
    name: "Account",
    scope: Some(Scope::Organization),
    props: Props::new(&[
        Prop::string("admin_name").write_only(),
        Prop::string("admin_password").write_only(),
        Prop::string("admin_rsa_public_key").write_only(),
        Prop::string("first_name").write_only(),
        Prop::string("last_name").write_only(),
        Prop::string("email").write_only(),
        Prop::bool("must_change_password").write_only(),
        Prop::enumeration("edition", EDITIONS),
        Prop::string("region_group"),
        Prop::string("region"),
        Prop::string("comment"),
    ]),
    privs: Privs::create_only(Priv::Global(GlobalPriv::CreateAccount)),
    links: &[],
    implicit_children: &[],
    lifecycle: &AccountLifecycle,
};

pub fn account(name: &str) -> Result<ResourceBuilder, Error> {
    ResourceBuilder::new(&ACCOUNT, name)
}

///
/// AccountLifecycle
///
/// Accounts cannot be replaced in place and are dropped with a grace period.
///

pub struct AccountLifecycle;

impl Lifecycle for AccountLifecycle {
    fn create(
        &self,
        kind: &ResourceKind,
        fqn: &Fqn,
        data: &PropData,
        options: CreateOptions,
    ) -> Result<String, Error> {
        if options.or_replace {
            return Err(Error::unsupported(kind.name, "CREATE OR REPLACE"));
        }
        if options.if_not_exists {
            return Err(Error::unsupported(kind.name, "CREATE IF NOT EXISTS"));
        }

        Ok(tidy_sql([
            "CREATE ACCOUNT",
            &fqn.to_string(),
            &kind.props.render(data),
        ]))
    }

    fn delete(&self, _kind: &ResourceKind, fqn: &Fqn, options: DropOptions) -> Result<String, Error> {
        Ok(tidy_sql([
            "DROP ACCOUNT",
            if options.if_exists { "IF EXISTS" } else { "" },
            &fqn.to_string(),
            &format!("GRACE_PERIOD_IN_DAYS = {}", options.grace_period_in_days),
        ]))
    }
}

///
/// TESTS
///
