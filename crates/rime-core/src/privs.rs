//! Privilege declarations attached to each resource kind. They are static
//! inputs for an outer permission check; nothing here evaluates them.

use derive_more::Display;

///
/// GlobalPriv
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum GlobalPriv {
    #[display("CREATE ACCOUNT")]
    CreateAccount,
    #[display("CREATE DATABASE")]
    CreateDatabase,
    #[display("CREATE ROLE")]
    CreateRole,
    #[display("CREATE WAREHOUSE")]
    CreateWarehouse,
}

///
/// DatabasePriv
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum DatabasePriv {
    #[display("CREATE SCHEMA")]
    CreateSchema,
    #[display("OWNERSHIP")]
    Ownership,
    #[display("USAGE")]
    Usage,
}

///
/// SchemaPriv
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum SchemaPriv {
    #[display("CREATE SEQUENCE")]
    CreateSequence,
    #[display("OWNERSHIP")]
    Ownership,
    #[display("USAGE")]
    Usage,
}

///
/// ObjectPriv
/// privileges held on a single account-level object (role, warehouse)
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum ObjectPriv {
    #[display("MONITOR")]
    Monitor,
    #[display("OWNERSHIP")]
    Ownership,
    #[display("USAGE")]
    Usage,
}

///
/// Priv
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Priv {
    Global(GlobalPriv),
    Database(DatabasePriv),
    Schema(SchemaPriv),
    Object(ObjectPriv),
}

///
/// Privs
///
/// Privilege required for each lifecycle operation, where one applies.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Privs {
    pub create: Option<Priv>,
    pub read: Option<Priv>,
    pub delete: Option<Priv>,
}

impl Privs {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            create: None,
            read: None,
            delete: None,
        }
    }

    #[must_use]
    pub const fn new(create: Priv, read: Priv, delete: Priv) -> Self {
        Self {
            create: Some(create),
            read: Some(read),
            delete: Some(delete),
        }
    }

    #[must_use]
    pub const fn create_only(create: Priv) -> Self {
        Self {
            create: Some(create),
            read: None,
            delete: None,
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn privileges_display_as_sql_tokens() {
        assert_eq!(
            Priv::Global(GlobalPriv::CreateDatabase).to_string(),
            "CREATE DATABASE"
        );
        assert_eq!(Priv::Schema(SchemaPriv::Ownership).to_string(), "OWNERSHIP");
    }
}
