//! DDL statement generation.
//!
//! Every kind renders CREATE and DROP through the `Lifecycle` defaults;
//! kinds with an ALTER form opt in through `Alterable`, and kinds with
//! platform quirks (accounts) carry their own implementation.

use crate::{
    error::Error,
    identifier::{Fqn, ResourceName},
    props::{Placement, PropKind},
    resource::ResourceKind,
    value::{PropData, PropValue},
};
use rime_utils::sql::tidy_sql;
use serde::Deserialize;

///
/// CreateOptions
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct CreateOptions {
    pub or_replace: bool,
    pub if_not_exists: bool,
}

///
/// DropOptions
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct DropOptions {
    pub if_exists: bool,
    /// Only consulted by kinds that drop with a grace period (accounts).
    pub grace_period_in_days: u32,
}

impl DropOptions {
    pub const DEFAULT_GRACE_PERIOD_IN_DAYS: u32 = 3;
}

impl Default for DropOptions {
    fn default() -> Self {
        Self {
            if_exists: false,
            grace_period_in_days: Self::DEFAULT_GRACE_PERIOD_IN_DAYS,
        }
    }
}

///
/// Change
///
/// One attribute delta. `None` unsets the attribute; the `name` attribute
/// renames the resource.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Change {
    pub attribute: String,
    pub value: Option<PropValue>,
    pub if_exists: bool,
}

impl Change {
    pub const NAME: &'static str = "name";

    pub fn set(attribute: &str, value: impl Into<PropValue>) -> Self {
        Self {
            attribute: attribute.to_string(),
            value: Some(value.into()),
            if_exists: false,
        }
    }

    #[must_use]
    pub fn unset(attribute: &str) -> Self {
        Self {
            attribute: attribute.to_string(),
            value: None,
            if_exists: false,
        }
    }

    #[must_use]
    pub fn rename(name: &str) -> Self {
        Self::set(Self::NAME, name)
    }

    #[must_use]
    pub const fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }

    #[must_use]
    pub fn is_rename(&self) -> bool {
        self.attribute.eq_ignore_ascii_case(Self::NAME)
    }
}

///
/// Lifecycle
///
/// Clause order is fixed: verb, `OR REPLACE`, premodifiers, keyword,
/// `IF [NOT] EXISTS`, fqn, properties, suffix.
///

pub trait Lifecycle: Sync {
    fn create(
        &self,
        kind: &ResourceKind,
        fqn: &Fqn,
        data: &PropData,
        options: CreateOptions,
    ) -> Result<String, Error> {
        if options.or_replace && options.if_not_exists {
            return Err(Error::unsupported(
                kind.name,
                "CREATE OR REPLACE with IF NOT EXISTS",
            ));
        }

        Ok(tidy_sql([
            "CREATE",
            if options.or_replace { "OR REPLACE" } else { "" },
            &kind.props.render_premodifiers(data),
            &kind.keyword(),
            if options.if_not_exists {
                "IF NOT EXISTS"
            } else {
                ""
            },
            &fqn.to_string(),
            &kind.props.render(data),
        ]))
    }

    fn delete(&self, kind: &ResourceKind, fqn: &Fqn, options: DropOptions) -> Result<String, Error> {
        Ok(tidy_sql([
            "DROP",
            &kind.keyword(),
            if options.if_exists { "IF EXISTS" } else { "" },
            &fqn.to_string(),
        ]))
    }

    fn update(&self, kind: &ResourceKind, _fqn: &Fqn, _change: &Change) -> Result<String, Error> {
        Err(Error::unsupported(kind.name, "ALTER"))
    }
}

///
/// Standard
///
/// CREATE and DROP only.
///

pub struct Standard;

impl Lifecycle for Standard {}

///
/// Alterable
///
/// Adds the single-attribute ALTER form.
///

pub struct Alterable;

impl Lifecycle for Alterable {
    fn update(&self, kind: &ResourceKind, fqn: &Fqn, change: &Change) -> Result<String, Error> {
        let action = alter_action(kind, change)?;

        Ok(tidy_sql([
            "ALTER",
            &kind.keyword(),
            if change.if_exists { "IF EXISTS" } else { "" },
            &fqn.to_string(),
            &action,
        ]))
    }
}

// SET / UNSET / RENAME TO clause for one change.
fn alter_action(kind: &ResourceKind, change: &Change) -> Result<String, Error> {
    if change.is_rename() {
        return match &change.value {
            Some(PropValue::String(name)) => {
                Ok(format!("RENAME TO {}", ResourceName::new(name)?.to_sql()))
            }
            Some(other) => Err(Error::InvalidPropertyValue {
                kind: kind.name.to_string(),
                field: Change::NAME.to_string(),
                expected: "string".to_string(),
                found: other.type_name().to_string(),
            }),
            None => Err(Error::unsupported(kind.name, "ALTER UNSET NAME")),
        };
    }

    let Some(prop) = kind.props.get(&change.attribute) else {
        return Err(Error::unsupported(
            kind.name,
            format!("ALTER {}", change.attribute.to_uppercase()),
        ));
    };
    if prop.placement == Placement::Premodifier || matches!(prop.kind, PropKind::Flag | PropKind::Tags)
    {
        return Err(Error::unsupported(
            kind.name,
            format!("ALTER {}", prop.sql_keyword()),
        ));
    }

    match &change.value {
        None => Ok(format!("UNSET {}", prop.sql_keyword())),
        Some(value) => {
            let value = prop.validate(kind.name, value.clone())?;
            Ok(format!("SET {} = {}", prop.sql_keyword(), value.to_sql()))
        }
    }
}

///
/// TESTS
///
