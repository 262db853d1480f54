use crate::error::Error;
use derive_more::{Deref, Display};
use rime_utils::sql::quote_identifier;
use serde::Serialize;
use std::fmt;

///
/// ResourceName
///
/// Canonical (uppercase) resource identity. Surrounding double quotes are
/// stripped before canonicalization, so `"db1"`, `db1` and `DB1` collapse
/// to the same name.
///

#[derive(Clone, Debug, Deref, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ResourceName(String);

impl ResourceName {
    pub fn new(name: &str) -> Result<Self, Error> {
        let trimmed = name.trim();
        let inner = match trimmed.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
            Some(quoted) => quoted.replace("\"\"", "\""),
            None => trimmed.to_string(),
        };

        if inner.is_empty() {
            return Err(Error::InvalidName {
                name: name.to_string(),
                reason: "name is empty".to_string(),
            });
        }
        if inner.contains('.') && !trimmed.starts_with('"') {
            return Err(Error::InvalidName {
                name: name.to_string(),
                reason: "qualified names must be split before naming a resource".to_string(),
            });
        }

        Ok(Self(inner.to_uppercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// SQL spelling, double-quoted only when the name is not a bare identifier.
    #[must_use]
    pub fn to_sql(&self) -> String {
        quote_identifier(&self.0)
    }
}

impl PartialEq<str> for ResourceName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ResourceName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Split a dotted identifier into canonical parts, honouring double quotes.
pub fn split_qualified(text: &str) -> Result<Vec<ResourceName>, Error> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in text.trim().chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            '.' if !in_quotes => {
                parts.push(ResourceName::new(&current)?);
                current.clear();
            }
            _ => current.push(c),
        }
    }

    if in_quotes {
        return Err(Error::InvalidName {
            name: text.to_string(),
            reason: "unterminated quoted identifier".to_string(),
        });
    }
    parts.push(ResourceName::new(&current)?);

    Ok(parts)
}

///
/// Fqn
///
/// Fully-qualified name. Segments that do not apply to a resource's depth
/// (or whose parent is not linked yet) are simply absent.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Fqn {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<ResourceName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<ResourceName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<ResourceName>,
    pub name: ResourceName,
}

impl Fqn {
    #[must_use]
    pub const fn new(name: ResourceName) -> Self {
        Self {
            organization: None,
            database: None,
            schema: None,
            name,
        }
    }

    #[must_use]
    pub fn with_organization(mut self, organization: Option<ResourceName>) -> Self {
        self.organization = organization;
        self
    }

    #[must_use]
    pub fn with_database(mut self, database: Option<ResourceName>) -> Self {
        self.database = database;
        self
    }

    #[must_use]
    pub fn with_schema(mut self, schema: Option<ResourceName>) -> Self {
        self.schema = schema;
        self
    }

    /// Present segments, outermost first.
    pub fn segments(&self) -> impl Iterator<Item = &ResourceName> {
        self.organization
            .iter()
            .chain(self.database.iter())
            .chain(self.schema.iter())
            .chain(std::iter::once(&self.name))
    }
}

impl fmt::Display for Fqn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .segments()
            .map(ResourceName::to_sql)
            .collect::<Vec<_>>()
            .join(".");

        f.write_str(&text)
    }
}

///
/// TESTS
///
