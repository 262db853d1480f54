//! Ordered property schemas: the declarative bridge between resource fields
//! and SQL clause syntax, used for both rendering and parsing.

mod parse;
mod render;

#[cfg(test)]
mod tests;

use crate::{
    error::Error,
    value::{PropData, PropValue},
};
use std::borrow::Cow;

///
/// PropKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PropKind {
    /// Presence-only keyword, no `= value`.
    Flag,
    Bool,
    Int,
    String,
    Enum(&'static [&'static str]),
    /// `[WITH] TAG (name = 'value', ...)`
    Tags,
}

impl PropKind {
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Flag => "flag",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::String => "string",
            Self::Enum(_) => "enum",
            Self::Tags => "tags",
        }
    }
}

///
/// Placement
///
/// Premodifier props are header words (`CREATE TRANSIENT DATABASE`), body
/// props follow the identifier.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Placement {
    Premodifier,
    Body,
}

///
/// DefaultValue
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DefaultValue {
    Bool(bool),
    Int(i64),
    Enum(&'static str),
    Str(&'static str),
}

impl DefaultValue {
    #[must_use]
    pub fn to_value(self) -> PropValue {
        match self {
            Self::Bool(v) => PropValue::Bool(v),
            Self::Int(v) => PropValue::Int(v),
            Self::Enum(v) => PropValue::Enum(v.to_string()),
            Self::Str(v) => PropValue::String(v.to_string()),
        }
    }
}

///
/// Prop
///

#[derive(Clone, Copy, Debug)]
pub struct Prop {
    pub field: &'static str,
    pub keyword: Option<&'static str>,
    pub kind: PropKind,
    pub default: Option<DefaultValue>,
    /// False for write-only values that introspection never returns.
    pub fetchable: bool,
    pub placement: Placement,
}

impl Prop {
    const fn new(field: &'static str, kind: PropKind) -> Self {
        Self {
            field,
            keyword: None,
            kind,
            default: None,
            fetchable: true,
            placement: Placement::Body,
        }
    }

    #[must_use]
    pub const fn flag(field: &'static str) -> Self {
        Self::new(field, PropKind::Flag).with_default(DefaultValue::Bool(false))
    }

    #[must_use]
    pub const fn bool(field: &'static str) -> Self {
        Self::new(field, PropKind::Bool)
    }

    #[must_use]
    pub const fn int(field: &'static str) -> Self {
        Self::new(field, PropKind::Int)
    }

    #[must_use]
    pub const fn string(field: &'static str) -> Self {
        Self::new(field, PropKind::String)
    }

    #[must_use]
    pub const fn enumeration(field: &'static str, allowed: &'static [&'static str]) -> Self {
        Self::new(field, PropKind::Enum(allowed))
    }

    #[must_use]
    pub const fn tags() -> Self {
        Self::new("tags", PropKind::Tags).with_keyword("TAG")
    }

    #[must_use]
    pub const fn with_keyword(mut self, keyword: &'static str) -> Self {
        self.keyword = Some(keyword);
        self
    }

    #[must_use]
    pub const fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    #[must_use]
    pub const fn write_only(mut self) -> Self {
        self.fetchable = false;
        self
    }

    #[must_use]
    pub const fn premodifier(mut self) -> Self {
        self.placement = Placement::Premodifier;
        self
    }

    /// SQL keyword: the explicit override, else the uppercased field name.
    #[must_use]
    pub fn sql_keyword(&self) -> Cow<'static, str> {
        match self.keyword {
            Some(keyword) => Cow::Borrowed(keyword),
            None => Cow::Owned(self.field.to_uppercase()),
        }
    }

    #[must_use]
    pub fn default_value(&self) -> Option<PropValue> {
        self.default.map(DefaultValue::to_value)
    }

    #[must_use]
    pub fn is_default(&self, value: &PropValue) -> bool {
        self.default_value().is_some_and(|d| &d == value)
    }

    /// Check a value against this prop and return its canonical form.
    pub fn validate(&self, kind: &str, value: PropValue) -> Result<PropValue, Error> {
        match (self.kind, value) {
            (PropKind::Flag | PropKind::Bool, v @ PropValue::Bool(_))
            | (PropKind::Int, v @ PropValue::Int(_))
            | (PropKind::String, v @ PropValue::String(_)) => Ok(v),

            (PropKind::Tags, PropValue::Tags(tags)) if tags.keys().any(String::is_empty) => {
                Err(Error::InvalidPropertyValue {
                    kind: kind.to_string(),
                    field: self.field.to_string(),
                    expected: "named tags".to_string(),
                    found: "an empty tag name".to_string(),
                })
            }
            (PropKind::Tags, v @ PropValue::Tags(_)) => Ok(v),

            (PropKind::Enum(allowed), PropValue::Enum(token) | PropValue::String(token)) => {
                let upper = token.to_uppercase();
                if allowed.contains(&upper.as_str()) {
                    Ok(PropValue::Enum(upper))
                } else {
                    Err(Error::InvalidEnumValue {
                        kind: kind.to_string(),
                        field: self.field.to_string(),
                        value: token,
                        allowed: allowed.iter().map(ToString::to_string).collect(),
                    })
                }
            }

            (expected, found) => Err(Error::InvalidPropertyValue {
                kind: kind.to_string(),
                field: self.field.to_string(),
                expected: expected.type_name().to_string(),
                found: found.type_name().to_string(),
            }),
        }
    }
}

///
/// Props
///
/// Ordered property schema for one resource kind. Order is declaration
/// order and is the rendering order.
///

#[derive(Clone, Copy, Debug)]
pub struct Props {
    props: &'static [Prop],
}

impl Props {
    #[must_use]
    pub const fn new(props: &'static [Prop]) -> Self {
        Self { props }
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self { props: &[] }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Prop> {
        self.props.iter()
    }

    pub fn body(&self) -> impl Iterator<Item = &'static Prop> {
        self.iter().filter(|p| p.placement == Placement::Body)
    }

    pub fn premodifiers(&self) -> impl Iterator<Item = &'static Prop> {
        self.iter()
            .filter(|p| p.placement == Placement::Premodifier)
    }

    /// Look up a prop by field name or SQL keyword, case-insensitively.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'static Prop> {
        self.iter().find(|p| {
            p.field.eq_ignore_ascii_case(field) || p.sql_keyword().eq_ignore_ascii_case(field)
        })
    }

    /// Validate one `(field, value)` assignment for `kind`.
    pub fn validate(
        &self,
        kind: &str,
        field: &str,
        value: PropValue,
    ) -> Result<(&'static Prop, PropValue), Error> {
        let prop = self.get(field).ok_or_else(|| Error::UnknownProperty {
            kind: kind.to_string(),
            field: field.to_string(),
        })?;

        Ok((prop, prop.validate(kind, value)?))
    }

    /// Explicit values merged over declared defaults.
    #[must_use]
    pub fn resolve(&self, data: &PropData) -> PropData {
        self.iter()
            .filter_map(|p| {
                data.get(p.field)
                    .cloned()
                    .or_else(|| p.default_value())
                    .map(|v| (p.field, v))
            })
            .collect()
    }

    /// Drop values equal to their declared default.
    #[must_use]
    pub fn without_defaults(&self, data: &PropData) -> PropData {
        let mut data = data.clone();
        data.retain(|field, value| self.get(field).is_none_or(|p| !p.is_default(value)));

        data
    }

    /// Drop write-only values that introspection cannot return.
    #[must_use]
    pub fn fetchable(&self, data: &PropData) -> PropData {
        let mut data = data.clone();
        data.retain(|field, _| self.get(field).is_none_or(|p| p.fetchable));

        data
    }
}
