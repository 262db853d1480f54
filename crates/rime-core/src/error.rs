use derive_more::Display;
use thiserror::Error as ThisError;

///
/// ErrorClass
///
/// Coarse classification used by callers deciding whether a failure is a
/// lookup miss, bad input text, a rejected value, or a missing SQL form.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ErrorClass {
    Lookup,
    Parse,
    Unsupported,
    Validation,
}

///
/// Error
///
/// Every failure is raised at the point of detection and carries the kind
/// name plus the offending input so it can be traced back to its DDL.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum Error {
    #[error("{kind} '{name}' is implicit and stays with its parent")]
    ImplicitChild { kind: String, name: String },

    #[error("invalid {kind}.{field} value '{value}': expected one of {}", .allowed.join(", "))]
    InvalidEnumValue {
        kind: String,
        field: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("invalid resource name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("invalid {kind}.{field} value: expected {expected}, found {found}")]
    InvalidPropertyValue {
        kind: String,
        field: String,
        expected: String,
        found: String,
    },

    #[error("resource kind '{key}' already registered")]
    KindAlreadyRegistered { key: String },

    #[error("malformed header in `{sql}`: {reason}")]
    MalformedHeader { sql: String, reason: String },

    #[error("cannot parse {kind} properties at `{fragment}`")]
    PropertyParse { kind: String, fragment: String },

    #[error("{kind} expects parent {expected}, found {found}")]
    ScopeMismatch {
        kind: String,
        expected: String,
        found: String,
    },

    #[error("{kind} '{name}' is a stub and has no authoritative definition")]
    StubResource { kind: String, name: String },

    #[error("unknown property '{field}' for {kind}")]
    UnknownProperty { kind: String, field: String },

    #[error("unknown resource {id}: not issued by this graph")]
    UnknownResource { id: String },

    #[error("unknown resource kind '{key}'")]
    UnknownResourceKind { key: String },

    #[error("unsupported lifecycle operation for {kind}: {operation}")]
    UnsupportedLifecycleOperation { kind: String, operation: String },
}

impl Error {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::KindAlreadyRegistered { .. }
            | Self::UnknownResource { .. }
            | Self::UnknownResourceKind { .. } => ErrorClass::Lookup,
            Self::MalformedHeader { .. } | Self::PropertyParse { .. } => ErrorClass::Parse,
            Self::UnsupportedLifecycleOperation { .. } => ErrorClass::Unsupported,
            Self::ImplicitChild { .. }
            | Self::InvalidEnumValue { .. }
            | Self::InvalidName { .. }
            | Self::InvalidPropertyValue { .. }
            | Self::ScopeMismatch { .. }
            | Self::StubResource { .. }
            | Self::UnknownProperty { .. } => ErrorClass::Validation,
        }
    }

    pub(crate) fn unsupported(kind: &str, operation: impl Into<String>) -> Self {
        Self::UnsupportedLifecycleOperation {
            kind: kind.to_string(),
            operation: operation.into(),
        }
    }

    pub(crate) fn property_parse(kind: &str, fragment: &str) -> Self {
        Self::PropertyParse {
            kind: kind.to_string(),
            fragment: fragment.trim().to_string(),
        }
    }

    pub(crate) fn malformed_header(sql: &str, reason: impl Into<String>) -> Self {
        Self::MalformedHeader {
            sql: sql.to_string(),
            reason: reason.into(),
        }
    }
}

///
/// TESTS
///
