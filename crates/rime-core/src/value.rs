use derive_more::{Deref, IntoIterator};
use rime_utils::sql::{quote_identifier, quote_string};
use serde::Serialize;
use std::collections::BTreeMap;

///
/// PropValue
///
/// One property value. Flags are carried as `Bool(true)`; enum tokens are
/// stored uppercase once validated against their property.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropValue {
    Bool(bool),
    Int(i64),
    Enum(String),
    String(String),
    Tags(BTreeMap<String, String>),
}

impl PropValue {
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Enum(_) => "enum",
            Self::String(_) => "string",
            Self::Tags(_) => "tags",
        }
    }

    /// Literal SQL spelling: strings quoted, everything else verbatim.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Bool(true) => "TRUE".to_string(),
            Self::Bool(false) => "FALSE".to_string(),
            Self::Int(v) => v.to_string(),
            Self::Enum(v) => v.to_uppercase(),
            Self::String(v) => quote_string(v),
            Self::Tags(tags) => {
                let pairs = tags
                    .iter()
                    .map(|(k, v)| format!("{} = {}", quote_identifier(k), quote_string(v)))
                    .collect::<Vec<_>>();

                format!("({})", pairs.join(", "))
            }
        }
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<BTreeMap<String, String>> for PropValue {
    fn from(value: BTreeMap<String, String>) -> Self {
        Self::Tags(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for PropValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl<const N: usize> From<[(&str, &str); N]> for PropValue {
    fn from(tags: [(&str, &str); N]) -> Self {
        Self::Tags(
            tags.into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

///
/// PropData
///
/// Sparse field -> value map. A missing key means "unset", which is a
/// different state from "explicitly set to the default".
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PropData(BTreeMap<String, PropValue>);

impl PropData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: PropValue) -> Option<PropValue> {
        self.0.insert(field.into(), value)
    }

    pub fn remove(&mut self, field: &str) -> Option<PropValue> {
        self.0.remove(field)
    }

    pub fn retain(&mut self, f: impl FnMut(&String, &mut PropValue) -> bool) {
        self.0.retain(f);
    }
}

impl<K: Into<String>> FromIterator<(K, PropValue)> for PropData {
    fn from_iter<T: IntoIterator<Item = (K, PropValue)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_render_per_value_kind() {
        assert_eq!(PropValue::Bool(true).to_sql(), "TRUE");
        assert_eq!(PropValue::Int(-7).to_sql(), "-7");
        assert_eq!(PropValue::Enum("enterprise".into()).to_sql(), "ENTERPRISE");
        assert_eq!(PropValue::from("it's").to_sql(), "'it''s'");
        assert_eq!(
            PropValue::from([("env", "prod"), ("cost_center", "a1")]).to_sql(),
            "(cost_center = 'a1', env = 'prod')"
        );
    }

    #[test]
    fn values_serialize_without_variant_tags() {
        let data: PropData = [
            ("comment", PropValue::from("hi")),
            ("auto_resume", PropValue::Bool(false)),
            ("auto_suspend", PropValue::Int(60)),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_value(&data).expect("prop data should serialize");
        assert_eq!(
            json,
            serde_json::json!({"auto_resume": false, "auto_suspend": 60, "comment": "hi"})
        );
    }
}
