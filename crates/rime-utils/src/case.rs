use convert_case::{Case, Casing};

///
/// Kind naming
///
/// Resource kinds are declared by a PascalCase name; both the registry key
/// and the SQL keyword derive from that name alone.
///

/// Registry key for a declared kind name (`ResourceMonitor` -> `resource_monitor`).
#[must_use]
pub fn kind_key(name: &str) -> String {
    name.to_case(Case::Snake)
}

/// SQL keyword for a declared kind name (`ResourceMonitor` -> `RESOURCE MONITOR`).
#[must_use]
pub fn kind_keyword(name: &str) -> String {
    name.to_case(Case::Upper)
}

/// Registry key for the keyword words found in a statement header.
#[must_use]
pub fn key_from_words(words: &[&str]) -> String {
    words
        .iter()
        .map(|w| w.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

///
/// TESTS
///
