use crate::{
    error::Error,
    identifier::{ResourceName, split_qualified},
    parse::Cursor,
    registry::Registry,
    resource::ResourceKind,
};
use rime_utils::case::key_from_words;

///
/// CreateHeader
///
/// `CREATE [OR REPLACE] [<premodifier>...] <KIND> [IF NOT EXISTS] <identifier>`
/// split off the front of a statement, plus the unparsed property remainder.
///

#[derive(Clone, Debug)]
pub struct CreateHeader {
    pub sql: String,
    pub kind: &'static ResourceKind,
    pub or_replace: bool,
    /// Premodifier prop fields, e.g. `transient`.
    pub premodifiers: Vec<&'static str>,
    pub if_not_exists: bool,
    pub identifier: Vec<ResourceName>,
    pub remainder: String,
}

pub fn parse_create_header(sql: &str, registry: &Registry) -> Result<CreateHeader, Error> {
    let statement = sql.trim().trim_end_matches(';').trim_end();
    let mut cursor = Cursor::new(statement);

    if !cursor.eat_keyword("CREATE") {
        return Err(Error::malformed_header(sql, "expected CREATE"));
    }
    let or_replace = cursor.eat_keyword("OR REPLACE");

    // longest keywords first so multi-word kinds win over their prefixes
    let mut kinds: Vec<_> = registry.kinds().map(|k| (k.keyword(), k)).collect();
    kinds.sort_by_key(|(keyword, _)| std::cmp::Reverse(keyword.split_whitespace().count()));

    let mut words = Vec::new();
    let kind = loop {
        if let Some((_, kind)) = kinds.iter().find(|(keyword, _)| cursor.eat_keyword(keyword)) {
            break *kind;
        }
        match cursor.word() {
            Some(word) => words.push(word),
            None => {
                // modifiers of registered kinds are not the unknown keyword
                let is_modifier = |word: &str| {
                    kinds.iter().any(|(_, kind)| {
                        kind.props
                            .premodifiers()
                            .any(|p| p.sql_keyword().eq_ignore_ascii_case(word))
                    })
                };
                let word = words
                    .iter()
                    .copied()
                    .find(|&word| !is_modifier(word))
                    .or_else(|| words.first().copied());
                let key = key_from_words(word.as_slice());

                return Err(Error::UnknownResourceKind { key });
            }
        }
    };

    let premodifiers = words
        .iter()
        .map(|word| {
            kind.props
                .premodifiers()
                .find(|p| p.sql_keyword().eq_ignore_ascii_case(word))
                .map(|p| p.field)
                .ok_or_else(|| {
                    Error::malformed_header(
                        sql,
                        format!("'{word}' is not a {} modifier", kind.keyword()),
                    )
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let if_not_exists = cursor.eat_keyword("IF NOT EXISTS");

    let Some(raw) = cursor.identifier() else {
        return Err(Error::malformed_header(sql, "missing identifier"));
    };
    let identifier =
        split_qualified(raw).map_err(|err| Error::malformed_header(sql, err.to_string()))?;
    if identifier.len() > kind.depth() {
        return Err(Error::malformed_header(
            sql,
            format!(
                "{} identifiers have at most {} part(s), found {}",
                kind.keyword(),
                kind.depth(),
                identifier.len()
            ),
        ));
    }

    Ok(CreateHeader {
        sql: sql.to_string(),
        kind,
        or_replace,
        premodifiers,
        if_not_exists,
        identifier,
        remainder: cursor.rest().trim().to_string(),
    })
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ErrorClass,
        registry::registry,
        resource::{ACCOUNT, DATABASE, SEQUENCE},
    };

    fn header(sql: &str) -> CreateHeader {
        parse_create_header(sql, registry()).expect("header should parse")
    }

    #[test]
    fn full_header_is_split_into_parts() {
        let h = header("create or replace transient database if not exists db1 comment = 'x';");

        assert!(h.kind.is(&DATABASE));
        assert!(h.or_replace);
        assert!(h.if_not_exists);
        assert_eq!(h.premodifiers, vec!["transient"]);
        assert_eq!(h.identifier, vec![ResourceName::new("db1").expect("valid name")]);
        assert_eq!(h.remainder, "comment = 'x'");
    }

    #[test]
    fn qualified_identifiers_keep_quoted_parts() {
        let h = header("CREATE SEQUENCE db1.\"my schema\".seq START = 5");
        let parts: Vec<&str> = h.identifier.iter().map(ResourceName::as_str).collect();

        assert!(h.kind.is(&SEQUENCE));
        assert_eq!(parts, vec!["DB1", "MY SCHEMA", "SEQ"]);
        assert_eq!(h.remainder, "START = 5");
    }

    #[test]
    fn too_deep_identifiers_are_malformed() {
        let err = parse_create_header("CREATE ACCOUNT org.acme", registry())
            .expect_err("accounts are addressed by a bare name");

        assert_eq!(ACCOUNT.depth(), 1);
        assert!(matches!(err, Error::MalformedHeader { .. }));
        assert_eq!(err.class(), ErrorClass::Parse);
    }

    #[test]
    fn unknown_kinds_report_the_first_word() {
        let err = parse_create_header("CREATE PIPE p1 AS COPY INTO t", registry())
            .expect_err("pipes are not registered");

        assert_eq!(
            err,
            Error::UnknownResourceKind {
                key: "pipe".to_string()
            }
        );
    }

    #[test]
    fn unknown_kinds_behind_a_modifier_report_the_kind_word() {
        let err = parse_create_header("CREATE TRANSIENT PIPE p", registry())
            .expect_err("pipes are not registered");

        assert_eq!(
            err,
            Error::UnknownResourceKind {
                key: "pipe".to_string()
            }
        );
        assert_eq!(err.class(), ErrorClass::Lookup);
    }

    #[test]
    fn modifiers_must_belong_to_the_kind() {
        let err = parse_create_header("CREATE TRANSIENT ROLE r1", registry())
            .expect_err("roles have no TRANSIENT form");

        assert!(matches!(err, Error::MalformedHeader { .. }));
    }

    #[test]
    fn non_create_statements_are_malformed() {
        let err = parse_create_header("DROP DATABASE db1", registry())
            .expect_err("only CREATE headers parse");

        assert!(matches!(err, Error::MalformedHeader { .. }));
    }
}
