///
/// Statement assembly
///

/// Join ordered statement fragments with single spaces, dropping empty ones.
pub fn tidy_sql<I, S>(fragments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();

    for fragment in fragments {
        let fragment = fragment.as_ref().trim();
        if fragment.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(fragment);
    }

    out
}

/// Single-quote a string literal, doubling embedded quotes.
#[must_use]
pub fn quote_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// True if the identifier can be written without double quotes.
#[must_use]
pub fn is_bare_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Write an identifier, double-quoting it only when required.
#[must_use]
pub fn quote_identifier(ident: &str) -> String {
    if is_bare_identifier(ident) {
        ident.to_string()
    } else {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tidy_sql_skips_empty_fragments() {
        let sql = tidy_sql(["CREATE", "", "DATABASE", "  ", "DB1", ""]);
        assert_eq!(sql, "CREATE DATABASE DB1");
    }

    #[test]
    fn tidy_sql_trims_fragment_edges() {
        let sql = tidy_sql(["DROP ACCOUNT ", " ACME", "GRACE_PERIOD_IN_DAYS = 3"]);
        assert_eq!(sql, "DROP ACCOUNT ACME GRACE_PERIOD_IN_DAYS = 3");
    }

    #[test]
    fn quote_string_doubles_embedded_quotes() {
        assert_eq!(quote_string("it's"), "'it''s'");
        assert_eq!(quote_string(""), "''");
    }

    #[test]
    fn identifiers_are_quoted_only_when_needed() {
        assert_eq!(quote_identifier("DB_1$"), "DB_1$");
        assert_eq!(quote_identifier("MY DB"), "\"MY DB\"");
        assert_eq!(quote_identifier("1DB"), "\"1DB\"");
    }
}
