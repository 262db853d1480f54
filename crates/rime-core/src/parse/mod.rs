//! Low-level DDL scanning shared by the header tokenizer and the property
//! decoder. Only the small token vocabulary those two need is recognized.

pub mod header;

///
/// Cursor
///
/// Byte-offset cursor over a statement fragment. Every `eat_*` method
/// either consumes a complete token or leaves the position untouched.
///

#[derive(Clone, Debug)]
pub(crate) struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

const fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

impl<'a> Cursor<'a> {
    pub(crate) const fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    pub(crate) const fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) const fn reset(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub(crate) fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    pub(crate) fn src_from(&self, start: usize) -> &'a str {
        &self.src[start..]
    }

    pub(crate) fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    pub(crate) fn is_eof(&mut self) -> bool {
        self.skip_ws();
        self.pos == self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consume a (possibly multi-word) keyword, case-insensitively, ending
    /// on a word boundary.
    pub(crate) fn eat_keyword(&mut self, keyword: &str) -> bool {
        let start = self.pos;

        for word in keyword.split_whitespace() {
            self.skip_ws();
            let rest = self.rest();
            let matched = rest
                .get(..word.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(word))
                && rest[word.len()..]
                    .chars()
                    .next()
                    .is_none_or(|c| !is_word_char(c));

            if !matched {
                self.pos = start;
                return false;
            }
            self.pos += word.len();
        }

        true
    }

    pub(crate) fn eat_char(&mut self, expected: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// A bare word: `[A-Za-z0-9_$]+`.
    pub(crate) fn word(&mut self) -> Option<&'a str> {
        self.skip_ws();
        let rest = self.rest();
        let len = rest.find(|c: char| !is_word_char(c)).unwrap_or(rest.len());

        if len == 0 {
            return None;
        }
        self.pos += len;

        Some(&rest[..len])
    }

    /// A dotted identifier whose parts are bare words or `"quoted"` text.
    /// The identifier text is returned exactly as written.
    pub(crate) fn identifier(&mut self) -> Option<&'a str> {
        self.skip_ws();
        let start = self.pos;

        loop {
            if self.peek() == Some('"') {
                if !self.skip_delimited('"') {
                    self.pos = start;
                    return None;
                }
            } else if self.word().is_none() {
                self.pos = start;
                return None;
            }

            if self.peek() == Some('.') {
                self.pos += 1;
            } else {
                break;
            }
        }

        Some(&self.src[start..self.pos])
    }

    /// A single-quoted string literal with `''` escapes, unescaped.
    pub(crate) fn quoted_string(&mut self) -> Option<String> {
        self.skip_ws();
        if self.peek() != Some('\'') {
            return None;
        }

        let start = self.pos;
        if !self.skip_delimited('\'') {
            self.pos = start;
            return None;
        }
        let raw = &self.src[start + 1..self.pos - 1];

        Some(raw.replace("''", "'"))
    }

    /// An optionally signed decimal integer.
    pub(crate) fn integer(&mut self) -> Option<i64> {
        self.skip_ws();
        let start = self.pos;
        let rest = self.rest();
        let sign = usize::from(rest.starts_with(['-', '+']));
        let digits = rest[sign..]
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len() - sign);

        if digits == 0 {
            return None;
        }
        let end = sign + digits;
        if rest[end..].chars().next().is_some_and(is_word_char) {
            return None;
        }

        match rest[..end].parse::<i64>() {
            Ok(value) => {
                self.pos = start + end;
                Some(value)
            }
            Err(_) => None,
        }
    }

    // Skip a delimited run such as 'text' or "ident", treating a doubled
    // delimiter as an escape. Returns false when unterminated.
    fn skip_delimited(&mut self, delim: char) -> bool {
        let bytes = self.src.as_bytes();
        let delim = delim as u8;
        let mut i = self.pos + 1;

        while i < bytes.len() {
            if bytes[i] == delim {
                if bytes.get(i + 1) == Some(&delim) {
                    i += 2;
                    continue;
                }
                self.pos = i + 1;
                return true;
            }
            i += 1;
        }

        false
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_match_case_insensitively_on_word_boundaries() {
        let mut cursor = Cursor::new("with  Managed\naccess COMMENT");
        assert!(cursor.eat_keyword("WITH MANAGED ACCESS"));
        assert!(cursor.eat_keyword("COMMENT"));
        assert!(cursor.is_eof());

        let mut cursor = Cursor::new("COMMENTS = 'x'");
        assert!(!cursor.eat_keyword("COMMENT"), "prefix of a longer word must not match");
        assert_eq!(cursor.pos(), 0, "failed match must not consume input");
    }

    #[test]
    fn quoted_strings_unescape_doubled_quotes() {
        let mut cursor = Cursor::new(" 'it''s here' rest");
        assert_eq!(cursor.quoted_string().as_deref(), Some("it's here"));
        assert_eq!(cursor.rest(), " rest");

        let mut cursor = Cursor::new("'open");
        assert_eq!(cursor.quoted_string(), None);
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn integers_reject_trailing_word_characters() {
        assert_eq!(Cursor::new("-42").integer(), Some(-42));
        assert_eq!(Cursor::new("+7 ").integer(), Some(7));
        assert_eq!(Cursor::new("12abc").integer(), None);
        assert_eq!(Cursor::new("abc").integer(), None);
    }

    #[test]
    fn identifiers_keep_quoted_parts() {
        let mut cursor = Cursor::new("db1.\"my schema\".seq COMMENT");
        assert_eq!(cursor.identifier(), Some("db1.\"my schema\".seq"));
        assert_eq!(cursor.rest(), " COMMENT");
    }
}
