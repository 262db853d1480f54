use crate::{
    error::Error,
    parse::Cursor,
    props::{Prop, PropKind, Props},
    value::{PropData, PropValue},
};
use std::collections::BTreeMap;

impl Props {
    /// Decode a property remainder. Props may appear in any order, but the
    /// whole remainder must be consumed.
    pub fn parse(&self, kind: &str, text: &str) -> Result<PropData, Error> {
        let mut cursor = Cursor::new(text);
        let mut data = PropData::new();

        while !cursor.is_eof() {
            let start = cursor.pos();
            let Some(prop) = self.body().find(|prop| eat_prop_keyword(prop, &mut cursor)) else {
                return Err(Error::property_parse(kind, cursor.rest()));
            };
            tracing::trace!(kind, field = prop.field, "matched property keyword");

            if data.contains_key(prop.field) {
                return Err(Error::property_parse(kind, cursor.src_from(start)));
            }

            let value = parse_value(prop, &mut cursor)
                .ok_or_else(|| Error::property_parse(kind, cursor.src_from(start)))?;
            let value = prop.validate(kind, value)?;

            data.insert(prop.field, value);
        }

        Ok(data)
    }
}

fn eat_prop_keyword(prop: &Prop, cursor: &mut Cursor<'_>) -> bool {
    if prop.kind == PropKind::Tags {
        let start = cursor.pos();
        if cursor.eat_keyword("WITH") && cursor.eat_keyword(&prop.sql_keyword()) {
            return true;
        }
        cursor.reset(start);
    }

    cursor.eat_keyword(&prop.sql_keyword())
}

fn parse_value(prop: &Prop, cursor: &mut Cursor<'_>) -> Option<PropValue> {
    match prop.kind {
        PropKind::Flag => Some(PropValue::Bool(true)),
        PropKind::Tags => parse_tags(cursor).map(PropValue::Tags),
        kind => {
            if !cursor.eat_char('=') {
                return None;
            }

            match kind {
                PropKind::Bool => {
                    let word = cursor.word()?;
                    if word.eq_ignore_ascii_case("TRUE") {
                        Some(PropValue::Bool(true))
                    } else if word.eq_ignore_ascii_case("FALSE") {
                        Some(PropValue::Bool(false))
                    } else {
                        None
                    }
                }
                PropKind::Int => cursor.integer().map(PropValue::Int),
                PropKind::String => cursor
                    .quoted_string()
                    .or_else(|| cursor.identifier().map(ToString::to_string))
                    .map(PropValue::String),
                PropKind::Enum(_) => cursor
                    .quoted_string()
                    .or_else(|| cursor.word().map(ToString::to_string))
                    .map(PropValue::Enum),
                PropKind::Flag | PropKind::Tags => None,
            }
        }
    }
}

// ( name = 'value' [, name = 'value' ...] )
// A single quoted part is unescaped; anything else is kept as written.
fn tag_name(raw: &str) -> Option<String> {
    let name = match raw.strip_prefix('"').and_then(|r| r.strip_suffix('"')) {
        Some(inner) if !inner.replace("\"\"", "").contains('"') => inner.replace("\"\"", "\""),
        _ => raw.to_string(),
    };

    (!name.is_empty()).then_some(name)
}

fn parse_tags(cursor: &mut Cursor<'_>) -> Option<BTreeMap<String, String>> {
    let mut tags = BTreeMap::new();

    if !cursor.eat_char('(') {
        return None;
    }
    if cursor.eat_char(')') {
        return Some(tags);
    }

    loop {
        let name = tag_name(cursor.identifier()?)?;
        if !cursor.eat_char('=') {
            return None;
        }
        let value = cursor.quoted_string()?;
        tags.insert(name, value);

        if cursor.eat_char(',') {
            continue;
        }
        if cursor.eat_char(')') {
            return Some(tags);
        }

        return None;
    }
}
