use crate::{
    props::{Prop, PropKind, Props},
    value::{PropData, PropValue},
};
use rime_utils::sql::tidy_sql;

impl Props {
    /// Render body props in declared order, skipping unset and default values.
    #[must_use]
    pub fn render(&self, data: &PropData) -> String {
        tidy_sql(self.body().filter_map(|prop| render_prop(prop, data)))
    }

    /// Render premodifier flags (`TRANSIENT`, ...) in declared order.
    #[must_use]
    pub fn render_premodifiers(&self, data: &PropData) -> String {
        tidy_sql(self.premodifiers().filter_map(|prop| render_prop(prop, data)))
    }
}

fn render_prop(prop: &Prop, data: &PropData) -> Option<String> {
    let value = data.get(prop.field)?;
    if prop.is_default(value) {
        return None;
    }

    match (prop.kind, value) {
        (PropKind::Flag, PropValue::Bool(true)) => Some(prop.sql_keyword().into_owned()),
        (PropKind::Flag, _) => None,
        (PropKind::Tags, PropValue::Tags(tags)) if tags.is_empty() => None,
        (PropKind::Tags, tags) => Some(format!("{} {}", prop.sql_keyword(), tags.to_sql())),
        (PropKind::Enum(_), PropValue::String(token) | PropValue::Enum(token)) => {
            Some(format!("{} = {}", prop.sql_keyword(), token.to_uppercase()))
        }
        (_, value) => Some(format!("{} = {}", prop.sql_keyword(), value.to_sql())),
    }
}
