use super::*;
use crate::error::Error;

const SIZES: &[&str] = &["XSMALL", "SMALL", "LARGE"];

static PROPS: Props = Props::new(&[
    Prop::flag("transient").premodifier(),
    Prop::flag("with_managed_access").with_keyword("WITH MANAGED ACCESS"),
    Prop::enumeration("size", SIZES).with_default(DefaultValue::Enum("XSMALL")),
    Prop::int("retention").with_default(DefaultValue::Int(1)),
    Prop::bool("auto_resume"),
    Prop::string("secret").write_only(),
    Prop::tags(),
    Prop::string("comment"),
]);

fn parse(text: &str) -> Result<PropData, Error> {
    PROPS.parse("Widget", text)
}

#[test]
fn render_follows_declared_order_not_insertion_order() {
    let data: PropData = [
        ("comment", PropValue::from("hello")),
        ("auto_resume", PropValue::Bool(false)),
        ("size", PropValue::Enum("LARGE".into())),
        ("with_managed_access", PropValue::Bool(true)),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        PROPS.render(&data),
        "WITH MANAGED ACCESS SIZE = LARGE AUTO_RESUME = FALSE COMMENT = 'hello'"
    );
}

#[test]
fn render_skips_unset_default_and_premodifier_values() {
    let data: PropData = [
        ("transient", PropValue::Bool(true)),
        ("size", PropValue::Enum("XSMALL".into())),
        ("retention", PropValue::Int(1)),
    ]
    .into_iter()
    .collect();

    assert_eq!(PROPS.render(&data), "");
    assert_eq!(PROPS.render_premodifiers(&data), "TRANSIENT");
}

#[test]
fn render_formats_tag_maps() {
    let data: PropData = [("tags", PropValue::from([("env", "prod"), ("team", "o'neil")]))]
        .into_iter()
        .collect();

    assert_eq!(
        PROPS.render(&data),
        "TAG (env = 'prod', team = 'o''neil')"
    );
}

#[test]
fn tag_names_are_quoted_when_they_need_it() {
    let data: PropData = [(
        "tags",
        PropValue::from([("cost center", "a1"), ("say \"hi\"", "b"), ("env", "prod")]),
    )]
    .into_iter()
    .collect();

    let rendered = PROPS.render(&data);
    assert_eq!(
        rendered,
        "TAG (\"cost center\" = 'a1', env = 'prod', \"say \"\"hi\"\"\" = 'b')"
    );

    let parsed = parse(&rendered).expect("quoted tag names should parse");
    assert_eq!(parsed.get("tags"), data.get("tags"));
    assert_eq!(PROPS.render(&parsed), rendered);
}

#[test]
fn empty_tag_names_are_rejected() {
    let err = PROPS
        .validate("Widget", "tags", PropValue::from([("", "x")]))
        .expect_err("tags need a name");
    assert!(matches!(err, Error::InvalidPropertyValue { .. }));

    parse("TAG (\"\" = 'x')").expect_err("an empty quoted name is not a tag");
}

#[test]
fn parse_accepts_any_property_order() {
    let data = parse("comment = 'x' RETENTION = 5 with managed access size = small")
        .expect("props in any order should parse");

    assert_eq!(data.get("comment"), Some(&PropValue::from("x")));
    assert_eq!(data.get("retention"), Some(&PropValue::Int(5)));
    assert_eq!(data.get("with_managed_access"), Some(&PropValue::Bool(true)));
    assert_eq!(data.get("size"), Some(&PropValue::Enum("SMALL".into())));
}

#[test]
fn parse_reads_tags_with_optional_with_prefix() {
    for text in [
        "WITH TAG (env = 'prod', db.sch.owner = 'ops')",
        "TAG(env='prod',db.sch.owner='ops')",
    ] {
        let data = parse(text).expect("tag clause should parse");
        let Some(PropValue::Tags(tags)) = data.get("tags") else {
            panic!("expected tags for `{text}`");
        };

        assert_eq!(tags.get("env").map(String::as_str), Some("prod"));
        assert_eq!(tags.get("db.sch.owner").map(String::as_str), Some("ops"));
    }
}

#[test]
fn parse_rejects_unmatched_trailing_fragment() {
    let err = parse("COMMENT = 'ok' BOGUS_OPTION = 1").expect_err("unknown prop should fail");

    assert_eq!(
        err,
        Error::PropertyParse {
            kind: "Widget".to_string(),
            fragment: "BOGUS_OPTION = 1".to_string(),
        }
    );
}

#[test]
fn parse_rejects_repeated_properties() {
    let err = parse("COMMENT = 'a' COMMENT = 'b'").expect_err("duplicate prop should fail");

    assert!(matches!(
        err,
        Error::PropertyParse { ref fragment, .. } if fragment == "COMMENT = 'b'"
    ));
}

#[test]
fn parse_rejects_malformed_values_at_the_keyword() {
    let err = parse("RETENTION = soon").expect_err("non-integer should fail");
    assert!(matches!(
        err,
        Error::PropertyParse { ref fragment, .. } if fragment == "RETENTION = soon"
    ));

    let err = parse("AUTO_RESUME = maybe").expect_err("non-bool should fail");
    assert!(matches!(err, Error::PropertyParse { .. }));
}

#[test]
fn parse_rejects_enum_tokens_outside_the_allowed_set() {
    let err = parse("SIZE = HUGE").expect_err("unknown enum token should fail");

    assert!(matches!(
        err,
        Error::InvalidEnumValue { ref value, ref field, .. } if value == "HUGE" && field == "size"
    ));
}

#[test]
fn validate_rejects_type_mismatches_and_unknown_fields() {
    let err = PROPS
        .validate("Widget", "retention", PropValue::from("five"))
        .expect_err("string for int should fail");
    assert!(matches!(err, Error::InvalidPropertyValue { .. }));

    let err = PROPS
        .validate("Widget", "colour", PropValue::Int(1))
        .expect_err("unknown field should fail");
    assert!(matches!(err, Error::UnknownProperty { .. }));
}

#[test]
fn validate_canonicalizes_enum_tokens() {
    let (prop, value) = PROPS
        .validate("Widget", "SIZE", PropValue::from("large"))
        .expect("known enum token should validate");

    assert_eq!(prop.field, "size");
    assert_eq!(value, PropValue::Enum("LARGE".into()));
}

#[test]
fn fetchable_drops_write_only_values() {
    let data: PropData = [
        ("secret", PropValue::from("hunter2")),
        ("comment", PropValue::from("visible")),
    ]
    .into_iter()
    .collect();

    let fetched = PROPS.fetchable(&data);
    assert!(!fetched.contains_key("secret"));
    assert!(fetched.contains_key("comment"));
}

#[test]
fn resolve_fills_defaults_but_keeps_unset_without_default() {
    let resolved = PROPS.resolve(&PropData::new());

    assert_eq!(resolved.get("retention"), Some(&PropValue::Int(1)));
    assert_eq!(resolved.get("transient"), Some(&PropValue::Bool(false)));
    assert!(!resolved.contains_key("comment"), "unset without default stays unset");
}

#[test]
fn render_parse_render_is_stable() {
    let data: PropData = [
        ("comment", PropValue::from("multi word 'quoted'")),
        ("size", PropValue::Enum("LARGE".into())),
        ("retention", PropValue::Int(-3)),
        ("tags", PropValue::from([("a", "1")])),
    ]
    .into_iter()
    .collect();

    let rendered = PROPS.render(&data);
    let reparsed = parse(&rendered).expect("rendered props should parse");

    assert_eq!(PROPS.render(&reparsed), rendered);
}
