use proptest::prelude::*;
use rime::core::{
    props::{PropKind, Props},
    registry::BUILTIN_KINDS,
    resource::ResourceKind,
    value::{PropData, PropValue},
};

fn arb_value(kind: PropKind) -> BoxedStrategy<PropValue> {
    match kind {
        PropKind::Flag | PropKind::Bool => any::<bool>().prop_map(PropValue::Bool).boxed(),
        PropKind::Int => (-100_000i64..100_000).prop_map(PropValue::Int).boxed(),
        PropKind::String => "[a-zA-Z0-9 '_.@-]{0,16}".prop_map(PropValue::String).boxed(),
        PropKind::Enum(allowed) => prop::sample::select(allowed)
            .prop_map(|token| PropValue::Enum(token.to_string()))
            .boxed(),
        PropKind::Tags => {
            prop::collection::btree_map("[a-zA-Z0-9_ .$\"-]{1,8}", "[a-zA-Z0-9 ']{0,8}", 0..3)
                .prop_map(PropValue::Tags)
                .boxed()
        }
    }
}

// Any subset of the kind's body props, each with a value of the right type.
fn arb_data(props: Props) -> impl Strategy<Value = PropData> {
    props
        .body()
        .map(|prop| {
            prop::option::of(arb_value(prop.kind))
                .prop_map(move |value| value.map(|value| (prop.field, value)))
        })
        .collect::<Vec<_>>()
        .prop_map(|entries| entries.into_iter().flatten().collect())
}

fn arb_kind_and_data() -> impl Strategy<Value = (&'static ResourceKind, PropData)> {
    prop::sample::select(BUILTIN_KINDS.to_vec())
        .prop_flat_map(|kind| arb_data(kind.props).prop_map(move |data| (kind, data)))
}

proptest! {
    #[test]
    fn render_parse_render_is_stable((kind, data) in arb_kind_and_data()) {
        let rendered = kind.props.render(&data);
        let parsed = kind
            .props
            .parse(kind.name, &rendered)
            .map_err(|err| TestCaseError::fail(format!("{rendered}: {err}")))?;

        prop_assert_eq!(kind.props.render(&parsed), rendered);
    }

    #[test]
    fn parsed_values_are_exactly_the_rendered_ones((kind, data) in arb_kind_and_data()) {
        let rendered = kind.props.render(&data);
        let parsed = kind
            .props
            .parse(kind.name, &rendered)
            .map_err(|err| TestCaseError::fail(format!("{rendered}: {err}")))?;

        // everything that renders survives; defaults, false flags and empty
        // tags render as nothing and so come back unset
        for (field, value) in parsed.iter() {
            prop_assert_eq!(data.get(field), Some(value));
        }
    }
}
