use rime::{
    Error, ErrorClass,
    core::{registry::registry, resource::SCHEMA},
    prelude::*,
};
use serde_json::json;

#[test]
fn graph_dispatches_ddl_to_the_matching_kind() {
    let mut graph = Graph::new();
    let db = graph
        .from_sql("CREATE TRANSIENT DATABASE db1 DATA_RETENTION_TIME_IN_DAYS = 0")
        .expect("database DDL should load");
    let s1 = graph
        .from_sql("CREATE SCHEMA db1.s1 WITH MANAGED ACCESS COMMENT = 'raw'")
        .expect("schema DDL should load");

    assert_eq!(graph[db].get("transient"), Some(PropValue::Bool(true)));
    assert!(graph[s1].kind().is(&SCHEMA));
    assert_eq!(graph.fqn(s1).to_string(), "DB1.S1");
    assert_eq!(graph[s1].get("with_managed_access"), Some(PropValue::Bool(true)));

    assert_eq!(graph.resolve_stubs(), 1);
    assert_eq!(graph.children(db), vec![s1]);
    assert_eq!(
        graph
            .create_sql(db, CreateOptions::default())
            .expect("database create renders"),
        "CREATE TRANSIENT DATABASE DB1 DATA_RETENTION_TIME_IN_DAYS = 0"
    );
}

#[test]
fn unmatched_remainder_reports_the_fragment() {
    let err = registry()
        .from_sql("CREATE DATABASE db1 COMMENT = 'x' BOGUS_OPTION = 1")
        .expect_err("unknown option should fail");

    assert_eq!(
        err,
        Error::PropertyParse {
            kind: "Database".to_string(),
            fragment: "BOGUS_OPTION = 1".to_string(),
        }
    );
    assert_eq!(err.class(), ErrorClass::Parse);
}

#[test]
fn properties_parse_in_any_order_with_optional_with_tag() {
    let builder = registry()
        .from_sql(
            "create warehouse wh comment = 'etl' with tag (team = 'data') \
             auto_suspend = 60 warehouse_size = medium",
        )
        .expect("warehouse DDL should load");
    let mut graph = Graph::new();
    let wh = graph.insert(builder).expect("warehouse inserts");

    assert_eq!(
        graph
            .create_sql(wh, CreateOptions::default())
            .expect("warehouse create renders"),
        "CREATE WAREHOUSE WH WAREHOUSE_SIZE = MEDIUM AUTO_SUSPEND = 60 \
         TAG (team = 'data') COMMENT = 'etl'"
    );
}

#[test]
fn invalid_enum_tokens_are_not_coerced() {
    let err = registry()
        .from_sql("CREATE ACCOUNT acme EDITION = PLATINUM")
        .expect_err("unknown edition should fail");

    assert!(matches!(
        err,
        Error::InvalidEnumValue { ref kind, ref value, .. } if kind == "Account" && value == "PLATINUM"
    ));
}

#[test]
fn export_serializes_resolved_definition() {
    let mut graph = Graph::new();
    let wh = graph
        .from_sql("CREATE WAREHOUSE wh INITIALLY_SUSPENDED = TRUE COMMENT = 'bi'")
        .expect("warehouse DDL should load");
    graph
        .set_link(wh, "owner", "sysadmin")
        .expect("owner link is declared");

    let export = graph.export(wh).expect("warehouse exports");
    let value = serde_json::to_value(export.clone().fetchable()).expect("export serializes");

    assert_eq!(
        value,
        json!({
            "kind": "warehouse",
            "name": "WH",
            "links": { "owner": "SYSADMIN" },
            "props": {
                "auto_resume": true,
                "auto_suspend": 600,
                "comment": "bi",
                "enable_query_acceleration": false,
                "query_acceleration_max_scale_factor": 8,
                "warehouse_size": "XSMALL",
            },
        })
    );
    assert_eq!(
        export.props.get("initially_suspended"),
        Some(&PropValue::Bool(true))
    );
}

#[test]
fn database_export_carries_the_default_owner() {
    let mut graph = Graph::new();
    let db = graph
        .from_sql("CREATE DATABASE db1")
        .expect("database DDL should load");
    let s1 = graph
        .from_sql("CREATE SCHEMA db1.s1")
        .expect("schema DDL should load");

    for id in [db, s1] {
        let export = graph.export(id).expect("definition exports");
        let value = serde_json::to_value(export).expect("export serializes");

        assert_eq!(value["links"], json!({ "owner": "SYSADMIN" }));
    }
}
