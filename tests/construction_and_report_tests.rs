mod common;

use codemetrics::config::EngineConfig;
use codemetrics::source::{MethodDeclaration, TypeDeclaration};
use codemetrics::{compute_metrics, Error, NodeKind, ProjectReport, TreeBuilder};
use common::*;
use indoc::indoc;
use pretty_assertions::assert_eq;

/// One type as a parser would hand it over.
const POINT_JSON: &str = indoc! {r#"
    [
      {
        "package": "geo",
        "simple_name": "Point",
        "modifiers": { "visibility": "Public", "is_abstract": false, "is_static": false, "is_final": false },
        "fields": [
          { "name": "x", "type_ref": { "name": "int" } }
        ],
        "methods": [
          {
            "name": "getX",
            "return_type": { "name": "int" },
            "body": { "statements": [ { "Return": { "Name": "x" } } ] },
            "attributes": { "source.line.begin": "4", "source.line.end": "6" }
          },
          {
            "name": "isOrigin",
            "return_type": { "name": "boolean" },
            "body": {
              "statements": [
                { "If": { "condition": { "Name": "x" }, "then_branch": { "Return": { "Literal": "false" } } } },
                { "Return": { "Literal": "true" } }
              ]
            },
            "attributes": { "source.line.begin": "8", "source.line.end": "13" }
          }
        ],
        "attributes": { "source.file": "geo/Point.java", "source.line.begin": "1", "source.line.end": "14" }
      }
    ]
"#};

fn point_project() -> codemetrics::Project {
    let declarations: Vec<TypeDeclaration> =
        serde_json::from_str(POINT_JSON).expect("declarations deserialize");
    build(declarations)
}

#[test]
fn test_parser_output_deserializes_into_tree() {
    let project = point_project();
    let point = type_node(&project, "geo", "Point");

    let methods: Vec<_> = project.node(point).children().map(|m| m.name().to_string()).collect();
    assert_eq!(methods, vec!["int getX()", "boolean isOrigin()"]);
    assert_eq!(project.node(point).attribute("source.file"), Some("geo/Point.java"));
}

#[test]
fn test_every_level_is_measured() {
    let project = point_project();
    let summary = compute_metrics(&project, &EngineConfig::default()).unwrap();
    assert!(summary.is_clean());

    let report = ProjectReport::from_project(&project, 6);
    let get_x = report.find(&["geo", "Point", "int getX()"]).unwrap();
    assert_eq!(get_x.kind, NodeKind::Method);
    assert_eq!(get_x.metric("VG"), Some("1"));
    assert_eq!(get_x.metric("LOC"), Some("3"));
    assert_eq!(get_x.metric("NOP"), Some("0"));

    let is_origin = report.find(&["geo", "Point", "boolean isOrigin()"]).unwrap();
    assert_eq!(is_origin.metric("VG"), Some("2"));
    assert_eq!(is_origin.metric("NBD"), Some("2"));

    let point = report.find(&["geo", "Point"]).unwrap();
    assert_eq!(point.metric("WMC"), Some("3"));
    assert_eq!(point.metric("NOM"), Some("2"));
    assert_eq!(point.metric("NOF"), Some("1"));
    assert_eq!(point.metric("LOC"), Some("14"));
    assert_eq!(point.metric("DIT"), Some("1"));

    let geo = report.find(&["geo"]).unwrap();
    assert_eq!(geo.metric("NOT"), Some("1"));
    assert_eq!(geo.metric("TLOC"), Some("14"));

    assert_eq!(report.root.metric("NOPK"), Some("1"));
    assert_eq!(report.root.metric("TLOC"), Some("14"));
}

#[test]
fn test_report_json_is_stable() {
    let render = || {
        let project = point_project();
        compute_metrics(&project, &EngineConfig::default()).unwrap();
        ProjectReport::from_project(&project, 4).to_json().unwrap()
    };
    let first = render();
    assert_eq!(first, render());

    let value: serde_json::Value = serde_json::from_str(&first).unwrap();
    let ty = &value["root"]["children"][0]["children"][0];
    assert_eq!(ty["kind"], "type");
    assert_eq!(ty["name"], "Point");
    assert_eq!(ty["attributes"]["source.file"], "geo/Point.java");
    assert_eq!(value["significant_digits"], 4);
}

#[test]
fn test_empty_project_name_is_rejected() {
    let err = TreeBuilder::new("  ").build(vec![]).unwrap_err();
    assert!(matches!(err, Error::Construction { .. }));
}

#[test]
fn test_duplicate_types_abort_the_build() {
    let err = TreeBuilder::new("broken")
        .build(vec![
            TypeDeclaration::class(Some("p"), "Twice"),
            TypeDeclaration::class(Some("p"), "Twice"),
        ])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Tree construction error in `p.Twice`: type declared more than once"
    );
}

#[test]
fn test_duplicate_signatures_abort_the_build() {
    let err = TreeBuilder::new("broken")
        .build(vec![TypeDeclaration::class(Some("p"), "Twice")
            .with_method(method("run", vec![]))
            .with_method(method("run", vec![]))])
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Tree construction error in `Twice`: duplicate method signature `void run()`"
    );
}

#[test]
fn test_nameless_members_abort_the_build() {
    let err = TreeBuilder::new("broken")
        .build(vec![
            TypeDeclaration::class(Some("p"), "Fine"),
            TypeDeclaration::class(Some("p"), "Bad").with_method(MethodDeclaration::method("", primitive("int"))),
        ])
        .unwrap_err();
    assert!(err.to_string().contains("method with empty name"));
}

#[test]
fn test_same_type_name_in_two_packages() {
    let project = build(vec![
        TypeDeclaration::class(Some("a"), "Util"),
        TypeDeclaration::class(Some("b"), "Util"),
    ]);
    assert_ne!(type_node(&project, "a", "Util"), type_node(&project, "b", "Util"));
    assert_eq!(project.tree().nodes_of_kind(NodeKind::Type).len(), 2);
}
