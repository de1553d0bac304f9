use std::fs;
use std::path::Path;

use depgraph::export::{export_to_string, ExportFormat, GraphReport};
use depgraph::graph::GraphError;
use depgraph::ingest::{build_graph, IngestOptions};
use depgraph::scanner::{scan, ScanOptions};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// app -> a, app -> b; a -> b at a different range; b nested copy under a
fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "package.json",
        r#"{
            "name": "app",
            "version": "0.1.0",
            "dependencies": {"a": "^1.0.0", "B": "^2.0.0"},
            "devDependencies": {"c": "*"}
        }"#,
    );
    write(
        root,
        "node_modules/a/package.json",
        r#"{"name": "a", "version": "1.0.0", "dependencies": {"b": ">=2.3.0 <3"}}"#,
    );
    write(
        root,
        "node_modules/b/package.json",
        r#"{"name": "b", "version": "2.3.1"}"#,
    );
    write(
        root,
        "node_modules/a/node_modules/b/package.json",
        r#"{"name": "b", "version": "1.9.0"}"#,
    );
    write(
        root,
        "node_modules/c/package.json",
        r#"{"name": "c", "version": "0.0.1"}"#,
    );
    dir
}

#[test]
fn scan_and_query_installed_tree() {
    let dir = project();
    let records = scan(dir.path(), &ScanOptions::default()).unwrap();
    let (graph, report) = build_graph(&records, &IngestOptions::default()).unwrap();

    assert_eq!(graph.list_nodes(), vec!["app", "a", "b", "c"]);
    assert_eq!(graph.get_dependency_version("b").unwrap(), "2.3.1");
    assert_eq!(
        graph.get_dependency_aliases("b").unwrap(),
        ["2.3.1", "^2.0.0", ">=2.3.0 <3"]
    );
    assert_eq!(graph.get_dependency_data("a").unwrap()["name"], "a");

    let deps = graph.list_dependencies_of_dependency("APP").unwrap();
    assert_eq!(deps.len(), 2);
    assert_eq!(deps["a"], "^1.0.0");
    // Edge keys keep the casing they were declared with
    assert_eq!(deps["B"], "^2.0.0");
    assert!(graph.has_dependency("app", "b"));

    let dependants = graph.list_dependants_of_dependency("b");
    assert_eq!(dependants["app"], "^2.0.0");
    assert_eq!(dependants["a"], ">=2.3.0 <3");

    assert!(!graph.has_dependency("app", "c"));
    assert_eq!(report.duplicates.len(), 1);
    assert_eq!(report.duplicates[0].to_string(), "b@1.9.0");
    assert_eq!(
        graph.transitive_dependencies("app").unwrap(),
        vec!["a", "b"]
    );
}

#[test]
fn dev_dependencies_of_root_are_optional() {
    let dir = project();
    let records = scan(dir.path(), &ScanOptions::default()).unwrap();
    let (graph, _) = build_graph(&records, &IngestOptions { include_dev: true }).unwrap();

    assert_eq!(graph.list_dependencies("app").unwrap()["c"], "*");
    assert_eq!(graph.get_dependency_aliases("c").unwrap(), ["0.0.1", "*"]);
}

#[test]
fn unknown_package_is_not_found() {
    let dir = project();
    let records = scan(dir.path(), &ScanOptions::default()).unwrap();
    let (graph, _) = build_graph(&records, &IngestOptions::default()).unwrap();

    assert_eq!(
        graph.list_dependencies("left-pad").unwrap_err(),
        GraphError::NotFound("left-pad".to_string())
    );
    assert!(graph.list_dependants("left-pad").is_empty());
}

#[test]
fn report_exports_as_json() {
    let dir = project();
    let records = scan(dir.path(), &ScanOptions::default()).unwrap();
    let (graph, ingest) = build_graph(&records, &IngestOptions::default()).unwrap();
    let report = GraphReport::new(Some("app".to_string()), &graph, ingest).unwrap();

    let json = export_to_string(ExportFormat::Json, &report).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed["summary"]["packages"], 4);
    assert_eq!(parsed["summary"]["edges"], 3);
    assert_eq!(parsed["duplicates"][0]["version"], "1.9.0");
}
