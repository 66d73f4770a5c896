mod common;

use std::fs;

use predicates::prelude::*;
use tempfile::TempDir;

use common::{depsets_cmd, global_config, umbrella};

#[test]
fn test_graph_writes_default_path() {
    let tmp = TempDir::new().unwrap();
    let app = umbrella(tmp.path());

    depsets_cmd(tmp.path())
        .current_dir(&app)
        .args(["graph"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote"));

    let dot = fs::read_to_string(app.join("target/dependency-sets.dot")).unwrap();
    assert!(dot.contains("[label=\"com.example:app:1.0.0\", shape=doubleoctagon]"));
    assert!(dot.contains("[label=\"com.example:core\", shape=ellipse]"));
    assert!(dot.contains("[label=\"com.example:core:0.3.0\", shape=box]"));
    assert!(dot.contains("[label=\"testing\", shape=ellipse]"));
    assert!(!dot.contains("missing-set"));
}

#[test]
fn test_graph_output_flag() {
    let tmp = TempDir::new().unwrap();
    let app = umbrella(tmp.path());
    let out = tmp.path().join("graphs/app.dot");

    depsets_cmd(tmp.path())
        .current_dir(&app)
        .args(["graph", "--profile", "dev", "--output"])
        .arg(&out)
        .assert()
        .success();

    assert!(fs::read_to_string(&out).unwrap().starts_with("digraph"));
}

#[test]
fn test_graph_output_from_global_config() {
    let tmp = TempDir::new().unwrap();
    let app = umbrella(tmp.path());
    global_config(tmp.path(), "[graph]\noutput = \"docs/sets.dot\"\n");

    depsets_cmd(tmp.path())
        .current_dir(&app)
        .args(["graph"])
        .assert()
        .success();

    assert!(app.join("docs/sets.dot").is_file());
    assert!(!app.join("target/dependency-sets.dot").exists());
}
