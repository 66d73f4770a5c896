#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;

#[allow(deprecated)]
pub fn depsets_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("depsets").unwrap();
    cmd.env("HOME", home).env_remove("RUST_LOG");
    cmd
}

const CATALOG: &str = r#"
logging = ["org.slf4j:slf4j-api:2.0.9", "ch.qos.logback:logback-classic:1.4.14"]

[web]
dependencies = ["io.ktor:ktor-server-core:2.3.7", "io.ktor:ktor-server-netty:2.3.7"]
extends = ["logging"]

[testing]
dependencies = [
    "junit:junit:4.13.2",
    { group = "io.mockk", artifact = "mockk", version = "1.13.8", scope = "test" },
]
"#;

fn write(path: PathBuf, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Lay out an umbrella with `app`, `core` and `libs/http` modules and a
/// shared catalog. Returns the `app` module directory.
pub fn umbrella(root: &Path) -> PathBuf {
    write(
        root.join("Project.toml"),
        r#"
[project]
group = "com.example"
name = "umbrella"
version = "1.0.0"

[modules]
members = ["app", "core", "libs/*"]
"#,
    );
    write(root.join("dependency-sets.toml"), CATALOG);
    write(
        root.join("app/Project.toml"),
        r#"
[project]
group = "com.example"
name = "app"
version = "1.0.0"
dependency-sets = ["web", "com.example:core"]
dependencies = ["org.slf4j:slf4j-api:2.0.7"]

[[profiles]]
name = "dev"
dependency-sets = ["testing", "missing-set"]
dependencies = ["junit:junit:4.12"]
"#,
    );
    write(
        root.join("core/Project.toml"),
        r#"
[project]
group = "com.example"
name = "core"
version = "0.3.0"
dependency-sets = ["logging"]
dependencies = ["org.jetbrains.kotlin:kotlin-stdlib:1.9.22"]
"#,
    );
    write(
        root.join("libs/http/Project.toml"),
        r#"
[project]
group = "com.example"
name = "http"
version = "0.2.0"
dependency-sets = ["web"]
"#,
    );
    root.join("app")
}

/// Write the global config under `home`.
pub fn global_config(home: &Path, content: &str) {
    write(home.join(".depsets/config.toml"), content);
}
