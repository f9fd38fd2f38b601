// Test harness for fwctl integration tests.
//
// ## How to add new fixtures
// 1. Capture the per-host results a collector produced as JSON
//    (hostname → list of {"module": {...}, "info"/"error": ...})
// 2. Save it to tests/fixtures/<name>.json
// 3. Pass `fixture("<name>")` as the FILE argument
//
// ## How to write new tests
// 1. Create an environment: `let env = TestEnv::new();`
// 2. Run the binary: `env.command().args(["query", &fixture("query_mixed")]).assert()...`

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Isolated config directory for one test.
pub struct TestEnv {
    pub temp_dir: TempDir,
}

impl TestEnv {
    /// Environment without a config file.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        Self { temp_dir }
    }

    /// Environment with the given config.toml contents.
    pub fn with_config(contents: &str) -> Self {
        let env = Self::new();
        std::fs::write(env.config_path(), contents).expect("failed to write config");
        env
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp_dir.path().join("config.toml")
    }

    /// Build an assert_cmd Command pre-configured with the test environment.
    #[allow(deprecated)]
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("fwctl").expect("binary not found");
        cmd.env("FWCTL_CONFIG_DIR", self.temp_dir.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Absolute path of a fixture file, as a string ready for `.arg()`.
pub fn fixture(name: &str) -> String {
    fixtures_dir()
        .join(format!("{}.json", name))
        .to_string_lossy()
        .into_owned()
}

pub fn read_fixture(name: &str) -> String {
    let path = fixture(name);
    std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("failed to read fixture: {}", path))
}
