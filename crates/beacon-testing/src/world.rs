//! TestWorld pattern for declarative integration test setup.

use anyhow::Result;
use assert_cmd::Command;
use beacon_core::{FsStore, Store};
use beacon_types::{Config, Profile};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated config directory and working directory for one test.
///
/// # Example
/// ```no_run
/// use beacon_testing::TestWorld;
///
/// let world = TestWorld::new();
/// let output = world.run(&["report"]).unwrap();
/// assert!(!output.status.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    cwd: PathBuf,
    config_dir: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base_path = temp_dir.path().to_path_buf();
        let config_dir = base_path.join(".config").join("figma-beacon");
        std::fs::create_dir_all(&config_dir).expect("Failed to create config dir");

        Self {
            cwd: base_path,
            temp_dir,
            config_dir,
            env_vars: HashMap::new(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn store(&self) -> FsStore {
        FsStore::new(&self.config_dir)
    }

    pub fn with_config(self, config: &Config) -> Self {
        self.store()
            .save_config(config)
            .expect("Failed to write config");
        self
    }

    pub fn with_profile(self, profile: &Profile) -> Self {
        self.store()
            .save_profile(profile)
            .expect("Failed to write profile");
        self
    }

    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env_vars.insert(key.to_string(), value.to_string());
        self
    }

    /// Build the CLI command bound to this world's config directory.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("figma-beacon").expect("Failed to find figma-beacon binary");
        cmd.current_dir(&self.cwd)
            .arg("--config-dir")
            .arg(&self.config_dir)
            .env_remove("FIGMA_BEACON_HOME")
            .env_remove("RUST_LOG");
        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Result<std::process::Output> {
        let mut cmd = self.command();
        cmd.args(args);
        Ok(cmd.output()?)
    }
}
