//! Shared helpers for driving the binary and inspecting written YAML.

#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

pub fn ngrokcfg_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_ngrokcfg"));
    cmd.env_remove("NGROKCFG_LOG");
    cmd
}

/// Run one interactive session in `cwd`, feeding `input` on stdin.
pub fn run_session(cwd: &Path, input: &str) -> Output {
    let mut child = ngrokcfg_cmd()
        .current_dir(cwd)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn ngrokcfg");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");

    child.wait_with_output().expect("Failed to wait for ngrokcfg")
}

/// Untyped view of a written file, so tests check the on-disk shape
/// rather than what the crate's own types accept.
pub struct Yaml(serde_yaml::Value);

impl Yaml {
    pub fn load(path: &Path) -> Self {
        let content = std::fs::read_to_string(path).expect("Failed to read config");
        Self(serde_yaml::from_str(&content).expect("Failed to parse config"))
    }

    /// Value at `keys`, or `Null` when any key is missing.
    pub fn get(&self, keys: &[&str]) -> serde_yaml::Value {
        let mut current = &self.0;
        for key in keys {
            match current.get(*key) {
                Some(next) => current = next,
                None => return serde_yaml::Value::Null,
            }
        }
        current.clone()
    }

    pub fn at(&self, keys: &[&str]) -> Yaml {
        Yaml(self.get(keys))
    }

    /// Mapping keys in document order.
    pub fn keys(&self) -> Vec<String> {
        self.0
            .as_mapping()
            .map(|m| m.keys().filter_map(|k| k.as_str().map(str::to_string)).collect())
            .unwrap_or_default()
    }
}

impl From<serde_yaml::Value> for Yaml {
    fn from(value: serde_yaml::Value) -> Self {
        Self(value)
    }
}
