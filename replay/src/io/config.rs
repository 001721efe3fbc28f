//! Replay configuration loaded from a JSON file (`config.json` by default).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Replay configuration (JSON).
///
/// Edited by humans. Both command fields are raw shell command lines,
/// executed with a commit's checkout as the working directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReplayConfig {
    /// Shell command that builds a checkout.
    pub build_command: String,
    /// Shell command that runs the built checkout; its combined output is
    /// captured to the commit's log file.
    pub run_command: String,
    /// Wall-clock bound in seconds for each build/run command. Unset means
    /// wait forever.
    #[serde(default)]
    pub command_timeout_secs: Option<u64>,
}

impl ReplayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.build_command.trim().is_empty() {
            return Err(anyhow!("build_command must not be empty"));
        }
        if self.run_command.trim().is_empty() {
            return Err(anyhow!("run_command must not be empty"));
        }
        if self.command_timeout_secs == Some(0) {
            return Err(anyhow!("command_timeout_secs must be > 0 when set"));
        }
        Ok(())
    }
}

/// Load config from a JSON file.
///
/// A missing file is an error; the tool refuses to start without one.
pub fn load_config(path: &Path) -> Result<ReplayConfig> {
    if !path.exists() {
        return Err(anyhow!("config file {} not found", path.display()));
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ReplayConfig =
        serde_json::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Write config to disk as pretty-printed JSON.
pub fn write_config(path: &Path, cfg: &ReplayConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = serde_json::to_string_pretty(cfg).context("serialize config json")?;
    buf.push('\n');
    fs::write(path, buf).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(build: &str, run: &str) -> ReplayConfig {
        ReplayConfig {
            build_command: build.to_string(),
            run_command: run.to_string(),
            command_timeout_secs: None,
        }
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = load_config(&temp.path().join("config.json")).unwrap_err();
        assert!(err.to_string().contains("config.json"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn load_parses_a_minimal_config() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.json");
        fs::write(
            &path,
            r#"{"build_command": "make", "run_command": "./app"}"#,
        )
        .expect("write");

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.build_command, "make");
        assert_eq!(cfg.run_command, "./app");
        assert_eq!(cfg.command_timeout_secs, None);
    }

    #[test]
    fn load_tolerates_unknown_fields() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.json");
        fs::write(
            &path,
            r#"{"build_command": "make", "run_command": "./app", "notes": "scratch"}"#,
        )
        .expect("write");

        load_config(&path).expect("load");
    }

    #[test]
    fn load_rejects_a_missing_required_field() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.json");
        fs::write(&path, r#"{"build_command": "make"}"#).expect("write");

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn validate_rejects_empty_commands() {
        let err = config("  ", "./app").validate().unwrap_err();
        assert!(err.to_string().contains("build_command"));
        let err = config("make", "").validate().unwrap_err();
        assert!(err.to_string().contains("run_command"));
    }

    #[test]
    fn validate_rejects_a_zero_timeout() {
        let mut cfg = config("make", "./app");
        cfg.command_timeout_secs = Some(0);
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("command_timeout_secs"));
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.json");
        let cfg = config("make", "./app");
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }
}
