//! Configuration module
//!
//! The run configuration is assembled once at startup and passed by
//! reference; nothing reads ambient global state after that.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::Args;

/// Interpreter used when neither the CLI nor a defaults file names one
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Optional defaults loaded from a JSON or YAML file
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDefaults {
    /// Default worker budget
    pub jobs: Option<usize>,

    /// Default script interpreter
    pub shell: Option<String>,
}

impl FileDefaults {
    /// Load defaults from file, dispatching on the extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read config file")?;

        let defaults: Self = if path
            .as_ref()
            .extension()
            .map(|e| e == "yaml" || e == "yml")
            .unwrap_or(false)
        {
            serde_yaml::from_str(&content).context("Failed to parse YAML config")?
        } else {
            serde_json::from_str(&content).context("Failed to parse JSON config")?
        };

        Ok(defaults)
    }
}

/// Immutable configuration for one run
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Maximum number of concurrently running tests
    pub jobs: usize,

    /// Output directory for logs and the summary
    pub outdir: PathBuf,

    /// Interpreter for test scripts
    pub shell: String,

    /// Glob patterns as supplied on the command line
    pub patterns: Vec<String>,

    /// Full invocation argv, recorded in the run summary
    pub argv: Vec<String>,
}

impl RunConfig {
    /// Build the run configuration from CLI arguments, falling back to file
    /// defaults where a flag was not given and to built-in defaults last.
    pub fn from_args(args: &Args, argv: Vec<String>) -> Result<Self> {
        let defaults = match &args.config {
            Some(path) => FileDefaults::load(path)?,
            None => FileDefaults::default(),
        };

        let jobs = args
            .jobs
            .or(defaults.jobs)
            .unwrap_or_else(num_cpus::get)
            .max(1);
        let shell = args
            .shell
            .clone()
            .or(defaults.shell)
            .unwrap_or_else(|| DEFAULT_SHELL.to_string());

        Ok(Self {
            jobs,
            outdir: args.outdir.clone(),
            shell,
            patterns: args.patterns.clone(),
            argv,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    fn argv() -> Vec<String> {
        vec!["partest".to_string()]
    }

    #[test]
    fn test_builtin_defaults() {
        let args = Args::parse_from(["partest", "-o", "out", "t*.sh"]);
        let config = RunConfig::from_args(&args, argv()).unwrap();

        assert_eq!(config.shell, DEFAULT_SHELL);
        assert!(config.jobs >= 1);
    }

    #[test]
    fn test_load_json_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("defaults.json");
        std::fs::write(&path, r#"{"jobs": 7, "shell": "/bin/dash"}"#).unwrap();

        let defaults = FileDefaults::load(&path).unwrap();
        assert_eq!(defaults.jobs, Some(7));
        assert_eq!(defaults.shell.as_deref(), Some("/bin/dash"));
    }

    #[test]
    fn test_load_yaml_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("defaults.yaml");
        std::fs::write(&path, "jobs: 3\n").unwrap();

        let defaults = FileDefaults::load(&path).unwrap();
        assert_eq!(defaults.jobs, Some(3));
        assert_eq!(defaults.shell, None);
    }

    #[test]
    fn test_cli_flag_wins_over_file_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("defaults.json");
        std::fs::write(&path, r#"{"jobs": 7}"#).unwrap();

        let args = Args::parse_from([
            "partest",
            "-j",
            "2",
            "-c",
            path.to_str().unwrap(),
            "-o",
            "out",
            "t*.sh",
        ]);
        let config = RunConfig::from_args(&args, argv()).unwrap();
        assert_eq!(config.jobs, 2);
    }

    #[test]
    fn test_missing_config_file_is_fatal() {
        let args = Args::parse_from(["partest", "-c", "/no/such/file.json", "-o", "out", "t*.sh"]);
        assert!(RunConfig::from_args(&args, argv()).is_err());
    }
}
