use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

use crate::analysis::Tuning;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            engine: EngineConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Analyzer tuning knobs
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Maximum edges per person-to-person path
    #[serde(default = "default_max_path_hops")]
    pub max_path_hops: usize,
    /// How many strongest/weakest paths to report
    #[serde(default = "default_top_paths")]
    pub top_paths: usize,
    /// How many critical nodes to report
    #[serde(default = "default_top_critical_nodes")]
    pub top_critical_nodes: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_path_hops: default_max_path_hops(),
            top_paths: default_top_paths(),
            top_critical_nodes: default_top_critical_nodes(),
        }
    }
}

/// CLI output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON payloads
    #[serde(default = "default_pretty")]
    pub pretty: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            pretty: default_pretty(),
            log_level: default_log_level(),
        }
    }
}

fn default_max_path_hops() -> usize {
    4
}

fn default_top_paths() -> usize {
    3
}

fn default_top_critical_nodes() -> usize {
    5
}

fn default_pretty() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file
    ///
    /// Looks for config file in this order:
    /// 1. Path specified in SYNASTRY_CONFIG environment variable
    /// 2. ./config.toml in current directory
    ///
    /// A missing file is not an error (the engine runs with built-in
    /// defaults), but a file that exists and fails to parse or validate is.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("SYNASTRY_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.toml"));

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.engine.max_path_hops == 0 {
            anyhow::bail!("engine.max_path_hops must be greater than 0");
        }

        // The graph holds a few dozen nodes; deeper search only multiplies
        // near-duplicate routes.
        if self.engine.max_path_hops > 8 {
            anyhow::bail!("engine.max_path_hops must be at most 8");
        }

        if self.engine.top_paths == 0 {
            anyhow::bail!("engine.top_paths must be greater than 0");
        }

        if self.engine.top_critical_nodes == 0 {
            anyhow::bail!("engine.top_critical_nodes must be greater than 0");
        }

        Ok(())
    }

    /// Analyzer tuning derived from the engine section
    pub fn tuning(&self) -> Tuning {
        Tuning {
            max_path_hops: self.engine.max_path_hops,
            top_paths: self.engine.top_paths,
            top_critical_nodes: self.engine.top_critical_nodes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serialize config tests that mutate process-wide env so they don't race.
    static CONFIG_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn with_config_env(config_path: &std::path::Path, f: impl FnOnce()) {
        let original = std::env::var("SYNASTRY_CONFIG").ok();
        std::env::set_var("SYNASTRY_CONFIG", config_path.to_str().unwrap());
        f();
        std::env::remove_var("SYNASTRY_CONFIG");
        if let Some(val) = original {
            std::env::set_var("SYNASTRY_CONFIG", val);
        }
    }

    #[test]
    fn test_config_load_success() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(
            &config_path,
            r#"
[engine]
max_path_hops = 5
top_paths = 2

[output]
pretty = false
log_level = "debug"
"#,
        )
        .unwrap();
        with_config_env(&config_path, || {
            let config = Config::load().unwrap();
            assert_eq!(config.engine.max_path_hops, 5);
            assert_eq!(config.engine.top_paths, 2);
            // unset field falls back to its default
            assert_eq!(config.engine.top_critical_nodes, 5);
            assert!(!config.output.pretty);
            assert_eq!(config.output.log_level, "debug");
        });
    }

    #[test]
    fn test_config_missing_file_uses_defaults() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("absent.toml");
        with_config_env(&config_path, || {
            let config = Config::load().unwrap();
            assert_eq!(config.engine.max_path_hops, 4);
            assert_eq!(config.engine.top_paths, 3);
            assert!(config.output.pretty);
        });
    }

    #[test]
    fn test_config_rejects_zero_hops() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[engine]\nmax_path_hops = 0\n").unwrap();
        with_config_env(&config_path, || {
            let err = Config::load().unwrap_err();
            assert!(err.to_string().contains("max_path_hops"));
        });
    }

    #[test]
    fn test_config_rejects_excessive_hops() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "[engine]\nmax_path_hops = 20\n").unwrap();
        with_config_env(&config_path, || {
            assert!(Config::load().is_err());
        });
    }

    #[test]
    fn test_config_rejects_bad_toml() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "not valid toml [[").unwrap();
        with_config_env(&config_path, || {
            assert!(Config::load().is_err());
        });
    }

    #[test]
    fn test_tuning_mirrors_engine_section() {
        let config = Config::default();
        let tuning = config.tuning();
        assert_eq!(tuning.max_path_hops, 4);
        assert_eq!(tuning.top_paths, 3);
        assert_eq!(tuning.top_critical_nodes, 5);
    }
}
