//! Configuration loading and output folder resolution
//!
//! Provides the TOML configuration file model shared by the MEXS binaries
//! and the multi-tier resolution of the output folder:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable consulted when no CLI output folder is given
pub const OUTPUT_FOLDER_ENV: &str = "MEXS_OUTPUT_FOLDER";

/// Compiled default output folder, relative to the working directory
pub const DEFAULT_OUTPUT_FOLDER: &str = "outputs";

/// Logging configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter: "error", "warn", "info", "debug" or "trace"
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// TOML configuration file model
///
/// All keys are optional; absent keys fall back to compiled defaults so a
/// missing config file is never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Output folder for generated reports and tables
    pub output_folder: Option<String>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Base URL of the KEGG REST service
    pub kegg_base_url: Option<String>,

    /// KEGG request timeout in seconds
    pub kegg_timeout_secs: Option<u64>,

    /// Minimum interval between KEGG requests in milliseconds
    pub kegg_rate_limit_ms: Option<u64>,

    /// Host organism code used for native gene coverage (e.g. "sce")
    pub host_organism: Option<String>,

    /// Path to a JSON file replacing the built-in product class taxonomy
    pub taxonomy_file: Option<String>,

    /// Path to a JSON file replacing the built-in curated gene-role tables
    pub expert_tables_file: Option<String>,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            output_folder: None,
            logging: LoggingConfig::default(),
            kegg_base_url: None,
            kegg_timeout_secs: None,
            kegg_rate_limit_ms: None,
            host_organism: None,
            taxonomy_file: None,
            expert_tables_file: None,
        }
    }
}

/// Load the TOML configuration
///
/// An explicitly supplied path must exist and parse; that failure is a
/// configuration error. Without an explicit path the platform config file
/// (`<config dir>/mexs/config.toml`) is used when present, and compiled
/// defaults otherwise.
pub fn load_toml_config(explicit_path: Option<&Path>) -> Result<TomlConfig> {
    let path = match explicit_path {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("No config file found, using compiled defaults");
                return Ok(TomlConfig::default());
            }
        },
    };

    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::Config(format!("Read config failed ({}): {}", path.display(), e)))?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse config failed ({}): {}", path.display(), e)))?;

    debug!(path = %path.display(), "Loaded TOML config");
    Ok(config)
}

/// Default platform config file path (`<config dir>/mexs/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mexs").join("config.toml"))
}

/// Resolve the output folder following the priority order:
/// 1. Command-line argument
/// 2. `MEXS_OUTPUT_FOLDER` environment variable
/// 3. `output_folder` key in the TOML config
/// 4. Compiled default (`outputs`)
pub fn resolve_output_folder(cli_arg: Option<&str>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    if let Ok(path) = std::env::var(OUTPUT_FOLDER_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &config.output_folder {
        return PathBuf::from(path);
    }

    PathBuf::from(DEFAULT_OUTPUT_FOLDER)
}

/// Creates the resolved output folder at startup
pub struct OutputFolderInitializer {
    folder: PathBuf,
}

impl OutputFolderInitializer {
    pub fn new(folder: PathBuf) -> Self {
        Self { folder }
    }

    /// Create the output folder (and parents) if missing
    pub fn ensure_directory_exists(&self) -> Result<()> {
        if !self.folder.exists() {
            std::fs::create_dir_all(&self.folder)?;
            debug!(folder = %self.folder.display(), "Created output folder");
        }
        Ok(())
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }
}
