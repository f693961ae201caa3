use crate::generation::OutputKind;
use clap::Parser;
use config::{
    Config as ConfigCrate, // Need this for builder
    ConfigError as ConfigCrateError,
    Environment,
    File,
    Map,
    Source,
    Value,
};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 120;
const DEFAULT_TARGET_PLATFORM: &str = "Interlude (C6)";
const DEFAULT_MAX_UNDO: usize = 24;
const DEFAULT_AUTOSAVE: bool = true;
const DEFAULT_LOG_LEVEL: &str = "info";
const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] ConfigCrateError),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

// Optional fields allow for layered config (defaults -> file -> env -> args).
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
struct FileConfig {
    data_dir: Option<PathBuf>,
    model: Option<String>,
    api_base_url: Option<String>,
    api_key: Option<String>,
    generation_timeout_secs: Option<u64>,
    target_platform: Option<String>,
    max_undo_steps: Option<usize>,
    autosave: Option<bool>,
    log_level: Option<String>,
}

// Fields are non-optional as they will always have a value (default or overridden).
#[derive(Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub model: String,
    pub api_base_url: String,
    pub api_key: Option<String>,
    pub generation_timeout_secs: u64,
    pub target_platform: String,
    pub max_undo_steps: usize,
    pub autosave: bool,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_dir: default_data_dir(),
            model: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: None,
            generation_timeout_secs: DEFAULT_GENERATION_TIMEOUT_SECS,
            target_platform: DEFAULT_TARGET_PLATFORM.to_string(),
            max_undo_steps: DEFAULT_MAX_UNDO,
            autosave: DEFAULT_AUTOSAVE,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

// Keeps the API key out of `--debug-config` output and logs.
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("data_dir", &self.data_dir)
            .field("model", &self.model)
            .field("api_base_url", &self.api_base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("generation_timeout_secs", &self.generation_timeout_secs)
            .field("target_platform", &self.target_platform)
            .field("max_undo_steps", &self.max_undo_steps)
            .field("autosave", &self.autosave)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl AppConfig {
    pub fn generation_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.generation_timeout_secs)
    }

    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("gk-architect.log")
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Gatekeeper teleport menu architect", long_about = None)]
pub struct CliArgs {
    /// Path to a custom configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding the autosaved document and the log file
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Start from an exported document instead of the autosaved one
    #[arg(long)]
    pub import: Option<PathBuf>,

    /// Write the document to gk_config_<npcId>.json in this directory and exit
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Generate one artifact, print it to stdout and exit
    #[arg(long, value_enum)]
    pub generate: Option<OutputKind>,

    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub api_base_url: Option<String>,
    #[arg(long)]
    pub generation_timeout_secs: Option<u64>,
    #[arg(long)]
    pub target_platform: Option<String>,
    #[arg(long)]
    pub max_undo_steps: Option<usize>,
    #[arg(long)]
    pub autosave: Option<bool>,
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the resolved configuration and exit
    #[arg(long)]
    pub debug_config: bool,
}

pub fn load_config(args: &CliArgs) -> Result<AppConfig, ConfigError> {
    let env_source = Environment::with_prefix("GKA").separator("__");
    // Missing env vars are fine; a failed collect just means no overrides.
    let env_map: Map<String, Value> = env_source.collect().unwrap_or_else(|_| Map::new());

    let config_file = match &args.config {
        Some(path) => Some(path.clone()),
        None => default_config_file(),
    };

    let mut config = build_config_from_args(args, config_file, Some(env_map))?;
    if config.api_key.is_none() {
        config.api_key = api_key_from_env();
    }
    Ok(config)
}

// Separate function to allow testing with specific args and override sources
fn build_config_from_args(
    args: &CliArgs,
    config_file: Option<PathBuf>,
    override_source: Option<Map<String, Value>>,
) -> Result<AppConfig, ConfigError> {
    let mut config_builder = ConfigCrate::builder();

    if let Some(path) = config_file {
        config_builder = config_builder.add_source(File::from(path).required(false));
    }

    // Overrides (environment or a test map) win over the file
    if let Some(overrides) = override_source {
        for (key, value) in overrides {
            config_builder = config_builder.set_override(&key, value)?;
        }
    }

    let loaded: FileConfig = config_builder.build()?.try_deserialize()?;

    // args > overrides > file > defaults
    let config = AppConfig {
        data_dir: args
            .data_dir
            .clone()
            .or(loaded.data_dir)
            .unwrap_or_else(default_data_dir),
        model: args
            .model
            .clone()
            .or(loaded.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        api_base_url: args
            .api_base_url
            .clone()
            .or(loaded.api_base_url)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        api_key: loaded.api_key.filter(|key| !key.is_empty()),
        generation_timeout_secs: args
            .generation_timeout_secs
            .or(loaded.generation_timeout_secs)
            .unwrap_or(DEFAULT_GENERATION_TIMEOUT_SECS),
        target_platform: args
            .target_platform
            .clone()
            .or(loaded.target_platform)
            .unwrap_or_else(|| DEFAULT_TARGET_PLATFORM.to_string()),
        max_undo_steps: args
            .max_undo_steps
            .or(loaded.max_undo_steps)
            .unwrap_or(DEFAULT_MAX_UNDO),
        autosave: args
            .autosave
            .or(loaded.autosave)
            .unwrap_or(DEFAULT_AUTOSAVE),
        log_level: args
            .log_level
            .clone()
            .or(loaded.log_level)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
    };

    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.generation_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "generation_timeout_secs must be at least 1".to_string(),
        ));
    }
    if config.max_undo_steps == 0 {
        return Err(ConfigError::ValidationError(
            "max_undo_steps must be at least 1".to_string(),
        ));
    }
    if config.model.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "model must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "gk-architect")
}

pub fn default_config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
}

fn default_data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn api_key_from_env() -> Option<String> {
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|key| !key.is_empty())
}
