//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.commander/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;

use crate::Provider;
use crate::core::query::DEFAULT_MAX_QUERY_LEN;
use crate::inference::Tuning;
use crate::inference::providers::lmstudio::DEFAULT_LMSTUDIO_BASE_URL;
use crate::inference::providers::openai::{DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CommanderConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub lmstudio: LmStudioConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_provider: Option<Provider>,
    pub default_model: Option<String>,
    pub max_query_length: Option<usize>,
    pub request_timeout_secs: Option<u64>,
    pub theme: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LmStudioConfig {
    pub base_url: Option<String>,
}

/// Sampling overrides; anything unset falls back to [`Tuning::default`].
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CompletionConfig {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub frequency_penalty: Option<f32>,
    pub presence_penalty: Option<f32>,
    pub top_p: Option<f32>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_LMSTUDIO_MODEL: &str = "local-model";
pub const DEFAULT_THEME: &str = "default";

// ============================================================================
// Resolved Config (concrete values, no Options except the credential)
// ============================================================================

#[derive(Clone)]
pub struct ResolvedConfig {
    pub provider: Provider,
    pub model_name: String,
    /// `None` means "not configured"; the UI reports it instead of exiting.
    pub api_key: Option<String>,
    pub openai_base_url: String,
    pub lmstudio_base_url: String,
    pub tuning: Tuning,
    pub max_query_len: usize,
    pub request_timeout: Duration,
    pub theme: String,
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("provider", &self.provider)
            .field("model_name", &self.model_name)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("openai_base_url", &self.openai_base_url)
            .field("lmstudio_base_url", &self.lmstudio_base_url)
            .field("tuning", &self.tuning)
            .field("max_query_len", &self.max_query_len)
            .field("request_timeout", &self.request_timeout)
            .field("theme", &self.theme)
            .finish()
    }
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub provider: Option<Provider>,
    pub model: Option<String>,
    pub theme: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.commander/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".commander").join("config.toml"))
}

/// Load config from `~/.commander/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `CommanderConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<CommanderConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(CommanderConfig::default())
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<CommanderConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(CommanderConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: CommanderConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!(
        "Config: provider={:?}, model={:?}, theme={:?}",
        config.general.default_provider, config.general.default_model, config.general.theme
    );
    Ok(config)
}

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Commander Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_provider = "openai"        # "openai" or "lmstudio"
# default_model = "gpt-3.5-turbo-instruct"
# max_query_length = 156
# request_timeout_secs = 60
# theme = "default"                  # "default", "mono" or "neon"

# [openai]
# api_key = "sk-..."                 # Or set API_KEY / OPENAI_API_KEY
# base_url = "https://api.openai.com/v1"

# [lmstudio]
# base_url = "http://localhost:1234/v1"

# [completion]
# max_tokens = 450
# temperature = 0.0
# frequency_penalty = 0.2
# presence_penalty = 0.0
# top_p = 1.0
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_TEMPLATE) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &CommanderConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Provider: CLI → env → config → default
    let provider = cli
        .provider
        .or_else(|| {
            env_var("COMMANDER_PROVIDER").and_then(|s| match Provider::from_str(&s, true) {
                Ok(p) => Some(p),
                Err(e) => {
                    warn!("Ignoring COMMANDER_PROVIDER={s}: {e}");
                    None
                }
            })
        })
        .or(config.general.default_provider)
        .unwrap_or_default();

    // Model: CLI → env → config → provider default
    let model_name = cli
        .model
        .clone()
        .or_else(|| env_var("COMMANDER_MODEL"))
        .or_else(|| config.general.default_model.clone())
        .unwrap_or_else(|| match provider {
            Provider::OpenAi => DEFAULT_OPENAI_MODEL.to_string(),
            Provider::LmStudio => DEFAULT_LMSTUDIO_MODEL.to_string(),
        });

    // API key: env (API_KEY, then OPENAI_API_KEY) → config
    let api_key = env_var("API_KEY")
        .or_else(|| env_var("OPENAI_API_KEY"))
        .or_else(|| config.openai.api_key.clone())
        .filter(|k| !k.trim().is_empty());

    let openai_base_url = env_var("OPENAI_BASE_URL")
        .or_else(|| config.openai.base_url.clone())
        .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());

    let lmstudio_base_url = env_var("LM_STUDIO_BASE_URL")
        .or_else(|| config.lmstudio.base_url.clone())
        .unwrap_or_else(|| DEFAULT_LMSTUDIO_BASE_URL.to_string());

    let theme = cli
        .theme
        .clone()
        .or_else(|| env_var("COMMANDER_THEME"))
        .or_else(|| config.general.theme.clone())
        .unwrap_or_else(|| DEFAULT_THEME.to_string());

    ResolvedConfig {
        provider,
        model_name,
        api_key,
        openai_base_url,
        lmstudio_base_url,
        tuning: resolve_tuning(&config.completion),
        max_query_len: config
            .general
            .max_query_length
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_MAX_QUERY_LEN),
        request_timeout: Duration::from_secs(
            config
                .general
                .request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        ),
        theme,
    }
}

fn resolve_tuning(completion: &CompletionConfig) -> Tuning {
    let defaults = Tuning::default();
    Tuning {
        max_tokens: completion.max_tokens.unwrap_or(defaults.max_tokens),
        temperature: completion.temperature.unwrap_or(defaults.temperature),
        frequency_penalty: completion
            .frequency_penalty
            .unwrap_or(defaults.frequency_penalty),
        presence_penalty: completion
            .presence_penalty
            .unwrap_or(defaults.presence_penalty),
        top_p: completion.top_p.unwrap_or(defaults.top_p),
    }
}
