use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::services::reasoner::ReasonerConfig;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub retrieval: RetrievalSettings,
    #[serde(default)]
    pub reasoner: ReasonerConfig,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalSettings {
    #[serde(default = "default_retrieval_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_retrieval_timeout")]
    pub timeout_secs: u64,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            endpoint: default_retrieval_endpoint(),
            timeout_secs: default_retrieval_timeout(),
        }
    }
}

fn default_retrieval_endpoint() -> String {
    "http://localhost:8100".to_string()
}

fn default_retrieval_timeout() -> u64 {
    20
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_knowledge_weight")]
    pub knowledge: f64,
    #[serde(default = "default_semantic_weight")]
    pub semantic: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            knowledge: default_knowledge_weight(),
            semantic: default_semantic_weight(),
        }
    }
}

fn default_knowledge_weight() -> f64 {
    0.45
}

fn default_semantic_weight() -> f64 {
    0.55
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default)]
    pub min_score_threshold: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            min_score_threshold: 0.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values on the structs
    /// 2. Configuration file (config/default.toml, config/local.toml)
    /// 3. Environment variables (prefixed with NEXUS_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with NEXUS_)
            // e.g., NEXUS_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("NEXUS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_env_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("NEXUS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Honor the standalone environment variables the deployment environments
/// already export: RETRIEVAL_ENDPOINT and HF_API_TOKEN
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let retrieval_endpoint = env::var("RETRIEVAL_ENDPOINT")
        .or_else(|_| env::var("NEXUS__RETRIEVAL__ENDPOINT"))
        .ok();
    let hf_api_token = env::var("HF_API_TOKEN").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(endpoint) = retrieval_endpoint {
        builder = builder.set_override("retrieval.endpoint", endpoint)?;
    }
    if let Some(token) = hf_api_token {
        builder = builder.set_override("reasoner.hf_api_token", token)?;
    }

    builder.build()
}
