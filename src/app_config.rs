use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::language_utils::LanguageMode;

/// Application configuration module
/// This module handles the engine configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Input language mode used when none is given on the command line
    #[serde(default)]
    pub language_mode: LanguageMode,

    /// Path to the sign catalog JSON file
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Path to the history database (defaults to the user data directory)
    #[serde(default)]
    pub history_db_path: Option<PathBuf>,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Prefetch config
    #[serde(default)]
    pub prefetch: PrefetchConfig,

    /// Playback config
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Google Gemini generative language API
    #[default]
    Gemini,
    // @provider: Built-in word dictionary, no network
    Offline,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Gemini => "Gemini",
            Self::Offline => "Offline dictionary",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Gemini => "gemini".to_string(),
            Self::Offline => "offline".to_string(),
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "offline" => Ok(Self::Offline),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Model name (e.g., "gemini-2.0-flash")
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// API key for the service
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service endpoint URL
    #[serde(default = "default_gemini_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Whether translated text is memoized per (text, source, target)
    #[serde(default = "default_true")]
    pub cache_enabled: bool,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            model: default_gemini_model(),
            api_key: String::new(),
            endpoint: default_gemini_endpoint(),
            timeout_secs: default_timeout_secs(),
            cache_enabled: true,
        }
    }
}

/// Prefetch cache configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PrefetchConfig {
    /// Delay added per playlist position before its probe is issued
    #[serde(default = "default_stagger_ms")]
    pub stagger_ms: u64,

    /// Percentage of successful probes after which the playlist counts as ready
    #[serde(default = "default_ready_threshold_percent")]
    pub ready_threshold_percent: f64,

    /// Upper bound on how long readiness may take
    #[serde(default = "default_max_wait_ms")]
    pub max_wait_ms: u64,

    /// Timeout for a single existence probe
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            stagger_ms: default_stagger_ms(),
            ready_threshold_percent: default_ready_threshold_percent(),
            max_wait_ms: default_max_wait_ms(),
            probe_timeout_secs: default_probe_timeout_secs(),
        }
    }
}

impl PrefetchConfig {
    pub fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }

    pub fn max_wait(&self) -> Duration {
        Duration::from_millis(self.max_wait_ms)
    }
}

/// Playback controller configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlaybackConfig {
    /// Retries allowed for a clip after its first transient failure
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before a transient failure is retried
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Delay before advancing past a failed clip
    #[serde(default = "default_advance_delay_ms")]
    pub advance_delay_ms: u64,

    /// Playback speed multiplier handed to the media player
    #[serde(default = "default_playback_rate")]
    pub playback_rate: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            advance_delay_ms: default_advance_delay_ms(),
            playback_rate: default_playback_rate(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("signs.json")
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_gemini_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_stagger_ms() -> u64 {
    50
}

fn default_ready_threshold_percent() -> f64 {
    95.0
}

fn default_max_wait_ms() -> u64 {
    1500
}

fn default_probe_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_delay_ms() -> u64 {
    400
}

fn default_advance_delay_ms() -> u64 {
    200
}

fn default_playback_rate() -> f32 {
    1.5
}

impl Config {
    /// Load configuration from a JSON file, writing the defaults when it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {:?}", path))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.translation.provider == TranslationProvider::Gemini
            && self.translation.api_key.trim().is_empty()
        {
            return Err(anyhow!("Translation API key is required for the Gemini provider"));
        }

        if !(0.0..=100.0).contains(&self.prefetch.ready_threshold_percent) {
            return Err(anyhow!(
                "Prefetch ready threshold must be between 0 and 100, got {}",
                self.prefetch.ready_threshold_percent
            ));
        }

        if self.playback.playback_rate <= 0.0 {
            return Err(anyhow!("Playback rate must be positive"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            language_mode: LanguageMode::default(),
            catalog_path: default_catalog_path(),
            history_db_path: None,
            translation: TranslationConfig::default(),
            prefetch: PrefetchConfig::default(),
            playback: PlaybackConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
