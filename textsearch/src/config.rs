use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{SearchError, SearchResult};
use crate::request::{EncodingMode, UnreadablePolicy};

/// Application settings shared by every search in a session.
///
/// # Configuration Locations
///
/// Sources are layered, later ones overriding earlier ones:
/// 1. Global `$HOME/.config/textsearch/config.yaml`
/// 2. Local `.textsearch.yaml` in the current directory
/// 3. Custom config file specified via `--config` (must exist)
/// 4. `TEXTSEARCH_*` environment variables, e.g. `TEXTSEARCH_DEFAULT_PATH`
///
/// # Configuration Format
///
/// ```yaml
/// # Root used when the path prompt is left blank
/// DefaultPath: "/var/log"
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "info"
///
/// # Scanning threads, 0 for one per CPU
/// thread_count: 1
///
/// # lossy | failfast
/// encoding_mode: lossy
///
/// # abort | skip
/// unreadable_policy: abort
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Root directory used when the user leaves the path prompt blank
    #[serde(default, alias = "DefaultPath", alias = "defaultpath")]
    pub default_path: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Number of scanning threads, 0 for one per CPU
    #[serde(default = "default_thread_count")]
    pub thread_count: usize,

    #[serde(default)]
    pub encoding_mode: EncodingMode,

    #[serde(default)]
    pub unreadable_policy: UnreadablePolicy,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_thread_count() -> usize {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_path: None,
            log_level: default_log_level(),
            thread_count: default_thread_count(),
            encoding_mode: EncodingMode::default(),
            unreadable_policy: UnreadablePolicy::default(),
        }
    }
}

/// Values given on the command line; `None` leaves the file value alone.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub default_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub thread_count: Option<usize>,
    pub encoding_mode: Option<EncodingMode>,
    pub unreadable_policy: Option<UnreadablePolicy>,
}

/// Where `Settings` look for their file and environment layers.
///
/// `Default` points at the real locations. Tests use [`SettingsSources::isolated`]
/// so the user's own files and environment never leak in.
#[derive(Debug, Clone)]
pub struct SettingsSources {
    /// Global config file, read if it exists
    pub global: Option<PathBuf>,
    /// Per-directory config file, read if it exists
    pub local: Option<PathBuf>,
    /// Prefix of the environment variables layered last, e.g. `TEXTSEARCH`
    pub env_prefix: Option<String>,
}

impl Default for SettingsSources {
    fn default() -> Self {
        SettingsSources {
            global: dirs::config_dir().map(|p| p.join("textsearch/config.yaml")),
            local: Some(PathBuf::from(".textsearch.yaml")),
            env_prefix: Some("TEXTSEARCH".to_string()),
        }
    }
}

impl SettingsSources {
    /// No global file, no local file, no environment
    pub fn isolated() -> Self {
        SettingsSources {
            global: None,
            local: None,
            env_prefix: None,
        }
    }
}

impl Settings {
    /// Loads settings from `sources`, adding `config_path` as a required file
    /// source before the environment layer
    pub fn load_with(
        sources: &SettingsSources,
        config_path: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        for path in [&sources.global, &sources.local].into_iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        if let Some(prefix) = &sources.env_prefix {
            builder = builder.add_source(Environment::with_prefix(prefix));
        }

        builder.build()?.try_deserialize()
    }

    /// Merges command-line values over the loaded ones
    pub fn merge_with_cli(mut self, cli: &SettingsOverrides) -> Self {
        if let Some(path) = &cli.default_path {
            self.default_path = Some(path.clone());
        }
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
        if let Some(count) = cli.thread_count {
            self.thread_count = count;
        }
        if let Some(mode) = cli.encoding_mode {
            self.encoding_mode = mode;
        }
        if let Some(policy) = cli.unreadable_policy {
            self.unreadable_policy = policy;
        }
        self
    }

    /// The configured default root, or `ConfigMissing` if none is set
    pub fn require_default_path(&self) -> SearchResult<&Path> {
        match self.default_path.as_deref() {
            Some(path) if !path.as_os_str().is_empty() => Ok(path),
            _ => Err(SearchError::config_missing(
                "no DefaultPath configured (set it in config.yaml, TEXTSEARCH_DEFAULT_PATH or --default-path)",
            )),
        }
    }
}
