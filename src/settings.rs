use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_STATUS_INTERVAL_SECS: i64 = 30;
const DEFAULT_HEALTH_TIMEOUT_SECS: i64 = 5;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid API base URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

/// Runtime settings, layered as defaults -> `pubquiz.*` file -> `PUBQUIZ_*` env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api_base_url: String,
    pub draft_dir: PathBuf,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    pub status_interval_secs: u64,
    pub health_timeout_secs: u64,
}

impl Settings {
    pub fn load() -> Result<Self, SettingsError> {
        // Don't fail if .env doesn't exist
        let _ = dotenvy::dotenv();

        let cfg = config::Config::builder()
            .set_default("api_base_url", default_api_base_url())?
            .set_default("draft_dir", default_draft_dir().to_string_lossy().to_string())?
            .set_default("status_interval_secs", DEFAULT_STATUS_INTERVAL_SECS)?
            .set_default("health_timeout_secs", DEFAULT_HEALTH_TIMEOUT_SECS)?
            .add_source(config::File::with_name("pubquiz").required(false))
            .add_source(config::Environment::with_prefix("PUBQUIZ").try_parsing(true))
            .build()?;

        let settings: Settings = cfg.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        self.base_url()?;
        if self.status_interval_secs == 0 {
            return Err(SettingsError::ZeroDuration("status_interval_secs"));
        }
        if self.health_timeout_secs == 0 {
            return Err(SettingsError::ZeroDuration("health_timeout_secs"));
        }
        Ok(())
    }

    /// Base URL normalised to end with `/` so endpoint paths join beneath it.
    pub fn base_url(&self) -> Result<Url, SettingsError> {
        let mut raw = self.api_base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw).map_err(|source| SettingsError::InvalidBaseUrl {
            url: self.api_base_url.clone(),
            source,
        })
    }

    /// One-line description for the startup log, written once logging is up.
    pub fn summary(&self) -> String {
        format!(
            "api={}, drafts={}, log={}, status every {}s, health timeout {}s",
            self.api_base_url,
            self.draft_dir.display(),
            self.log_path().display(),
            self.status_interval_secs,
            self.health_timeout_secs
        )
    }

    pub fn status_interval(&self) -> Duration {
        Duration::from_secs(self.status_interval_secs)
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.draft_dir.join("pubquiz.log"))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            draft_dir: default_draft_dir(),
            log_file: None,
            status_interval_secs: DEFAULT_STATUS_INTERVAL_SECS as u64,
            health_timeout_secs: DEFAULT_HEALTH_TIMEOUT_SECS as u64,
        }
    }
}

/// Runtime env is read by the config layer; this is the build-time embedded fallback.
fn default_api_base_url() -> String {
    match option_env!("PUBQUIZ_API_BASE_URL") {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => DEFAULT_API_BASE_URL.to_string(),
    }
}

fn default_draft_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".pubquiz")
}
