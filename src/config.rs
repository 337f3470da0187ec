use crate::error::{config_error, env_error, AppResult};
use crate::utils::time::{parse_timezone, SystemClock};
use chrono::Weekday;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Default location of the optional TOML configuration file
pub const DEFAULT_CONFIG_FILE: &str = "config/escalaflex.toml";

/// Default file used by the file store
pub const DEFAULT_DATA_FILE: &str = "escalaflex.json";

/// Default Redis connection string
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Default note written on vacation days
pub const DEFAULT_VACATION_NOTE: &str = "Férias";

/// Default Gemini model used for pattern suggestions
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Where the schedule is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    File,
    Memory,
    Redis,
}

impl FromStr for StoreBackend {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(StoreBackend::File),
            "memory" => Ok(StoreBackend::Memory),
            "redis" => Ok(StoreBackend::Redis),
            other => Err(config_error(&format!(
                "Unknown store backend '{}', expected file, memory or redis",
                other
            ))),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreBackend::File => "file",
            StoreBackend::Memory => "memory",
            StoreBackend::Redis => "redis",
        };
        f.write_str(name)
    }
}

/// First column of the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }
}

impl FromStr for WeekStart {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            "monday" | "mon" => Ok(WeekStart::Monday),
            _ => Err(env_error("WEEK_START")),
        }
    }
}

/// Main configuration structure for the application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage backend
    pub store: StoreBackend,
    /// JSON file used by the file backend
    pub data_file: PathBuf,
    /// Redis connection string used by the redis backend
    pub redis_url: String,
    /// IANA timezone used to decide what "today" is; system local zone when unset
    pub timezone: Option<String>,
    /// Locale for every user-visible string
    pub locale: String,
    /// First column of the month grid
    pub week_start: WeekStart,
    /// Note written on days added through the vacation flow
    pub vacation_note: String,
    /// Gemini API key, only needed for pattern suggestions
    pub gemini_api_key: Option<String>,
    /// Gemini model name
    pub gemini_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreBackend::File,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            redis_url: DEFAULT_REDIS_URL.to_string(),
            timezone: None,
            locale: "en".to_string(),
            week_start: WeekStart::Sunday,
            vacation_note: DEFAULT_VACATION_NOTE.to_string(),
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `.env`, the config file and the environment
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let config_path = env::var("ESCALAFLEX_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = Self::from_file(&config_path)?;
        config.apply_env(|name| env::var(name).ok())?;
        config.validate()?;

        info!(
            "Configuration loaded: store={}, locale={}",
            config.store, config.locale
        );
        Ok(config)
    }

    /// Read a TOML file over the defaults; a missing file yields the defaults
    pub fn from_file(path: &Path) -> AppResult<Self> {
        match fs::read_to_string(path) {
            Ok(content) => {
                debug!("Reading configuration from {}", path.display());
                Self::from_toml_str(&content)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Parse TOML content; absent keys keep their defaults
    pub fn from_toml_str(content: &str) -> AppResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Overlay values from environment variables
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> AppResult<()> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(store) = var("ESCALAFLEX_STORE") {
            self.store = store.parse()?;
        }
        if let Some(data_file) = var("ESCALAFLEX_DATA_FILE") {
            self.data_file = PathBuf::from(data_file);
        }
        if let Some(redis_url) = var("REDIS_URL") {
            self.redis_url = redis_url;
        }
        if let Some(timezone) = var("TIMEZONE") {
            self.timezone = Some(timezone);
        }
        if let Some(locale) = var("ESCALAFLEX_LOCALE") {
            self.locale = locale;
        }
        if let Some(week_start) = var("WEEK_START") {
            self.week_start = week_start.parse()?;
        }
        if let Some(note) = var("VACATION_NOTE") {
            self.vacation_note = note;
        }
        if let Some(api_key) = var("GEMINI_API_KEY") {
            self.gemini_api_key = Some(api_key);
        }
        if let Some(model) = var("GEMINI_MODEL") {
            self.gemini_model = model;
        }

        Ok(())
    }

    /// Reject values that would only fail later
    pub fn validate(&self) -> AppResult<()> {
        if let Some(timezone) = &self.timezone {
            parse_timezone(timezone)?;
        }
        if self.vacation_note.trim().is_empty() {
            return Err(config_error("vacation_note must not be empty"));
        }
        Ok(())
    }

    /// Clock that decides what "today" is
    pub fn clock(&self) -> AppResult<SystemClock> {
        match &self.timezone {
            Some(timezone) => Ok(SystemClock::in_timezone(parse_timezone(timezone)?)),
            None => Ok(SystemClock::local()),
        }
    }

    /// Weekday of the first grid column
    pub fn week_start(&self) -> Weekday {
        self.week_start.weekday()
    }
}
