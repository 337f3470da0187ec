use chrono::NaiveDate;
use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(escalaflex::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(escalaflex::config))]
    Config(String),

    #[error("Storage error: {0}")]
    #[diagnostic(code(escalaflex::storage))]
    Storage(String),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(escalaflex::serialization))]
    Serialization(String),

    #[error("Invalid shift pattern: {0}")]
    #[diagnostic(
        code(escalaflex::invalid_pattern),
        help("work and off day counts must both be at least 1")
    )]
    InvalidPattern(String),

    #[error("Invalid date range: end date {end} is before start date {start}")]
    #[diagnostic(code(escalaflex::invalid_range))]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid date: {0}")]
    #[diagnostic(code(escalaflex::invalid_date), help("dates are written as YYYY-MM-DD"))]
    InvalidDate(String),

    #[error("No shift pattern configured")]
    #[diagnostic(
        code(escalaflex::not_configured),
        help("run `escalaflex setup` to define your pattern")
    )]
    NotConfigured,

    #[error("No manual edits found")]
    #[diagnostic(
        code(escalaflex::no_overrides),
        help("edit a few days of your schedule before asking for a suggestion")
    )]
    NoOverrides,

    #[error("Pattern suggestion error: {0}")]
    #[diagnostic(code(escalaflex::optimizer))]
    Optimizer(String),

    #[error("A pattern suggestion is already in progress")]
    #[diagnostic(code(escalaflex::optimizer_busy))]
    OptimizerBusy,

    #[error("Schedule actor error: {0}")]
    #[diagnostic(code(escalaflex::actor))]
    Actor(String),

    #[error(transparent)]
    #[diagnostic(code(escalaflex::io))]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    #[diagnostic(code(escalaflex::other))]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        Error::Storage(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Invalid environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create storage errors
pub fn storage_error(message: &str) -> Error {
    Error::Storage(message.to_string())
}

/// Helper to create pattern suggestion errors
pub fn optimizer_error(message: &str) -> Error {
    Error::Optimizer(message.to_string())
}

/// Helper to create actor errors
pub fn actor_error(message: &str) -> Error {
    Error::Actor(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
