use crate::cli::Cli;
use crate::commands::{self, CommandContext};
use crate::components::optimizer::PatternOptimizer;
use crate::components::schedule::ScheduleHandle;
use crate::components::storage::{FileStore, InMemoryStore, KeyValueStore, RedisStore};
use crate::config::{Config, StoreBackend};
use crate::error::{AppResult, Error};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging from the CLI verbosity; `RUST_LOG` wins when set
pub fn init_logging(verbosity: u8) -> miette::Result<()> {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("warn,escalaflex={},rig=warn,redis=warn", level))
        }))
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the application config
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Select the active locale, falling back to English for unknown ones
pub fn apply_locale(locale: &str) {
    let available = rust_i18n::available_locales!();
    if available.iter().any(|l| *l == locale) {
        rust_i18n::set_locale(locale);
        info!("Setting locale to {}", locale);
    } else {
        warn!(
            "Unknown locale {}, available: {}; using en",
            locale,
            available.join(", ")
        );
        rust_i18n::set_locale("en");
    }
}

/// Build the configured storage backend
pub fn build_store(config: &Config) -> AppResult<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match config.store {
        StoreBackend::File => Arc::new(FileStore::new(&config.data_file)),
        StoreBackend::Memory => {
            warn!("Using in-memory storage, changes are lost on exit");
            Arc::new(InMemoryStore::new())
        }
        StoreBackend::Redis => Arc::new(RedisStore::new(&config.redis_url)?),
    };
    Ok(store)
}

/// Build the pattern optimizer when an API key is configured
#[cfg(feature = "gemini")]
pub fn build_optimizer(config: &Config) -> Option<PatternOptimizer> {
    use crate::components::optimizer::GeminiSuggestionService;

    let api_key = config.gemini_api_key.as_deref()?;
    info!("Using Gemini model: {}", config.gemini_model);
    Some(PatternOptimizer::new(Arc::new(GeminiSuggestionService::new(
        api_key,
        config.gemini_model.clone(),
    ))))
}

/// Build the pattern optimizer when an API key is configured
#[cfg(not(feature = "gemini"))]
pub fn build_optimizer(config: &Config) -> Option<PatternOptimizer> {
    if config.gemini_api_key.is_some() {
        warn!("GEMINI_API_KEY is set but this build has no Gemini support");
    }
    None
}

/// Wire up the components and run one command
pub async fn run(cli: Cli, config: Config) -> miette::Result<String> {
    apply_locale(&config.locale);

    let store = build_store(&config)?;
    let schedule = ScheduleHandle::spawn(store).await?;
    let clock = Arc::new(config.clock()?);
    let optimizer = build_optimizer(&config);

    let mut ctx = CommandContext::new(config, schedule.clone(), clock);
    if let Some(optimizer) = optimizer {
        ctx = ctx.with_optimizer(optimizer);
    }

    let result = commands::dispatch(&ctx, cli.command).await;

    if let Err(e) = schedule.shutdown().await {
        error!("Failed to stop schedule actor: {:?}", e);
    }

    Ok(result?)
}
