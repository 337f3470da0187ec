use crate::cli::Command;
use crate::components::optimizer::PatternOptimizer;
use crate::components::schedule::ScheduleHandle;
use crate::config::Config;
use crate::error::AppResult;
use crate::utils::time::Clock;
use std::sync::Arc;

// Export submodules
pub mod calendar;
pub mod edit;
pub mod optimize;

/// Shared context for all commands
pub struct CommandContext {
    pub config: Config,
    pub schedule: ScheduleHandle,
    pub clock: Arc<dyn Clock>,
    pub optimizer: Option<PatternOptimizer>,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(config: Config, schedule: ScheduleHandle, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            schedule,
            clock,
            optimizer: None,
        }
    }

    /// Set the pattern optimizer
    pub fn with_optimizer(mut self, optimizer: PatternOptimizer) -> Self {
        self.optimizer = Some(optimizer);
        self
    }
}

/// Type alias for command result; the text to print on success
pub type CommandResult = AppResult<String>;

/// Run one parsed subcommand
pub async fn dispatch(ctx: &CommandContext, command: Command) -> CommandResult {
    match command {
        Command::Setup(args) => edit::setup(ctx, args).await,
        Command::Show(args) => calendar::show(ctx, args).await,
        Command::Day(args) => calendar::day(ctx, args).await,
        Command::Set(args) => edit::set(ctx, args).await,
        Command::Clear(args) => edit::clear(ctx, args).await,
        Command::Vacation(args) => edit::vacation(ctx, args).await,
        Command::Optimize(args) => optimize::optimize(ctx, args).await,
        Command::Reset(args) => edit::reset(ctx, args).await,
    }
}
