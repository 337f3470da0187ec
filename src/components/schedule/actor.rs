use super::models::{clear_override, set_override, Override, Overrides, ShiftPattern};
use super::range::vacation_overrides;
use crate::components::storage::ScheduleRepository;
use crate::error::{actor_error, AppResult, Error};
use chrono::NaiveDate;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Consistent copy of the schedule state at one point in time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleSnapshot {
    pub pattern: Option<ShiftPattern>,
    pub overrides: Overrides,
}

impl ScheduleSnapshot {
    /// The configured pattern, or `NotConfigured`
    pub fn require_pattern(&self) -> AppResult<&ShiftPattern> {
        self.pattern.as_ref().ok_or(Error::NotConfigured)
    }
}

/// The schedule actor that processes messages
pub struct ScheduleActor {
    repository: ScheduleRepository,
    state: ScheduleSnapshot,
    command_rx: mpsc::Receiver<ScheduleCommand>,
}

/// Commands that can be sent to the schedule actor
pub enum ScheduleCommand {
    Snapshot(mpsc::Sender<ScheduleSnapshot>),
    SetPattern(ShiftPattern, mpsc::Sender<AppResult<()>>),
    SetOverride(NaiveDate, Override, mpsc::Sender<AppResult<()>>),
    ClearOverride(NaiveDate, mpsc::Sender<AppResult<bool>>),
    AddVacation(NaiveDate, NaiveDate, String, mpsc::Sender<AppResult<usize>>),
    Reset(mpsc::Sender<AppResult<()>>),
    Shutdown,
}

/// Handle for communicating with the schedule actor
#[derive(Clone)]
pub struct ScheduleActorHandle {
    command_tx: mpsc::Sender<ScheduleCommand>,
}

impl ScheduleActorHandle {
    async fn request<T>(
        &self,
        build: impl FnOnce(mpsc::Sender<T>) -> ScheduleCommand,
    ) -> AppResult<T> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(build(response_tx))
            .await
            .map_err(|e| actor_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| actor_error("Response channel closed"))
    }

    /// Get a consistent copy of the pattern and overrides
    pub async fn snapshot(&self) -> AppResult<ScheduleSnapshot> {
        self.request(ScheduleCommand::Snapshot).await
    }

    /// Replace the pattern wholesale
    pub async fn set_pattern(&self, pattern: ShiftPattern) -> AppResult<()> {
        self.request(|tx| ScheduleCommand::SetPattern(pattern, tx))
            .await?
    }

    /// Insert or replace the override for one day
    pub async fn set_override(&self, date: NaiveDate, entry: Override) -> AppResult<()> {
        self.request(|tx| ScheduleCommand::SetOverride(date, entry, tx))
            .await?
    }

    /// Remove the override for one day, reporting whether one existed
    pub async fn clear_override(&self, date: NaiveDate) -> AppResult<bool> {
        self.request(|tx| ScheduleCommand::ClearOverride(date, tx))
            .await?
    }

    /// Mark every day of an inclusive range as vacation
    pub async fn add_vacation(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        note: impl Into<String>,
    ) -> AppResult<usize> {
        let note = note.into();
        self.request(|tx| ScheduleCommand::AddVacation(start, end, note, tx))
            .await?
    }

    /// Forget the pattern and every override
    pub async fn reset(&self) -> AppResult<()> {
        self.request(ScheduleCommand::Reset).await?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> AppResult<()> {
        let _ = self.command_tx.send(ScheduleCommand::Shutdown).await;
        Ok(())
    }
}

impl ScheduleActor {
    /// Create a new actor over already loaded state and return its handle
    pub fn new(
        repository: ScheduleRepository,
        state: ScheduleSnapshot,
    ) -> (Self, ScheduleActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            repository,
            state,
            command_rx,
        };

        let handle = ScheduleActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Schedule actor started");

        // Process commands
        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                ScheduleCommand::Snapshot(response_tx) => {
                    let _ = response_tx.send(self.state.clone()).await;
                }
                ScheduleCommand::SetPattern(pattern, response_tx) => {
                    let result = self.set_pattern(pattern).await;
                    let _ = response_tx.send(result).await;
                }
                ScheduleCommand::SetOverride(date, entry, response_tx) => {
                    let result = self.set_override(date, entry).await;
                    let _ = response_tx.send(result).await;
                }
                ScheduleCommand::ClearOverride(date, response_tx) => {
                    let result = self.clear_override(date).await;
                    let _ = response_tx.send(result).await;
                }
                ScheduleCommand::AddVacation(start, end, note, response_tx) => {
                    let result = self.add_vacation(start, end, &note).await;
                    let _ = response_tx.send(result).await;
                }
                ScheduleCommand::Reset(response_tx) => {
                    let result = self.reset().await;
                    let _ = response_tx.send(result).await;
                }
                ScheduleCommand::Shutdown => {
                    info!("Schedule actor shutting down");
                    break;
                }
            }
        }

        info!("Schedule actor shut down");
    }

    async fn set_pattern(&mut self, pattern: ShiftPattern) -> AppResult<()> {
        self.repository.save_pattern(&pattern).await?;
        self.state.pattern = Some(pattern);
        info!(
            "Pattern set to {} work / {} off starting {}",
            pattern.work_days, pattern.off_days, pattern.cycle_start
        );
        Ok(())
    }

    async fn set_override(&mut self, date: NaiveDate, entry: Override) -> AppResult<()> {
        let mut overrides = self.state.overrides.clone();
        set_override(&mut overrides, date, entry);
        self.commit_overrides(overrides).await?;
        info!("Override saved for {}", date);
        Ok(())
    }

    async fn clear_override(&mut self, date: NaiveDate) -> AppResult<bool> {
        let mut overrides = self.state.overrides.clone();
        if !clear_override(&mut overrides, date) {
            return Ok(false);
        }
        self.commit_overrides(overrides).await?;
        info!("Override cleared for {}", date);
        Ok(true)
    }

    async fn add_vacation(&mut self, start: NaiveDate, end: NaiveDate, note: &str) -> AppResult<usize> {
        // Validation happens before anything is touched
        let entries = vacation_overrides(start, end, note)?;
        let count = entries.len();

        let mut overrides = self.state.overrides.clone();
        for (date, entry) in entries {
            set_override(&mut overrides, date, entry);
        }
        self.commit_overrides(overrides).await?;
        info!("Vacation saved from {} to {} ({} days)", start, end, count);
        Ok(count)
    }

    async fn reset(&mut self) -> AppResult<()> {
        self.repository.clear().await?;
        self.state = ScheduleSnapshot::default();
        warn!("Schedule reset, all data removed");
        Ok(())
    }

    /// Persist a new override map, keeping the old one if the write fails
    async fn commit_overrides(&mut self, overrides: Overrides) -> AppResult<()> {
        self.repository.save_overrides(&overrides).await?;
        self.state.overrides = overrides;
        Ok(())
    }
}
