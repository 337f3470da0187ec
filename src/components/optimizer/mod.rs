#[cfg(feature = "gemini")]
mod gemini;
pub mod models;
pub mod prompt;

#[cfg(feature = "gemini")]
pub use self::gemini::GeminiSuggestionService;
pub use self::models::{NewPattern, SuggestionRequest, SuggestionResponse, MAX_CONFLICT_OPTIONS};

use crate::components::schedule::models::ShiftPattern;
use crate::components::schedule::ScheduleSnapshot;
use crate::error::{AppResult, Error};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// A backend able to suggest pattern adjustments
#[async_trait]
pub trait SuggestionService: Send + Sync {
    async fn suggest(&self, request: &SuggestionRequest) -> AppResult<SuggestionResponse>;
}

/// Extra context the user can attach to a suggestion request
#[derive(Debug, Clone, Default)]
pub struct SuggestionOptions {
    pub preferences: Option<String>,
    pub conflict: Option<String>,
}

/// Builds requests from the schedule state and runs one suggestion at a time
pub struct PatternOptimizer {
    service: Arc<dyn SuggestionService>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when the request finishes, even on error
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl PatternOptimizer {
    pub fn new(service: Arc<dyn SuggestionService>) -> Self {
        Self {
            service,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Describe the current schedule for the suggestion service
    pub fn build_request(
        snapshot: &ScheduleSnapshot,
        options: SuggestionOptions,
    ) -> AppResult<SuggestionRequest> {
        let pattern = snapshot.require_pattern()?;
        if snapshot.overrides.is_empty() {
            return Err(Error::NoOverrides);
        }

        Ok(SuggestionRequest {
            original_pattern_description: prompt::describe_pattern(pattern),
            edited_schedule_description: prompt::describe_overrides(&snapshot.overrides),
            user_preferences: non_blank(options.preferences),
            conflict_description: non_blank(options.conflict),
        })
    }

    /// Ask for a suggestion; fails with `OptimizerBusy` while another one is running
    pub async fn suggest(
        &self,
        snapshot: &ScheduleSnapshot,
        options: SuggestionOptions,
    ) -> AppResult<SuggestionResponse> {
        let request = Self::build_request(snapshot, options)?;

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Rejected suggestion request, another one is in progress");
            return Err(Error::OptimizerBusy);
        }
        let _guard = InFlightGuard(&self.in_flight);

        info!(
            "Requesting pattern suggestion for {} overrides",
            snapshot.overrides.len()
        );
        let response = self.service.suggest(&request).await?;
        Ok(prompt::limit_options(response))
    }

    /// Whether a suggestion is currently running
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Apply suggested counts to a pattern, keeping its cycle start
pub fn apply_suggestion(pattern: &ShiftPattern, new_pattern: NewPattern) -> AppResult<ShiftPattern> {
    ShiftPattern::new(new_pattern.work, new_pattern.off, pattern.cycle_start)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
