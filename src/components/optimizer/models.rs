use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Maximum number of conflict resolution options kept from a suggestion
pub const MAX_CONFLICT_OPTIONS: usize = 3;

/// What the suggestion service is asked to analyze
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    /// Localized sentence describing the current pattern
    pub original_pattern_description: String,
    /// One localized line per override, in date order
    pub edited_schedule_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_preferences: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict_description: Option<String>,
}

/// Work/off counts proposed by a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NewPattern {
    /// Number of work days in the suggested pattern
    pub work: i32,
    /// Number of off days in the suggested pattern
    pub off: i32,
}

/// Structured answer of the suggestion service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResponse {
    /// Which days or shifts should change, and how
    pub suggested_adjustments: String,
    /// Why the adjustments fit the edited schedule better
    pub optimization_rationale: String,
    /// Suggested replacement pattern, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_pattern: Option<NewPattern>,
    /// Up to three short, actionable ways to resolve a described conflict
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict_resolution_options: Option<Vec<String>>,
}
