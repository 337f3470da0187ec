use super::models::{SuggestionRequest, SuggestionResponse, MAX_CONFLICT_OPTIONS};
use crate::components::schedule::models::{Overrides, ShiftPattern};
use crate::error::{optimizer_error, AppResult};
use crate::utils::time::display_date;
use rust_i18n::t;
use schemars::schema_for;
use serde_json::from_str;
use tracing::{error, warn};

pub const SYSTEM_PROMPT: &str = "You are an assistant that helps people optimize their personal work schedules. You compare a repeating work/off pattern with the manual edits the user made and suggest a better fitting pattern. Always answer with a single JSON object and nothing else.";

const USER_PROMPT_TEMPLATE: &str = "You will receive the user's original schedule pattern and their edited schedule, which lists the manual changes they made on top of the pattern.

Analyze the edited schedule and suggest a new pattern as a number of work days followed by a number of off days. Explain why the new pattern fits the edits better, focusing on how it minimizes disruption and adapts to the user's needs.

If a conflict description is present, also suggest up to {max_options} resolution options as short, actionable sentences.

Take any user preferences or constraints into account.

Original pattern: {pattern}
Edited schedule:
{edits}
User preferences: {preferences}
Conflict description: {conflict}

Respond in the language named by this locale code: {locale}.
The response must be a JSON object matching this JSON schema exactly:
{schema}";

/// Localized sentence describing the configured pattern
pub fn describe_pattern(pattern: &ShiftPattern) -> String {
    t!(
        "optimizer_pattern_description",
        work = pattern.work_days,
        off = pattern.off_days,
        start = display_date(pattern.cycle_start)
    )
    .to_string()
}

/// One localized line per override, oldest first
pub fn describe_overrides(overrides: &Overrides) -> String {
    let not_available = t!("optimizer_note_missing");
    overrides
        .iter()
        .map(|(date, entry)| {
            t!(
                "optimizer_override_line",
                date = display_date(*date),
                kind = entry.shift_type.label(),
                note = entry.note.as_deref().unwrap_or(&not_available)
            )
            .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fill the user prompt for a request, embedding the response schema
pub fn build_user_prompt(request: &SuggestionRequest) -> AppResult<String> {
    let schema = serde_json::to_string_pretty(&schema_for!(SuggestionResponse))?;
    let none = t!("optimizer_none_given");
    let locale = rust_i18n::locale().to_string();

    Ok(USER_PROMPT_TEMPLATE
        .replace("{max_options}", &MAX_CONFLICT_OPTIONS.to_string())
        .replace("{pattern}", &request.original_pattern_description)
        .replace("{edits}", &request.edited_schedule_description)
        .replace(
            "{preferences}",
            request.user_preferences.as_deref().unwrap_or(&none),
        )
        .replace(
            "{conflict}",
            request.conflict_description.as_deref().unwrap_or(&none),
        )
        .replace("{locale}", &locale)
        .replace("{schema}", &schema))
}

/// Extract and parse the JSON object from a model reply
pub fn parse_json_from_response(response: &str) -> AppResult<SuggestionResponse> {
    // Models tend to wrap the object in prose or code fences
    if let (Some(json_start), Some(json_end)) = (response.find('{'), response.rfind('}')) {
        if json_start < json_end {
            let json_str = &response[json_start..=json_end];
            match from_str::<SuggestionResponse>(json_str) {
                Ok(parsed) => return Ok(limit_options(parsed)),
                Err(e) => {
                    error!("Failed to parse JSON from response: {}", e);
                    error!("JSON string: {}", json_str);
                }
            }
        }
    }

    error!("Could not extract valid JSON from response: {}", response);
    Err(optimizer_error(
        "Could not extract valid JSON from the model response",
    ))
}

/// Keep at most the allowed number of conflict resolution options
pub fn limit_options(mut response: SuggestionResponse) -> SuggestionResponse {
    if let Some(options) = response.conflict_resolution_options.as_mut() {
        if options.len() > MAX_CONFLICT_OPTIONS {
            warn!(
                "Dropping {} extra conflict resolution options",
                options.len() - MAX_CONFLICT_OPTIONS
            );
            options.truncate(MAX_CONFLICT_OPTIONS);
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::schedule::models::{Override, ShiftType};
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_override_lines_are_ordered_by_date() {
        let mut overrides = Overrides::new();
        overrides.insert(ymd(2024, 3, 20), Override::new(ShiftType::Other));
        overrides.insert(ymd(2024, 3, 2), Override::new(ShiftType::Swap).with_note("Covering Ana"));

        let description = describe_overrides(&overrides);
        let lines: Vec<&str> = description.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("02/03/2024"));
        assert!(lines[0].contains("Covering Ana"));
        assert!(lines[1].contains("20/03/2024"));
        assert!(lines[1].contains("N/A"));
    }

    #[test]
    fn test_pattern_description_mentions_counts() {
        let pattern = ShiftPattern::new(6, 1, ymd(2024, 1, 1)).unwrap();
        let description = describe_pattern(&pattern);
        assert!(description.contains('6'));
        assert!(description.contains('1'));
        assert!(description.contains("01/01/2024"));
    }

    #[test]
    fn test_prompt_embeds_request_and_schema() {
        let request = SuggestionRequest {
            original_pattern_description: "Five on, two off".to_string(),
            edited_schedule_description: "- 01/01/2024: Swap".to_string(),
            user_preferences: Some("No Mondays".to_string()),
            conflict_description: None,
        };

        let prompt = build_user_prompt(&request).unwrap();
        assert!(prompt.contains("Five on, two off"));
        assert!(prompt.contains("No Mondays"));
        assert!(prompt.contains("suggestedAdjustments"));
        assert!(!prompt.contains("{conflict}"));
    }

    #[test]
    fn test_parse_fenced_reply() {
        let reply = "Here you go:\n```json\n{\"suggestedAdjustments\":\"a\",\"optimizationRationale\":\"b\",\"newPattern\":{\"work\":4,\"off\":3}}\n```";
        let parsed = parse_json_from_response(reply).unwrap();
        assert_eq!(parsed.suggested_adjustments, "a");
        assert_eq!(parsed.new_pattern.map(|p| p.work), Some(4));
    }

    #[test]
    fn test_parse_rejects_prose() {
        assert!(parse_json_from_response("I cannot help with that").is_err());
        assert!(parse_json_from_response("} backwards {").is_err());
    }

    #[test]
    fn test_extra_options_are_dropped() {
        let reply = r#"{"suggestedAdjustments":"a","optimizationRationale":"b",
            "conflictResolutionOptions":["one","two","three","four"]}"#;
        let parsed = parse_json_from_response(reply).unwrap();
        assert_eq!(
            parsed.conflict_resolution_options,
            Some(vec!["one".to_string(), "two".to_string(), "three".to_string()])
        );
    }
}
