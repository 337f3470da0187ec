use crate::cli::OptimizeArgs;
use crate::commands::{CommandContext, CommandResult};
use crate::components::optimizer::{apply_suggestion, SuggestionOptions, SuggestionResponse};
use crate::error::env_error;
use rust_i18n::t;
use std::fmt::Write;
use tracing::info;

/// Ask for a pattern suggestion and optionally save it
pub async fn optimize(ctx: &CommandContext, args: OptimizeArgs) -> CommandResult {
    let optimizer = ctx
        .optimizer
        .as_ref()
        .ok_or_else(|| env_error("GEMINI_API_KEY"))?;

    let snapshot = ctx.schedule.snapshot().await?;
    let options = SuggestionOptions {
        preferences: args.preferences,
        conflict: args.conflict,
    };
    let response = optimizer.suggest(&snapshot, options).await?;

    let mut out = render_suggestion(&response);

    if args.apply {
        match (snapshot.pattern.as_ref(), response.new_pattern) {
            (Some(current), Some(suggested)) => {
                let pattern = apply_suggestion(current, suggested)?;
                ctx.schedule.set_pattern(pattern).await?;
                info!(
                    "Applied suggested pattern {}/{}",
                    pattern.work_days, pattern.off_days
                );
                let _ = write!(
                    out,
                    "\n\n{}",
                    t!("optimizer_applied", work = pattern.work_days, off = pattern.off_days)
                );
            }
            _ => {
                let _ = write!(out, "\n\n{}", t!("optimizer_nothing_to_apply"));
            }
        }
    }

    Ok(out)
}

/// Render a suggestion for the terminal
pub fn render_suggestion(response: &SuggestionResponse) -> String {
    let mut out = String::new();

    if let Some(new_pattern) = response.new_pattern {
        let _ = writeln!(
            out,
            "{}",
            t!("optimizer_new_pattern", work = new_pattern.work, off = new_pattern.off)
        );
        out.push('\n');
    }

    let _ = writeln!(out, "{}", t!("optimizer_adjustments_title"));
    let _ = writeln!(out, "{}", response.suggested_adjustments.trim());
    out.push('\n');
    let _ = writeln!(out, "{}", t!("optimizer_rationale_title"));
    let _ = writeln!(out, "{}", response.optimization_rationale.trim());

    if let Some(options) = response
        .conflict_resolution_options
        .as_ref()
        .filter(|options| !options.is_empty())
    {
        out.push('\n');
        let _ = writeln!(out, "{}", t!("optimizer_options_title"));
        for (i, option) in options.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, option);
        }
        let _ = writeln!(out, "{}", t!("optimizer_options_hint"));
    }

    out.trim_end().to_string()
}
