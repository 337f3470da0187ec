use crate::cli::{ClearArgs, ResetArgs, SetArgs, SetupArgs, VacationArgs};
use crate::commands::{CommandContext, CommandResult};
use crate::components::schedule::{Override, ShiftPattern};
use crate::error::other_error;
use crate::utils::time::display_date;
use rust_i18n::t;
use tracing::info;

/// Define the repeating pattern
pub async fn setup(ctx: &CommandContext, args: SetupArgs) -> CommandResult {
    let start = args.start.unwrap_or_else(|| ctx.clock.today());
    let pattern = ShiftPattern::new(args.work, args.off, start)?;

    ctx.schedule.set_pattern(pattern).await?;
    info!("Pattern configured from the command line");

    Ok(t!(
        "setup_saved",
        work = pattern.work_days,
        off = pattern.off_days,
        start = display_date(pattern.cycle_start)
    )
    .to_string())
}

/// Override a single day
pub async fn set(ctx: &CommandContext, args: SetArgs) -> CommandResult {
    // Edits only make sense on top of a pattern
    ctx.schedule.snapshot().await?.require_pattern()?;

    let mut entry = Override::new(args.shift_type);
    if let Some(note) = args.note {
        entry = entry.with_note(note);
    }
    ctx.schedule.set_override(args.date, entry).await?;

    Ok(t!(
        "day_saved",
        date = display_date(args.date),
        kind = args.shift_type.label()
    )
    .to_string())
}

/// Restore a single day to its pattern value
pub async fn clear(ctx: &CommandContext, args: ClearArgs) -> CommandResult {
    let date = display_date(args.date);
    if ctx.schedule.clear_override(args.date).await? {
        Ok(t!("day_cleared", date = date).to_string())
    } else {
        Ok(t!("day_not_overridden", date = date).to_string())
    }
}

/// Mark a date range as vacation
pub async fn vacation(ctx: &CommandContext, args: VacationArgs) -> CommandResult {
    ctx.schedule.snapshot().await?.require_pattern()?;

    let note = args
        .note
        .unwrap_or_else(|| ctx.config.vacation_note.clone());
    let count = ctx
        .schedule
        .add_vacation(args.start, args.end, note)
        .await?;

    Ok(t!(
        "vacation_saved",
        count = count,
        start = display_date(args.start),
        end = display_date(args.end)
    )
    .to_string())
}

/// Forget everything, only with explicit confirmation
pub async fn reset(ctx: &CommandContext, args: ResetArgs) -> CommandResult {
    if !args.yes {
        return Err(other_error(&t!("reset_needs_confirmation")));
    }
    ctx.schedule.reset().await?;
    Ok(t!("reset_done").to_string())
}
