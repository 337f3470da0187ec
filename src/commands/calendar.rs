use crate::cli::{DayArgs, ShowArgs};
use crate::commands::{CommandContext, CommandResult};
use crate::components::schedule::month::weekday_columns;
use crate::components::schedule::{CalendarCell, DayInfo, MonthView, ShiftType};
use crate::utils::time::display_date;
use chrono::{Datelike, Weekday};
use rust_i18n::t;
use std::fmt::Write;

/// Width of one grid cell, e.g. `[15W]`
const CELL_WIDTH: usize = 5;

/// Show a month grid with its legend and summary
pub async fn show(ctx: &CommandContext, args: ShowArgs) -> CommandResult {
    let today = ctx.clock.today();
    let (year, month) = args.month.unwrap_or((today.year(), today.month()));

    let view = ctx
        .schedule
        .month(year, month, ctx.config.week_start(), today)
        .await?;

    if args.json {
        return Ok(serde_json::to_string_pretty(&view)?);
    }
    Ok(render_month(&view))
}

/// Show the classification of a single day
pub async fn day(ctx: &CommandContext, args: DayArgs) -> CommandResult {
    let today = ctx.clock.today();
    let info = ctx.schedule.day(args.date.unwrap_or(today), today).await?;

    if args.json {
        return Ok(serde_json::to_string_pretty(&info)?);
    }
    Ok(render_day(&info))
}

/// One-character marker for a shift type
pub fn glyph(shift_type: ShiftType) -> char {
    match shift_type {
        ShiftType::Work => 'W',
        ShiftType::Off => '.',
        ShiftType::Swap => 'S',
        ShiftType::Vacation => 'V',
        ShiftType::Other => '?',
    }
}

/// Render a month as a text grid followed by a legend and per-type totals
pub fn render_month(view: &MonthView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{} {}", month_name(view.month), view.year);
    for weekday in weekday_columns(view.week_start) {
        let _ = write!(out, "{:^width$}", weekday_short(weekday), width = CELL_WIDTH);
    }
    out.push('\n');

    for week in view.weeks() {
        for cell in week {
            out.push_str(&render_cell(cell));
        }
        // No trailing spaces after the last cell
        let trimmed = out.trim_end_matches(' ').len();
        out.truncate(trimmed);
        out.push('\n');
    }

    out.push('\n');
    let legend: Vec<String> = ShiftType::ALL
        .iter()
        .map(|kind| format!("{} {}", glyph(*kind), kind.label()))
        .collect();
    let _ = writeln!(out, "{}  * {}", legend.join("  "), t!("legend_overridden"));

    out.push('\n');
    let _ = writeln!(out, "{}", t!("summary_title"));
    if view.summary.is_empty() {
        let _ = writeln!(out, "  {}", t!("summary_empty"));
    }
    for (kind, count) in &view.summary {
        let _ = writeln!(out, "  {}: {}", kind.label(), count);
    }

    out.trim_end().to_string()
}

/// Render one grid cell, brackets mark today
fn render_cell(cell: &CalendarCell) -> String {
    match cell {
        CalendarCell::Padding => " ".repeat(CELL_WIDTH),
        CalendarCell::Day(info) => {
            let (open, close) = if info.is_today {
                ('[', ']')
            } else if info.is_overridden {
                (' ', '*')
            } else {
                (' ', ' ')
            };
            format!("{}{:>2}{}{}", open, info.date.day(), glyph(info.shift_type), close)
        }
    }
}

/// Render a single day as one line
pub fn render_day(info: &DayInfo) -> String {
    let mut line = format!(
        "{} ({}): {}",
        display_date(info.date),
        weekday_short(info.date.weekday()),
        info.shift_type.label()
    );
    if info.is_overridden {
        let _ = write!(line, " [{}]", t!("day_overridden"));
    }
    if !info.note.is_empty() {
        let _ = write!(line, " - {}", info.note);
    }
    if info.is_today {
        let _ = write!(line, " ({})", t!("day_today"));
    }
    line
}

fn weekday_short(weekday: Weekday) -> String {
    match weekday {
        Weekday::Mon => t!("day_short_monday"),
        Weekday::Tue => t!("day_short_tuesday"),
        Weekday::Wed => t!("day_short_wednesday"),
        Weekday::Thu => t!("day_short_thursday"),
        Weekday::Fri => t!("day_short_friday"),
        Weekday::Sat => t!("day_short_saturday"),
        Weekday::Sun => t!("day_short_sunday"),
    }
    .to_string()
}

fn month_name(month: u32) -> String {
    match month {
        1 => t!("month_january"),
        2 => t!("month_february"),
        3 => t!("month_march"),
        4 => t!("month_april"),
        5 => t!("month_may"),
        6 => t!("month_june"),
        7 => t!("month_july"),
        8 => t!("month_august"),
        9 => t!("month_september"),
        10 => t!("month_october"),
        11 => t!("month_november"),
        _ => t!("month_december"),
    }
    .to_string()
}
