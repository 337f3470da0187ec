use crate::components::schedule::ShiftType;
use crate::utils::time::{parse_date_key, parse_month};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// EscalaFlex personal work-shift calendar.
#[derive(Parser)]
#[command(
    name = "escalaflex",
    version,
    about = "Personal work-shift calendar with a repeating pattern and manual edits"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Define the repeating work/off pattern.
    Setup(SetupArgs),
    /// Show a month as a calendar grid with its summary.
    Show(ShowArgs),
    /// Show how a single day is classified.
    Day(DayArgs),
    /// Override a single day.
    Set(SetArgs),
    /// Remove the override of a single day.
    Clear(ClearArgs),
    /// Mark an inclusive date range as vacation.
    Vacation(VacationArgs),
    /// Ask the AI assistant for a better fitting pattern.
    Optimize(OptimizeArgs),
    /// Delete the pattern and every override.
    Reset(ResetArgs),
}

/// Arguments for the `setup` subcommand.
#[derive(clap::Args)]
pub struct SetupArgs {
    /// Consecutive work days per cycle.
    #[arg(short, long)]
    pub work: i32,

    /// Consecutive off days per cycle.
    #[arg(short, long)]
    pub off: i32,

    /// First day of a cycle (YYYY-MM-DD), today when omitted.
    #[arg(short, long, value_parser = parse_date_key)]
    pub start: Option<NaiveDate>,
}

/// Arguments for the `show` subcommand.
#[derive(clap::Args)]
pub struct ShowArgs {
    /// Month to show (YYYY-MM), the current month when omitted.
    #[arg(short, long, value_parser = parse_month)]
    pub month: Option<(i32, u32)>,

    /// Print the month as JSON instead of a grid.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `day` subcommand.
#[derive(clap::Args)]
pub struct DayArgs {
    /// Day to classify (YYYY-MM-DD), today when omitted.
    #[arg(value_parser = parse_date_key)]
    pub date: Option<NaiveDate>,

    /// Print the day as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `set` subcommand.
#[derive(clap::Args)]
pub struct SetArgs {
    /// Day to override (YYYY-MM-DD).
    #[arg(value_parser = parse_date_key)]
    pub date: NaiveDate,

    /// Shift type: work, off, swap, vacation or other.
    #[arg(short = 't', long = "type")]
    pub shift_type: ShiftType,

    /// Optional free-text note.
    #[arg(short, long)]
    pub note: Option<String>,
}

/// Arguments for the `clear` subcommand.
#[derive(clap::Args)]
pub struct ClearArgs {
    /// Day to restore to the pattern (YYYY-MM-DD).
    #[arg(value_parser = parse_date_key)]
    pub date: NaiveDate,
}

/// Arguments for the `vacation` subcommand.
#[derive(clap::Args)]
pub struct VacationArgs {
    /// First vacation day (YYYY-MM-DD).
    #[arg(value_parser = parse_date_key)]
    pub start: NaiveDate,

    /// Last vacation day, inclusive (YYYY-MM-DD).
    #[arg(value_parser = parse_date_key)]
    pub end: NaiveDate,

    /// Note for every vacation day, the configured default when omitted.
    #[arg(short, long)]
    pub note: Option<String>,
}

/// Arguments for the `optimize` subcommand.
#[derive(clap::Args)]
pub struct OptimizeArgs {
    /// Preferences or constraints the suggestion should respect.
    #[arg(short, long)]
    pub preferences: Option<String>,

    /// Conflict to resolve, usually one of the options of a previous run.
    #[arg(short, long)]
    pub conflict: Option<String>,

    /// Save the suggested pattern.
    #[arg(long)]
    pub apply: bool,
}

/// Arguments for the `reset` subcommand.
#[derive(clap::Args)]
pub struct ResetArgs {
    /// Confirm deleting all stored data.
    #[arg(long)]
    pub yes: bool,
}
