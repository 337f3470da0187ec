use crate::error::{AppResult, Error};
use chrono::{Datelike, Local, NaiveDate, Utc};
use chrono_tz::Tz;

/// Canonical calendar-day key format
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Format used when dates are shown to people
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Format a date as its canonical `YYYY-MM-DD` key
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` key back into a calendar day
pub fn parse_date_key(key: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), DATE_KEY_FORMAT)
        .map_err(|e| Error::InvalidDate(format!("{}: {}", key, e)))
}

/// Format a date for display (dd/mm/yyyy)
pub fn display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Parse a month in `YYYY-MM` format
pub fn parse_month(month_str: &str) -> AppResult<(i32, u32)> {
    let (year, month) = month_str
        .trim()
        .split_once('-')
        .ok_or_else(|| Error::InvalidDate(format!("{}: expected YYYY-MM", month_str)))?;
    let year = year
        .parse::<i32>()
        .map_err(|_| Error::InvalidDate(format!("{}: invalid year", month_str)))?;
    let month = month
        .parse::<u32>()
        .map_err(|_| Error::InvalidDate(format!("{}: invalid month", month_str)))?;

    // Validates the month range as a side effect
    first_of_month(year, month)?;
    Ok((year, month))
}

/// First day of the given month
pub fn first_of_month(year: i32, month: u32) -> AppResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::InvalidDate(format!("{:04}-{:02}", year, month)))
}

/// Last day of the given month
pub fn last_of_month(year: i32, month: u32) -> AppResult<NaiveDate> {
    let first = first_of_month(year, month)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    match next_first.and_then(|d| d.pred_opt()) {
        Some(last) => Ok(last),
        // December of the last representable year
        None => Ok(NaiveDate::from_ymd_opt(first.year(), 12, 31).unwrap_or(first)),
    }
}

/// Signed number of whole calendar days from `from` to `to`
///
/// Positive when `to` is after `from`. Calendar-day granularity only, so DST
/// transitions never shift the result.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Source of the current calendar day
pub trait Clock: Send + Sync {
    /// Today's date in the evaluation timezone
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    timezone: Option<Tz>,
}

impl SystemClock {
    /// Clock that evaluates "today" in the system's local timezone
    pub fn local() -> Self {
        Self { timezone: None }
    }

    /// Clock that evaluates "today" in a specific IANA timezone
    pub fn in_timezone(timezone: Tz) -> Self {
        Self {
            timezone: Some(timezone),
        }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        match self.timezone {
            Some(tz) => Utc::now().with_timezone(&tz).date_naive(),
            None => Local::now().date_naive(),
        }
    }
}

/// Clock pinned to a single day
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Parse an IANA timezone name
pub fn parse_timezone(name: &str) -> AppResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| Error::Config(format!("Unknown timezone {}: {}", name, e)))
}
