use super::models::{DayInfo, Overrides, ShiftPattern, ShiftType};
use crate::utils::time::days_between;
use chrono::NaiveDate;

/// Classify one calendar day against a pattern and the user's overrides
///
/// Overrides always win. Without one, the day's offset inside the cycle decides
/// between work and off. Dates before `cycle_start` wrap into the tail of the
/// previous cycle. A pattern whose cycle has no positive length classifies every
/// day as off.
pub fn classify(
    date: NaiveDate,
    pattern: &ShiftPattern,
    overrides: &Overrides,
    today: NaiveDate,
) -> DayInfo {
    let (shift_type, is_overridden, note) = match overrides.get(&date) {
        Some(entry) => (
            entry.shift_type,
            true,
            entry.note.clone().unwrap_or_default(),
        ),
        None => (pattern_shift(date, pattern), false, String::new()),
    };

    DayInfo {
        date,
        shift_type,
        is_overridden,
        note,
        is_today: date == today,
    }
}

/// Shift type the pattern alone assigns to a date
pub fn pattern_shift(date: NaiveDate, pattern: &ShiftPattern) -> ShiftType {
    match day_in_cycle(date, pattern) {
        Some(offset) if offset < i64::from(pattern.work_days) => ShiftType::Work,
        _ => ShiftType::Off,
    }
}

/// Zero-based offset of `date` inside its cycle, `None` for degenerate patterns
pub fn day_in_cycle(date: NaiveDate, pattern: &ShiftPattern) -> Option<i64> {
    let cycle_length = pattern.cycle_length();
    if cycle_length <= 0 {
        return None;
    }
    let day_diff = days_between(pattern.cycle_start, date);
    Some(day_diff.rem_euclid(cycle_length))
}
