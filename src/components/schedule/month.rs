use super::classifier::classify;
use super::models::{CalendarCell, DayInfo, Overrides, ShiftPattern, ShiftType};
use super::summary::summarize;
use crate::error::AppResult;
use crate::utils::time::{first_of_month, last_of_month};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use std::collections::BTreeMap;

/// One month of classified days, laid out as calendar weeks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    #[serde(skip)]
    pub week_start: Weekday,
    pub cells: Vec<CalendarCell>,
    pub summary: BTreeMap<ShiftType, usize>,
}

impl MonthView {
    /// Classify every day of a month and summarize it
    pub fn build(
        year: i32,
        month: u32,
        week_start: Weekday,
        pattern: &ShiftPattern,
        overrides: &Overrides,
        today: NaiveDate,
    ) -> AppResult<Self> {
        let cells = month_cells(year, month, week_start, pattern, overrides, today)?;
        let summary = summarize(&cells);
        Ok(Self {
            year,
            month,
            week_start,
            cells,
            summary,
        })
    }

    /// Rows of seven cells each
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(7)
    }

    /// The classified days without padding
    pub fn days(&self) -> impl Iterator<Item = &DayInfo> {
        self.cells.iter().filter_map(CalendarCell::day)
    }
}

/// Weekday columns in display order
pub fn weekday_columns(week_start: Weekday) -> [Weekday; 7] {
    let mut columns = [week_start; 7];
    for i in 1..7 {
        columns[i] = columns[i - 1].succ();
    }
    columns
}

/// Padded grid cells for one month
///
/// Leading padding puts the first of the month under its weekday column and
/// trailing padding completes the last week.
pub fn month_cells(
    year: i32,
    month: u32,
    week_start: Weekday,
    pattern: &ShiftPattern,
    overrides: &Overrides,
    today: NaiveDate,
) -> AppResult<Vec<CalendarCell>> {
    let first = first_of_month(year, month)?;
    let last = last_of_month(year, month)?;

    let leading = (first.weekday().num_days_from_monday() + 7
        - week_start.num_days_from_monday())
        % 7;

    let mut cells: Vec<CalendarCell> = (0..leading).map(|_| CalendarCell::Padding).collect();
    cells.extend(
        first
            .iter_days()
            .take_while(|day| *day <= last)
            .map(|day| CalendarCell::Day(classify(day, pattern, overrides, today))),
    );

    let trailing = (7 - cells.len() % 7) % 7;
    cells.extend((0..trailing).map(|_| CalendarCell::Padding));

    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::schedule::models::Override;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pattern() -> ShiftPattern {
        ShiftPattern::new(5, 2, ymd(2024, 1, 1)).unwrap()
    }

    #[test]
    fn test_weekday_columns() {
        assert_eq!(weekday_columns(Weekday::Sun)[0], Weekday::Sun);
        assert_eq!(weekday_columns(Weekday::Sun)[6], Weekday::Sat);
        assert_eq!(weekday_columns(Weekday::Mon)[6], Weekday::Sun);
    }

    #[test]
    fn test_january_2024_sunday_start() {
        // 2024-01-01 is a Monday, so one padding cell when weeks start on Sunday
        let cells = month_cells(2024, 1, Weekday::Sun, &pattern(), &Overrides::new(), ymd(2024, 1, 15))
            .unwrap();
        assert_eq!(cells[0], CalendarCell::Padding);
        assert_eq!(cells[1].day().map(|d| d.date), Some(ymd(2024, 1, 1)));
        assert_eq!(cells.len() % 7, 0);
        assert_eq!(cells.iter().filter_map(CalendarCell::day).count(), 31);
    }

    #[test]
    fn test_january_2024_monday_start() {
        let cells = month_cells(2024, 1, Weekday::Mon, &pattern(), &Overrides::new(), ymd(2024, 1, 15))
            .unwrap();
        assert_eq!(cells[0].day().map(|d| d.date), Some(ymd(2024, 1, 1)));
        // 31 days starting Monday fill four weeks and three days
        assert_eq!(cells.len(), 35);
        assert!(cells[31..].iter().all(|c| *c == CalendarCell::Padding));
    }

    #[test]
    fn test_february_2026_needs_no_padding() {
        // 2026-02-01 is a Sunday and the month has exactly 28 days
        let cells = month_cells(2026, 2, Weekday::Sun, &pattern(), &Overrides::new(), ymd(2026, 2, 1))
            .unwrap();
        assert_eq!(cells.len(), 28);
        assert!(cells.iter().all(|c| c.day().is_some()));
    }

    #[test]
    fn test_month_view_summary_and_today() {
        let mut overrides = Overrides::new();
        overrides.insert(ymd(2024, 1, 3), Override::new(ShiftType::Vacation));

        let view = MonthView::build(2024, 1, Weekday::Sun, &pattern(), &overrides, ymd(2024, 1, 15))
            .unwrap();

        // January 2024 under 5/2 from the 1st has 23 work days, one replaced by vacation
        assert_eq!(view.summary[&ShiftType::Work], 22);
        assert_eq!(view.summary[&ShiftType::Off], 8);
        assert_eq!(view.summary[&ShiftType::Vacation], 1);
        assert_eq!(view.summary.values().sum::<usize>(), 31);

        let todays: Vec<_> = view.days().filter(|d| d.is_today).collect();
        assert_eq!(todays.len(), 1);
        assert_eq!(todays[0].date, ymd(2024, 1, 15));
        assert!(view.weeks().all(|w| w.len() == 7));
    }

    #[test]
    fn test_invalid_month() {
        assert!(month_cells(2024, 13, Weekday::Sun, &pattern(), &Overrides::new(), ymd(2024, 1, 1)).is_err());
    }
}
