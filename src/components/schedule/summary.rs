use super::models::{CalendarCell, ShiftType};
use std::collections::BTreeMap;

/// Count the classified days of a period per shift type
///
/// Padding cells are skipped. Types that never occur are absent from the result,
/// so callers treat a missing entry as zero.
pub fn summarize<'a, I>(cells: I) -> BTreeMap<ShiftType, usize>
where
    I: IntoIterator<Item = &'a CalendarCell>,
{
    cells
        .into_iter()
        .filter_map(CalendarCell::day)
        .fold(BTreeMap::new(), |mut counts, day| {
            *counts.entry(day.shift_type).or_insert(0) += 1;
            counts
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::schedule::models::DayInfo;
    use chrono::NaiveDate;

    fn cell(day: u32, shift_type: ShiftType) -> CalendarCell {
        CalendarCell::Day(DayInfo {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            shift_type,
            is_overridden: shift_type == ShiftType::Vacation,
            note: String::new(),
            is_today: false,
        })
    }

    #[test]
    fn test_counts_per_type() {
        let cells = vec![
            cell(1, ShiftType::Work),
            cell(2, ShiftType::Work),
            cell(3, ShiftType::Off),
            cell(4, ShiftType::Off),
            cell(5, ShiftType::Off),
            cell(6, ShiftType::Vacation),
        ];
        let summary = summarize(&cells);

        let expected: BTreeMap<ShiftType, usize> = [
            (ShiftType::Work, 2),
            (ShiftType::Off, 3),
            (ShiftType::Vacation, 1),
        ]
        .into_iter()
        .collect();
        assert_eq!(summary, expected);
        assert!(!summary.contains_key(&ShiftType::Swap));
        assert!(!summary.contains_key(&ShiftType::Other));
    }

    #[test]
    fn test_padding_is_not_counted() {
        let cells = vec![
            CalendarCell::Padding,
            cell(1, ShiftType::Swap),
            CalendarCell::Padding,
        ];
        let summary = summarize(&cells);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[&ShiftType::Swap], 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(summarize(&Vec::<CalendarCell>::new()).is_empty());
        assert!(summarize(&[CalendarCell::Padding, CalendarCell::Padding]).is_empty());
    }
}
