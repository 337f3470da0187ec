use super::models::{Override, ShiftType};
use crate::error::{AppResult, Error};
use chrono::NaiveDate;

/// Every calendar day from `start` to `end`, both inclusive, in ascending order
///
/// A range whose end precedes its start is rejected rather than swapped.
pub fn expand_range(start: NaiveDate, end: NaiveDate) -> AppResult<Vec<NaiveDate>> {
    if end < start {
        return Err(Error::InvalidRange { start, end });
    }
    Ok(start.iter_days().take_while(|day| *day <= end).collect())
}

/// Vacation overrides for every day of a range
pub fn vacation_overrides(
    start: NaiveDate,
    end: NaiveDate,
    note: &str,
) -> AppResult<Vec<(NaiveDate, Override)>> {
    let entry = Override::new(ShiftType::Vacation).with_note(note);
    Ok(expand_range(start, end)?
        .into_iter()
        .map(|day| (day, entry.clone()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::schedule::models::{set_override, Overrides};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_inclusive_ascending() {
        let days = expand_range(ymd(2024, 2, 1), ymd(2024, 2, 3)).unwrap();
        assert_eq!(days, vec![ymd(2024, 2, 1), ymd(2024, 2, 2), ymd(2024, 2, 3)]);
    }

    #[test]
    fn test_single_day() {
        let days = expand_range(ymd(2024, 2, 29), ymd(2024, 2, 29)).unwrap();
        assert_eq!(days, vec![ymd(2024, 2, 29)]);
    }

    #[test]
    fn test_crosses_month_and_year() {
        let days = expand_range(ymd(2023, 12, 30), ymd(2024, 1, 2)).unwrap();
        assert_eq!(days.len(), 4);
        assert_eq!(days.first(), Some(&ymd(2023, 12, 30)));
        assert_eq!(days.last(), Some(&ymd(2024, 1, 2)));
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        let err = expand_range(ymd(2024, 2, 3), ymd(2024, 2, 1)).unwrap_err();
        assert!(matches!(err, Error::InvalidRange { .. }));
    }

    #[test]
    fn test_range_ending_at_max_date_terminates() {
        let start = NaiveDate::MAX.pred_opt().unwrap();
        let days = expand_range(start, NaiveDate::MAX).unwrap();
        assert_eq!(days, vec![start, NaiveDate::MAX]);
    }

    #[test]
    fn test_vacation_overrides_are_idempotent() {
        let mut overrides = Overrides::new();
        for (day, entry) in vacation_overrides(ymd(2024, 2, 1), ymd(2024, 2, 3), "Férias").unwrap() {
            set_override(&mut overrides, day, entry);
        }
        let first_pass = overrides.clone();

        for (day, entry) in vacation_overrides(ymd(2024, 2, 1), ymd(2024, 2, 3), "Férias").unwrap() {
            set_override(&mut overrides, day, entry);
        }
        assert_eq!(overrides, first_pass);
        assert_eq!(overrides.len(), 3);
        assert!(overrides
            .values()
            .all(|o| o.shift_type == ShiftType::Vacation && o.note.as_deref() == Some("Férias")));
    }

    #[test]
    fn test_vacation_overwrites_existing_override() {
        let mut overrides = Overrides::new();
        set_override(
            &mut overrides,
            ymd(2024, 2, 2),
            Override::new(ShiftType::Swap).with_note("Covering for Ana"),
        );
        for (day, entry) in vacation_overrides(ymd(2024, 2, 1), ymd(2024, 2, 3), "Férias").unwrap() {
            set_override(&mut overrides, day, entry);
        }
        let replaced = &overrides[&ymd(2024, 2, 2)];
        assert_eq!(replaced.shift_type, ShiftType::Vacation);
        assert_eq!(replaced.note.as_deref(), Some("Férias"));
    }
}
