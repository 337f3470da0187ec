use crate::error::{AppResult, Error};
use chrono::NaiveDate;
use rust_i18n::t;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A repeating cycle of work days followed by off days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftPattern {
    /// Number of consecutive work days at the start of each cycle
    #[serde(rename = "work")]
    pub work_days: i32,
    /// Number of consecutive off days closing each cycle
    #[serde(rename = "off")]
    pub off_days: i32,
    /// First day of a cycle
    #[serde(rename = "startDate")]
    pub cycle_start: NaiveDate,
}

impl ShiftPattern {
    /// Create a validated pattern
    pub fn new(work_days: i32, off_days: i32, cycle_start: NaiveDate) -> AppResult<Self> {
        let pattern = Self {
            work_days,
            off_days,
            cycle_start,
        };
        pattern.validate()?;
        Ok(pattern)
    }

    /// Check that both halves of the cycle are at least one day long
    pub fn validate(&self) -> AppResult<()> {
        if self.work_days < 1 {
            return Err(Error::InvalidPattern(format!(
                "work days must be at least 1, got {}",
                self.work_days
            )));
        }
        if self.off_days < 1 {
            return Err(Error::InvalidPattern(format!(
                "off days must be at least 1, got {}",
                self.off_days
            )));
        }
        Ok(())
    }

    /// Length of one cycle in days, widened so that no field combination overflows
    pub fn cycle_length(&self) -> i64 {
        i64::from(self.work_days) + i64::from(self.off_days)
    }
}

/// Classification of a single calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShiftType {
    #[serde(rename = "Trabalho", alias = "Work")]
    Work,
    #[serde(rename = "Folga", alias = "Off")]
    Off,
    #[serde(rename = "Troca", alias = "Swap")]
    Swap,
    #[serde(rename = "Férias", alias = "Vacation")]
    Vacation,
    #[serde(rename = "Outro", alias = "Other")]
    Other,
}

impl ShiftType {
    /// Every variant, in display order
    pub const ALL: [ShiftType; 5] = [
        ShiftType::Work,
        ShiftType::Off,
        ShiftType::Swap,
        ShiftType::Vacation,
        ShiftType::Other,
    ];

    /// Localized human-readable label
    pub fn label(&self) -> String {
        match self {
            ShiftType::Work => t!("shift_work"),
            ShiftType::Off => t!("shift_off"),
            ShiftType::Swap => t!("shift_swap"),
            ShiftType::Vacation => t!("shift_vacation"),
            ShiftType::Other => t!("shift_other"),
        }
        .to_string()
    }

    /// Stored label, as written in the persisted override map
    pub fn stored_label(&self) -> &'static str {
        match self {
            ShiftType::Work => "Trabalho",
            ShiftType::Off => "Folga",
            ShiftType::Swap => "Troca",
            ShiftType::Vacation => "Férias",
            ShiftType::Other => "Outro",
        }
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for ShiftType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ShiftType::ALL
            .into_iter()
            .find(|kind| {
                let english = format!("{:?}", kind).to_lowercase();
                wanted == english || wanted == kind.stored_label().to_lowercase()
            })
            .ok_or_else(|| {
                Error::Other(format!(
                    "Unknown shift type '{}', expected one of work, off, swap, vacation, other",
                    s
                ))
            })
    }
}

/// A manual exception for one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Override {
    #[serde(rename = "type")]
    pub shift_type: ShiftType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Override {
    /// Create an override without a note
    pub fn new(shift_type: ShiftType) -> Self {
        Self {
            shift_type,
            note: None,
        }
    }

    /// Attach a note, ignoring blank text
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.note = if note.trim().is_empty() { None } else { Some(note) };
        self
    }
}

/// All overrides, keyed by calendar day
pub type Overrides = BTreeMap<NaiveDate, Override>;

/// Insert or replace the override for one day
pub fn set_override(overrides: &mut Overrides, date: NaiveDate, entry: Override) {
    overrides.insert(date, entry);
}

/// Remove the override for one day, reporting whether one existed
pub fn clear_override(overrides: &mut Overrides, date: NaiveDate) -> bool {
    overrides.remove(&date).is_some()
}

/// Derived classification of one day; never stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayInfo {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub shift_type: ShiftType,
    pub is_overridden: bool,
    pub note: String,
    pub is_today: bool,
}

/// One slot of a rendered month grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "day", rename_all = "camelCase")]
pub enum CalendarCell {
    /// Slot outside the displayed month with no backing date
    Padding,
    Day(DayInfo),
}

impl CalendarCell {
    /// The classified day, if this cell has one
    pub fn day(&self) -> Option<&DayInfo> {
        match self {
            CalendarCell::Padding => None,
            CalendarCell::Day(info) => Some(info),
        }
    }
}

impl From<DayInfo> for CalendarCell {
    fn from(info: DayInfo) -> Self {
        CalendarCell::Day(info)
    }
}
