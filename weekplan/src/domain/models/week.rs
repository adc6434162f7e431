use serde::{Deserialize, Serialize};
use std::fmt;
use time::{Date, Duration, OffsetDateTime, UtcOffset, Weekday};

use super::DayIndex;
use crate::domain::PlannerError;

/// ISO-8601 week of a year, the partition key for activities.
///
/// Constructing one validates that the week exists in that year, so the
/// date helpers below never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawWeekId")]
pub struct WeekId {
    year: i32,
    week_number: u8,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWeekId {
    week_number: u8,
    year: i32,
}

impl TryFrom<RawWeekId> for WeekId {
    type Error = PlannerError;

    fn try_from(raw: RawWeekId) -> Result<Self, Self::Error> {
        WeekId::new(raw.week_number, raw.year)
    }
}

impl WeekId {
    pub fn new(week_number: u8, year: i32) -> Result<Self, PlannerError> {
        Date::from_iso_week_date(year, week_number, Weekday::Monday).map_err(|_| {
            PlannerError::InvalidWeek {
                week: week_number,
                year,
            }
        })?;
        Ok(Self { year, week_number })
    }

    /// The ISO week a date falls in. Early January dates may belong to the
    /// last week of the previous year.
    pub fn containing(date: Date) -> Self {
        let (year, week_number, _) = date.to_iso_week_date();
        Self { year, week_number }
    }

    /// The week containing today, in local time when the offset is known.
    pub fn current() -> Self {
        let today = OffsetDateTime::now_utc()
            .to_offset(UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
            .date();
        Self::containing(today)
    }

    pub fn week_number(&self) -> u8 {
        self.week_number
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Monday of this week.
    pub fn start_date(&self) -> Date {
        // Validated in `new`/`containing`.
        Date::from_iso_week_date(self.year, self.week_number, Weekday::Monday)
            .unwrap_or(Date::MIN)
    }

    pub fn date_of(&self, day: DayIndex) -> Date {
        let start = self.start_date();
        start
            .checked_add(Duration::days(day.as_u8() as i64))
            .unwrap_or(start)
    }

    pub fn dates(&self) -> [Date; 7] {
        let start = self.start_date();
        let mut dates = [start; 7];
        for day in DayIndex::all() {
            dates[day.as_usize()] = self.date_of(day);
        }
        dates
    }

    pub fn next(&self) -> Option<Self> {
        self.start_date()
            .checked_add(Duration::weeks(1))
            .map(Self::containing)
    }

    pub fn previous(&self) -> Option<Self> {
        self.start_date()
            .checked_sub(Duration::weeks(1))
            .map(Self::containing)
    }
}

impl fmt::Display for WeekId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "week {} of {}", self.week_number, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn rejects_week_that_does_not_exist() {
        assert!(WeekId::new(53, 2020).is_ok());
        assert!(matches!(
            WeekId::new(53, 2021),
            Err(PlannerError::InvalidWeek { week: 53, year: 2021 })
        ));
        assert!(WeekId::new(0, 2024).is_err());
    }

    #[test]
    fn start_date_is_monday_of_iso_week() {
        let week = WeekId::new(1, 2025).unwrap();
        assert_eq!(week.start_date(), date!(2024 - 12 - 30));
        assert_eq!(week.date_of(DayIndex::new(6).unwrap()), date!(2025 - 01 - 05));
    }

    #[test]
    fn containing_handles_year_boundary() {
        let week = WeekId::containing(date!(2021 - 01 - 01));
        assert_eq!(week.week_number(), 53);
        assert_eq!(week.year(), 2020);
    }

    #[test]
    fn next_and_previous_cross_years() {
        let last = WeekId::new(52, 2024).unwrap();
        let first = last.next().unwrap();
        assert_eq!((first.week_number(), first.year()), (1, 2025));
        assert_eq!(first.previous(), Some(last));
    }

    #[test]
    fn dates_cover_seven_consecutive_days() {
        let dates = WeekId::new(10, 2024).unwrap().dates();
        assert_eq!(dates[0], date!(2024 - 03 - 04));
        assert_eq!(dates[6], date!(2024 - 03 - 10));
    }

    #[test]
    fn deserialize_validates_week() {
        let week: WeekId = serde_json::from_str(r#"{"weekNumber":5,"year":2024}"#).unwrap();
        assert_eq!(week, WeekId::new(5, 2024).unwrap());
        assert!(serde_json::from_str::<WeekId>(r#"{"weekNumber":60,"year":2024}"#).is_err());
    }
}
