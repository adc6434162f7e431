//! Week-scoped grouping and completion percentages.
//!
//! Everything here is derived from the current activity list on each call;
//! nothing is cached, so a read after a mutation always reflects it.

use serde::Serialize;
use time::Date;

use crate::domain::models::{Activity, DayIndex, WeekId};

/// Activities belonging to `week`, in store order.
pub fn activities_in_week(
    activities: &[Activity],
    week: WeekId,
) -> impl Iterator<Item = &Activity> + '_ {
    activities.iter().filter(move |a| a.in_week(week))
}

/// Activities scheduled on `day`, in the order they are given.
pub fn activities_on_day<'a, I>(activities: I, day: DayIndex) -> impl Iterator<Item = &'a Activity>
where
    I: IntoIterator<Item = &'a Activity>,
{
    activities
        .into_iter()
        .filter(move |a| a.is_scheduled_on(day))
}

/// Share of the activities scheduled on `day` that are completed that day,
/// as a whole percentage. Zero when nothing is scheduled.
pub fn day_progress<'a, I>(activities: I, day: DayIndex) -> u8
where
    I: IntoIterator<Item = &'a Activity>,
{
    let (total, completed) =
        activities_on_day(activities, day).fold((0usize, 0usize), |(total, done), a| {
            (total + 1, done + usize::from(a.is_completed_on(day)))
        });
    percentage(completed, total)
}

/// `round(100 * completed / total)` with halves rounded up, in integers so
/// there is no float drift.
pub fn percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total);
    ((200 * completed + total) / (2 * total)) as u8
}

/// One column of the week grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayColumn {
    pub day: DayIndex,
    pub date: Date,
    pub activities: Vec<Activity>,
    pub progress: u8,
}

impl DayColumn {
    pub fn is_complete(&self) -> bool {
        self.progress == 100
    }
}

/// The seven day columns of a week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekView {
    pub week: WeekId,
    pub days: Vec<DayColumn>,
}

impl WeekView {
    pub fn build(activities: &[Activity], week: WeekId) -> Self {
        let in_week: Vec<&Activity> = activities_in_week(activities, week).collect();

        let days = DayIndex::all()
            .map(|day| DayColumn {
                day,
                date: week.date_of(day),
                activities: activities_on_day(in_week.iter().copied(), day)
                    .cloned()
                    .collect(),
                progress: day_progress(in_week.iter().copied(), day),
            })
            .collect();

        Self { week, days }
    }

    pub fn day(&self, day: DayIndex) -> &DayColumn {
        &self.days[day.as_usize()]
    }

    pub fn progress(&self) -> [u8; 7] {
        let mut progress = [0; 7];
        for column in &self.days {
            progress[column.day.as_usize()] = column.progress;
        }
        progress
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(|d| d.activities.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ActivityDraft;
    use std::collections::BTreeSet;

    fn day(index: u8) -> DayIndex {
        DayIndex::new(index).unwrap()
    }

    fn week() -> WeekId {
        WeekId::new(20, 2024).unwrap()
    }

    fn activity(title: &str, week: WeekId, days: &[u8], done: &[u8]) -> Activity {
        let mut activity =
            Activity::from_draft(ActivityDraft::new(title), day(days[0]), week).unwrap();
        activity.selected_days = days.iter().map(|d| day(*d)).collect::<BTreeSet<_>>();
        for d in done {
            activity.completed_days.insert(day(*d), true);
        }
        activity
    }

    #[test]
    fn progress_matches_reference_example() {
        let a = activity("A", week(), &[0, 2], &[0]);
        let b = activity("B", week(), &[2], &[]);
        let all = vec![a, b];

        assert_eq!(day_progress(&all, day(0)), 100);
        assert_eq!(day_progress(&all, day(2)), 50);
        assert_eq!(day_progress(&all, day(5)), 0);
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(0, 4), 0);
        assert_eq!(percentage(4, 4), 100);
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn percentage_stays_in_range() {
        for total in 1..50 {
            for completed in 0..=total {
                assert!(percentage(completed, total) <= 100);
            }
        }
    }

    #[test]
    fn explicit_false_flag_counts_as_not_completed() {
        let mut a = activity("A", week(), &[1], &[]);
        a.completed_days.insert(day(1), false);
        assert_eq!(day_progress(&[a], day(1)), 0);
    }

    #[test]
    fn week_filter_requires_exact_pair() {
        let same = activity("same", week(), &[0], &[]);
        let other_year = activity("other year", WeekId::new(20, 2023).unwrap(), &[0], &[]);
        let other_week = activity("other week", WeekId::new(21, 2024).unwrap(), &[0], &[]);
        let all = vec![other_year, same, other_week];

        let titles: Vec<_> = activities_in_week(&all, week())
            .map(|a| a.title.as_str())
            .collect();
        assert_eq!(titles, vec!["same"]);
    }

    #[test]
    fn day_grouping_keeps_store_order() {
        let first = activity("first", week(), &[4, 3], &[]);
        let second = activity("second", week(), &[3], &[]);
        let all = vec![first, second];

        let titles: Vec<_> = activities_on_day(&all, day(3))
            .map(|a| a.title.as_str())
            .collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn week_view_builds_all_columns() {
        let a = activity("A", week(), &[0, 2], &[0]);
        let b = activity("B", week(), &[2], &[]);
        let elsewhere = activity("C", WeekId::new(21, 2024).unwrap(), &[2], &[2]);
        let view = WeekView::build(&[a, b, elsewhere], week());

        assert_eq!(view.days.len(), 7);
        assert_eq!(view.progress(), [100, 0, 50, 0, 0, 0, 0]);
        assert!(view.day(day(0)).is_complete());
        assert_eq!(view.day(day(2)).activities.len(), 2);
        assert_eq!(view.day(day(0)).date, week().start_date());
        assert!(!view.is_empty());
    }
}
