//! Linear search over every activity, regardless of the selected week.

use serde::Serialize;
use time::Date;

use crate::domain::models::{Activity, ActivityAnchor, ActivityId, DayIndex, WeekId};

/// One (activity, day) row of a search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub activity_id: ActivityId,
    pub title: String,
    pub day: DayIndex,
    /// Date of `day` in the activity's own week.
    pub date: Date,
    pub week: WeekId,
    pub completed: bool,
}

impl SearchHit {
    pub fn anchor(&self) -> ActivityAnchor {
        ActivityAnchor::new(self.activity_id.clone(), self.day)
    }
}

/// Every activity whose title or description contains `term`
/// (case-insensitive), expanded into one row per selected day.
///
/// An empty term matches nothing.
pub fn search(activities: &[Activity], term: &str) -> Vec<SearchHit> {
    if term.is_empty() {
        return vec![];
    }
    let needle = term.to_lowercase();

    activities
        .iter()
        .filter(|a| a.matches_lowercase(&needle))
        .flat_map(|activity| {
            activity.selected_days.iter().map(move |&day| SearchHit {
                activity_id: activity.id.clone(),
                title: activity.title.clone(),
                day,
                date: activity.week.date_of(day),
                week: activity.week,
                completed: activity.is_completed_on(day),
            })
        })
        .collect()
}
