use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use time::{OffsetDateTime, Time};

use super::{ActivityId, DayIndex, DomainId, GoalId, WeekId};
use crate::domain::PlannerError;

time::serde::format_description!(hh_mm, Time, "[hour]:[minute]");

/// A task pinned to one or more days of a single week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: ActivityId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<DomainId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<GoalId>,
    /// Stored as `weekNumber` and `year` next to the other fields.
    #[serde(flatten)]
    pub week: WeekId,
    #[serde(default)]
    pub selected_days: BTreeSet<DayIndex>,
    #[serde(default)]
    pub completed_days: BTreeMap<DayIndex, bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder: Option<Reminder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_count: Option<u32>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Activity {
    /// Build a new activity from a draft, scheduled on a single day.
    pub fn from_draft(draft: ActivityDraft, day: DayIndex, week: WeekId) -> Result<Self, PlannerError> {
        let title = draft.title.trim().to_string();
        if title.is_empty() {
            return Err(PlannerError::EmptyTitle);
        }

        Ok(Self {
            id: ActivityId::generate(),
            title,
            description: draft.description.filter(|d| !d.trim().is_empty()),
            domain_id: draft.domain_id,
            goal_id: draft.goal_id,
            week,
            selected_days: BTreeSet::from([day]),
            completed_days: BTreeMap::new(),
            reminder: draft.reminder,
            target_count: draft.target_count,
            progress_count: draft.target_count.map(|_| 0),
            created_at: OffsetDateTime::now_utc(),
        })
    }

    pub fn is_scheduled_on(&self, day: DayIndex) -> bool {
        self.selected_days.contains(&day)
    }

    pub fn is_completed_on(&self, day: DayIndex) -> bool {
        self.completed_days.get(&day).copied().unwrap_or(false)
    }

    pub fn in_week(&self, week: WeekId) -> bool {
        self.week == week
    }

    /// Case-insensitive substring match on title or description.
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }

    /// Return a copy with `patch` merged in, or an error if the result would
    /// break an invariant. `self` is never left half-updated.
    pub fn patched(&self, patch: ActivityPatch) -> Result<Self, PlannerError> {
        let mut next = self.clone();

        if let Some(title) = patch.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(PlannerError::EmptyTitle);
            }
            next.title = title;
        }
        if let Some(description) = patch.description {
            next.description = description.filter(|d| !d.trim().is_empty());
        }
        if let Some(domain_id) = patch.domain_id {
            next.domain_id = domain_id;
        }
        if let Some(goal_id) = patch.goal_id {
            next.goal_id = goal_id;
        }
        if let Some(reminder) = patch.reminder {
            next.reminder = reminder;
        }

        if let Some(days) = patch.selected_days {
            if days.is_empty() {
                return Err(PlannerError::EmptyDaySet);
            }
            next.completed_days.retain(|day, _| days.contains(day));
            next.selected_days = days;
        }

        // Merged key by key, so flags for other days survive.
        if let Some(completed) = patch.completed_days {
            for (day, done) in completed {
                if !next.is_scheduled_on(day) {
                    return Err(PlannerError::DayNotScheduled {
                        id: next.id.clone(),
                        day,
                    });
                }
                next.completed_days.insert(day, done);
            }
        }

        if let Some(target) = patch.target_count {
            next.target_count = target;
            if target.is_none() {
                next.progress_count = None;
            }
        }
        if let Some(progress) = patch.progress_count {
            next.progress_count = progress;
        }
        if let (Some(target), Some(progress)) = (next.target_count, next.progress_count) {
            next.progress_count = Some(progress.min(target));
        } else if next.target_count.is_some() && next.progress_count.is_none() {
            next.progress_count = Some(0);
        }

        Ok(next)
    }
}

/// A reminder shown at a time of day on each scheduled day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    #[serde(with = "hh_mm")]
    pub time: Time,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Reminder {
    pub fn new(time: Time) -> Self {
        Self {
            time,
            enabled: true,
        }
    }

    /// Parse "HH:MM".
    pub fn parse(input: &str) -> Result<Self, PlannerError> {
        let format = time::macros::format_description!("[hour]:[minute]");
        Time::parse(input.trim(), format)
            .map(Self::new)
            .map_err(|_| PlannerError::InvalidReminderTime(input.to_string()))
    }

    pub fn time_label(&self) -> String {
        format!("{:02}:{:02}", self.time.hour(), self.time.minute())
    }
}

/// Everything the caller supplies when adding an activity. Identity, creation
/// time, week and day are assigned by the planner.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub domain_id: Option<DomainId>,
    #[serde(default)]
    pub goal_id: Option<GoalId>,
    #[serde(default)]
    pub reminder: Option<Reminder>,
    #[serde(default)]
    pub target_count: Option<u32>,
}

impl ActivityDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_domain(mut self, domain_id: DomainId) -> Self {
        self.domain_id = Some(domain_id);
        self
    }

    pub fn with_goal(mut self, goal_id: GoalId) -> Self {
        self.goal_id = Some(goal_id);
        self
    }

    pub fn with_reminder(mut self, reminder: Reminder) -> Self {
        self.reminder = Some(reminder);
        self
    }

    pub fn with_target(mut self, target_count: u32) -> Self {
        self.target_count = Some(target_count);
        self
    }
}

/// A partial update. `None` leaves a field alone; for clearable fields
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub domain_id: Option<Option<DomainId>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub goal_id: Option<Option<GoalId>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub reminder: Option<Option<Reminder>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub target_count: Option<Option<u32>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub progress_count: Option<Option<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_days: Option<BTreeSet<DayIndex>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_days: Option<BTreeMap<DayIndex, bool>>,
}

impl ActivityPatch {
    pub fn completion(day: DayIndex, done: bool) -> Self {
        Self {
            completed_days: Some(BTreeMap::from([(day, done)])),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// What a confirmed delete does.
///
/// `UnmarkDay` is what "delete" means inside a single day's view: it undoes
/// that day's completion and keeps the activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteIntent {
    FullRemoval(ActivityId),
    UnmarkDay(ActivityId, DayIndex),
}

impl DeleteIntent {
    pub fn activity_id(&self) -> &ActivityId {
        match self {
            DeleteIntent::FullRemoval(id) | DeleteIntent::UnmarkDay(id, _) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    Removed(Activity),
    Unmarked(Activity),
}
