use tracing::debug;

use crate::domain::{
    models::{ActivityAnchor, DeleteIntent, WeekId},
    SearchHit,
};

/// The week currently shown in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekSelection {
    week: WeekId,
}

/// Where to go after picking a search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchJump {
    pub anchor: ActivityAnchor,
    pub week_changed: bool,
}

impl WeekSelection {
    pub fn new(week: WeekId) -> Self {
        Self { week }
    }

    pub fn week(&self) -> WeekId {
        self.week
    }

    pub fn change_week(&mut self, week: WeekId) {
        self.week = week;
    }

    pub fn next_week(&mut self) {
        if let Some(next) = self.week.next() {
            self.week = next;
        }
    }

    pub fn previous_week(&mut self) {
        if let Some(previous) = self.week.previous() {
            self.week = previous;
        }
    }

    /// Switch to the hit's week if it differs from the selected one and
    /// return the row to scroll to.
    pub fn jump_to(&mut self, hit: &SearchHit) -> SearchJump {
        let week_changed = self.week != hit.week;
        if week_changed {
            debug!(from = %self.week, to = %hit.week, "Switching week for search result");
            self.week = hit.week;
        }
        SearchJump {
            anchor: hit.anchor(),
            week_changed,
        }
    }
}

/// A delete awaiting confirmation. The intent is held as one value so the
/// id and the optional day cannot drift apart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingDelete {
    intent: Option<DeleteIntent>,
}

impl PendingDelete {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any earlier unconfirmed request.
    pub fn request(&mut self, intent: DeleteIntent) {
        self.intent = Some(intent);
    }

    pub fn pending(&self) -> Option<&DeleteIntent> {
        self.intent.as_ref()
    }

    pub fn confirm(&mut self) -> Option<DeleteIntent> {
        self.intent.take()
    }

    pub fn cancel(&mut self) {
        self.intent = None;
    }
}
