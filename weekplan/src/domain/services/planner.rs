use tracing::{debug, info, instrument};

use crate::domain::{
    activities_in_week, day_progress,
    models::{
        Activity, ActivityDraft, ActivityId, ActivityPatch, DayIndex, DeleteIntent,
        DeleteOutcome, Goal, WeekId,
    },
    ports::{
        inbound::PlannerService,
        outbound::{ActivityStore, GoalsProvider},
    },
    search, PlannerError, PlannerResult, SearchHit, WeekView,
};

/// Implementation of the PlannerService inbound port.
///
/// Holds the activity store and goals provider it is given; nothing is read
/// from ambient state.
pub struct PlannerServiceImpl<S, G> {
    store: S,
    goals: G,
}

impl<S, G> PlannerServiceImpl<S, G> {
    pub fn new(store: S, goals: G) -> Self {
        Self { store, goals }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: ActivityStore, G: GoalsProvider> PlannerServiceImpl<S, G> {
    fn require(&self, id: &ActivityId) -> PlannerResult<Activity> {
        self.store
            .get(id)?
            .ok_or_else(|| PlannerError::ActivityNotFound(id.clone()))
    }

    fn require_scheduled(activity: &Activity, day: DayIndex) -> PlannerResult<()> {
        if activity.is_scheduled_on(day) {
            Ok(())
        } else {
            Err(PlannerError::DayNotScheduled {
                id: activity.id.clone(),
                day,
            })
        }
    }

    fn commit(&mut self, current: &Activity, patch: ActivityPatch) -> PlannerResult<Activity> {
        let updated = current.patched(patch)?;
        self.store.replace(updated.clone())?;
        Ok(updated)
    }
}

impl<S: ActivityStore, G: GoalsProvider> PlannerService for PlannerServiceImpl<S, G> {
    #[instrument(skip_all, fields(week = %week))]
    fn add_activity(
        &mut self,
        draft: ActivityDraft,
        day: Option<DayIndex>,
        week: WeekId,
    ) -> PlannerResult<Activity> {
        let day = day.ok_or(PlannerError::MissingDay)?;
        let activity = Activity::from_draft(draft, day, week)?;
        self.store.insert(activity.clone())?;

        info!(id = %activity.id, %day, "Added activity");
        Ok(activity)
    }

    #[instrument(skip_all, fields(id = %id))]
    fn patch_activity(&mut self, id: &ActivityId, patch: ActivityPatch) -> PlannerResult<Activity> {
        let current = self.require(id)?;
        if patch.is_empty() {
            return Ok(current);
        }
        let updated = self.commit(&current, patch)?;

        debug!("Patched activity");
        Ok(updated)
    }

    #[instrument(skip_all, fields(id = %id, day = %day))]
    fn toggle_completion(&mut self, id: &ActivityId, day: DayIndex) -> PlannerResult<Activity> {
        let current = self.require(id)?;
        let done = !current.is_completed_on(day);
        let updated = self.commit(&current, ActivityPatch::completion(day, done))?;

        debug!(done, "Toggled completion");
        Ok(updated)
    }

    #[instrument(skip_all, fields(id = %id, day = %day))]
    fn toggle_reminder(&mut self, id: &ActivityId, day: DayIndex) -> PlannerResult<Activity> {
        let current = self.require(id)?;
        Self::require_scheduled(&current, day)?;
        let mut reminder = current
            .reminder
            .ok_or_else(|| PlannerError::NoReminder(id.clone()))?;
        reminder.enabled = !reminder.enabled;

        let updated = self.commit(
            &current,
            ActivityPatch {
                reminder: Some(Some(reminder)),
                ..Default::default()
            },
        )?;

        debug!(enabled = reminder.enabled, "Toggled reminder");
        Ok(updated)
    }

    #[instrument(skip_all, fields(id = %id))]
    fn record_progress(&mut self, id: &ActivityId, count: u32) -> PlannerResult<Activity> {
        let current = self.require(id)?;
        if current.target_count.is_none() {
            return Err(PlannerError::NoTarget(id.clone()));
        }
        self.commit(
            &current,
            ActivityPatch {
                progress_count: Some(Some(count)),
                ..Default::default()
            },
        )
    }

    #[instrument(skip_all, fields(id = %intent.activity_id()))]
    fn delete(&mut self, intent: DeleteIntent) -> PlannerResult<DeleteOutcome> {
        match intent {
            DeleteIntent::FullRemoval(id) => {
                let removed = self.store.remove(&id)?;
                info!("Removed activity");
                Ok(DeleteOutcome::Removed(removed))
            }
            DeleteIntent::UnmarkDay(id, day) => {
                let current = self.require(&id)?;
                let updated = self.commit(&current, ActivityPatch::completion(day, false))?;
                info!(%day, "Unmarked day");
                Ok(DeleteOutcome::Unmarked(updated))
            }
        }
    }

    fn activity(&self, id: &ActivityId) -> PlannerResult<Activity> {
        self.require(id)
    }

    fn week_view(&self, week: WeekId) -> PlannerResult<WeekView> {
        let activities = self.store.list()?;
        Ok(WeekView::build(&activities, week))
    }

    fn day_progress(&self, week: WeekId, day: DayIndex) -> PlannerResult<u8> {
        let activities = self.store.list()?;
        Ok(day_progress(activities_in_week(&activities, week), day))
    }

    fn search(&self, term: &str) -> PlannerResult<Vec<SearchHit>> {
        let activities = self.store.list()?;
        Ok(search(&activities, term))
    }

    fn goals(&self) -> Vec<Goal> {
        self.goals.goals()
    }

    fn goal_for(&self, activity: &Activity) -> Option<Goal> {
        activity.goal_id.as_ref().and_then(|id| self.goals.goal(id))
    }
}
