use crate::domain::{
    models::{
        Activity, ActivityDraft, ActivityId, ActivityPatch, DayIndex, DeleteIntent,
        DeleteOutcome, Goal, WeekId,
    },
    PlannerResult, SearchHit, WeekView,
};

/// Inbound port for the weekly planner.
///
/// This trait defines the use cases a front end can invoke. Every mutation
/// is written through to the store before it returns, so the next read
/// (week view, progress, search) already reflects it.
pub trait PlannerService {
    // ========================================================================
    // Mutations
    // ========================================================================

    /// Add an activity on the selected day of `week`.
    ///
    /// Fails with `MissingDay` and leaves the store untouched when no day is
    /// selected.
    fn add_activity(
        &mut self,
        draft: ActivityDraft,
        day: Option<DayIndex>,
        week: WeekId,
    ) -> PlannerResult<Activity>;

    /// Merge a partial update into an activity.
    fn patch_activity(&mut self, id: &ActivityId, patch: ActivityPatch) -> PlannerResult<Activity>;

    /// Flip the completion flag of one day.
    fn toggle_completion(&mut self, id: &ActivityId, day: DayIndex) -> PlannerResult<Activity>;

    /// Flip whether the activity's reminder is enabled.
    fn toggle_reminder(&mut self, id: &ActivityId, day: DayIndex) -> PlannerResult<Activity>;

    /// Record progress towards the activity's target count.
    fn record_progress(&mut self, id: &ActivityId, count: u32) -> PlannerResult<Activity>;

    /// Apply a confirmed delete: remove the activity or unmark one day.
    fn delete(&mut self, intent: DeleteIntent) -> PlannerResult<DeleteOutcome>;

    // ========================================================================
    // Queries
    // ========================================================================

    fn activity(&self, id: &ActivityId) -> PlannerResult<Activity>;

    fn week_view(&self, week: WeekId) -> PlannerResult<WeekView>;

    fn day_progress(&self, week: WeekId, day: DayIndex) -> PlannerResult<u8>;

    /// Search all weeks. An empty term returns no hits.
    fn search(&self, term: &str) -> PlannerResult<Vec<SearchHit>>;

    fn goals(&self) -> Vec<Goal>;

    fn goal_for(&self, activity: &Activity) -> Option<Goal>;
}
