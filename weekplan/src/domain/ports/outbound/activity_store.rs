use crate::domain::{
    models::{Activity, ActivityId},
    PlannerResult,
};

/// Key under which activities are kept in a [`KeyValueStore`](super::KeyValueStore).
pub const ACTIVITIES_KEY: &str = "activities";

/// Outbound port for the activity collection.
///
/// Implementations must keep insertion order: the grid and the search list
/// activities in the order they were added.
pub trait ActivityStore {
    /// All activities, in insertion order.
    fn list(&self) -> PlannerResult<Vec<Activity>>;

    fn get(&self, id: &ActivityId) -> PlannerResult<Option<Activity>> {
        Ok(self.list()?.into_iter().find(|a| &a.id == id))
    }

    /// Append a new activity. Fails with `DuplicateId` if the id is taken.
    fn insert(&mut self, activity: Activity) -> PlannerResult<()>;

    /// Replace the activity with the same id, keeping its position.
    /// Fails with `ActivityNotFound` if there is none.
    fn replace(&mut self, activity: Activity) -> PlannerResult<()>;

    /// Remove and return the activity. Fails with `ActivityNotFound` if
    /// there is none.
    fn remove(&mut self, id: &ActivityId) -> PlannerResult<Activity>;
}
