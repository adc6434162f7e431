use crate::domain::models::{Goal, GoalId};

/// Key under which the goals list is kept in a [`KeyValueStore`](super::KeyValueStore).
pub const GOALS_KEY: &str = "goals";

/// Outbound port for the read-only goals list.
///
/// Goals are maintained elsewhere; lookups never fail; unreadable data
/// simply means no goals.
pub trait GoalsProvider {
    fn goals(&self) -> Vec<Goal>;

    fn goal(&self, id: &GoalId) -> Option<Goal> {
        self.goals().into_iter().find(|g| &g.id == id)
    }
}
