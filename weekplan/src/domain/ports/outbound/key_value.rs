use crate::domain::PlannerResult;

/// Outbound port for a string key-value store.
///
/// This is the persistence the planner relies on: activities and goals are
/// each kept as one JSON document under a well-known key.
pub trait KeyValueStore {
    /// Read the value under `key`, `None` when absent.
    fn get(&self, key: &str) -> PlannerResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> PlannerResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> PlannerResult<()>;
}
