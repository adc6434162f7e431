//! Activity store and goals provider on top of any [`KeyValueStore`].

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{
    models::{Activity, ActivityId, Goal},
    ports::outbound::{ActivityStore, GoalsProvider, KeyValueStore, ACTIVITIES_KEY, GOALS_KEY},
    PlannerError, PlannerResult,
};

/// One entry of the stored activities array.
///
/// Entries that do not read as an [`Activity`] stay in the document as they
/// were and are written back in place, so other clients keep their data.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum StoredRecord {
    Activity(Activity),
    Unreadable(Value),
}

impl StoredRecord {
    fn read(value: Value) -> Self {
        match serde_json::from_str::<Activity>(&value.to_string()) {
            Ok(activity) => StoredRecord::Activity(activity),
            Err(e) => {
                let id = value.get("id").cloned().unwrap_or(Value::Null);
                warn!(%id, "Skipping unreadable activity: {}", e);
                StoredRecord::Unreadable(value)
            }
        }
    }

    fn activity(&self) -> Option<&Activity> {
        match self {
            StoredRecord::Activity(activity) => Some(activity),
            StoredRecord::Unreadable(_) => None,
        }
    }
}

/// Keeps all activities as one JSON array under [`ACTIVITIES_KEY`].
///
/// Every call reads the document fresh and every mutation rewrites it, so
/// several handles over the same store never see stale data.
#[derive(Debug, Clone)]
pub struct KeyValueActivityStore<S> {
    kv: S,
}

impl<S: KeyValueStore> KeyValueActivityStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn into_inner(self) -> S {
        self.kv
    }

    fn load(&self) -> PlannerResult<Vec<StoredRecord>> {
        let values: Vec<Value> = match self.kv.get(ACTIVITIES_KEY)? {
            None => return Ok(vec![]),
            Some(raw) if raw.trim().is_empty() => return Ok(vec![]),
            // A document that is not an array is an error, never an empty list.
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                PlannerError::storage(format!("failed to parse stored activities: {e}"))
            })?,
        };
        Ok(values.into_iter().map(StoredRecord::read).collect())
    }

    fn save(&mut self, records: &[StoredRecord]) -> PlannerResult<()> {
        let raw = serde_json::to_string(records)?;
        self.kv.set(ACTIVITIES_KEY, &raw)?;
        debug!(count = records.len(), "Saved activities");
        Ok(())
    }

    fn position(records: &[StoredRecord], id: &ActivityId) -> PlannerResult<usize> {
        records
            .iter()
            .position(|r| r.activity().is_some_and(|a| &a.id == id))
            .ok_or_else(|| PlannerError::ActivityNotFound(id.clone()))
    }
}

impl<S: KeyValueStore> ActivityStore for KeyValueActivityStore<S> {
    fn list(&self) -> PlannerResult<Vec<Activity>> {
        Ok(self
            .load()?
            .into_iter()
            .filter_map(|record| match record {
                StoredRecord::Activity(activity) => Some(activity),
                StoredRecord::Unreadable(_) => None,
            })
            .collect())
    }

    fn insert(&mut self, activity: Activity) -> PlannerResult<()> {
        let mut records = self.load()?;
        if Self::position(&records, &activity.id).is_ok() {
            return Err(PlannerError::DuplicateId(activity.id));
        }
        records.push(StoredRecord::Activity(activity));
        self.save(&records)
    }

    fn replace(&mut self, activity: Activity) -> PlannerResult<()> {
        let mut records = self.load()?;
        let index = Self::position(&records, &activity.id)?;
        records[index] = StoredRecord::Activity(activity);
        self.save(&records)
    }

    fn remove(&mut self, id: &ActivityId) -> PlannerResult<Activity> {
        let mut records = self.load()?;
        let index = Self::position(&records, id)?;
        let removed = match records.remove(index) {
            StoredRecord::Activity(activity) => activity,
            StoredRecord::Unreadable(_) => return Err(PlannerError::ActivityNotFound(id.clone())),
        };
        self.save(&records)?;
        Ok(removed)
    }
}

/// Reads the goals list stored under [`GOALS_KEY`].
///
/// Entries without an id or title are skipped; the rest stay usable.
#[derive(Debug, Clone)]
pub struct KeyValueGoals<S> {
    kv: S,
}

impl<S: KeyValueStore> KeyValueGoals<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }
}

impl<S: KeyValueStore> GoalsProvider for KeyValueGoals<S> {
    fn goals(&self) -> Vec<Goal> {
        let raw = match self.kv.get(GOALS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return vec![],
            Err(e) => {
                warn!("Could not read goals: {}", e);
                return vec![];
            }
        };

        let entries: Vec<Value> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Ignoring malformed goals data: {}", e);
                return vec![];
            }
        };

        entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<Goal>(entry) {
                Ok(goal) => Some(goal),
                Err(e) => {
                    debug!("Skipping goal entry: {}", e);
                    None
                }
            })
            .collect()
    }
}
