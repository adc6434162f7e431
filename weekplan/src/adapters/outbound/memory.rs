//! In-memory adapters, used by tests and by callers that persist on their own.

use std::collections::HashMap;

use crate::domain::{
    models::{Activity, ActivityId, Goal},
    ports::outbound::{ActivityStore, GoalsProvider, KeyValueStore},
    PlannerError, PlannerResult,
};

/// Key-value store backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> PlannerResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> PlannerResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> PlannerResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Activity store backed by a `Vec`, preserving insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActivityStore {
    activities: Vec<Activity>,
}

impl InMemoryActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_activities(activities: Vec<Activity>) -> Self {
        Self { activities }
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    fn position(&self, id: &ActivityId) -> PlannerResult<usize> {
        self.activities
            .iter()
            .position(|a| &a.id == id)
            .ok_or_else(|| PlannerError::ActivityNotFound(id.clone()))
    }
}

impl ActivityStore for InMemoryActivityStore {
    fn list(&self) -> PlannerResult<Vec<Activity>> {
        Ok(self.activities.clone())
    }

    fn get(&self, id: &ActivityId) -> PlannerResult<Option<Activity>> {
        Ok(self.activities.iter().find(|a| &a.id == id).cloned())
    }

    fn insert(&mut self, activity: Activity) -> PlannerResult<()> {
        if self.activities.iter().any(|a| a.id == activity.id) {
            return Err(PlannerError::DuplicateId(activity.id));
        }
        self.activities.push(activity);
        Ok(())
    }

    fn replace(&mut self, activity: Activity) -> PlannerResult<()> {
        let index = self.position(&activity.id)?;
        self.activities[index] = activity;
        Ok(())
    }

    fn remove(&mut self, id: &ActivityId) -> PlannerResult<Activity> {
        let index = self.position(id)?;
        Ok(self.activities.remove(index))
    }
}

/// A fixed goals list.
#[derive(Debug, Clone, Default)]
pub struct StaticGoals {
    goals: Vec<Goal>,
}

impl StaticGoals {
    pub fn new(goals: Vec<Goal>) -> Self {
        Self { goals }
    }
}

impl GoalsProvider for StaticGoals {
    fn goals(&self) -> Vec<Goal> {
        self.goals.clone()
    }
}
