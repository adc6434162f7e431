use serde::{Deserialize, Serialize};

use super::GoalId;

/// A goal an activity can contribute to. Goals are owned elsewhere and only
/// looked up here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: GoalId,
    pub title: String,
}

impl Goal {
    pub fn new(id: impl Into<GoalId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}
