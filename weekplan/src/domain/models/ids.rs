use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::domain::PlannerError;

/// Stored ids are usually strings, but timestamp ids may have been written
/// as bare numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// An activity identifier.
///
/// Freshly created activities get a random uuid, but any id read back from
/// storage is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ActivityId(String);

impl ActivityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ActivityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for ActivityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ActivityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ActivityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawId::deserialize(deserializer).map(|raw| Self(raw.into_string()))
    }
}

/// A goal identifier from the separately persisted goals list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct GoalId(String);

impl GoalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for GoalId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for GoalId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for GoalId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawId::deserialize(deserializer).map(|raw| Self(raw.into_string()))
    }
}

/// A life-domain category. The set of domains is owned by the presenter,
/// so this is kept opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainId(String);

impl DomainId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DomainId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A day within a week's grid, 0 (Monday) through 6 (Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DayIndex(u8);

impl DayIndex {
    pub const COUNT: u8 = 7;

    pub fn new(index: u8) -> Result<Self, PlannerError> {
        if index < Self::COUNT {
            Ok(Self(index))
        } else {
            Err(PlannerError::InvalidDay(index))
        }
    }

    /// All seven days in grid order.
    pub fn all() -> impl Iterator<Item = DayIndex> {
        (0..Self::COUNT).map(DayIndex)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }

    pub fn weekday(&self) -> time::Weekday {
        time::Weekday::Monday.nth_next(self.0)
    }
}

impl fmt::Display for DayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for DayIndex {
    type Error = PlannerError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

impl From<DayIndex> for u8 {
    fn from(day: DayIndex) -> Self {
        day.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_index_rejects_out_of_range() {
        assert!(DayIndex::new(6).is_ok());
        assert!(matches!(DayIndex::new(7), Err(PlannerError::InvalidDay(7))));
    }

    #[test]
    fn day_index_maps_to_weekday() {
        assert_eq!(DayIndex::new(0).unwrap().weekday(), time::Weekday::Monday);
        assert_eq!(DayIndex::new(6).unwrap().weekday(), time::Weekday::Sunday);
        assert_eq!(DayIndex::all().count(), 7);
    }

    #[test]
    fn day_index_deserialize_validates() {
        let day: DayIndex = serde_json::from_str("3").unwrap();
        assert_eq!(day.as_u8(), 3);
        assert!(serde_json::from_str::<DayIndex>("9").is_err());
    }

    #[test]
    fn ids_accept_numbers_from_storage() {
        let goal: GoalId = serde_json::from_str("1712345678901").unwrap();
        assert_eq!(goal.as_str(), "1712345678901");
        let id: ActivityId = serde_json::from_str(r#""abc""#).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""abc""#);
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(ActivityId::generate(), ActivityId::generate());
    }
}
