use std::{fmt, str::FromStr};

use super::{ActivityId, DayIndex};
use crate::domain::PlannerError;

const PREFIX: &str = "activity-";

/// Address of one activity row in the grid: `activity-<id>-<dayIndex>`.
///
/// Search results jump to rows through this address, so the format is part
/// of the contract with the presenter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivityAnchor {
    pub id: ActivityId,
    pub day: DayIndex,
}

impl ActivityAnchor {
    pub fn new(id: ActivityId, day: DayIndex) -> Self {
        Self { id, day }
    }
}

impl fmt::Display for ActivityAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}-{}", PREFIX, self.id, self.day)
    }
}

impl FromStr for ActivityAnchor {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PlannerError::InvalidAnchor(s.to_string());

        // Ids may contain '-', the day index is always the last segment.
        let (id, day) = s
            .strip_prefix(PREFIX)
            .and_then(|rest| rest.rsplit_once('-'))
            .ok_or_else(invalid)?;
        if id.is_empty() {
            return Err(invalid());
        }
        let day = day
            .parse::<u8>()
            .map_err(|_| invalid())
            .and_then(DayIndex::new)?;

        Ok(Self::new(ActivityId::from(id), day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_row_address() {
        let anchor = ActivityAnchor::new(ActivityId::from("42"), DayIndex::new(3).unwrap());
        assert_eq!(anchor.to_string(), "activity-42-3");
    }

    #[test]
    fn parses_ids_containing_dashes() {
        let id = ActivityId::generate();
        let anchor = ActivityAnchor::new(id.clone(), DayIndex::new(6).unwrap());
        let parsed: ActivityAnchor = anchor.to_string().parse().unwrap();
        assert_eq!(parsed.id, id);
        assert_eq!(parsed.day.as_u8(), 6);
    }

    #[test]
    fn rejects_malformed_addresses() {
        for input in ["activity-", "activity-abc", "row-1-2", "activity--2", "activity-1-9"] {
            assert!(input.parse::<ActivityAnchor>().is_err(), "{input}");
        }
    }
}
