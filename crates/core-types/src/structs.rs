use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Upper bound accepted for a single weight observation, in kilograms.
pub const MAX_WEIGHT_KG: f64 = 500.0;

/// Opaque unique identifier of a weight entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for EntryId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EntryId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| CoreError::InvalidInput("entry id".to_string(), e.to_string()))
    }
}

/// One dated weight observation. Weights are always stored in kilograms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: EntryId,
    pub date: NaiveDate,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// The user-supplied part of an entry, before an id is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub date: NaiveDate,
    pub weight: f64,
    pub note: Option<String>,
}

impl NewEntry {
    pub fn new(date: NaiveDate, weight: f64) -> Self {
        Self {
            date,
            weight,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        // Blank notes are dropped rather than stored as empty strings.
        self.note = if note.trim().is_empty() { None } else { Some(note) };
        self
    }

    pub(crate) fn into_entry(self, id: EntryId) -> WeightEntry {
        WeightEntry {
            id,
            date: self.date,
            weight: self.weight,
            note: self.note,
        }
    }
}

/// A target weight with an optional deadline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightGoal {
    pub target: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
}

impl WeightGoal {
    /// Builds a goal after checking that the target is a finite, positive weight.
    pub fn new(target: f64, deadline: Option<NaiveDate>) -> Result<Self, CoreError> {
        if !target.is_finite() || target <= 0.0 {
            return Err(CoreError::InvalidInput(
                "goal target".to_string(),
                format!("expected a positive weight, got {target}"),
            ));
        }
        Ok(Self { target, deadline })
    }
}

/// Checks that a weight is finite and within `(0, MAX_WEIGHT_KG]`.
pub fn validate_weight(weight: f64) -> Result<f64, CoreError> {
    if !weight.is_finite() || weight <= 0.0 || weight > MAX_WEIGHT_KG {
        return Err(CoreError::InvalidInput(
            "weight".to_string(),
            format!("please enter a valid weight (0-{MAX_WEIGHT_KG} kg), got {weight} kg"),
        ));
    }
    Ok(weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::zero(0.0)]
    #[case::negative(-3.5)]
    #[case::too_heavy(500.1)]
    #[case::nan(f64::NAN)]
    #[case::infinite(f64::INFINITY)]
    fn rejects_out_of_range_weights(#[case] weight: f64) {
        assert!(validate_weight(weight).is_err());
    }

    #[test]
    fn accepts_upper_bound_weight() {
        assert_eq!(validate_weight(500.0), Ok(500.0));
    }

    #[test]
    fn goal_requires_positive_target() {
        assert!(WeightGoal::new(0.0, None).is_err());
        assert!(WeightGoal::new(f64::NAN, None).is_err());
        assert_eq!(WeightGoal::new(70.0, None).unwrap().target, 70.0);
    }

    #[test]
    fn entry_serde_omits_missing_note() {
        let id: EntryId = "1b4e28ba-2fa1-11d2-883f-0016d3cca427".parse().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let entry = NewEntry::new(date, 80.5).into_entry(id);

        let serialized = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            serialized,
            json!({
                "id": "1b4e28ba-2fa1-11d2-883f-0016d3cca427",
                "date": "2024-01-02",
                "weight": 80.5
            })
        );
        let deserialized: WeightEntry = serde_json::from_value(serialized).unwrap();
        assert_eq!(deserialized, entry);
    }

    #[test]
    fn blank_note_is_dropped() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let entry = NewEntry::new(date, 80.0).with_note("   ");
        assert_eq!(entry.note, None);
    }
}
