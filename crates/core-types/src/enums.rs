use serde::{Deserialize, Serialize};
use std::fmt;

const LBS_PER_KG: f64 = 2.20462;

/// The unit weights are entered and displayed in. Storage is always kilograms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    /// Converts a kilogram value into this unit.
    pub fn from_kg(&self, kg: f64) -> f64 {
        match self {
            WeightUnit::Kg => kg,
            WeightUnit::Lbs => kg * LBS_PER_KG,
        }
    }

    /// Converts a value expressed in this unit into kilograms.
    pub fn to_kg(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lbs => value / LBS_PER_KG,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The first day of a reporting week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

/// A chart window ending today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Week,
    #[default]
    Month,
    Quarter,
    All,
}

impl TimeRange {
    /// Number of days looked back from today, or `None` for the whole history.
    pub fn lookback_days(&self) -> Option<u64> {
        match self {
            TimeRange::Week => Some(7),
            TimeRange::Month => Some(30),
            TimeRange::Quarter => Some(90),
            TimeRange::All => None,
        }
    }
}

/// Body-mass-index classification bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Classifies a BMI value. Bands are `< 18.5`, `[18.5, 25)`, `[25, 30)` and `>= 30`.
    pub fn from_value(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn range_label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "< 18.5",
            BmiCategory::Normal => "18.5 - 24.9",
            BmiCategory::Overweight => "25 - 29.9",
            BmiCategory::Obese => ">= 30",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => {
                "May indicate nutritional deficiency or other health issues"
            }
            BmiCategory::Normal => "Generally associated with good health outcomes",
            BmiCategory::Overweight => "May increase risk for certain health conditions",
            BmiCategory::Obese => "Associated with increased risk for many health conditions",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(18.49, BmiCategory::Underweight)]
    #[case(18.5, BmiCategory::Normal)]
    #[case(24.99, BmiCategory::Normal)]
    #[case(25.0, BmiCategory::Overweight)]
    #[case(29.99, BmiCategory::Overweight)]
    #[case(30.0, BmiCategory::Obese)]
    fn bmi_band_boundaries(#[case] value: f64, #[case] expected: BmiCategory) {
        assert_eq!(BmiCategory::from_value(value), expected);
    }

    #[test]
    fn pounds_convert_back_to_kilograms() {
        let lbs = WeightUnit::Lbs.from_kg(80.0);
        assert!((lbs - 176.3696).abs() < 1e-9);
        assert!((WeightUnit::Lbs.to_kg(lbs) - 80.0).abs() < 1e-9);
        assert_eq!(WeightUnit::Kg.from_kg(80.0), 80.0);
    }

    #[test]
    fn enums_deserialize_from_lowercase_names() {
        let unit: WeightUnit = serde_json::from_str("\"lbs\"").unwrap();
        let start: WeekStart = serde_json::from_str("\"sunday\"").unwrap();
        let range: TimeRange = serde_json::from_str("\"quarter\"").unwrap();
        assert_eq!(unit, WeightUnit::Lbs);
        assert_eq!(start, WeekStart::Sunday);
        assert_eq!(range.lookback_days(), Some(90));
    }
}
