use crate::error::AnalyticsError;
use crate::report::BmiReading;
use core_types::BmiCategory;

/// Computes and classifies the body-mass index for a height in centimetres
/// and a weight in kilograms.
///
/// Non-finite or non-positive inputs yield an `Err` value; this never panics.
pub fn classify_bmi(height_cm: f64, weight_kg: f64) -> Result<BmiReading, AnalyticsError> {
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(AnalyticsError::InvalidHeight(height_cm));
    }
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(AnalyticsError::InvalidWeight(weight_kg));
    }

    let height_m = height_cm / 100.0;
    let value = weight_kg / (height_m * height_m);
    Ok(BmiReading {
        value,
        category: BmiCategory::from_value(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn normal_bmi() {
        let reading = classify_bmi(170.0, 70.0).unwrap();
        assert!((reading.value - 24.221_453).abs() < 1e-5);
        assert_eq!(reading.category, BmiCategory::Normal);
    }

    #[rstest]
    #[case(170.0, 50.0, BmiCategory::Underweight)]
    #[case(170.0, 80.0, BmiCategory::Overweight)]
    #[case(170.0, 95.0, BmiCategory::Obese)]
    fn categories(#[case] height: f64, #[case] weight: f64, #[case] expected: BmiCategory) {
        assert_eq!(classify_bmi(height, weight).unwrap().category, expected);
    }

    #[rstest]
    #[case::negative_height(-5.0, 70.0, AnalyticsError::InvalidHeight(-5.0))]
    #[case::zero_height(0.0, 70.0, AnalyticsError::InvalidHeight(0.0))]
    #[case::zero_weight(170.0, 0.0, AnalyticsError::InvalidWeight(0.0))]
    #[case::infinite_weight(170.0, f64::INFINITY, AnalyticsError::InvalidWeight(f64::INFINITY))]
    fn invalid_inputs_are_reported(
        #[case] height: f64,
        #[case] weight: f64,
        #[case] expected: AnalyticsError,
    ) {
        assert_eq!(classify_bmi(height, weight), Err(expected));
    }

    #[test]
    fn nan_height_is_invalid() {
        assert!(matches!(
            classify_bmi(f64::NAN, 70.0),
            Err(AnalyticsError::InvalidHeight(_))
        ));
    }
}
