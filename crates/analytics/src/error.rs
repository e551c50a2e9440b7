use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Invalid height: expected a positive, finite number of centimetres, got {0}")]
    InvalidHeight(f64),

    #[error("Invalid weight: expected a positive, finite number of kilograms, got {0}")]
    InvalidWeight(f64),
}
