use crate::share::SharePlatform;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to serialize JSON export: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Export produced invalid UTF-8: {0}")]
    Encoding(String),

    #[error("Sharing to {0} needs a page URL; set `reports.share_url` or pass --url")]
    MissingShareUrl(SharePlatform),

    #[error("Invalid share URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Not enough data to share yet: at least two entries are needed")]
    NotEnoughData,
}
