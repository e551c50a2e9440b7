//! # Weightwise Reporting
//!
//! Downstream formatting of tracked data: file exports of the raw entries and
//! share messages built from the statistics engine's summary.
//!
//! - `export`: CSV and JSON renderings of the entry list.
//! - `share`: share text and platform share links.
//! - `ReportError`: the specific error types that can be returned from this crate.

pub mod error;
pub mod export;
pub mod share;

pub use error::ReportError;
pub use export::{export_csv, export_json, ExportFormat};
pub use share::{share_link, share_text, SharePlatform, ShareStats};
