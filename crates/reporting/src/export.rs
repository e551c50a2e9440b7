use crate::error::ReportError;
use core_types::WeightEntry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Download formats for the raw entry list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// The default download file name for this format.
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "weight-tracking-data.csv",
            ExportFormat::Json => "weight-tracking-data.json",
        }
    }

    pub fn render(&self, entries: &[WeightEntry]) -> Result<String, ReportError> {
        match self {
            ExportFormat::Csv => export_csv(entries),
            ExportFormat::Json => export_json(entries),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => f.write_str("csv"),
            ExportFormat::Json => f.write_str("json"),
        }
    }
}

/// Renders entries as `Date,Weight,Note` rows in date order.
pub fn export_csv(entries: &[WeightEntry]) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Date", "Weight", "Note"])?;

    for entry in by_date(entries) {
        writer.write_record([
            entry.date.to_string(),
            entry.weight.to_string(),
            entry.note.clone().unwrap_or_default(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Csv(e.into_error().into()))?;
    String::from_utf8(bytes).map_err(|e| ReportError::Encoding(e.to_string()))
}

/// Renders entries as a pretty-printed JSON array in date order.
pub fn export_json(entries: &[WeightEntry]) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(&by_date(entries))?)
}

fn by_date(entries: &[WeightEntry]) -> Vec<&WeightEntry> {
    let mut sorted: Vec<&WeightEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.date);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::EntryId;
    use pretty_assertions::assert_eq;

    fn entry(day: u32, weight: f64, note: Option<&str>) -> WeightEntry {
        WeightEntry {
            id: EntryId::new(),
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            weight,
            note: note.map(str::to_string),
        }
    }

    #[test]
    fn csv_has_header_and_sorted_rows() {
        let entries = vec![
            entry(2, 79.5, None),
            entry(1, 80.0, Some("after run, tired")),
        ];
        let csv = export_csv(&entries).unwrap();
        assert_eq!(
            csv,
            "Date,Weight,Note\n2024-05-01,80,\"after run, tired\"\n2024-05-02,79.5,\n"
        );
    }

    #[test]
    fn csv_of_nothing_is_just_the_header() {
        assert_eq!(export_csv(&[]).unwrap(), "Date,Weight,Note\n");
    }

    #[test]
    fn json_export_parses_back() {
        let entries = vec![entry(3, 78.2, Some("note")), entry(1, 80.0, None)];
        let json = ExportFormat::Json.render(&entries).unwrap();
        let parsed: Vec<WeightEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0], entries[1]);
        assert_eq!(parsed[1], entries[0]);
    }
}
