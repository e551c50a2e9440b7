use crate::error::CoreError;
use crate::structs::{validate_weight, EntryId, NewEntry, WeightEntry};
use chrono::NaiveDate;

/// The user's collection of weight entries, kept sorted ascending by date.
///
/// Entries sharing a date keep the order in which they were inserted, so the
/// first entry of a day is always the earliest one recorded for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Journal {
    entries: Vec<WeightEntry>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing collection, sorting it by date.
    pub fn from_entries(mut entries: Vec<WeightEntry>) -> Self {
        // `sort_by_key` is stable, which preserves insertion order within a day.
        entries.sort_by_key(|e| e.date);
        Self { entries }
    }

    pub fn entries(&self) -> &[WeightEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<WeightEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: EntryId) -> Option<&WeightEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn has_entry_on(&self, date: NaiveDate) -> bool {
        self.entries.iter().any(|e| e.date == date)
    }

    /// Validates and records a new entry, assigning it a fresh id.
    pub fn add(&mut self, entry: NewEntry) -> Result<&WeightEntry, CoreError> {
        validate_weight(entry.weight)?;
        let id = EntryId::new();
        let date = entry.date;
        let position = self.entries.partition_point(|e| e.date <= date);
        self.entries.insert(position, entry.into_entry(id));
        tracing::debug!(%id, %date, "Recorded weight entry.");
        Ok(&self.entries[position])
    }

    /// Replaces the whole record identified by `id`, keeping the id.
    ///
    /// An entry whose date is unchanged keeps its place among same-day
    /// entries; a moved entry goes after the entries already on its new date.
    pub fn update(&mut self, id: EntryId, entry: NewEntry) -> Result<&WeightEntry, CoreError> {
        validate_weight(entry.weight)?;
        let index = self.index_of(id)?;
        let date = entry.date;

        if self.entries[index].date == date {
            self.entries[index] = entry.into_entry(id);
            tracing::debug!(%id, %date, "Replaced weight entry in place.");
            return Ok(&self.entries[index]);
        }

        self.entries.remove(index);
        let position = self.entries.partition_point(|e| e.date <= date);
        self.entries.insert(position, entry.into_entry(id));
        tracing::debug!(%id, %date, "Moved weight entry to a new date.");
        Ok(&self.entries[position])
    }

    pub fn remove(&mut self, id: EntryId) -> Result<WeightEntry, CoreError> {
        let index = self.index_of(id)?;
        Ok(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn index_of(&self, id: EntryId) -> Result<usize, CoreError> {
        self.entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(CoreError::NotFound(id))
    }
}
