use crate::StorageError;
use core_types::{Journal, WeightEntry, WeightGoal};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const ENTRIES_FILE: &str = "entries.json";
pub const GOAL_FILE: &str = "goal.json";

/// The narrow persistence interface the application uses.
///
/// Implementations own the storage lifecycle; the statistics engine never
/// sees this trait and only receives the loaded data.
pub trait WeightStore {
    fn load_entries(&self) -> Result<Vec<WeightEntry>, StorageError>;

    fn save_entries(&mut self, entries: &[WeightEntry]) -> Result<(), StorageError>;

    fn load_goal(&self) -> Result<Option<WeightGoal>, StorageError>;

    /// Replaces the stored goal. `None` clears it.
    fn save_goal(&mut self, goal: Option<&WeightGoal>) -> Result<(), StorageError>;

    /// Loads the entries into a date-ordered `Journal`.
    fn load_journal(&self) -> Result<Journal, StorageError> {
        Ok(Journal::from_entries(self.load_entries()?))
    }
}

/// Stores entries and the goal as pretty-printed JSON files in a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Opens (and if needed creates) the data directory.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).map_err(|e| StorageError::io(&data_dir, e))?;
        tracing::debug!(data_dir = %data_dir.display(), "Opened JSON store.");
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn entries_path(&self) -> PathBuf {
        self.data_dir.join(ENTRIES_FILE)
    }

    pub fn goal_path(&self) -> PathBuf {
        self.data_dir.join(GOAL_FILE)
    }
}

impl WeightStore for JsonFileStore {
    fn load_entries(&self) -> Result<Vec<WeightEntry>, StorageError> {
        let entries: Vec<WeightEntry> = read_json(&self.entries_path())?.unwrap_or_default();
        tracing::debug!(count = entries.len(), "Loaded weight entries.");
        Ok(entries)
    }

    fn save_entries(&mut self, entries: &[WeightEntry]) -> Result<(), StorageError> {
        write_json(&self.entries_path(), entries)?;
        tracing::info!(count = entries.len(), "Saved weight entries.");
        Ok(())
    }

    fn load_goal(&self) -> Result<Option<WeightGoal>, StorageError> {
        // The file holds `null` once a goal has been cleared.
        let goal: Option<Option<WeightGoal>> = read_json(&self.goal_path())?;
        Ok(goal.flatten())
    }

    fn save_goal(&mut self, goal: Option<&WeightGoal>) -> Result<(), StorageError> {
        write_json(&self.goal_path(), &goal)?;
        tracing::info!(target_weight = goal.map(|g| g.target), "Saved weight goal.");
        Ok(())
    }
}

/// Reads and parses a JSON file, returning `None` when it does not exist.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StorageError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StorageError::io(path, e)),
    };
    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|e| StorageError::json(path, e))
}

/// Writes through a sibling `.json.tmp` file that is then renamed over `path`.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| StorageError::json(path, e))?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(|e| StorageError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| StorageError::io(path, e))
}
