use crate::repository::WeightStore;
use crate::StorageError;
use core_types::{WeightEntry, WeightGoal};

/// An in-process store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<WeightEntry>,
    goal: Option<WeightGoal>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WeightStore for MemoryStore {
    fn load_entries(&self) -> Result<Vec<WeightEntry>, StorageError> {
        Ok(self.entries.clone())
    }

    fn save_entries(&mut self, entries: &[WeightEntry]) -> Result<(), StorageError> {
        self.entries = entries.to_vec();
        Ok(())
    }

    fn load_goal(&self) -> Result<Option<WeightGoal>, StorageError> {
        Ok(self.goal.clone())
    }

    fn save_goal(&mut self, goal: Option<&WeightGoal>) -> Result<(), StorageError> {
        self.goal = goal.cloned();
        Ok(())
    }
}
