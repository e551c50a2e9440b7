use thiserror::Error;

use crate::structs::EntryId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("No weight entry with id {0}")]
    NotFound(EntryId),
}
