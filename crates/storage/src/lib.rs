//! # Weightwise Storage Crate
//!
//! This crate is the application's local archive for weight entries and the
//! weight goal.
//!
//! ## Architectural Principles
//!
//! - **Layer 2 Adapter:** All file-format and filesystem details live here,
//!   behind the `WeightStore` trait. The rest of the application only sees
//!   `load_*`/`save_*` calls.
//! - **Plain Files:** `entries.json` holds the entry list and `goal.json` the
//!   goal (or `null`). A missing file reads as "no data yet".
//!
//! ## Public API
//!
//! - `WeightStore`: the load/save interface.
//! - `JsonFileStore`: the file-backed implementation used by the CLI.
//! - `MemoryStore`: an in-process implementation for tests.
//! - `StorageError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod memory;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use error::StorageError;
pub use memory::MemoryStore;
pub use repository::{JsonFileStore, WeightStore, ENTRIES_FILE, GOAL_FILE};
