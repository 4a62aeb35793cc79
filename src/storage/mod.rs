//! Storage layer for SMITE.
//!
//! Provides the `StateStore` trait and its file and in-memory
//! implementations for the task-progress record.

pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileStateStore;
pub use memory::MemoryStateStore;
pub use traits::{LoadedState, StateStore};
