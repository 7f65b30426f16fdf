//! Storage abstraction and implementations for LMS progress data.
//!
//! This crate provides a keyed blob storage interface with in-memory and
//! JSON file implementations, plus a backend for environments that have no
//! persistence medium at all.

#![warn(missing_docs)]

pub mod trait_;
pub mod memory;
pub mod json_storage;
pub mod unavailable;

pub use trait_::{Storage, StorageError, Result};
pub use memory::MemoryStorage;
pub use json_storage::JsonFileStorage;
pub use unavailable::UnavailableStorage;
