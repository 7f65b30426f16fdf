//! Learner Progress Tracking
//!
//! Per-unit completion records and course completion percentages, kept in a
//! pluggable [`lms_storage::Storage`] backend.

#![warn(missing_docs)]

pub mod codec;
pub mod error;
pub mod store;

pub use codec::RecordLoad;
pub use error::{ProgressError, Result};
pub use store::{ProgressConfig, ProgressStore};
