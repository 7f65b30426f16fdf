//! Course-level completion aggregates.

use serde::{Deserialize, Serialize};

/// Completion of one course for one learner.
///
/// The course itself is only the list of unit ids the caller supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CourseProgress {
    /// Supplied units with a completed record
    pub completed_units: usize,

    /// Number of supplied units
    pub total_units: usize,

    /// Rounded percentage in `[0, 100]`
    pub percentage: u8,
}

impl CourseProgress {
    /// Build the aggregate from counts.
    pub fn new(completed_units: usize, total_units: usize) -> Self {
        Self {
            completed_units,
            total_units,
            percentage: completion_percentage(completed_units, total_units),
        }
    }

    /// Whether every supplied unit is completed. An empty course never is.
    pub fn is_finished(&self) -> bool {
        self.total_units > 0 && self.completed_units >= self.total_units
    }
}

/// `round(100 * completed / total)`, halves rounding up. Zero when `total` is zero.
pub fn completion_percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total) as u128;
    let total = total as u128;
    let rounded = (200 * completed + total) / (2 * total);
    rounded as u8
}
