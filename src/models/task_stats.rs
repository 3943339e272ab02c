//! # Task Statistics
//!
//! **NOTE**: This is NOT a database table - it's computed on demand from one owner's
//! task set.
//!
//! ## Overview
//!
//! `TaskStats` is the dashboard summary shown above the task list:
//!
//! - **total**: every task the owner has, open or done
//! - **completed**: tasks marked done
//! - **highPriority**: *open* high-priority tasks (finished ones no longer need attention)
//! - **overdue**: open tasks whose due date is before "now"
//!
//! All four figures must come from the same snapshot. The PostgreSQL store computes them
//! in a single aggregate statement; the in-memory store folds over the task set under
//! one read lock using [`TaskStats::from_snapshot`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::task::Task;

/// Summary counts over one owner's tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: u64,
    pub completed: u64,
    pub high_priority: u64,
    pub overdue: u64,
}

impl TaskStats {
    /// Fold a consistent snapshot of tasks into the four counts in a single pass.
    pub fn from_snapshot<'a, I>(tasks: I, now: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        tasks.into_iter().fold(Self::default(), |mut stats, task| {
            stats.total += 1;
            if task.completed {
                stats.completed += 1;
            }
            if task.is_open_high_priority() {
                stats.high_priority += 1;
            }
            if task.is_overdue(now) {
                stats.overdue += 1;
            }
            stats
        })
    }
}
