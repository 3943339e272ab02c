//! # Sort Keys
//!
//! Every ordering puts open tasks before completed ones. The secondary ordering depends
//! on the key:
//!
//! - `dueDate` (default): tasks with a due date first, earliest due date first
//! - `priority`: weight descending (high=3, medium=2, low=1, unknown=0), then newest first
//! - `createdAt`: newest first
//!
//! The task id is the final tie-breaker so that consecutive pages never overlap.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::{Priority, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    #[serde(rename = "dueDate")]
    DueDate,
    #[serde(rename = "priority")]
    Priority,
    #[serde(rename = "createdAt")]
    CreatedAt,
}

impl SortKey {
    /// Interpret the `sortBy` parameter; unknown or missing values use the default.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("priority") => SortKey::Priority,
            Some("createdAt") => SortKey::CreatedAt,
            _ => SortKey::DueDate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DueDate => "dueDate",
            SortKey::Priority => "priority",
            SortKey::CreatedAt => "createdAt",
        }
    }

    /// In-memory ordering of two tasks
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        a.completed
            .cmp(&b.completed)
            .then_with(|| match self {
                SortKey::Priority => b
                    .priority
                    .weight()
                    .cmp(&a.priority.weight())
                    .then_with(|| b.created_at.cmp(&a.created_at)),
                SortKey::CreatedAt => b.created_at.cmp(&a.created_at),
                SortKey::DueDate => match (a.due_date, b.due_date) {
                    (Some(left), Some(right)) => left.cmp(&right),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                },
            })
            .then_with(|| a.id.cmp(&b.id))
    }

    /// Equivalent ORDER BY list for PostgreSQL
    pub fn order_by_sql(&self) -> String {
        let secondary = match self {
            SortKey::Priority => format!("{} DESC, created_at DESC", priority_weight_sql()),
            SortKey::CreatedAt => "created_at DESC".to_string(),
            SortKey::DueDate => "(due_date IS NULL) ASC, due_date ASC".to_string(),
        };
        format!("completed ASC, {secondary}, id ASC")
    }
}

/// CASE expression mirroring [`Priority::weight`], unknown values weigh 0
fn priority_weight_sql() -> String {
    let arms: Vec<String> = Priority::ALL
        .iter()
        .map(|p| format!("WHEN '{}' THEN {}", p.as_str(), p.weight()))
        .collect();
    format!("CASE priority {} ELSE 0 END", arms.join(" "))
}
