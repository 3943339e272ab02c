//! # Task Model
//!
//! The per-user task record and the closed value types it is built from.
//!
//! ## Overview
//!
//! A `Task` belongs to exactly one owner, referenced by identity. The owner is fixed
//! at creation and no update path carries it, so a record can never migrate between
//! users. Category and priority are closed enums: anything outside the three known
//! values is rejected at the boundary instead of being stored.
//!
//! ## Database Schema
//!
//! Maps to the `taskboard_tasks` table (see `migrations/`):
//! - `id`: Primary key (UUID, store-assigned)
//! - `owner_id`: Owning user (UUID, indexed together with `completed`)
//! - `category` / `priority`: TEXT constrained to the enum wire values
//! - `due_date`: Optional TIMESTAMPTZ
//! - `created_at` / `updated_at`: Store-assigned timestamps

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Store-assigned task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct TaskId(pub Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier received from a path or request body.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identity of the authenticated user that owns a set of tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct OwnerId(pub Uuid);

impl OwnerId {
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Error returned when a string is not one of an enum's wire values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Task category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Work,
    #[default]
    Personal,
    Shopping,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Work, Category::Personal, Category::Shopping];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Personal => "personal",
            Category::Shopping => "shopping",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work" => Ok(Category::Work),
            "personal" => Ok(Category::Personal),
            "shopping" => Ok(Category::Shopping),
            other => Err(UnknownVariant {
                kind: "category",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Category {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Sort weight used by the `priority` ordering.
    pub fn weight(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

/// Weight of a stored priority string; anything unrecognised weighs 0.
pub fn priority_weight(raw: &str) -> u8 {
    raw.parse::<Priority>().map_or(0, |p| p.weight())
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(UnknownVariant {
                kind: "priority",
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Priority {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A persisted task.
///
/// `owner_id` is immutable after creation: [`TaskFields`] (the only input to
/// updates) does not carry it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub owner_id: OwnerId,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub category: Category,
    #[sqlx(try_from = "String")]
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Open task whose due date has passed.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < now)
    }

    /// Open task with high priority.
    pub fn is_open_high_priority(&self) -> bool {
        !self.completed && self.priority == Priority::High
    }
}

/// Validated, normalized write fields for a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFields {
    pub title: String,
    pub description: Option<String>,
    pub category: Category,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    /// `None` on update keeps the stored completion flag.
    pub completed: Option<bool>,
}

/// Insert input: the owner plus validated fields.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub owner_id: OwnerId,
    pub fields: TaskFields,
}

impl NewTask {
    pub fn new(owner_id: OwnerId, fields: TaskFields) -> Self {
        Self { owner_id, fields }
    }

    /// Materialize the record the way a store assigns identity and timestamps.
    pub fn into_task(self, id: TaskId, now: DateTime<Utc>) -> Task {
        Task {
            id,
            owner_id: self.owner_id,
            title: self.fields.title,
            description: self.fields.description,
            category: self.fields.category,
            priority: self.fields.priority,
            due_date: self.fields.due_date,
            completed: self.fields.completed.unwrap_or(false),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_task() -> Task {
        let now = Utc::now();
        NewTask::new(
            OwnerId(Uuid::new_v4()),
            TaskFields {
                title: "Buy milk".to_string(),
                description: None,
                category: Category::Shopping,
                priority: Priority::High,
                due_date: Some(now - Duration::days(1)),
                completed: None,
            },
        )
        .into_task(TaskId::new(), now)
    }

    #[test]
    fn test_enum_wire_values() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        for priority in Priority::ALL {
            assert_eq!(priority.as_str().parse::<Priority>().unwrap(), priority);
        }
        assert!("Work".parse::<Category>().is_err());
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Category::default(), Category::Personal);
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_priority_weight_is_total() {
        assert_eq!(priority_weight("high"), 3);
        assert_eq!(priority_weight("medium"), 2);
        assert_eq!(priority_weight("low"), 1);
        assert_eq!(priority_weight("critical"), 0);
        assert_eq!(priority_weight(""), 0);
    }

    #[test]
    fn test_task_serializes_camel_case() {
        let task = sample_task();
        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("ownerId").is_some());
        assert!(json.get("dueDate").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["category"], "shopping");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn test_overdue_and_high_priority_ignore_completed_tasks() {
        let mut task = sample_task();
        let now = Utc::now();
        assert!(task.is_overdue(now));
        assert!(task.is_open_high_priority());

        task.completed = true;
        assert!(!task.is_overdue(now));
        assert!(!task.is_open_high_priority());
    }

    #[test]
    fn test_task_id_parse() {
        let id = TaskId::new();
        assert_eq!(TaskId::parse(&id.to_string()), Some(id));
        assert_eq!(TaskId::parse("does-not-exist"), None);
    }
}
