//! Input validation for task writes
//!
//! Turns a raw JSON payload into validated [`TaskFields`] or the complete list of
//! field-level violations. Nothing is partially applied: either every rule passes or
//! the caller gets all failures at once.
//!
//! Default values (category `personal`, priority `medium`) are filled in one layer up
//! by [`apply_create_defaults`] / [`apply_update_defaults`] before validation runs;
//! the validator itself only checks that whatever is present is a member of its enum.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::validation::{MAX_DESCRIPTION_LENGTH, MIN_TITLE_LENGTH};
use crate::models::{Category, Priority, TaskFields};
use crate::utils::time::parse_timestamp;

/// Raw create/update body.
///
/// Fields are kept as JSON values so a wrong type becomes a field violation instead of
/// a body deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default)]
    pub priority: Option<Value>,
    #[serde(default)]
    pub due_date: Option<Value>,
    #[serde(default)]
    pub completed: Option<Value>,
}

/// Body of the status-only update. Deserialization is strict: `completed` must be a
/// JSON boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatusUpdate {
    pub completed: bool,
}

/// One violated rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Fill creation defaults for fields the caller left out.
pub fn apply_create_defaults(mut payload: TaskPayload) -> TaskPayload {
    fill_if_absent(&mut payload.category, Category::default().as_str());
    fill_if_absent(&mut payload.priority, Priority::default().as_str());
    payload
}

/// Fill defaults for a full-replace update. Category and priority reset to their
/// defaults when omitted; `completed` is left alone so the stored flag survives.
pub fn apply_update_defaults(payload: TaskPayload) -> TaskPayload {
    apply_create_defaults(payload)
}

fn fill_if_absent(slot: &mut Option<Value>, default: &str) {
    if matches!(slot, None | Some(Value::Null)) {
        *slot = Some(Value::String(default.to_string()));
    }
}

/// Validate a task payload, collecting every violation.
pub fn validate_task_payload(payload: &TaskPayload) -> Result<TaskFields, Vec<FieldViolation>> {
    let mut violations = Vec::new();

    let title = validate_title(payload.title.as_ref(), &mut violations);
    let description = validate_description(payload.description.as_ref(), &mut violations);
    let category = validate_enum::<Category>(
        "category",
        payload.category.as_ref(),
        "Category is required",
        "Invalid task category",
        &mut violations,
    );
    let priority = validate_enum::<Priority>(
        "priority",
        payload.priority.as_ref(),
        "Priority is required",
        "Invalid task priority",
        &mut violations,
    );
    let due_date = validate_due_date(payload.due_date.as_ref(), &mut violations);
    let completed = validate_completed(payload.completed.as_ref(), &mut violations);

    match (title, category, priority) {
        (Some(title), Some(category), Some(priority)) if violations.is_empty() => Ok(TaskFields {
            title,
            description,
            category,
            priority,
            due_date,
            completed,
        }),
        _ => Err(violations),
    }
}

fn validate_title(raw: Option<&Value>, violations: &mut Vec<FieldViolation>) -> Option<String> {
    match raw {
        None | Some(Value::Null) => {
            violations.push(FieldViolation::new("title", "Title is required"));
            None
        }
        Some(Value::String(title)) => {
            let trimmed = title.trim();
            if trimmed.chars().count() < MIN_TITLE_LENGTH {
                violations.push(FieldViolation::new(
                    "title",
                    format!("Title must be at least {MIN_TITLE_LENGTH} characters"),
                ));
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Some(_) => {
            violations.push(FieldViolation::new("title", "Title must be a string"));
            None
        }
    }
}

fn validate_description(
    raw: Option<&Value>,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(description)) => {
            if description.chars().count() > MAX_DESCRIPTION_LENGTH {
                violations.push(FieldViolation::new(
                    "description",
                    format!("Description must not exceed {MAX_DESCRIPTION_LENGTH} characters"),
                ));
                None
            } else {
                let trimmed = description.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        }
        Some(_) => {
            violations.push(FieldViolation::new(
                "description",
                "Description must be a string",
            ));
            None
        }
    }
}

fn validate_enum<T>(
    field: &str,
    raw: Option<&Value>,
    missing_message: &str,
    invalid_message: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<T>
where
    T: std::str::FromStr,
{
    match raw {
        None | Some(Value::Null) => {
            violations.push(FieldViolation::new(field, missing_message));
            None
        }
        Some(Value::String(value)) => match value.parse::<T>() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                violations.push(FieldViolation::new(field, invalid_message));
                None
            }
        },
        Some(_) => {
            violations.push(FieldViolation::new(field, invalid_message));
            None
        }
    }
}

fn validate_due_date(
    raw: Option<&Value>,
    violations: &mut Vec<FieldViolation>,
) -> Option<chrono::DateTime<chrono::Utc>> {
    match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(value)) if value.trim().is_empty() => None,
        Some(Value::String(value)) => {
            let parsed = parse_timestamp(value);
            if parsed.is_none() {
                violations.push(FieldViolation::new(
                    "dueDate",
                    "Due date must be a valid ISO 8601 date",
                ));
            }
            parsed
        }
        Some(_) => {
            violations.push(FieldViolation::new(
                "dueDate",
                "Due date must be a valid ISO 8601 date",
            ));
            None
        }
    }
}

fn validate_completed(raw: Option<&Value>, violations: &mut Vec<FieldViolation>) -> Option<bool> {
    match raw {
        None | Some(Value::Null) => None,
        Some(Value::Bool(completed)) => Some(*completed),
        Some(_) => {
            violations.push(FieldViolation::new(
                "completed",
                "Completed must be a boolean",
            ));
            None
        }
    }
}
