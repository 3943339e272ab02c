use chrono::{DateTime, Utc};
use sqlx::{Postgres, QueryBuilder};

use crate::models::{Category, Priority, Task};

/// A single filter clause of a task query.
///
/// Every variant can be evaluated against an in-memory [`Task`] and rendered into a
/// PostgreSQL WHERE fragment. Both renditions must agree; the tests below pin the
/// in-memory semantics and `builder.rs` pins the SQL.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Category(Category),
    Priority(Priority),
    Completed(bool),
    /// Case-insensitive substring of the title OR the description
    Search(String),
    /// Inclusive due-date range; tasks without a due date never match
    DueBetween {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },
}

impl Condition {
    /// Evaluate the condition against a task
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Condition::Category(category) => task.category == *category,
            Condition::Priority(priority) => task.priority == *priority,
            Condition::Completed(completed) => task.completed == *completed,
            Condition::Search(term) => {
                let needle = term.to_lowercase();
                task.title.to_lowercase().contains(&needle)
                    || task
                        .description
                        .as_deref()
                        .is_some_and(|description| description.to_lowercase().contains(&needle))
            }
            Condition::DueBetween { from, to } => task
                .due_date
                .is_some_and(|due| due >= *from && due <= *to),
        }
    }

    /// Append the condition as a SQL fragment with bound parameters
    pub fn push_sql<'args>(&self, query: &mut QueryBuilder<'args, Postgres>) {
        match self {
            Condition::Category(category) => {
                query.push("category = ").push_bind(category.as_str());
            }
            Condition::Priority(priority) => {
                query.push("priority = ").push_bind(priority.as_str());
            }
            Condition::Completed(completed) => {
                query.push("completed = ").push_bind(*completed);
            }
            Condition::Search(term) => {
                query
                    .push("(strpos(lower(title), lower(")
                    .push_bind(term.clone())
                    .push(")) > 0 OR strpos(lower(coalesce(description, '')), lower(")
                    .push_bind(term.clone())
                    .push(")) > 0)");
            }
            Condition::DueBetween { from, to } => {
                query
                    .push("(due_date >= ")
                    .push_bind(*from)
                    .push(" AND due_date <= ")
                    .push_bind(*to)
                    .push(")");
            }
        }
    }
}
