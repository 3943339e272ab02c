//! # Filter Criteria
//!
//! Translation of raw list query parameters into typed filter criteria.
//!
//! Absence of a parameter means "no constraint" for every field except `completed`,
//! whose absence means `false`: the default list view shows open tasks only. The
//! due-date range only applies when both bounds are supplied; a lone bound is ignored
//! rather than treated as a half-open range.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::conditions::Condition;
use crate::models::{Category, Priority};
use crate::utils::time::parse_timestamp;

/// Raw query parameters accepted by the list endpoint.
///
/// Everything is kept as a string so the coercion rules live here rather than in the
/// extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskListParams {
    pub category: Option<String>,
    pub priority: Option<String>,
    pub completed: Option<String>,
    pub search: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    #[serde(rename = "dueDate_gte")]
    pub due_date_gte: Option<String>,
    #[serde(rename = "dueDate_lte")]
    pub due_date_lte: Option<String>,
}

/// A query parameter that could not be interpreted
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid query parameter `{param}`: {message}")]
pub struct QueryParamError {
    pub param: &'static str,
    pub message: String,
}

impl QueryParamError {
    fn new(param: &'static str, message: impl Into<String>) -> Self {
        Self {
            param,
            message: message.into(),
        }
    }
}

/// Typed filter criteria for a task query.
///
/// `Default` is the unconstrained filter (every task of the owner, open or done).
/// Criteria parsed from list parameters always constrain `completed`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub completed: Option<bool>,
    pub search: Option<String>,
    pub due_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl FilterCriteria {
    /// Interpret list endpoint parameters
    pub fn from_params(params: &TaskListParams) -> Result<Self, QueryParamError> {
        let category = parse_enum_param("category", params.category.as_deref())?;
        let priority = parse_enum_param("priority", params.priority.as_deref())?;
        let completed = Some(parse_completed(params.completed.as_deref())?);

        let search = params
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_string);

        // A range needs both ends; a lone bound is ignored without being parsed
        let due_range = match (
            present(params.due_date_gte.as_deref()),
            present(params.due_date_lte.as_deref()),
        ) {
            (Some(from), Some(to)) => Some((
                parse_bound("dueDate_gte", from)?,
                parse_bound("dueDate_lte", to)?,
            )),
            _ => None,
        };

        Ok(Self {
            category,
            priority,
            completed,
            search,
            due_range,
        })
    }

    /// Filter clauses in application order
    pub fn conditions(&self) -> Vec<Condition> {
        let mut conditions = Vec::new();

        if let Some(category) = self.category {
            conditions.push(Condition::Category(category));
        }
        if let Some(priority) = self.priority {
            conditions.push(Condition::Priority(priority));
        }
        if let Some(completed) = self.completed {
            conditions.push(Condition::Completed(completed));
        }
        if let Some(ref term) = self.search {
            conditions.push(Condition::Search(term.clone()));
        }
        if let Some((from, to)) = self.due_range {
            conditions.push(Condition::DueBetween { from, to });
        }

        conditions
    }
}

fn parse_enum_param<T>(param: &'static str, raw: Option<&str>) -> Result<Option<T>, QueryParamError>
where
    T: std::str::FromStr,
{
    match raw.map(str::trim) {
        None | Some("") | Some("any") => Ok(None),
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| QueryParamError::new(param, format!("unsupported value '{value}'"))),
    }
}

fn parse_completed(raw: Option<&str>) -> Result<bool, QueryParamError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(false),
        Some(value) if value.eq_ignore_ascii_case("true") => Ok(true),
        Some(value) if value.eq_ignore_ascii_case("false") => Ok(false),
        Some(value) => Err(QueryParamError::new(
            "completed",
            format!("expected 'true' or 'false', got '{value}'"),
        )),
    }
}

fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_bound(param: &'static str, value: &str) -> Result<DateTime<Utc>, QueryParamError> {
    parse_timestamp(value)
        .ok_or_else(|| QueryParamError::new(param, format!("'{value}' is not an ISO 8601 date")))
}
