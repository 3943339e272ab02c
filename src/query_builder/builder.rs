use sqlx::{Postgres, QueryBuilder};

use super::{Condition, FilterCriteria, Pagination, SortKey};
use crate::constants::TASKS_TABLE;
use crate::models::{OwnerId, Task};

/// Columns selected for a full task row
pub const TASK_COLUMNS: &str =
    "id, owner_id, title, description, category, priority, due_date, completed, created_at, updated_at";

/// Skip/limit window applied after filtering and sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub skip: u64,
    pub limit: u64,
}

/// An owner-scoped task query plan.
///
/// The owner clause is set by [`TaskQuery::for_owner`] and cannot be replaced or
/// removed afterwards; every other clause is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskQuery {
    owner: OwnerId,
    conditions: Vec<Condition>,
    sort: SortKey,
    window: Option<Window>,
}

/// Builder for [`TaskQuery`] plans
#[derive(Debug, Clone)]
pub struct TaskQueryBuilder {
    query: TaskQuery,
}

impl TaskQuery {
    /// Start a plan scoped to `owner`
    pub fn for_owner(owner: OwnerId) -> TaskQueryBuilder {
        TaskQueryBuilder {
            query: TaskQuery {
                owner,
                conditions: Vec::new(),
                sort: SortKey::default(),
                window: None,
            },
        }
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn window(&self) -> Option<Window> {
        self.window
    }

    /// Owner clause plus every filter clause
    pub fn matches(&self, task: &Task) -> bool {
        task.owner_id == self.owner && self.conditions.iter().all(|c| c.matches(task))
    }

    /// Execute the plan over an in-memory task set: filter, sort, then window.
    pub fn apply<'a, I>(&self, tasks: I) -> Vec<Task>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let mut matched: Vec<Task> = tasks
            .into_iter()
            .filter(|task| self.matches(task))
            .cloned()
            .collect();
        matched.sort_by(|a, b| self.sort.compare(a, b));

        match self.window {
            Some(window) => matched
                .into_iter()
                .skip(usize::try_from(window.skip).unwrap_or(usize::MAX))
                .take(usize::try_from(window.limit).unwrap_or(usize::MAX))
                .collect(),
            None => matched,
        }
    }

    /// Count of matching tasks over an in-memory task set, ignoring the window
    pub fn count_in<'a, I>(&self, tasks: I) -> u64
    where
        I: IntoIterator<Item = &'a Task>,
    {
        tasks.into_iter().filter(|task| self.matches(task)).count() as u64
    }

    /// SELECT statement for the plan, ordered and windowed
    pub fn build_select(&self) -> QueryBuilder<'static, Postgres> {
        let mut query = QueryBuilder::new(format!("SELECT {TASK_COLUMNS} FROM {TASKS_TABLE}"));
        self.push_where(&mut query);
        query.push(" ORDER BY ");
        query.push(self.sort.order_by_sql());

        if let Some(window) = self.window {
            query
                .push(" LIMIT ")
                .push_bind(clamp_i64(window.limit))
                .push(" OFFSET ")
                .push_bind(clamp_i64(window.skip));
        }

        query
    }

    /// COUNT statement for the plan; ordering and window do not apply
    pub fn build_count(&self) -> QueryBuilder<'static, Postgres> {
        let mut query = QueryBuilder::new(format!("SELECT COUNT(*) FROM {TASKS_TABLE}"));
        self.push_where(&mut query);
        query
    }

    fn push_where(&self, query: &mut QueryBuilder<'static, Postgres>) {
        query.push(" WHERE owner_id = ").push_bind(self.owner.as_uuid());
        for condition in &self.conditions {
            query.push(" AND ");
            condition.push_sql(query);
        }
    }
}

impl TaskQueryBuilder {
    /// Add every clause the criteria define
    pub fn filter(mut self, criteria: &FilterCriteria) -> Self {
        self.query.conditions.extend(criteria.conditions());
        self
    }

    /// Add a single clause
    pub fn condition(mut self, condition: Condition) -> Self {
        self.query.conditions.push(condition);
        self
    }

    pub fn sort(mut self, sort: SortKey) -> Self {
        self.query.sort = sort;
        self
    }

    /// Apply LIMIT/OFFSET from a pagination window
    pub fn paginate(mut self, pagination: &Pagination) -> Self {
        self.query.window = Some(Window {
            skip: pagination.skip(),
            limit: u64::from(pagination.limit()),
        });
        self
    }

    pub fn build(self) -> TaskQuery {
        self.query
    }
}

/// Build a complete plan from request state
pub fn build_task_query(
    owner: OwnerId,
    criteria: &FilterCriteria,
    sort: SortKey,
    pagination: Option<&Pagination>,
) -> TaskQuery {
    let builder = TaskQuery::for_owner(owner).filter(criteria).sort(sort);
    match pagination {
        Some(pagination) => builder.paginate(pagination).build(),
        None => builder.build(),
    }
}

fn clamp_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, NewTask, Priority, TaskFields, TaskId};
    use chrono::Utc;
    use uuid::Uuid;

    fn owner() -> OwnerId {
        OwnerId(Uuid::new_v4())
    }

    fn task_for(owner: OwnerId, title: &str, completed: bool) -> Task {
        NewTask::new(
            owner,
            TaskFields {
                title: title.to_string(),
                description: None,
                category: Category::Work,
                priority: Priority::Medium,
                due_date: None,
                completed: Some(completed),
            },
        )
        .into_task(TaskId::new(), Utc::now())
    }

    #[test]
    fn test_owner_clause_is_always_first() {
        let query = TaskQuery::for_owner(owner())
            .condition(Condition::Category(Category::Work))
            .build();

        let sql = query.build_select();
        assert!(sql
            .sql()
            .starts_with("SELECT id, owner_id, title, description, category, priority, due_date, completed, created_at, updated_at FROM taskboard_tasks WHERE owner_id = $1 AND category = $2"));
    }

    #[test]
    fn test_select_orders_and_windows() {
        let criteria = FilterCriteria {
            completed: Some(false),
            ..FilterCriteria::default()
        };
        let query = build_task_query(
            owner(),
            &criteria,
            SortKey::CreatedAt,
            Some(&Pagination::new(3, 10)),
        );

        let select = query.build_select();
        let sql = select.sql();
        assert!(sql.contains("completed = $2"));
        assert!(sql.contains("ORDER BY completed ASC, created_at DESC, id ASC"));
        assert!(sql.ends_with("LIMIT $3 OFFSET $4"));
        assert_eq!(query.window(), Some(Window { skip: 20, limit: 10 }));
    }

    #[test]
    fn test_count_ignores_order_and_window() {
        let query = build_task_query(
            owner(),
            &FilterCriteria::default(),
            SortKey::Priority,
            Some(&Pagination::new(2, 5)),
        );

        let count = query.build_count();
        assert_eq!(
            count.sql(),
            "SELECT COUNT(*) FROM taskboard_tasks WHERE owner_id = $1"
        );
    }

    #[test]
    fn test_in_memory_execution_is_owner_scoped() {
        let alice = owner();
        let bob = owner();
        let tasks = vec![
            task_for(alice, "alice open", false),
            task_for(bob, "bob open", false),
            task_for(alice, "alice done", true),
        ];

        let query = build_task_query(
            alice,
            &FilterCriteria {
                completed: Some(false),
                ..FilterCriteria::default()
            },
            SortKey::default(),
            None,
        );

        let result = query.apply(&tasks);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "alice open");
        assert_eq!(query.count_in(&tasks), 1);
    }

    #[test]
    fn test_in_memory_window() {
        let alice = owner();
        let tasks: Vec<Task> = (0..25)
            .map(|i| task_for(alice, &format!("task {i}"), false))
            .collect();

        let query = build_task_query(
            alice,
            &FilterCriteria::default(),
            SortKey::CreatedAt,
            Some(&Pagination::new(3, 10)),
        );
        assert_eq!(query.apply(&tasks).len(), 5);
        assert_eq!(query.count_in(&tasks), 25);

        let beyond = build_task_query(
            alice,
            &FilterCriteria::default(),
            SortKey::CreatedAt,
            Some(&Pagination::new(999, 10)),
        );
        assert!(beyond.apply(&tasks).is_empty());
    }
}
