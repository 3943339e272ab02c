//! # PostgreSQL Task Store
//!
//! Every statement carries `owner_id = $1` so a caller can only ever touch its own
//! rows. Updates are single statements; stats are one aggregate query with `FILTER`
//! clauses so all four counts come from the same snapshot.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::debug;
use uuid::Uuid;

use super::{StoreError, StoreResult, TaskStore};
use crate::constants::TASKS_TABLE;
use crate::models::{NewTask, OwnerId, Task, TaskFields, TaskId, TaskStats};
use crate::query_builder::{TaskQuery, TASK_COLUMNS};

#[derive(Debug, Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn count_to_u64(value: i64, column: &str) -> StoreResult<u64> {
    u64::try_from(value).map_err(|_| StoreError::CorruptRow {
        id: column.to_string(),
        reason: format!("negative count {value}"),
    })
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, new_task: NewTask) -> StoreResult<Task> {
        let fields = new_task.fields;
        let sql = format!(
            "INSERT INTO {TASKS_TABLE} \
             (id, owner_id, title, description, category, priority, due_date, completed) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {TASK_COLUMNS}"
        );

        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(Uuid::new_v4())
            .bind(new_task.owner_id.as_uuid())
            .bind(fields.title)
            .bind(fields.description)
            .bind(fields.category.as_str())
            .bind(fields.priority.as_str())
            .bind(fields.due_date)
            .bind(fields.completed.unwrap_or(false))
            .fetch_one(&self.pool)
            .await?;

        debug!(task_id = %task.id, owner_id = %task.owner_id, "Inserted task");
        Ok(task)
    }

    async fn find(&self, owner: OwnerId, id: TaskId) -> StoreResult<Option<Task>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM {TASKS_TABLE} WHERE owner_id = $1 AND id = $2");
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(owner.as_uuid())
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn find_many(&self, query: &TaskQuery) -> StoreResult<Vec<Task>> {
        let mut select = query.build_select();
        let tasks = select
            .build_query_as::<Task>()
            .fetch_all(&self.pool)
            .await?;
        Ok(tasks)
    }

    async fn count(&self, query: &TaskQuery) -> StoreResult<u64> {
        let mut count = query.build_count();
        let total: i64 = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        count_to_u64(total, "count")
    }

    async fn replace(
        &self,
        owner: OwnerId,
        id: TaskId,
        fields: TaskFields,
    ) -> StoreResult<Option<Task>> {
        let sql = format!(
            "UPDATE {TASKS_TABLE} SET \
             title = $3, description = $4, category = $5, priority = $6, due_date = $7, \
             completed = COALESCE($8, completed), updated_at = NOW() \
             WHERE owner_id = $1 AND id = $2 \
             RETURNING {TASK_COLUMNS}"
        );

        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(owner.as_uuid())
            .bind(id.as_uuid())
            .bind(fields.title)
            .bind(fields.description)
            .bind(fields.category.as_str())
            .bind(fields.priority.as_str())
            .bind(fields.due_date)
            .bind(fields.completed)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn set_completed(
        &self,
        owner: OwnerId,
        id: TaskId,
        completed: bool,
    ) -> StoreResult<Option<Task>> {
        let sql = format!(
            "UPDATE {TASKS_TABLE} SET completed = $3, updated_at = NOW() \
             WHERE owner_id = $1 AND id = $2 \
             RETURNING {TASK_COLUMNS}"
        );

        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(owner.as_uuid())
            .bind(id.as_uuid())
            .bind(completed)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn delete(&self, owner: OwnerId, id: TaskId) -> StoreResult<Option<Task>> {
        let sql = format!(
            "DELETE FROM {TASKS_TABLE} WHERE owner_id = $1 AND id = $2 RETURNING {TASK_COLUMNS}"
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(owner.as_uuid())
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    async fn delete_many(&self, owner: OwnerId, ids: &[TaskId]) -> StoreResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let ids: Vec<Uuid> = ids.iter().map(TaskId::as_uuid).collect();
        let sql = format!("DELETE FROM {TASKS_TABLE} WHERE owner_id = $1 AND id = ANY($2)");
        let result = sqlx::query(&sql)
            .bind(owner.as_uuid())
            .bind(&ids)
            .execute(&self.pool)
            .await?;

        debug!(
            owner_id = %owner,
            requested = ids.len(),
            deleted = result.rows_affected(),
            "Bulk deleted tasks"
        );
        Ok(result.rows_affected())
    }

    async fn stats(&self, owner: OwnerId, now: DateTime<Utc>) -> StoreResult<TaskStats> {
        let sql = format!(
            "SELECT \
             COUNT(*) AS total, \
             COUNT(*) FILTER (WHERE completed) AS completed, \
             COUNT(*) FILTER (WHERE NOT completed AND priority = 'high') AS high_priority, \
             COUNT(*) FILTER (WHERE NOT completed AND due_date < $2) AS overdue \
             FROM {TASKS_TABLE} WHERE owner_id = $1"
        );

        let row = sqlx::query(&sql)
            .bind(owner.as_uuid())
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(TaskStats {
            total: count_to_u64(row.try_get("total")?, "total")?,
            completed: count_to_u64(row.try_get("completed")?, "completed")?,
            high_priority: count_to_u64(row.try_get("high_priority")?, "high_priority")?,
            overdue: count_to_u64(row.try_get("overdue")?, "overdue")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Priority};
    use crate::query_builder::{build_task_query, FilterCriteria, SortKey};
    use chrono::Duration;

    fn owner() -> OwnerId {
        OwnerId(Uuid::new_v4())
    }

    fn fields(title: &str) -> TaskFields {
        TaskFields {
            title: title.to_string(),
            description: None,
            category: Category::Personal,
            priority: Priority::Medium,
            due_date: None,
            completed: None,
        }
    }

    #[test]
    fn test_negative_counts_are_corrupt() {
        assert_eq!(count_to_u64(4, "total").unwrap(), 4);
        assert!(matches!(
            count_to_u64(-1, "total"),
            Err(StoreError::CorruptRow { .. })
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_insert_and_find_round_trip(pool: PgPool) {
        let store = PgTaskStore::new(pool);
        let alice = owner();

        let task = store
            .insert(NewTask::new(
                alice,
                TaskFields {
                    description: Some("Two litres".to_string()),
                    category: Category::Shopping,
                    ..fields("Buy milk")
                },
            ))
            .await
            .unwrap();

        assert_eq!(task.owner_id, alice);
        assert_eq!(task.category, Category::Shopping);
        assert!(!task.completed);
        assert_eq!(store.find(alice, task.id).await.unwrap(), Some(task));
        store.ping().await.unwrap();
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_foreign_rows_are_invisible(pool: PgPool) {
        let store = PgTaskStore::new(pool);
        let alice = owner();
        let bob = owner();
        let task = store.insert(NewTask::new(alice, fields("Private"))).await.unwrap();

        assert_eq!(store.find(bob, task.id).await.unwrap(), None);
        assert_eq!(store.replace(bob, task.id, fields("Hijack")).await.unwrap(), None);
        assert_eq!(store.set_completed(bob, task.id, true).await.unwrap(), None);
        assert_eq!(store.delete(bob, task.id).await.unwrap(), None);

        let query = build_task_query(bob, &FilterCriteria::default(), SortKey::CreatedAt, None);
        assert!(store.find_many(&query).await.unwrap().is_empty());
        assert_eq!(store.count(&query).await.unwrap(), 0);

        let untouched = store.find(alice, task.id).await.unwrap().unwrap();
        assert_eq!(untouched.title, "Private");
        assert!(!untouched.completed);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_replace_keeps_completed_when_absent(pool: PgPool) {
        let store = PgTaskStore::new(pool);
        let alice = owner();
        let task = store.insert(NewTask::new(alice, fields("Original"))).await.unwrap();
        store.set_completed(alice, task.id, true).await.unwrap();

        let updated = store
            .replace(alice, task.id, fields("Renamed"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Renamed");
        assert!(updated.completed);
        assert_eq!(updated.created_at, task.created_at);
        assert!(updated.updated_at >= task.updated_at);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_many_skips_foreign_ids(pool: PgPool) {
        let store = PgTaskStore::new(pool);
        let alice = owner();
        let bob = owner();
        let mine = store.insert(NewTask::new(alice, fields("Mine"))).await.unwrap();
        let theirs = store.insert(NewTask::new(bob, fields("Theirs"))).await.unwrap();

        let deleted = store
            .delete_many(alice, &[mine.id, theirs.id, TaskId::new()])
            .await
            .unwrap();

        assert_eq!(deleted, 1);
        assert_eq!(store.find(alice, mine.id).await.unwrap(), None);
        assert_eq!(store.find(bob, theirs.id).await.unwrap(), Some(theirs));
        assert_eq!(store.delete_many(alice, &[]).await.unwrap(), 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_stats_count_one_of_each(pool: PgPool) {
        let store = PgTaskStore::new(pool);
        let alice = owner();
        let now = Utc::now();

        store
            .insert(NewTask::new(
                alice,
                TaskFields {
                    completed: Some(true),
                    ..fields("Filed taxes")
                },
            ))
            .await
            .unwrap();
        store
            .insert(NewTask::new(
                alice,
                TaskFields {
                    priority: Priority::High,
                    due_date: Some(now - Duration::days(1)),
                    ..fields("Renew passport")
                },
            ))
            .await
            .unwrap();
        store
            .insert(NewTask::new(
                alice,
                TaskFields {
                    priority: Priority::Low,
                    due_date: Some(now + Duration::days(7)),
                    ..fields("Water plants")
                },
            ))
            .await
            .unwrap();
        store
            .insert(NewTask::new(
                owner(),
                TaskFields {
                    priority: Priority::High,
                    due_date: Some(now - Duration::days(3)),
                    ..fields("Someone else")
                },
            ))
            .await
            .unwrap();

        let stats = store.stats(alice, now).await.unwrap();
        assert_eq!(
            stats,
            TaskStats {
                total: 3,
                completed: 1,
                high_priority: 1,
                overdue: 1,
            }
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_open_tasks_lead_for_every_sort(pool: PgPool) {
        let store = PgTaskStore::new(pool);
        let alice = owner();
        let now = Utc::now();

        let seeds = [
            ("Done early", Priority::High, Some(now - Duration::days(5)), true),
            ("Open later", Priority::Low, Some(now + Duration::days(5)), false),
            ("Done undated", Priority::Low, None, true),
            ("Open undated", Priority::High, None, false),
            ("Open soon", Priority::Medium, Some(now + Duration::days(1)), false),
        ];
        for (title, priority, due_date, completed) in seeds {
            store
                .insert(NewTask::new(
                    alice,
                    TaskFields {
                        priority,
                        due_date,
                        completed: Some(completed),
                        ..fields(title)
                    },
                ))
                .await
                .unwrap();
        }

        for sort in [SortKey::DueDate, SortKey::Priority, SortKey::CreatedAt] {
            let query = build_task_query(alice, &FilterCriteria::default(), sort, None);
            let tasks = store.find_many(&query).await.unwrap();

            assert_eq!(tasks.len(), 5);
            let flags: Vec<bool> = tasks.iter().map(|t| t.completed).collect();
            assert_eq!(flags, vec![false, false, false, true, true], "{sort:?}");
        }

        let by_priority = build_task_query(alice, &FilterCriteria::default(), SortKey::Priority, None);
        let titles: Vec<String> = store
            .find_many(&by_priority)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(&titles[..3], ["Open undated", "Open soon", "Open later"]);
    }
}
