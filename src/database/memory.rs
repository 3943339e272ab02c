use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};

use super::{StoreResult, TaskStore};
use crate::models::{NewTask, OwnerId, Task, TaskFields, TaskId, TaskStats};
use crate::query_builder::TaskQuery;

/// Task store held in process memory.
///
/// Query plans are evaluated with the same condition and ordering semantics the
/// PostgreSQL store renders to SQL. Every operation runs under a single lock
/// acquisition, so reads see one consistent snapshot.
#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    tasks: RwLock<HashMap<TaskId, Task>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed records with explicit ids and timestamps
    pub fn with_tasks<I: IntoIterator<Item = Task>>(tasks: I) -> Self {
        Self {
            tasks: RwLock::new(tasks.into_iter().map(|task| (task.id, task)).collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.read().is_empty()
    }

    fn owned_mut<'a>(
        tasks: &'a mut HashMap<TaskId, Task>,
        owner: OwnerId,
        id: TaskId,
    ) -> Option<&'a mut Task> {
        tasks.get_mut(&id).filter(|task| task.owner_id == owner)
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn insert(&self, new_task: NewTask) -> StoreResult<Task> {
        let task = new_task.into_task(TaskId::new(), Utc::now());
        self.tasks.write().insert(task.id, task.clone());
        Ok(task)
    }

    async fn find(&self, owner: OwnerId, id: TaskId) -> StoreResult<Option<Task>> {
        Ok(self
            .tasks
            .read()
            .get(&id)
            .filter(|task| task.owner_id == owner)
            .cloned())
    }

    async fn find_many(&self, query: &TaskQuery) -> StoreResult<Vec<Task>> {
        Ok(query.apply(self.tasks.read().values()))
    }

    async fn count(&self, query: &TaskQuery) -> StoreResult<u64> {
        Ok(query.count_in(self.tasks.read().values()))
    }

    async fn replace(
        &self,
        owner: OwnerId,
        id: TaskId,
        fields: TaskFields,
    ) -> StoreResult<Option<Task>> {
        let mut tasks = self.tasks.write();
        let Some(task) = Self::owned_mut(&mut tasks, owner, id) else {
            return Ok(None);
        };

        task.title = fields.title;
        task.description = fields.description;
        task.category = fields.category;
        task.priority = fields.priority;
        task.due_date = fields.due_date;
        if let Some(completed) = fields.completed {
            task.completed = completed;
        }
        task.updated_at = Utc::now();

        Ok(Some(task.clone()))
    }

    async fn set_completed(
        &self,
        owner: OwnerId,
        id: TaskId,
        completed: bool,
    ) -> StoreResult<Option<Task>> {
        let mut tasks = self.tasks.write();
        Ok(Self::owned_mut(&mut tasks, owner, id).map(|task| {
            task.completed = completed;
            task.updated_at = Utc::now();
            task.clone()
        }))
    }

    async fn delete(&self, owner: OwnerId, id: TaskId) -> StoreResult<Option<Task>> {
        let mut tasks = self.tasks.write();
        if Self::owned_mut(&mut tasks, owner, id).is_none() {
            return Ok(None);
        }
        Ok(tasks.remove(&id))
    }

    async fn delete_many(&self, owner: OwnerId, ids: &[TaskId]) -> StoreResult<u64> {
        let targets: HashSet<TaskId> = ids.iter().copied().collect();
        let mut tasks = self.tasks.write();
        let before = tasks.len();
        tasks.retain(|id, task| !(task.owner_id == owner && targets.contains(id)));
        Ok((before - tasks.len()) as u64)
    }

    async fn stats(&self, owner: OwnerId, now: DateTime<Utc>) -> StoreResult<TaskStats> {
        let tasks = self.tasks.read();
        Ok(TaskStats::from_snapshot(
            tasks.values().filter(|task| task.owner_id == owner),
            now,
        ))
    }
}
