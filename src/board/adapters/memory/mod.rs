//! In-memory repository for board tests and embedded use.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{Task, TaskId, TaskStatus},
    ports::{RankAssignment, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Rank batches apply under one write lock, so a reconciliation is atomic
/// with respect to every other operation on the store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(
        &self,
    ) -> TaskRepositoryResult<std::sync::RwLockReadGuard<'_, HashMap<TaskId, Task>>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write_state(
        &self,
    ) -> TaskRepositoryResult<std::sync::RwLockWriteGuard<'_, HashMap<TaskId, Task>>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        if !state.contains_key(&task.id()) {
            return Err(TaskRepositoryError::NotFound(task.id()));
        }
        state.insert(task.id(), task.clone());
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        let mut state = self.write_state()?;
        state.remove(&id).ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read_state()?;
        Ok(state.get(&id).cloned())
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read_state()?;
        Ok(state.values().cloned().collect())
    }

    async fn list_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read_state()?;
        let mut column: Vec<Task> = state
            .values()
            .filter(|task| task.status() == status)
            .cloned()
            .collect();
        column.sort_by_key(Task::rank);
        Ok(column)
    }

    async fn apply_ranks(&self, assignments: &[RankAssignment]) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        for assignment in assignments {
            if let Some(task) = state.get_mut(&assignment.task_id) {
                task.assign_rank(assignment.rank);
            }
        }
        Ok(())
    }
}
