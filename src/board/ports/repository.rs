//! Repository port for task persistence and rank rewrites.

use crate::board::domain::{Rank, Task, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// One task's new rank within a reconciliation batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankAssignment {
    /// Task receiving the new rank.
    pub task_id: TaskId,
    /// The rank to assign.
    pub rank: Rank,
}

impl RankAssignment {
    /// Creates a rank assignment.
    #[must_use]
    pub const fn new(task_id: TaskId, rank: Rank) -> Self {
        Self { task_id, rank }
    }
}

/// Task persistence contract.
///
/// `apply_ranks` is deliberately a single batch call: a column's rank
/// rewrite must be atomic with respect to other writers of the same
/// column, never a loop of independent per-task saves.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task (content, status, rank,
    /// timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Deletes a task, returning the removed record.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<Task>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task on the board, in no particular order.
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns one column's tasks, ascending by rank.
    async fn list_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>>;

    /// Applies a batch of rank rewrites atomically.
    ///
    /// Assignments referencing missing tasks are ignored rather than
    /// reported: a concurrently deleted sibling must not poison the
    /// surviving column's renumbering.
    async fn apply_ranks(&self, assignments: &[RankAssignment]) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
