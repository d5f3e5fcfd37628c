//! Service layer for board operations and rank reconciliation.

use crate::board::{
    domain::{BoardColumns, BoardDomainError, Rank, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
    services::reconcile::{clamp_target, close_gap, make_room},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    status: Option<TaskStatus>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            status: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the destination column; tasks land in started otherwise.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Request payload for updating a task.
///
/// A request carrying a status or a rank takes the reconciliation path;
/// content-only edits leave every rank untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    id: TaskId,
    title: Option<String>,
    description: Option<String>,
    status: Option<TaskStatus>,
    rank: Option<Rank>,
}

impl UpdateTaskRequest {
    /// Creates an empty update for the given task.
    #[must_use]
    pub const fn new(id: TaskId) -> Self {
        Self {
            id,
            title: None,
            description: None,
            status: None,
            rank: None,
        }
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Moves the task to a column.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Moves the task to a rank.
    #[must_use]
    pub const fn with_rank(mut self, rank: Rank) -> Self {
        self.rank = Some(rank);
        self
    }

    const fn requests_move(&self) -> bool {
        self.status.is_some() || self.rank.is_some()
    }
}

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;

/// One async mutex per column.
///
/// Every rank-mutating operation holds its column's lock for the whole
/// read-plan-write cycle; cross-column moves hold both, acquired in fixed
/// column order so two opposing moves cannot deadlock.
#[derive(Debug, Default)]
struct ColumnLocks {
    started: Mutex<()>,
    in_progress: Mutex<()>,
    completed: Mutex<()>,
    cancelled: Mutex<()>,
}

impl ColumnLocks {
    const fn lock_for(&self, status: TaskStatus) -> &Mutex<()> {
        match status {
            TaskStatus::Started => &self.started,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Completed => &self.completed,
            TaskStatus::Cancelled => &self.cancelled,
        }
    }

    async fn hold_one(&self, status: TaskStatus) -> MutexGuard<'_, ()> {
        self.lock_for(status).lock().await
    }

    async fn hold_pair(
        &self,
        first: TaskStatus,
        second: TaskStatus,
    ) -> (MutexGuard<'_, ()>, Option<MutexGuard<'_, ()>>) {
        if first == second {
            return (self.hold_one(first).await, None);
        }
        let (lower, upper) = if first.column_position() < second.column_position() {
            (first, second)
        } else {
            (second, first)
        };
        let lower_guard = self.lock_for(lower).lock().await;
        let upper_guard = self.lock_for(upper).lock().await;
        (lower_guard, Some(upper_guard))
    }
}

/// Board orchestration service.
#[derive(Clone)]
pub struct BoardService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    locks: Arc<ColumnLocks>,
}

impl<R, C> BoardService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new board service.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            locks: Arc::new(ColumnLocks::default()),
        }
    }

    /// Returns every task in board render order: columns in fixed order,
    /// each ascending by rank.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when the listing fails.
    pub async fn list_tasks(&self) -> BoardServiceResult<Vec<Task>> {
        let tasks = self.repository.list_all().await?;
        let columns = BoardColumns::partition(&tasks);
        Ok(columns.render_order().cloned().collect())
    }

    /// Creates a task appended at the end of its column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the title is invalid or the
    /// repository rejects persistence.
    pub async fn create_task(&self, request: CreateTaskRequest) -> BoardServiceResult<Task> {
        let status = request.status.unwrap_or(TaskStatus::Started);

        let _column_guard = self.locks.hold_one(status).await;
        let column = self.repository.list_by_status(status).await?;
        let rank = Rank::from_index(column.len())?;
        let task = Task::new(request.title, request.description, status, rank, &*self.clock)?;
        self.repository.insert(&task).await?;
        Ok(task)
    }

    /// Applies content edits and, when a status or rank is present, moves
    /// the task and reconciles every affected column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the task does not exist, a new
    /// title is invalid, or persistence fails.
    pub async fn update_task(&self, request: UpdateTaskRequest) -> BoardServiceResult<Task> {
        let wants_move = request.requests_move();
        let mut task = self
            .repository
            .find_by_id(request.id)
            .await?
            .ok_or(TaskRepositoryError::NotFound(request.id))?;

        let mut edited = false;
        if let Some(title) = request.title {
            task.rename(title, &*self.clock)?;
            edited = true;
        }
        if let Some(description) = request.description {
            task.describe(description, &*self.clock);
            edited = true;
        }

        if !wants_move {
            if edited {
                self.repository.update(&task).await?;
            }
            return Ok(task);
        }

        let destination = request.status.unwrap_or_else(|| task.status());
        let requested_rank = request.rank.unwrap_or_else(|| task.rank());
        self.relocate(task, destination, requested_rank).await
    }

    /// Deletes a task and renumbers its former column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError`] when the task does not exist or
    /// persistence fails.
    pub async fn delete_task(&self, id: TaskId) -> BoardServiceResult<Task> {
        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskRepositoryError::NotFound(id))?;

        let _column_guard = self.locks.hold_one(existing.status()).await;
        let removed = self.repository.delete(id).await?;
        let survivors = self.repository.list_by_status(removed.status()).await?;
        let plan = close_gap(&survivors)?;
        self.repository.apply_ranks(&plan).await?;
        Ok(removed)
    }

    /// Moves a task and restores the contiguity invariant in every column
    /// the move touches.
    async fn relocate(
        &self,
        mut task: Task,
        destination: TaskStatus,
        requested_rank: Rank,
    ) -> BoardServiceResult<Task> {
        let source = task.status();
        let _guards = self.locks.hold_pair(source, destination).await;

        let siblings: Vec<Task> = self
            .repository
            .list_by_status(destination)
            .await?
            .into_iter()
            .filter(|sibling| sibling.id() != task.id())
            .collect();

        let target = clamp_target(requested_rank, siblings.len())?;
        let plan = make_room(task.id(), target, &siblings)?;

        task.relocate(destination, target, &*self.clock);
        self.repository.update(&task).await?;
        self.repository.apply_ranks(&plan).await?;

        if source != destination {
            let survivors = self.repository.list_by_status(source).await?;
            let gap_plan = close_gap(&survivors)?;
            self.repository.apply_ranks(&gap_plan).await?;
        }

        Ok(task)
    }
}
