//! Task aggregate root and column lifecycle states.

use super::{BoardDomainError, ParseTaskStatusError, Rank, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column membership of a task.
///
/// The four statuses double as the board's columns, rendered in the fixed
/// order started, in-progress, completed, cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Task has been created but work has not started.
    Started,
    /// Task is being worked on.
    InProgress,
    /// Task has been finished.
    Completed,
    /// Task has been abandoned.
    Cancelled,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns the column's position in the fixed board order.
    #[must_use]
    pub const fn column_position(self) -> usize {
        match self {
            Self::Started => 0,
            Self::InProgress => 1,
            Self::Completed => 2,
            Self::Cancelled => 3,
        }
    }

    /// Returns whether a drag from this column may drop into `destination`.
    ///
    /// Completed is a sink: nothing leaves it, not even a reorder within the
    /// column. In-progress tasks cannot regress to started, and cancelled
    /// tasks may only stay in cancelled or return to started. Every other
    /// pair, including a pure reorder within one column, is allowed.
    #[must_use]
    pub const fn allows_move_to(self, destination: Self) -> bool {
        !matches!(
            (self, destination),
            (Self::Completed, _)
                | (Self::InProgress, Self::Started)
                | (Self::Cancelled, Self::InProgress | Self::Completed)
        )
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "started" => Ok(Self::Started),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    status: TaskStatus,
    rank: Rank,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted column membership.
    pub status: TaskStatus,
    /// Persisted intra-column rank.
    pub rank: Rank,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in the given column at the given rank.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] when the title is empty
    /// after trimming.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        status: TaskStatus,
        rank: Rank,
        clock: &impl Clock,
    ) -> Result<Self, BoardDomainError> {
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            title: validated_title(title)?,
            description: description.into(),
            status,
            rank,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            rank: data.rank,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the column membership.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the intra-column rank.
    #[must_use]
    pub const fn rank(&self) -> Rank {
        self.rank
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the title.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTitle`] when the new title is empty
    /// after trimming.
    pub fn rename(
        &mut self,
        title: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), BoardDomainError> {
        self.title = validated_title(title)?;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the description.
    pub fn describe(&mut self, description: impl Into<String>, clock: &impl Clock) {
        self.description = description.into();
        self.touch(clock);
    }

    /// Places the task in a column at a rank.
    ///
    /// Column-transition legality is a concern of the drag gesture, not of
    /// the aggregate: the reorder reducer gates moves through
    /// [`TaskStatus::allows_move_to`] before any relocation reaches storage.
    pub fn relocate(&mut self, status: TaskStatus, rank: Rank, clock: &impl Clock) {
        self.status = status;
        self.rank = rank;
        self.touch(clock);
    }

    /// Overwrites the rank without updating the mutation timestamp.
    ///
    /// Rank shifts caused by a sibling's move are bookkeeping, not edits.
    pub const fn assign_rank(&mut self, rank: Rank) {
        self.rank = rank;
    }

    /// Stages an optimistic placement: sets column and rank without
    /// touching timestamps.
    ///
    /// The staged rank exists for display only; the authoritative rank
    /// arrives from server-side reconciliation.
    pub const fn stage(&mut self, status: TaskStatus, rank: Rank) {
        self.status = status;
        self.rank = rank;
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Trims a candidate title, rejecting empty results.
fn validated_title(title: impl Into<String>) -> Result<String, BoardDomainError> {
    let raw = title.into();
    let normalized = raw.trim();
    if normalized.is_empty() {
        return Err(BoardDomainError::EmptyTitle);
    }
    Ok(normalized.to_owned())
}
