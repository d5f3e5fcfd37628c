//! Optimistic board state and the drag-release reorder reducer.

use crate::board::domain::{BoardColumns, COLUMN_ORDER, Rank, Task, TaskId, TaskStatus};

/// The client's local mirror of the board: one flat task collection whose
/// order is the render order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    tasks: Vec<Task>,
}

/// Persistence payload produced by an applied reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankUpdate {
    /// The moved task.
    pub task_id: TaskId,
    /// The destination column.
    pub status: TaskStatus,
    /// The clamped drop position within the destination column.
    pub rank: Rank,
}

/// Why a drag-release left the board untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The dragged task is not in the local collection.
    UnknownTask(TaskId),
    /// The transition policy forbids the move.
    ForbiddenTransition {
        /// Column the task was dragged from.
        from: TaskStatus,
        /// Column the task was dropped into.
        to: TaskStatus,
    },
}

/// Outcome of a reorder event.
///
/// An ignored event is a no-op, not an error: the caller keeps its current
/// board and nothing is pushed to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reorder {
    /// The board accepted the move.
    Applied {
        /// The reordered board.
        state: BoardState,
        /// Payload for the sync bridge.
        update: RankUpdate,
    },
    /// The event was a no-op.
    Ignored(IgnoreReason),
}

impl BoardState {
    /// Creates a board state from a server-ordered task listing.
    #[must_use]
    pub const fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Returns the flat collection in render order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the per-column view of the board.
    #[must_use]
    pub fn columns(&self) -> BoardColumns {
        BoardColumns::partition(&self.tasks)
    }

    /// Removes a task from the local collection, if present.
    ///
    /// Used by the discard path; deliberately not a reorder — local render
    /// order already survives a removal, and the authoritative renumbering
    /// of the vacated column happens server-side.
    pub fn remove_task(&mut self, id: TaskId) {
        self.tasks.retain(|task| task.id() != id);
    }

    /// Applies a drag-release event: moves `moved_id` into `destination` at
    /// `dest_index`, clamped to the column's insertable range.
    ///
    /// Pure — no I/O, no renumbering of siblings. The returned collection
    /// is the new render order: columns concatenated in fixed order, the
    /// destination column rebuilt around the moved task, every other
    /// column's relative order untouched. The moved task's rank is staged
    /// to the drop position for display; authoritative ranks arrive from
    /// server-side reconciliation.
    #[must_use]
    pub fn reorder(&self, moved_id: TaskId, destination: TaskStatus, dest_index: usize) -> Reorder {
        let Some(mut moved) = self
            .tasks
            .iter()
            .find(|task| task.id() == moved_id)
            .cloned()
        else {
            return Reorder::Ignored(IgnoreReason::UnknownTask(moved_id));
        };

        if !moved.status().allows_move_to(destination) {
            return Reorder::Ignored(IgnoreReason::ForbiddenTransition {
                from: moved.status(),
                to: destination,
            });
        }

        let remainder: Vec<Task> = self
            .tasks
            .iter()
            .filter(|task| task.id() != moved_id)
            .cloned()
            .collect();

        let columns = BoardColumns::partition(&remainder);
        let mut destination_column = columns.column(destination).clone();
        let insert_at = dest_index.min(destination_column.len());
        let staged_rank = Rank::clamped_from_index(insert_at);
        moved.stage(destination, staged_rank);
        destination_column.insert(insert_at, moved);

        let mut rebuilt = Vec::with_capacity(self.tasks.len());
        for status in COLUMN_ORDER {
            if status == destination {
                rebuilt.extend(destination_column.iter().cloned());
            } else {
                rebuilt.extend(
                    remainder
                        .iter()
                        .filter(|task| task.status() == status)
                        .cloned(),
                );
            }
        }

        Reorder::Applied {
            state: Self { tasks: rebuilt },
            update: RankUpdate {
                task_id: moved_id,
                status: destination,
                rank: staged_rank,
            },
        }
    }
}
