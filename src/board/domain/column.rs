//! Per-column derived views over a flat task collection.

use super::{Task, TaskStatus};

/// Fixed rendering order of the board's columns.
pub const COLUMN_ORDER: [TaskStatus; 4] = [
    TaskStatus::Started,
    TaskStatus::InProgress,
    TaskStatus::Completed,
    TaskStatus::Cancelled,
];

/// A flat task collection partitioned into rank-ordered columns.
///
/// Both the optimistic client reducer and the authoritative board service
/// derive their column views through this type, so the two sides agree on
/// what a column looks like. The partition is stable: tasks with equal
/// ranks keep their input order, though rank duplicates only occur
/// transiently and their relative order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardColumns {
    started: Vec<Task>,
    in_progress: Vec<Task>,
    completed: Vec<Task>,
    cancelled: Vec<Task>,
}

impl BoardColumns {
    /// Partitions a flat collection into per-column sequences sorted
    /// ascending by rank.
    #[must_use]
    pub fn partition(tasks: &[Task]) -> Self {
        let mut columns = Self::default();
        for task in tasks {
            columns.column_slot(task.status()).push(task.clone());
        }
        for status in COLUMN_ORDER {
            columns.column_slot(status).sort_by_key(Task::rank);
        }
        columns
    }

    /// Returns one column's tasks, ascending by rank.
    #[must_use]
    pub const fn column(&self, status: TaskStatus) -> &Vec<Task> {
        match status {
            TaskStatus::Started => &self.started,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Completed => &self.completed,
            TaskStatus::Cancelled => &self.cancelled,
        }
    }

    /// Returns the number of tasks in one column.
    #[must_use]
    pub fn column_len(&self, status: TaskStatus) -> usize {
        self.column(status).len()
    }

    /// Iterates every task in board render order: columns in
    /// [`COLUMN_ORDER`], each ascending by rank.
    pub fn render_order(&self) -> impl Iterator<Item = &Task> {
        COLUMN_ORDER
            .into_iter()
            .flat_map(|status| self.column(status).iter())
    }

    const fn column_slot(&mut self, status: TaskStatus) -> &mut Vec<Task> {
        match status {
            TaskStatus::Started => &mut self.started,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Completed => &mut self.completed,
            TaskStatus::Cancelled => &mut self.cancelled,
        }
    }
}
