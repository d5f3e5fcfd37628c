//! Shared fixtures and assertions for in-memory integration tests.

use std::sync::Arc;

use corkboard::board::{
    adapters::memory::InMemoryTaskRepository,
    domain::{BoardColumns, Task, TaskStatus},
    services::{BoardService, CreateTaskRequest},
};
use mockable::DefaultClock;

/// Service type used by the integration suites.
pub type TestService = BoardService<InMemoryTaskRepository, DefaultClock>;

/// Builds a service over a fresh in-memory repository.
#[must_use]
pub fn build_service() -> TestService {
    BoardService::new(Arc::new(InMemoryTaskRepository::new()), Arc::new(DefaultClock))
}

/// Creates one task per title in the given column, in order.
pub async fn seed_tasks(
    service: &TestService,
    status: TaskStatus,
    titles: &[&str],
) -> Vec<Task> {
    let mut created = Vec::with_capacity(titles.len());
    for title in titles {
        let task = service
            .create_task(CreateTaskRequest::new(*title).with_status(status))
            .await
            .expect("seed task creation should succeed");
        created.push(task);
    }
    created
}

/// Returns one column's titles in rank order.
pub async fn column_titles(service: &TestService, status: TaskStatus) -> Vec<String> {
    let tasks = service
        .list_tasks()
        .await
        .expect("listing should succeed");
    BoardColumns::partition(&tasks)
        .column(status)
        .iter()
        .map(|task| task.title().to_owned())
        .collect()
}

/// Asserts one column's rank set is exactly `{0..n-1}` in order.
///
/// # Errors
///
/// Returns an error when a rank deviates from its position.
pub async fn assert_contiguous_ranks(
    service: &TestService,
    status: TaskStatus,
) -> Result<(), eyre::Report> {
    let tasks = service.list_tasks().await?;
    let columns = BoardColumns::partition(&tasks);
    for (position, task) in columns.column(status).iter().enumerate() {
        eyre::ensure!(
            task.rank().index() == position,
            "column {status} breaks contiguity at '{}': rank {} in position {position}",
            task.title(),
            task.rank(),
        );
    }
    Ok(())
}
