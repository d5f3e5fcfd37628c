//! Shared world state for board reorder BDD scenarios.

use std::sync::Arc;

use async_trait::async_trait;
use corkboard::board::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskId, TaskStatus},
    ports::TaskRepositoryError,
    services::{BoardService, BoardServiceError, UpdateTaskRequest},
};
use corkboard::client::{
    state::RankUpdate,
    sync::{BoardClient, BoardGateway, GatewayError, GatewayResult},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestBoardService = BoardService<InMemoryTaskRepository, DefaultClock>;

/// Gateway wired straight into the board service, standing in for the
/// transport layer.
pub struct ServiceGateway {
    service: Arc<TestBoardService>,
}

#[async_trait]
impl BoardGateway for ServiceGateway {
    async fn push_move(&self, update: RankUpdate) -> GatewayResult<()> {
        self.service
            .update_task(
                UpdateTaskRequest::new(update.task_id)
                    .with_status(update.status)
                    .with_rank(update.rank),
            )
            .await
            .map(|_| ())
            .map_err(into_gateway_error)
    }

    async fn delete_task(&self, id: TaskId) -> GatewayResult<()> {
        self.service
            .delete_task(id)
            .await
            .map(|_| ())
            .map_err(into_gateway_error)
    }
}

fn into_gateway_error(err: BoardServiceError) -> GatewayError {
    match err {
        BoardServiceError::Repository(TaskRepositoryError::NotFound(id)) => {
            GatewayError::NotFound(id)
        }
        other => GatewayError::transport(other),
    }
}

/// Scenario world for board reorder behaviour tests.
pub struct ReorderWorld {
    pub service: Arc<TestBoardService>,
    pub client: BoardClient<ServiceGateway>,
    pub last_drop_dispatched: Option<bool>,
}

impl ReorderWorld {
    /// Creates a world with an empty board and an unloaded client.
    #[must_use]
    pub fn new() -> Self {
        let service = Arc::new(BoardService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(DefaultClock),
        ));
        let client = BoardClient::new(Arc::new(ServiceGateway {
            service: Arc::clone(&service),
        }));

        Self {
            service,
            client,
            last_drop_dispatched: None,
        }
    }

    /// Looks up a task on the server by title.
    pub fn task_by_title(&self, title: &str) -> Result<Task, eyre::Report> {
        let listing = run_async(self.service.list_tasks())?;
        listing
            .into_iter()
            .find(|task| task.title() == title)
            .ok_or_else(|| eyre::eyre!("no task titled '{title}' on the board"))
    }
}

impl Default for ReorderWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ReorderWorld {
    ReorderWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses a Gherkin column name into a status.
pub fn parse_status(status: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(status).map_err(|err| eyre::eyre!("invalid column in scenario: {err}"))
}
