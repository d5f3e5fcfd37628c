//! End-to-end reorder flows: optimistic client, gateway, authoritative
//! service.

use super::helpers::{assert_contiguous_ranks, build_service, column_titles, seed_tasks, TestService};
use async_trait::async_trait;
use corkboard::board::{
    domain::{BoardColumns, Task, TaskId, TaskStatus},
    ports::TaskRepositoryError,
    services::{BoardServiceError, UpdateTaskRequest},
};
use corkboard::client::{
    state::RankUpdate,
    sync::{BoardClient, BoardGateway, GatewayError, GatewayResult},
};
use rstest::rstest;
use std::sync::Arc;

/// Gateway wired straight into the board service, standing in for the
/// transport layer.
struct ServiceGateway {
    service: Arc<TestService>,
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

async fn build_client(service: &Arc<TestService>) -> BoardClient<ServiceGateway> {
    let gateway = ServiceGateway {
        service: Arc::clone(service),
    };
    let client = BoardClient::new(Arc::new(gateway));
    let listing = service.list_tasks().await.expect("listing should succeed");
    client.load(listing).await;
    client
}

fn render_titles(tasks: &[Task]) -> Vec<String> {
    tasks.iter().map(|task| task.title().to_owned()).collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_reorder_renders_instantly_and_reconciles_on_the_server()
-> Result<(), eyre::Report> {
    let service = Arc::new(build_service());
    let created = seed_tasks(&service, TaskStatus::Started, &["T0", "T1", "T2"]).await;
    let moved_id = created
        .get(2)
        .map(Task::id)
        .ok_or_else(|| eyre::eyre!("seeded task missing"))?;

    let client = build_client(&service).await;
    let handle = client
        .reorder(moved_id, TaskStatus::Started, 0)
        .await
        .ok_or_else(|| eyre::eyre!("reorder should dispatch a push"))?;

    // Optimistic render order is immediate.
    eyre::ensure!(
        render_titles(&client.tasks().await) == ["T2", "T0", "T1"],
        "client should render the move before the server confirms"
    );

    handle.await?;

    // Authoritative ranks are contiguous with the moved task at the head.
    let listing = service.list_tasks().await?;
    let columns = BoardColumns::partition(&listing);
    let started: Vec<(String, u32)> = columns
        .column(TaskStatus::Started)
        .iter()
        .map(|task| (task.title().to_owned(), task.rank().value()))
        .collect();
    eyre::ensure!(
        started
            == [
                ("T2".to_owned(), 0),
                ("T0".to_owned(), 1),
                ("T1".to_owned(), 2)
            ],
        "server should reconcile to T2=0, T0=1, T1=2, got {started:?}"
    );
    assert_contiguous_ranks(&service, TaskStatus::Started).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_cross_column_move_reconciles_both_columns() -> Result<(), eyre::Report> {
    let service = Arc::new(build_service());
    let created = seed_tasks(&service, TaskStatus::Started, &["A", "T", "B"]).await;
    let moved_id = created
        .get(1)
        .map(Task::id)
        .ok_or_else(|| eyre::eyre!("seeded task missing"))?;

    let client = build_client(&service).await;
    let handle = client
        .reorder(moved_id, TaskStatus::InProgress, 0)
        .await
        .ok_or_else(|| eyre::eyre!("reorder should dispatch a push"))?;
    handle.await?;

    eyre::ensure!(
        column_titles(&service, TaskStatus::Started).await == ["A", "B"],
        "source column should close the vacated gap"
    );
    eyre::ensure!(
        column_titles(&service, TaskStatus::InProgress).await == ["T"],
        "destination column should hold the moved task"
    );
    assert_contiguous_ranks(&service, TaskStatus::Started).await?;
    assert_contiguous_ranks(&service, TaskStatus::InProgress).await
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_forbidden_move_changes_nothing_anywhere() -> Result<(), eyre::Report> {
    let service = Arc::new(build_service());
    seed_tasks(&service, TaskStatus::Started, &["Fresh"]).await;
    let done = seed_tasks(&service, TaskStatus::Completed, &["Done"]).await;
    let done_id = done
        .first()
        .map(Task::id)
        .ok_or_else(|| eyre::eyre!("seeded task missing"))?;

    let client = build_client(&service).await;
    let before = render_titles(&client.tasks().await);

    let handle = client.reorder(done_id, TaskStatus::Started, 0).await;

    eyre::ensure!(handle.is_none(), "forbidden move should not dispatch");
    eyre::ensure!(
        render_titles(&client.tasks().await) == before,
        "client board should be untouched"
    );
    eyre::ensure!(
        column_titles(&service, TaskStatus::Completed).await == ["Done"],
        "server board should be untouched"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn discard_deletes_remotely_and_closes_the_server_side_gap()
-> Result<(), eyre::Report> {
    let service = Arc::new(build_service());
    let created = seed_tasks(&service, TaskStatus::Started, &["T0", "T1", "T2"]).await;
    let discarded_id = created
        .get(1)
        .map(Task::id)
        .ok_or_else(|| eyre::eyre!("seeded task missing"))?;

    let client = build_client(&service).await;
    client.discard(discarded_id).await?;

    eyre::ensure!(
        render_titles(&client.tasks().await) == ["T0", "T2"],
        "client should drop the discarded task"
    );
    eyre::ensure!(
        column_titles(&service, TaskStatus::Started).await == ["T0", "T2"],
        "server should drop the discarded task"
    );
    assert_contiguous_ranks(&service, TaskStatus::Started).await
}
