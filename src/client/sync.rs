//! Fire-and-forget persistence bridge for the optimistic board.

use crate::board::domain::{Task, TaskId, TaskStatus};
use crate::client::state::{BoardState, RankUpdate, Reorder};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Result type for board gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors returned by board gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The server no longer knows the task.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Transport-layer failure.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl GatewayError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}

/// Transport-facing contract for pushing board changes to the server.
///
/// This is the excluded collaborator boundary: implementations wrap
/// whatever carries the request to the authoritative board service.
#[async_trait]
pub trait BoardGateway: Send + Sync {
    /// Persists a moved task's new column and rank.
    async fn push_move(&self, update: RankUpdate) -> GatewayResult<()>;

    /// Requests deletion of a task dropped on the discard target.
    async fn delete_task(&self, id: TaskId) -> GatewayResult<()>;
}

/// Mutable board snapshot plus a generation counter.
///
/// The generation detects whether the board changed between dispatching a
/// push and observing its failure; a stale snapshot must not clobber a
/// newer local edit.
#[derive(Debug, Default)]
struct ClientBoard {
    state: BoardState,
    generation: u64,
}

/// Optimistic board client.
///
/// Drag-release events apply the pure reducer immediately, then the new
/// `{task, status, rank}` is pushed to the gateway on a spawned task that
/// never blocks the caller. A failed push restores the pre-move snapshot
/// the client kept, unless newer local edits landed in the meantime.
pub struct BoardClient<G>
where
    G: BoardGateway + 'static,
{
    gateway: Arc<G>,
    board: Arc<Mutex<ClientBoard>>,
}

impl<G> Clone for BoardClient<G>
where
    G: BoardGateway + 'static,
{
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            board: Arc::clone(&self.board),
        }
    }
}

impl<G> BoardClient<G>
where
    G: BoardGateway + 'static,
{
    /// Creates a client with an empty board.
    #[must_use]
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            board: Arc::new(Mutex::new(ClientBoard::default())),
        }
    }

    /// Replaces the local board with an authoritative task listing.
    pub async fn load(&self, tasks: Vec<Task>) {
        let mut board = self.board.lock().await;
        board.state = BoardState::new(tasks);
        board.generation = board.generation.wrapping_add(1);
    }

    /// Returns a snapshot of the local board in render order.
    pub async fn tasks(&self) -> Vec<Task> {
        let board = self.board.lock().await;
        board.state.tasks().to_vec()
    }

    /// Applies a drag-release event locally and pushes the move.
    ///
    /// Returns the handle of the spawned push for callers that need to
    /// observe its completion; an ignored event spawns nothing.
    pub async fn reorder(
        &self,
        moved_id: TaskId,
        destination: TaskStatus,
        dest_index: usize,
    ) -> Option<JoinHandle<()>> {
        let mut board = self.board.lock().await;
        match board.state.reorder(moved_id, destination, dest_index) {
            Reorder::Ignored(reason) => {
                tracing::debug!(?reason, "reorder ignored");
                None
            }
            Reorder::Applied { state, update } => {
                let snapshot = std::mem::replace(&mut board.state, state);
                board.generation = board.generation.wrapping_add(1);
                let dispatched = board.generation;
                drop(board);
                Some(self.dispatch_move(snapshot, update, dispatched))
            }
        }
    }

    /// Requests deletion of a task dropped on the discard target.
    ///
    /// Distinct from the reorder path: nothing is reordered locally, and on
    /// success the task is simply removed from the local collection.
    /// Returns the handle of the spawned request.
    pub fn discard(&self, id: TaskId) -> JoinHandle<()> {
        let gateway = Arc::clone(&self.gateway);
        let board = Arc::clone(&self.board);
        tokio::spawn(async move {
            match gateway.delete_task(id).await {
                Ok(()) => {
                    let mut guard = board.lock().await;
                    guard.state.remove_task(id);
                    guard.generation = guard.generation.wrapping_add(1);
                }
                Err(err) => {
                    tracing::warn!(task = %id, error = %err, "discard failed, keeping task on the board");
                }
            }
        })
    }

    fn dispatch_move(
        &self,
        snapshot: BoardState,
        update: RankUpdate,
        dispatched: u64,
    ) -> JoinHandle<()> {
        let gateway = Arc::clone(&self.gateway);
        let board = Arc::clone(&self.board);
        tokio::spawn(async move {
            if let Err(err) = gateway.push_move(update).await {
                let mut guard = board.lock().await;
                if guard.generation == dispatched {
                    tracing::warn!(
                        task = %update.task_id,
                        error = %err,
                        "move rejected by server, restoring pre-move board"
                    );
                    guard.state = snapshot;
                    guard.generation = guard.generation.wrapping_add(1);
                } else {
                    tracing::warn!(
                        task = %update.task_id,
                        error = %err,
                        "move rejected by server after newer local edits, keeping local board"
                    );
                }
            }
        })
    }
}
