//! Application services for board orchestration.

mod board;
pub mod reconcile;

pub use board::{
    BoardService, BoardServiceError, BoardServiceResult, CreateTaskRequest, UpdateTaskRequest,
};
