//! Optimistic client-side mirror of the board.
//!
//! The client applies drag-release events instantly through a pure reducer
//! over an explicit state container, then persists them through an
//! asynchronous effect boundary:
//!
//! - State container and reducer in [`state`]
//! - Gateway port and sync bridge in [`sync`]

pub mod state;
pub mod sync;

#[cfg(test)]
mod tests;
