//! Corkboard: a drag-and-drop task board engine.
//!
//! Tasks live in four ordered lifecycle columns and are ordered within each
//! column by a gap-free integer rank. Moving a task applies instantly on
//! the client and is reconciled authoritatively on the server, where every
//! sibling's rank is recomputed so the column stays the contiguous
//! sequence `{0..n-1}`.
//!
//! # Architecture
//!
//! Corkboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, transport)
//!
//! # Modules
//!
//! - [`board`]: Authoritative task storage, column transitions, and rank
//!   reconciliation
//! - [`client`]: Optimistic local board state and the fire-and-forget sync
//!   bridge

pub mod board;
pub mod client;
