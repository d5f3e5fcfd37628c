//! Server-authoritative task board management.
//!
//! This module owns the board's source of truth: the task aggregate and its
//! column lifecycle, the per-column rank contiguity invariant, and the
//! reconciliation that restores the invariant whenever a task is created,
//! moved, or deleted. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
