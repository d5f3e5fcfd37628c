//! Step definitions for board reorder behaviour scenarios.

pub mod world;

mod when;
