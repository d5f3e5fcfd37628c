//! Rank reconciliation planning for column rewrites.
//!
//! The planners are pure: they look at a column's sibling set and produce
//! the batch of rank assignments that restores the contiguity invariant.
//! Applying a plan atomically is the repository's job; serialising plans
//! against concurrent moves in the same column is the service's.

use crate::board::domain::{BoardDomainError, Rank, Task, TaskId};
use crate::board::ports::RankAssignment;

/// Clamps a requested rank to the insertable range `[0, column_len]`.
///
/// # Errors
///
/// Returns [`BoardDomainError::InvalidRank`] when the column length itself
/// exceeds the persistable rank range.
pub fn clamp_target(requested: Rank, column_len: usize) -> Result<Rank, BoardDomainError> {
    if requested.index() <= column_len {
        return Ok(requested);
    }
    Rank::from_index(column_len)
}

/// Plans the rank rewrite that inserts one task into a column at
/// `target_rank`.
///
/// `siblings` is every other task sharing the destination status; order is
/// irrelevant, the planner sorts by existing rank. Siblings at or after the
/// target slot shift up by one, siblings before it keep their slot, and the
/// moved task takes `target_rank` clamped to `[0, len(siblings)]`. The
/// resulting column is the contiguous sequence `{0..n}` with sibling
/// relative order preserved.
///
/// The moved task's assignment always leads the plan; sibling assignments
/// are emitted only when a rank actually changes, so re-asserting a task's
/// current position plans no sibling writes at all.
///
/// # Errors
///
/// Returns [`BoardDomainError::InvalidRank`] when the column outgrows the
/// persistable rank range.
pub fn make_room(
    moved_id: TaskId,
    target_rank: Rank,
    siblings: &[Task],
) -> Result<Vec<RankAssignment>, BoardDomainError> {
    let target = clamp_target(target_rank, siblings.len())?;
    let mut ordered: Vec<&Task> = siblings.iter().collect();
    ordered.sort_by_key(|sibling| sibling.rank());

    let mut plan = vec![RankAssignment::new(moved_id, target)];
    for (idx, sibling) in ordered.iter().enumerate() {
        let slot = if idx >= target.index() { idx + 1 } else { idx };
        let rank = Rank::from_index(slot)?;
        if sibling.rank() != rank {
            plan.push(RankAssignment::new(sibling.id(), rank));
        }
    }
    Ok(plan)
}

/// Plans the renumbering that closes the gaps a departed task left behind.
///
/// `siblings` is the column's surviving task set; the plan renumbers them
/// to `{0..n-1}` preserving relative order, emitting assignments only for
/// ranks that change. A column that already satisfies the contiguity
/// invariant plans nothing.
///
/// # Errors
///
/// Returns [`BoardDomainError::InvalidRank`] when the column outgrows the
/// persistable rank range.
pub fn close_gap(siblings: &[Task]) -> Result<Vec<RankAssignment>, BoardDomainError> {
    let mut ordered: Vec<&Task> = siblings.iter().collect();
    ordered.sort_by_key(|sibling| sibling.rank());

    let mut plan = Vec::new();
    for (idx, sibling) in ordered.iter().enumerate() {
        let rank = Rank::from_index(idx)?;
        if sibling.rank() != rank {
            plan.push(RankAssignment::new(sibling.id(), rank));
        }
    }
    Ok(plan)
}
