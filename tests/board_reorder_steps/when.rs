//! When steps for board reorder BDD scenarios.

use super::world::{parse_status, run_async, ReorderWorld};
use rstest_bdd_macros::when;

#[when(r#"the task titled "{title}" is dropped on column "{status}" at position {position:u64}"#)]
fn task_is_dropped(
    world: &mut ReorderWorld,
    title: String,
    status: String,
    position: u64,
) -> Result<(), eyre::Report> {
    let column = parse_status(&status)?;
    let task = world.task_by_title(&title)?;
    let dest_index = usize::try_from(position)
        .map_err(|_| eyre::eyre!("drop position {position} does not fit in usize"))?;

    let handle = run_async(world.client.reorder(task.id(), column, dest_index));
    match handle {
        Some(push) => {
            world.last_drop_dispatched = Some(true);
            // Settle the push so then-steps observe the reconciled board.
            run_async(push).map_err(|err| eyre::eyre!("push task panicked: {err}"))?;
        }
        None => {
            world.last_drop_dispatched = Some(false);
        }
    }
    Ok(())
}
