//! When steps for task-branch workflow scenarios.

use super::world::{FlowWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#"I check out task "{id}""#)]
fn check_out_task(world: &mut FlowWorld, id: String) {
    world.last_checkout = Some(run_async(world.engine.checkout(&id)));
}

#[when(r#"I check out task "{id}" again"#)]
fn check_out_task_again(world: &mut FlowWorld, id: String) -> Result<(), eyre::Report> {
    let previous = world
        .last_checkout
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no earlier checkout in scenario world"))?;
    if let Err(err) = previous {
        return Err(eyre::eyre!("earlier checkout failed: {err}"));
    }
    world.last_checkout = Some(run_async(world.engine.checkout(&id)));
    Ok(())
}

#[when("I submit the current branch")]
fn submit_current_branch(world: &mut FlowWorld) {
    world.last_submit = Some(run_async(world.engine.submit()));
}
