//! Given steps for task-branch workflow scenarios.

use super::world::FlowWorld;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskflow::flow::domain::{BranchName, Task, TaskId, TaskStatus};

#[given(r#"a task "{id}" titled "{title}" in status "{status}""#)]
fn task_in_status(
    world: &mut FlowWorld,
    id: String,
    title: String,
    status: String,
) -> Result<(), eyre::Report> {
    let task_id = TaskId::new(id).wrap_err("scenario task id")?;
    let parsed = TaskStatus::try_from(status.as_str()).wrap_err("scenario task status")?;
    world.store.insert(Task::new(task_id, title, parsed))?;
    Ok(())
}

#[given(r#"the working copy is on branch "{branch}""#)]
fn working_copy_on_branch(world: &mut FlowWorld, branch: String) -> Result<(), eyre::Report> {
    world.vcs.set_branch(BranchName::new(branch)?)?;
    Ok(())
}

#[given("the working tree is clean")]
fn working_tree_clean(world: &mut FlowWorld) -> Result<(), eyre::Report> {
    world.vcs.set_clean(true)?;
    Ok(())
}

#[given("the working tree has uncommitted changes")]
fn working_tree_dirty(world: &mut FlowWorld) -> Result<(), eyre::Report> {
    world.vcs.set_clean(false)?;
    Ok(())
}
