//! Then steps for task-branch workflow scenarios.

use super::world::{FlowWorld, run_async};
use rstest_bdd_macros::then;
use taskflow::flow::{
    domain::{TaskId, TaskStatus},
    ports::TaskStore,
};

#[then(r#"checkout reports "{message}""#)]
fn checkout_reports(world: &FlowWorld, message: String) -> Result<(), eyre::Report> {
    let outcome = world
        .last_checkout
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing checkout result"))?
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected checkout failure: {err}"))?;
    if outcome.message() != message {
        return Err(eyre::eyre!(
            "expected checkout message '{message}', got '{}'",
            outcome.message()
        ));
    }
    Ok(())
}

#[then(r#"checkout fails with "{message}""#)]
fn checkout_fails(world: &FlowWorld, message: String) -> Result<(), eyre::Report> {
    let result = world
        .last_checkout
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing checkout result"))?;
    match result {
        Err(err) if err.to_string() == message => Ok(()),
        Err(err) => Err(eyre::eyre!("expected failure '{message}', got '{err}'")),
        Ok(outcome) => Err(eyre::eyre!("expected failure, got outcome '{outcome}'")),
    }
}

#[then(r#"submit reports "{message}""#)]
fn submit_reports(world: &FlowWorld, message: String) -> Result<(), eyre::Report> {
    let outcome = world
        .last_submit
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing submit result"))?
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected submit failure: {err}"))?;
    if outcome.message() != message {
        return Err(eyre::eyre!(
            "expected submit message '{message}', got '{}'",
            outcome.message()
        ));
    }
    Ok(())
}

#[then(r#"the working copy ends on branch "{branch}""#)]
fn working_copy_ends_on(world: &FlowWorld, branch: String) -> Result<(), eyre::Report> {
    let current = world.vcs.branch()?;
    if current.as_str() != branch {
        return Err(eyre::eyre!("expected branch {branch}, got {current}"));
    }
    Ok(())
}

#[then(r#"task "{id}" has status "{status}""#)]
fn task_has_status(world: &FlowWorld, id: String, status: String) -> Result<(), eyre::Report> {
    let task_id = TaskId::new(id)?;
    let expected = TaskStatus::try_from(status.as_str())?;
    let task = run_async(world.store.find_by_id(&task_id))?
        .ok_or_else(|| eyre::eyre!("task {task_id} missing from store"))?;
    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected task {task_id} in {expected}, got {}",
            task.status()
        ));
    }
    Ok(())
}

#[then(r#"the VCS ran "{commands}""#)]
fn vcs_ran(world: &FlowWorld, commands: String) -> Result<(), eyre::Report> {
    let log = world.command_log()?;
    if log != commands {
        return Err(eyre::eyre!("expected VCS commands '{commands}', got '{log}'"));
    }
    Ok(())
}

#[then("no VCS command was run")]
fn no_vcs_command(world: &FlowWorld) -> Result<(), eyre::Report> {
    let log = world.command_log()?;
    if !log.is_empty() {
        return Err(eyre::eyre!("expected no VCS commands, got '{log}'"));
    }
    Ok(())
}

#[then("no task status was written")]
fn no_status_written(world: &FlowWorld) -> Result<(), eyre::Report> {
    let writes = world.store.status_writes()?;
    if !writes.is_empty() {
        return Err(eyre::eyre!("expected no status writes, got {writes:?}"));
    }
    Ok(())
}

#[then(r#"a review was requested from "{head}" into "{base}""#)]
fn review_requested(world: &FlowWorld, head: String, base: String) -> Result<(), eyre::Report> {
    let requests = world.reviews.requests()?;
    let [request] = requests.as_slice() else {
        return Err(eyre::eyre!("expected one review request, got {requests:?}"));
    };
    if request.head().as_str() != head || request.base().as_str() != base {
        return Err(eyre::eyre!("unexpected review request {request}"));
    }
    Ok(())
}

#[then("no review was requested")]
fn no_review_requested(world: &FlowWorld) -> Result<(), eyre::Report> {
    let requests = world.reviews.requests()?;
    if !requests.is_empty() {
        return Err(eyre::eyre!("expected no review requests, got {requests:?}"));
    }
    Ok(())
}
