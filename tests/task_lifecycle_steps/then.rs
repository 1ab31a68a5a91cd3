//! Then steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use cagekeeper::error::{Classify, ErrorKind};
use cagekeeper::task::{
    domain::{TaskDomainError, TaskStatus},
    services::{TaskLifecycleError, TaskListQuery},
};
use rstest_bdd_macros::then;

#[then(r#"{count:usize} tasks exist in state "{state}""#)]
fn tasks_exist_in_state(
    world: &TaskLifecycleWorld,
    count: usize,
    state: String,
) -> Result<(), eyre::Report> {
    let listed = run_async(
        world
            .lifecycle
            .get_task_list(TaskListQuery::new().with_status(state)),
    )?;
    eyre::ensure!(
        listed.len() == count,
        "expected {count} tasks, found {}",
        listed.len()
    );
    Ok(())
}

#[then("every task is linked to exactly one cage")]
fn every_task_has_one_cage(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let linked: Vec<_> = world
        .created
        .iter()
        .map(|task| match task.cage_ids() {
            [cage] => Ok(*cage),
            other => Err(eyre::eyre!("task links {} cages", other.len())),
        })
        .collect::<Result<_, _>>()?;
    eyre::ensure!(linked == world.cages, "tasks do not cover every cage");
    Ok(())
}

#[then(r#"the first task is "{state}" with a duration of {minutes:u32} minutes"#)]
fn first_task_state_and_duration(
    world: &TaskLifecycleWorld,
    state: String,
    minutes: u32,
) -> Result<(), eyre::Report> {
    let expected_state = TaskStatus::try_from(state.as_str())
        .map_err(|err| eyre::eyre!("invalid expected state in scenario: {err}"))?;
    let task_id = world.first_task()?.id();
    let stored = run_async(world.lifecycle.get_task(task_id))?;

    eyre::ensure!(
        stored.status() == expected_state,
        "expected {expected_state}, found {}",
        stored.status()
    );
    eyre::ensure!(
        stored.actual_duration() == Some(minutes),
        "unexpected duration {:?}",
        stored.actual_duration()
    );
    eyre::ensure!(stored.completed_time().is_some(), "completion time missing");
    Ok(())
}

#[then("the transition fails with an invalid state error")]
fn transition_fails_with_invalid_state(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_transition_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing transition result"))?;

    if !matches!(
        result,
        Err(TaskLifecycleError::Domain(
            TaskDomainError::InvalidStateTransition { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected InvalidStateTransition error, got {result:?}"
        ));
    }
    Ok(())
}

#[then("the creation fails with a validation error")]
fn creation_fails_with_validation(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_creation_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing creation result"))?;

    match result {
        Err(err) if err.kind() == ErrorKind::Validation => Ok(()),
        other => Err(eyre::eyre!("expected a validation error, got {other:?}")),
    }
}

#[then("no tasks exist")]
fn no_tasks_exist(world: &TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let listed = run_async(world.lifecycle.get_task_list(TaskListQuery::new()))?;
    eyre::ensure!(listed.is_empty(), "expected no tasks, found {}", listed.len());
    Ok(())
}
