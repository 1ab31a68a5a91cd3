//! When steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, create_for_every_cage, run_async};
use rstest_bdd_macros::when;

#[when(r#"tasks are created for every cage at "{scheduled_time}""#)]
fn tasks_created_for_every_cage(
    world: &mut TaskLifecycleWorld,
    scheduled_time: String,
) -> Result<(), eyre::Report> {
    create_for_every_cage(world, scheduled_time)
}

#[when("the first task is started")]
fn start_first_task(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let task_id = world.first_task()?.id();
    let result = run_async(world.lifecycle.start_task(task_id));
    record_transition(world, result);
    Ok(())
}

#[when("the first task is completed after {minutes:u32} minutes")]
fn complete_first_task(world: &mut TaskLifecycleWorld, minutes: u32) -> Result<(), eyre::Report> {
    let task_id = world.first_task()?.id();
    let result = run_async(world.lifecycle.complete_task(task_id, minutes));
    record_transition(world, result);
    Ok(())
}

fn record_transition(
    world: &mut TaskLifecycleWorld,
    result: Result<cagekeeper::task::domain::Task, cagekeeper::task::services::TaskLifecycleError>,
) {
    if let (Ok(updated), Some(first)) = (&result, world.created.first_mut()) {
        *first = updated.clone();
    }
    world.last_transition_result = Some(result);
}
