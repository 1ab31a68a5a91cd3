//! Given steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, create_for_every_cage, run_async};
use cagekeeper::facility::services::{
    CreateCageRequest, CreateEmployeeRequest, CreateWarehouseRequest,
};
use cagekeeper::task::services::CreateTaskTemplateRequest;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a warehouse "{name}" with cages "{codes}""#)]
fn warehouse_with_cages(
    world: &mut TaskLifecycleWorld,
    name: String,
    codes: String,
) -> Result<(), eyre::Report> {
    let warehouse = run_async(
        world
            .facility
            .create_warehouse(CreateWarehouseRequest::new(name)),
    )
    .wrap_err("create warehouse")?;
    for code in codes.split(',').map(str::trim) {
        let cage = run_async(
            world
                .facility
                .create_cage(CreateCageRequest::new(warehouse.id(), code)),
        )
        .wrap_err("create cage")?;
        world.cages.push(cage.id());
    }
    world.warehouse = Some(warehouse.id());
    Ok(())
}

#[given(r#"a worker named "{name}""#)]
fn worker_named(world: &mut TaskLifecycleWorld, name: String) -> Result<(), eyre::Report> {
    let employee = run_async(
        world
            .facility
            .create_employee(CreateEmployeeRequest::new(name, "555-0100", "keeper")),
    )
    .wrap_err("create worker")?;
    world.worker = Some(employee.id());
    Ok(())
}

#[given(r#"a "{recurrence}" task template named "{name}""#)]
fn template_named(
    world: &mut TaskLifecycleWorld,
    recurrence: String,
    name: String,
) -> Result<(), eyre::Report> {
    let template = run_async(
        world
            .templates
            .create_task_template(CreateTaskTemplateRequest::new(name, recurrence)),
    )
    .wrap_err("create task template")?;
    world.template = Some(template);
    Ok(())
}

#[given(r#"tasks are created for every cage at "{scheduled_time}""#)]
fn tasks_already_created(
    world: &mut TaskLifecycleWorld,
    scheduled_time: String,
) -> Result<(), eyre::Report> {
    create_for_every_cage(world, scheduled_time)?;
    match world.last_creation_result.take() {
        Some(Ok(_)) => Ok(()),
        other => Err(eyre::eyre!("task creation in setup failed: {other:?}")),
    }
}

#[given("the first task has been completed after {minutes:u32} minutes")]
fn first_task_completed(world: &mut TaskLifecycleWorld, minutes: u32) -> Result<(), eyre::Report> {
    let task_id = world.first_task()?.id();
    run_async(world.lifecycle.start_task(task_id)).wrap_err("start task in setup")?;
    let completed = run_async(world.lifecycle.complete_task(task_id, minutes))
        .wrap_err("complete task in setup")?;
    if let Some(first) = world.created.first_mut() {
        *first = completed;
    }
    Ok(())
}
