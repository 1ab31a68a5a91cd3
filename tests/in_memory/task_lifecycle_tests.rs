//! Task templates and lifecycle through the public service API.

use super::helpers::{Platform, platform};
use cagekeeper::error::{Classify, ErrorKind};
use cagekeeper::task::{
    domain::{Task, TaskStatus},
    services::{CreateTaskRequest, CreateTasksForCagesRequest, TaskListQuery},
};
use eyre::ensure;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn feeding_round_for_three_cages(platform: Platform) -> eyre::Result<()> {
    let site = platform.seed_site(&["A-1", "A-2", "A-3"]).await?;

    let created = platform
        .lifecycle
        .create_tasks_for_cages(CreateTasksForCagesRequest::new(
            site.template.id(),
            site.warehouse,
            site.worker,
            "2026-03-02 07:30:00",
            site.cages.clone(),
        ))
        .await?;
    ensure!(created.len() == 3);

    for task in &created {
        platform.lifecycle.start_task(task.id()).await?;
        platform.lifecycle.complete_task(task.id(), 12).await?;
    }

    let completed = platform
        .lifecycle
        .get_worker_tasks(site.worker, Some(TaskStatus::Completed))
        .await?;
    ensure!(completed.len() == 3);
    ensure!(
        completed
            .iter()
            .all(|task| task.actual_duration() == Some(12) && task.completed_time().is_some())
    );
    let pending = platform
        .lifecycle
        .get_task_list(TaskListQuery::new().with_status("PENDING"))
        .await?;
    ensure!(pending.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_filters_by_inclusive_date_window(platform: Platform) -> eyre::Result<()> {
    let site = platform.seed_site(&["A-1"]).await?;
    let mut scheduled = Vec::new();
    for when in [
        "2026-03-01 00:00:00",
        "2026-03-02 12:00:00",
        "2026-03-03 23:59:59",
        "2026-03-04 00:00:00",
    ] {
        let task = platform
            .lifecycle
            .create_task(CreateTaskRequest::new(
                site.template.id(),
                site.warehouse,
                site.worker,
                when,
            ))
            .await?;
        scheduled.push(task.id());
    }

    let window = platform
        .lifecycle
        .get_task_list(
            TaskListQuery::new()
                .with_start_date("2026-03-01 00:00:00")
                .with_end_date("2026-03-03"),
        )
        .await?;

    let expected: Vec<_> = scheduled.iter().take(3).copied().collect();
    let actual: Vec<_> = window.iter().map(Task::id).collect();
    ensure!(actual == expected, "window keeps both bounds");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn template_in_use_cannot_be_deleted(platform: Platform) -> eyre::Result<()> {
    let site = platform.seed_site(&["A-1"]).await?;
    let task = platform
        .lifecycle
        .create_task(CreateTaskRequest::new(
            site.template.id(),
            site.warehouse,
            site.worker,
            "2026-03-02 07:30:00",
        ))
        .await?;

    let blocked = platform.templates.delete_task_template(site.template.id()).await;
    ensure!(blocked.is_err_and(|err| err.kind() == ErrorKind::Conflict));

    platform.lifecycle.delete_task(task.id()).await?;
    platform
        .templates
        .delete_task_template(site.template.id())
        .await?;
    ensure!(platform.templates.list_task_templates(None).await?.is_empty());
    Ok(())
}
