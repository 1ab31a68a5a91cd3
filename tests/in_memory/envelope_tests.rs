//! Wire shape of rendered service results.

use super::helpers::{Platform, platform};
use cagekeeper::envelope::{ERROR_CODE, Envelope, SUCCESS_CODE};
use cagekeeper::task::{domain::TaskId, services::CreateTaskRequest};
use eyre::ensure;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_detail_renders_in_success_envelope(platform: Platform) -> eyre::Result<()> {
    let site = platform.seed_site(&["A-1"]).await?;
    let cage = *site
        .cages
        .first()
        .ok_or_else(|| eyre::eyre!("site has no cages"))?;
    let task = platform
        .lifecycle
        .create_task(
            CreateTaskRequest::new(
                site.template.id(),
                site.warehouse,
                site.worker,
                "2026-03-02 07:30:00",
            )
            .with_cage(cage),
        )
        .await?;

    let envelope = Envelope::from_result(platform.lifecycle.get_task_detail(task.id()).await);
    let rendered = serde_json::to_value(&envelope)?;

    ensure!(rendered["code"] == json!(SUCCESS_CODE));
    ensure!(rendered["msg"] == json!("ok"));
    let data = &rendered["data"];
    ensure!(data["status"] == json!("PENDING"));
    ensure!(data["scheduled_time"] == json!("2026-03-02 07:30:00"));
    ensure!(data["completed_time"].is_null());
    ensure!(data["name"] == json!("Feed"));
    ensure!(data["recurrence_type"] == json!("daily"));
    ensure!(data["is_recurring"] == json!(true));
    ensure!(data["cage_ids"] == json!([cage.to_string()]));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failures_render_with_empty_data(platform: Platform) -> eyre::Result<()> {
    let missing = TaskId::new();

    let envelope = Envelope::from_result(platform.lifecycle.start_task(missing).await);

    ensure!(envelope.code == ERROR_CODE);
    ensure!(envelope.msg == format!("task not found: {missing}"));
    ensure!(envelope.data == json!({}));
    Ok(())
}
