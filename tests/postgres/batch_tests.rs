//! Batch issuing and collar-code uniqueness against `PostgreSQL`.

use super::helpers::{TestDatabase, test_runtime};
use cagekeeper::batch::{
    adapters::postgres::PostgresBatchRepository,
    domain::{BatchIssue, CollarCount},
    ports::{BatchRepository, BatchRepositoryError},
};
use cagekeeper::merchant::{
    adapters::postgres::PostgresMerchantRepository,
    domain::{Merchant, MerchantId, MerchantProfile},
    ports::MerchantRepository,
};
use cagekeeper::pagination::PageRequest;
use diesel::prelude::*;
use diesel::sql_types::{Text, Uuid as SqlUuid};
use eyre::ensure;
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;

const MAX_COLLARS: u32 = 1_000;

fn issue(merchant_id: MerchantId, count: u32) -> eyre::Result<BatchIssue> {
    Ok(BatchIssue::generate(
        merchant_id,
        CollarCount::new(count, MAX_COLLARS)?,
        &DefaultClock,
    ))
}

async fn stored_merchant(repo: &PostgresMerchantRepository) -> eyre::Result<Merchant> {
    let profile = MerchantProfile::new("Acme Feed", "Jo", "555-0101", "")?;
    let merchant = Merchant::new(profile, &DefaultClock);
    repo.store(&merchant).await?;
    Ok(merchant)
}

#[rstest]
fn issued_batch_traces_collars_to_merchant(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "batch_issue")?;
    let merchants = PostgresMerchantRepository::new(db.pool()?);
    let batches = PostgresBatchRepository::new(db.pool()?);
    let rt = test_runtime()?;

    rt.block_on(async {
        let merchant = stored_merchant(&merchants).await?;
        let batch = issue(merchant.id(), 3)?;
        batches.store_issue(&batch).await?;

        let collars = batches
            .list_collars(batch.batch().id(), PageRequest::new(1, 10)?)
            .await?;
        ensure!(collars.total == 3, "every collar stored");
        for collar in &collars.items {
            let found = batches.find_collar_by_code(collar.collar_code()).await?;
            ensure!(
                found.is_some_and(|c| c.merchant_id() == merchant.id()),
                "collar {} should trace to its merchant",
                collar.collar_code()
            );
        }
        ensure!(
            batches.references_merchant(merchant.id()).await?,
            "merchant is referenced once it owns a batch"
        );
        ensure!(
            !batches.references_merchant(MerchantId::new()).await?,
            "unknown merchant owns nothing"
        );
        Ok::<(), eyre::Report>(())
    })
}

#[rstest]
fn colliding_collar_code_rolls_back_whole_batch(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "batch_collision")?;
    let merchants = PostgresMerchantRepository::new(db.pool()?);
    let batches = PostgresBatchRepository::new(db.pool()?);
    let rt = test_runtime()?;

    let merchant = rt.block_on(stored_merchant(&merchants))?;
    let first = issue(merchant.id(), 1)?;
    rt.block_on(batches.store_issue(&first))?;

    let second = issue(merchant.id(), 4)?;
    let taken = second
        .collars()
        .last()
        .ok_or_else(|| eyre::eyre!("batch issued no collars"))?
        .collar_code()
        .as_str()
        .to_owned();
    let mut conn = db.connect()?;
    diesel::sql_query(concat!(
        "INSERT INTO collars (id, merchant_id, batch_id, collar_code, created_at) ",
        "VALUES ($1, $2, $3, $4, NOW())",
    ))
    .bind::<SqlUuid, _>(uuid::Uuid::new_v4())
    .bind::<SqlUuid, _>(merchant.id().into_inner())
    .bind::<SqlUuid, _>(first.batch().id().into_inner())
    .bind::<Text, _>(taken)
    .execute(&mut conn)?;
    drop(conn);

    let result = rt.block_on(batches.store_issue(&second));

    ensure!(
        matches!(
            result,
            Err(BatchRepositoryError::CollarCodeCollision(id)) if id == second.batch().id()
        ),
        "expected a collar-code collision, got {result:?}"
    );
    ensure!(
        rt.block_on(batches.find_by_id(second.batch().id()))?.is_none(),
        "no batch row survives the failed issue"
    );
    let owned = rt.block_on(batches.list_by_merchant(merchant.id(), PageRequest::default()))?;
    ensure!(owned.total == 1, "only the first batch remains");
    Ok(())
}

#[rstest]
fn batch_for_missing_merchant_is_rejected(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "batch_orphan")?;
    let batches = PostgresBatchRepository::new(db.pool()?);
    let rt = test_runtime()?;
    let ghost = MerchantId::new();

    let result = rt.block_on(batches.store_issue(&issue(ghost, 2)?));

    ensure!(
        matches!(result, Err(BatchRepositoryError::MerchantMissing(id)) if id == ghost),
        "expected missing merchant, got {result:?}"
    );
    Ok(())
}
