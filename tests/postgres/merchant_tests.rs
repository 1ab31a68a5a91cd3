//! Merchant storage, search and deletion against `PostgreSQL`.

use super::helpers::{TestDatabase, test_runtime};
use cagekeeper::batch::{adapters::postgres::PostgresBatchRepository, services::BatchService};
use cagekeeper::error::{Classify, ErrorKind};
use cagekeeper::merchant::{
    adapters::postgres::PostgresMerchantRepository,
    domain::{MerchantId, SearchMode},
    ports::{MerchantRepository, MerchantRepositoryError},
    services::{CreateMerchantRequest, MerchantService, MerchantServiceError, UpdateMerchantRequest},
};
use cagekeeper::pagination::PageRequest;
use eyre::ensure;
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use std::sync::Arc;

type Merchants = MerchantService<PostgresMerchantRepository, PostgresBatchRepository, DefaultClock>;

struct MerchantContext {
    merchant_repo: Arc<PostgresMerchantRepository>,
    merchants: Merchants,
    batches: BatchService<PostgresBatchRepository, PostgresMerchantRepository, DefaultClock>,
}

fn context(db: &TestDatabase, mode: SearchMode) -> eyre::Result<MerchantContext> {
    let clock = Arc::new(DefaultClock);
    let merchant_repo = Arc::new(PostgresMerchantRepository::new(db.pool()?));
    let batch_repo = Arc::new(PostgresBatchRepository::new(db.pool()?));
    Ok(MerchantContext {
        merchants: MerchantService::new(
            Arc::clone(&merchant_repo),
            Arc::clone(&batch_repo),
            Arc::clone(&clock),
        )
        .with_search_mode(mode),
        batches: BatchService::new(batch_repo, Arc::clone(&merchant_repo), clock),
        merchant_repo,
    })
}

async fn seed(merchants: &Merchants) -> eyre::Result<()> {
    for (name, contact, phone) in [
        ("Feed Supplies Ltd", "Ana Ruiz", "555-0100"),
        ("Cage Works", "Ben Feedman", "555-0200"),
        ("Collar Co", "Cy Park", "555-0300"),
        ("100% Organic", "Di Moss", "555-0400"),
    ] {
        merchants
            .create_merchant(CreateMerchantRequest::new(name, contact, phone))
            .await?;
    }
    Ok(())
}

#[rstest]
fn merchant_round_trips_and_pages(shared_test_cluster: &'static TestCluster) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "merchant_round_trip")?;
    let ctx = context(&db, SearchMode::CaseSensitive)?;
    let rt = test_runtime()?;

    rt.block_on(async {
        seed(&ctx.merchants).await?;
        let created = ctx
            .merchants
            .create_merchant(
                CreateMerchantRequest::new("Acme", "Dee", "555-0500").with_address("9 Pier St"),
            )
            .await?;

        ctx.merchants
            .update_merchant(created.id(), UpdateMerchantRequest::new().with_phone("555-0599"))
            .await?;
        let stored = ctx.merchants.get_merchant(created.id()).await?;
        ensure!(stored.profile().phone() == "555-0599", "update persisted");
        ensure!(stored.profile().name() == "Acme", "untouched fields kept");
        ensure!(stored.profile().address() == "9 Pier St", "address kept");

        let first = ctx.merchants.list_merchants(PageRequest::new(1, 2)?).await?;
        let names: Vec<&str> = first.items.iter().map(|m| m.profile().name()).collect();
        ensure!(first.total == 5, "total counts every row, got {}", first.total);
        ensure!(names == ["Acme", "100% Organic"], "newest first, got {names:?}");
        Ok::<(), eyre::Report>(())
    })
}

#[rstest]
#[case(SearchMode::CaseSensitive, "collar", &[])]
#[case(SearchMode::CaseInsensitive, "collar", &["Collar Co"])]
#[case(SearchMode::CaseInsensitive, "FEED", &["Cage Works", "Feed Supplies Ltd"])]
#[case(SearchMode::CaseSensitive, "%", &["100% Organic"])]
#[case(SearchMode::CaseSensitive, " Co", &["Collar Co"])]
fn search_follows_case_mode_and_matches_literally(
    shared_test_cluster: &'static TestCluster,
    #[case] mode: SearchMode,
    #[case] keyword: &str,
    #[case] expected: &[&str],
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "merchant_search")?;
    let ctx = context(&db, mode)?;
    let rt = test_runtime()?;

    rt.block_on(async {
        seed(&ctx.merchants).await?;
        let hits = ctx.merchants.search_merchants(keyword).await?;

        let mut names: Vec<&str> = hits.iter().map(|m| m.profile().name()).collect();
        names.sort_unstable();
        ensure!(names == expected, "{keyword:?} under {mode:?} matched {names:?}");
        Ok::<(), eyre::Report>(())
    })
}

#[rstest]
fn merchant_with_batches_is_still_referenced(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "merchant_delete")?;
    let ctx = context(&db, SearchMode::CaseSensitive)?;
    let rt = test_runtime()?;

    rt.block_on(async {
        let merchant = ctx
            .merchants
            .create_merchant(CreateMerchantRequest::new("Acme", "Dee", "555-0500"))
            .await?;
        ctx.batches.create_batch(merchant.id(), 2).await?;

        let through_service = ctx.merchants.delete_merchant(merchant.id()).await;
        ensure!(
            matches!(
                through_service,
                Err(MerchantServiceError::Repository(MerchantRepositoryError::StillReferenced(id)))
                    if id == merchant.id()
            ),
            "service should refuse, got {through_service:?}"
        );

        let through_adapter = ctx.merchant_repo.delete(merchant.id()).await;
        ensure!(
            through_adapter.is_err_and(|err| err.kind() == ErrorKind::Conflict),
            "foreign key should surface as a conflict"
        );
        ensure!(
            ctx.merchants.get_merchant(merchant.id()).await.is_ok(),
            "merchant survives both attempts"
        );
        Ok::<(), eyre::Report>(())
    })
}

#[rstest]
fn deleting_unknown_merchant_is_not_found(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster, "merchant_missing")?;
    let ctx = context(&db, SearchMode::CaseSensitive)?;
    let rt = test_runtime()?;

    let result = rt.block_on(ctx.merchant_repo.delete(MerchantId::new()));

    ensure!(
        matches!(result, Err(MerchantRepositoryError::NotFound(_))),
        "expected not found, got {result:?}"
    );
    Ok(())
}
