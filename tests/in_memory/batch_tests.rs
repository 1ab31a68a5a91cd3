//! Batch issuing and collar tracing through the public service API.

use super::helpers::{Platform, platform};
use cagekeeper::error::{Classify, ErrorKind};
use cagekeeper::merchant::services::CreateMerchantRequest;
use cagekeeper::pagination::PageRequest;
use eyre::ensure;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn collar_code_traces_back_to_merchant(platform: Platform) -> eyre::Result<()> {
    let merchant = platform
        .merchants
        .create_merchant(CreateMerchantRequest::new("Acme Feed", "Jo", "555-0101"))
        .await?;
    let issue = platform.batches.create_batch(merchant.id(), 3).await?;
    let collar = issue
        .collars()
        .first()
        .ok_or_else(|| eyre::eyre!("batch issued no collars"))?;

    let owner = platform
        .batches
        .find_merchant_by_collar_code(&collar.collar_code().as_str().to_uppercase())
        .await?;

    ensure!(owner.id() == merchant.id());
    ensure!(issue.batch().collar_count().value() == 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_collar_code_is_not_found(platform: Platform) {
    let result = platform
        .batches
        .find_merchant_by_collar_code("0123456789abcdef0123456789abcdef")
        .await;

    assert!(result.is_err_and(|err| err.kind() == ErrorKind::NotFound));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_collar_code_is_validation_error(platform: Platform) {
    let result = platform.batches.find_merchant_by_collar_code("collar-1").await;

    assert!(result.is_err_and(|err| err.kind() == ErrorKind::Validation));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn batches_list_across_merchants(platform: Platform) -> eyre::Result<()> {
    let acme = platform
        .merchants
        .create_merchant(CreateMerchantRequest::new("Acme", "Jo", "555-0101"))
        .await?;
    let barn = platform
        .merchants
        .create_merchant(CreateMerchantRequest::new("Barn", "Lee", "555-0202"))
        .await?;
    platform.batches.create_batch(acme.id(), 2).await?;
    let newest = platform.batches.create_batch(barn.id(), 1).await?;

    let page = platform.batches.list_batches(PageRequest::default()).await?;

    ensure!(page.total == 2);
    ensure!(
        page.items.first().map(|batch| batch.id()) == Some(newest.batch().id()),
        "newest batch first"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn merchant_with_batches_cannot_be_deleted(platform: Platform) -> eyre::Result<()> {
    let merchant = platform
        .merchants
        .create_merchant(CreateMerchantRequest::new("Acme", "Jo", "555-0101"))
        .await?;
    let issue = platform.batches.create_batch(merchant.id(), 2).await?;

    let refused = platform.merchants.delete_merchant(merchant.id()).await;
    ensure!(
        refused.is_err_and(|err| err.kind() == ErrorKind::Conflict),
        "delete should conflict while batches exist"
    );

    let collar = issue
        .collars()
        .first()
        .ok_or_else(|| eyre::eyre!("batch issued no collars"))?;
    let owner = platform
        .batches
        .find_merchant_by_collar_code(collar.collar_code().as_str())
        .await?;
    ensure!(owner.id() == merchant.id(), "collar still traces to its merchant");
    Ok(())
}
