//! Merchant CRUD, paging and search through the public service API.

use super::helpers::{Platform, platform};
use cagekeeper::error::{Classify, ErrorKind};
use cagekeeper::merchant::services::{CreateMerchantRequest, UpdateMerchantRequest};
use cagekeeper::pagination::PageRequest;
use eyre::ensure;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn merchant_round_trip_through_service(platform: Platform) -> eyre::Result<()> {
    let created = platform
        .merchants
        .create_merchant(
            CreateMerchantRequest::new("Acme Feed", "Jo Smith", "555-0101")
                .with_address("1 Mill Lane"),
        )
        .await?;

    let updated = platform
        .merchants
        .update_merchant(
            created.id(),
            UpdateMerchantRequest::new().with_phone("555-0199"),
        )
        .await?;

    ensure!(updated.profile().phone() == "555-0199");
    ensure!(updated.profile().name() == "Acme Feed");
    ensure!(platform.merchants.get_merchant(created.id()).await? == updated);

    platform.merchants.delete_merchant(created.id()).await?;
    let lookup = platform.merchants.get_merchant(created.id()).await;
    ensure!(lookup.is_err_and(|err| err.kind() == ErrorKind::NotFound));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn merchants_page_newest_first(platform: Platform) -> eyre::Result<()> {
    let mut ids = Vec::new();
    for index in 0..12 {
        let merchant = platform
            .merchants
            .create_merchant(CreateMerchantRequest::new(
                format!("Merchant {index}"),
                "Owner",
                "555-0000",
            ))
            .await?;
        ids.push(merchant.id());
    }

    let second_page = platform
        .merchants
        .list_merchants(PageRequest::new(2, 10)?)
        .await?;

    ensure!(second_page.total == 12);
    let expected: Vec<_> = ids.iter().take(2).rev().copied().collect();
    let actual: Vec<_> = second_page.items.iter().map(|m| m.id()).collect();
    ensure!(actual == expected, "second page holds the two oldest");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_matches_name_contact_or_phone(platform: Platform) -> eyre::Result<()> {
    platform
        .merchants
        .create_merchant(CreateMerchantRequest::new("Acme Feed", "Jo", "555-0101"))
        .await?;
    platform
        .merchants
        .create_merchant(CreateMerchantRequest::new("Barn Supplies", "Acme Agent", "555-0202"))
        .await?;
    platform
        .merchants
        .create_merchant(CreateMerchantRequest::new("Cages R Us", "Lee", "555-0303"))
        .await?;

    let by_name_or_contact = platform.merchants.search_merchants("Acme").await?;
    let by_phone = platform.merchants.search_merchants("0303").await?;
    let wrong_case = platform.merchants.search_merchants("acme").await?;
    let blank = platform.merchants.search_merchants("   ").await;

    ensure!(by_name_or_contact.len() == 2);
    ensure!(by_phone.len() == 1);
    ensure!(wrong_case.is_empty(), "search is case-sensitive by default");
    ensure!(blank.is_err_and(|err| err.kind() == ErrorKind::Validation));
    Ok(())
}
