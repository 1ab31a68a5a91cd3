//! Warehouses, cages and employees through the public service API.

use super::helpers::{Platform, platform};
use cagekeeper::error::{Classify, ErrorKind};
use cagekeeper::facility::{
    domain::{CageStatus, WarehouseId},
    services::{CreateCageRequest, CreateWarehouseRequest},
};
use eyre::ensure;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cages_list_by_code_within_warehouse(platform: Platform) -> eyre::Result<()> {
    let site = platform.seed_site(&["C-3", "A-1", "B-2"]).await?;
    let other = platform
        .facility
        .create_warehouse(CreateWarehouseRequest::new("South barn").with_address("2 Mill Lane"))
        .await?;
    platform
        .facility
        .create_cage(CreateCageRequest::new(other.id(), "A-0"))
        .await?;

    let cages = platform.facility.list_cages(site.warehouse).await?;

    let codes: Vec<&str> = cages.iter().map(|cage| cage.code()).collect();
    ensure!(codes == ["A-1", "B-2", "C-3"], "unexpected codes: {codes:?}");
    ensure!(
        cages
            .iter()
            .all(|cage| cage.status().as_str() == CageStatus::DEFAULT)
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cage_in_unknown_warehouse_is_not_found(platform: Platform) {
    let result = platform
        .facility
        .create_cage(CreateCageRequest::new(WarehouseId::new(), "A-1"))
        .await;

    assert!(result.is_err_and(|err| err.kind() == ErrorKind::NotFound));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cage_status_can_be_relabelled(platform: Platform) -> eyre::Result<()> {
    let site = platform.seed_site(&["A-1"]).await?;
    let cage_id = *site
        .cages
        .first()
        .ok_or_else(|| eyre::eyre!("site has no cages"))?;

    platform
        .facility
        .set_cage_status(cage_id, "MAINTENANCE")
        .await?;

    let cage = platform.facility.get_cage(cage_id).await?;
    ensure!(cage.status().as_str() == "MAINTENANCE");
    let blank = platform.facility.set_cage_status(cage_id, " ").await;
    ensure!(blank.is_err_and(|err| err.kind() == ErrorKind::Validation));
    Ok(())
}
