mod common;

use common::*;
use flocx_core::{
    Failure,
    models::{ContractId, ContractUpdate, OfferId, RelationshipFilter, Status},
    ports::{BidRepository, ContractRepository, OfferContractRelationshipRepository, OfferRepository},
};
use flocx_sqlite::Db;

async fn two_offers(db: &Db) -> anyhow::Result<Vec<OfferId>> {
    let inventory = Inventory::default();
    let first = db.create_offer(&inventory, new_offer(NODE), &owner()).await??;
    let second = db
        .create_offer(&inventory, new_offer(SECOND_NODE), &owner())
        .await??;
    Ok(vec![first.offer_id, second.offer_id])
}

#[tokio::test]
async fn create_links_every_offer() -> anyhow::Result<()> {
    let db = open().await?;
    let offers = two_offers(&db).await?;

    let created = db
        .create_contract(new_contract(offers.clone()), &admin())
        .await??;
    let contract = &created.contract;

    assert_eq!(contract.project_id.as_str(), OPERATOR);
    assert_eq!(contract.status, Status::Available);
    assert_eq!(contract.cost, 20.0);
    assert_eq!(contract.bid_id, None);

    assert_eq!(created.relationships.len(), 2);
    for (relationship, offer_id) in created.relationships.iter().zip(&offers) {
        assert_eq!(relationship.offer_id, *offer_id);
        assert_eq!(relationship.contract_id, contract.contract_id);
        assert_eq!(relationship.status, Status::Available);
    }

    let fetched = db.get_contract(contract.contract_id, &owner()).await??;
    assert_eq!(&fetched, contract);

    let linked = db
        .get_all_offer_contract_relationships(
            RelationshipFilter {
                contract_id: Some(contract.contract_id),
                ..Default::default()
            },
            &owner(),
        )
        .await?;
    assert_eq!(linked, created.relationships);
    Ok(())
}

#[tokio::test]
async fn create_with_explicit_project_and_bid() -> anyhow::Result<()> {
    let db = open().await?;
    let bid = db.create_bid(new_bid(), &other()).await?;

    let mut contract = new_contract(Vec::new());
    contract.project_id = Some(OTHER.into());
    contract.bid_id = Some(bid.bid_id);
    let created = db.create_contract(contract, &admin()).await??;

    assert_eq!(created.contract.project_id.as_str(), OTHER);
    assert_eq!(created.contract.bid_id, Some(bid.bid_id));
    assert!(created.relationships.is_empty());

    assert_eq!(
        db.get_contracts_by_project_id(&other()).await?,
        vec![created.contract.clone()]
    );

    // losing the bid leaves the contract in place, unlinked
    db.destroy_bid(bid.bid_id, &other()).await??;
    let contract = db.get_contract(created.contract.contract_id, &admin()).await??;
    assert_eq!(contract.bid_id, None);
    Ok(())
}

#[tokio::test]
async fn create_requires_admin() -> anyhow::Result<()> {
    let db = open().await?;
    let offers = two_offers(&db).await?;

    let refused = db.create_contract(new_contract(offers), &owner()).await?;
    assert_eq!(refused, Err(Failure::requires_admin("Contract")));

    assert!(db.get_all_contracts(&admin()).await?.is_empty());
    assert!(
        db.get_all_offer_contract_relationships(RelationshipFilter::default(), &admin())
            .await?
            .is_empty()
    );
    Ok(())
}

#[tokio::test]
async fn failed_link_rolls_back_contract() -> anyhow::Result<()> {
    let db = open().await?;
    let mut offers = two_offers(&db).await?;
    offers.push(OfferId::generate());

    let result = db.create_contract(new_contract(offers), &admin()).await;
    assert!(result.is_err());

    assert!(db.get_all_contracts(&admin()).await?.is_empty());
    assert!(
        db.get_all_offer_contract_relationships(RelationshipFilter::default(), &admin())
            .await?
            .is_empty()
    );
    Ok(())
}

#[tokio::test]
async fn listings() -> anyhow::Result<()> {
    let db = open().await?;

    let mut mine = new_contract(Vec::new());
    mine.project_id = Some(OWNER.into());
    let mine = db.create_contract(mine, &admin()).await??.contract;

    let mut theirs = new_contract(Vec::new());
    theirs.project_id = Some(OTHER.into());
    let theirs = db.create_contract(theirs, &admin()).await??.contract;
    let theirs = db
        .update_contract(
            theirs.contract_id,
            ContractUpdate {
                status: Some(Status::Expired),
                ..Default::default()
            },
            &admin(),
        )
        .await??;

    assert_eq!(db.get_all_contracts(&owner()).await?.len(), 2);

    // status lookups are scoped to the caller's project unless admin
    assert_eq!(
        db.get_contracts_by_status(Status::Available, &owner()).await?,
        vec![mine.clone()]
    );
    assert!(
        db.get_contracts_by_status(Status::Available, &other())
            .await?
            .is_empty()
    );
    assert_eq!(
        db.get_contracts_by_status(Status::Expired, &admin()).await?,
        vec![theirs]
    );

    // unexpired is not
    assert_eq!(db.get_unexpired_contracts(&other()).await?, vec![mine]);
    Ok(())
}

#[tokio::test]
async fn update_is_admin_only() -> anyhow::Result<()> {
    let db = open().await?;

    let mut contract = new_contract(Vec::new());
    contract.project_id = Some(OWNER.into());
    let created = db.create_contract(contract, &admin()).await??.contract;

    let update = ContractUpdate {
        status: Some(Status::Fulfilled),
        cost: Some(18.0),
        ..Default::default()
    };

    // even the contract's own project may not change it
    let refused = db
        .update_contract(created.contract_id, update.clone(), &owner())
        .await?;
    assert_eq!(
        refused,
        Err(Failure::no_permission("Contract", created.contract_id))
    );

    let updated = db
        .update_contract(created.contract_id, update.clone(), &admin())
        .await??;
    assert_eq!(updated.status, Status::Fulfilled);
    assert_eq!(updated.cost, 18.0);
    assert_eq!(updated.start_time, created.start_time);
    assert_eq!(updated.project_id, created.project_id);

    let missing = ContractId::generate();
    let result = db.update_contract(missing, update, &admin()).await?;
    assert_eq!(result, Err(Failure::not_found("Contract", missing)));
    Ok(())
}

#[tokio::test]
async fn destroy_is_admin_only_and_cascades() -> anyhow::Result<()> {
    let db = open().await?;
    let offers = two_offers(&db).await?;

    let created = db
        .create_contract(new_contract(offers.clone()), &admin())
        .await??;
    let contract_id = created.contract.contract_id;

    let refused = db.destroy_contract(contract_id, &owner()).await?;
    assert!(matches!(refused, Err(Failure::NoPermission { .. })));

    db.destroy_contract(contract_id, &admin()).await??;
    assert!(matches!(
        db.get_contract(contract_id, &admin()).await?,
        Err(Failure::NotFound { .. })
    ));
    assert!(
        db.get_all_offer_contract_relationships(RelationshipFilter::default(), &admin())
            .await?
            .is_empty()
    );

    // the offers themselves are untouched
    for offer_id in offers {
        db.get_offer(offer_id, &owner()).await??;
    }

    let again = db.destroy_contract(contract_id, &admin()).await?;
    assert_eq!(again, Err(Failure::not_found("Contract", contract_id)));
    Ok(())
}
