mod common;

use common::*;
use flocx_core::{
    Failure,
    models::{
        ContractId, NewOfferContractRelationship, OfferContractRelationshipId, RelationshipFilter,
        RelationshipUpdate, Status,
    },
    ports::{ContractRepository, OfferContractRelationshipRepository, OfferRepository},
};
use flocx_sqlite::Db;

const KIND: &str = "Offer_Contract_Relationship";

/// One offer on each owned node and an empty contract.
async fn market(db: &Db) -> anyhow::Result<(Vec<flocx_core::models::OfferId>, ContractId)> {
    let inventory = Inventory::default();
    let mut offers = Vec::new();
    for node in [NODE, SECOND_NODE] {
        offers.push(db.create_offer(&inventory, new_offer(node), &owner()).await??.offer_id);
    }
    let contract = db
        .create_contract(new_contract(Vec::new()), &admin())
        .await??
        .contract;
    Ok((offers, contract.contract_id))
}

#[tokio::test]
async fn get_without_id_is_none() -> anyhow::Result<()> {
    let db = open().await?;

    assert_eq!(db.get_offer_contract_relationship(None, &owner()).await?, Ok(None));

    let missing = OfferContractRelationshipId::generate();
    assert_eq!(
        db.get_offer_contract_relationship(Some(missing), &owner())
            .await?,
        Err(Failure::not_found(KIND, missing))
    );
    Ok(())
}

#[tokio::test]
async fn create_and_get() -> anyhow::Result<()> {
    let db = open().await?;
    let (offers, contract_id) = market(&db).await?;

    let created = db
        .create_offer_contract_relationship(
            NewOfferContractRelationship {
                offer_id: offers[0],
                contract_id,
                status: Status::Available,
            },
            &admin(),
        )
        .await??;
    assert_eq!(created.offer_id, offers[0]);
    assert_eq!(created.contract_id, contract_id);

    let fetched = db
        .get_offer_contract_relationship(Some(created.offer_contract_relationship_id), &other())
        .await??;
    assert_eq!(fetched, Some(created));
    Ok(())
}

#[tokio::test]
async fn mutations_require_admin() -> anyhow::Result<()> {
    let db = open().await?;
    let (offers, contract_id) = market(&db).await?;
    let link = NewOfferContractRelationship {
        offer_id: offers[0],
        contract_id,
        status: Status::Available,
    };

    let refused = db
        .create_offer_contract_relationship(link.clone(), &owner())
        .await?;
    assert_eq!(refused, Err(Failure::requires_admin(KIND)));

    let created = db
        .create_offer_contract_relationship(link, &admin())
        .await??;
    let id = created.offer_contract_relationship_id;

    let refused = db
        .update_offer_contract_relationship(
            id,
            RelationshipUpdate {
                status: Some(Status::Fulfilled),
            },
            &owner(),
        )
        .await?;
    assert_eq!(refused, Err(Failure::requires_admin(KIND)));

    let refused = db.destroy_offer_contract_relationship(id, &owner()).await?;
    assert_eq!(refused, Err(Failure::requires_admin(KIND)));

    let stored = db.get_offer_contract_relationship(Some(id), &admin()).await??;
    assert_eq!(stored, Some(created));
    Ok(())
}

#[tokio::test]
async fn filters_combine() -> anyhow::Result<()> {
    let db = open().await?;
    let (offers, contract_id) = market(&db).await?;
    let other_contract = db
        .create_contract(new_contract(vec![offers[0]]), &admin())
        .await??;

    for offer_id in &offers {
        db.create_offer_contract_relationship(
            NewOfferContractRelationship {
                offer_id: *offer_id,
                contract_id,
                status: Status::Retracted,
            },
            &admin(),
        )
        .await??;
    }

    let all = db
        .get_all_offer_contract_relationships(RelationshipFilter::default(), &owner())
        .await?;
    assert_eq!(all.len(), 3);

    let by_offer = db
        .get_all_offer_contract_relationships(
            RelationshipFilter {
                offer_id: Some(offers[0]),
                ..Default::default()
            },
            &owner(),
        )
        .await?;
    assert_eq!(by_offer.len(), 2);

    let by_offer_and_contract = db
        .get_all_offer_contract_relationships(
            RelationshipFilter {
                offer_id: Some(offers[0]),
                contract_id: Some(other_contract.contract.contract_id),
                status: None,
            },
            &owner(),
        )
        .await?;
    assert_eq!(by_offer_and_contract, other_contract.relationships);

    let by_status = db
        .get_all_offer_contract_relationships(
            RelationshipFilter {
                contract_id: Some(contract_id),
                status: Some(Status::Retracted),
                ..Default::default()
            },
            &owner(),
        )
        .await?;
    assert_eq!(by_status.len(), 2);
    Ok(())
}

#[tokio::test]
async fn update_and_unexpired() -> anyhow::Result<()> {
    let db = open().await?;
    let (offers, _) = market(&db).await?;

    let created = db
        .create_contract(new_contract(offers), &admin())
        .await??;
    let expired = created.relationships[0].offer_contract_relationship_id;

    let updated = db
        .update_offer_contract_relationship(
            expired,
            RelationshipUpdate {
                status: Some(Status::Expired),
            },
            &admin(),
        )
        .await??;
    assert_eq!(updated.status, Status::Expired);
    assert_eq!(updated.offer_id, created.relationships[0].offer_id);

    // an empty update leaves the status alone
    let unchanged = db
        .update_offer_contract_relationship(expired, RelationshipUpdate::default(), &admin())
        .await??;
    assert_eq!(unchanged.status, Status::Expired);

    let unexpired = db
        .get_unexpired_offer_contract_relationships(&owner())
        .await?;
    assert_eq!(unexpired, vec![created.relationships[1].clone()]);

    let missing = OfferContractRelationshipId::generate();
    let result = db
        .update_offer_contract_relationship(missing, RelationshipUpdate::default(), &admin())
        .await?;
    assert_eq!(result, Err(Failure::not_found(KIND, missing)));
    Ok(())
}

#[tokio::test]
async fn destroy() -> anyhow::Result<()> {
    let db = open().await?;
    let (offers, _) = market(&db).await?;

    let created = db
        .create_contract(new_contract(offers), &admin())
        .await??;
    let id = created.relationships[0].offer_contract_relationship_id;

    db.destroy_offer_contract_relationship(id, &admin()).await??;
    assert!(matches!(
        db.get_offer_contract_relationship(Some(id), &admin()).await?,
        Err(Failure::NotFound { .. })
    ));

    let again = db.destroy_offer_contract_relationship(id, &admin()).await?;
    assert_eq!(again, Err(Failure::not_found(KIND, id)));
    Ok(())
}

#[tokio::test]
async fn destroying_an_offer_drops_its_links() -> anyhow::Result<()> {
    let db = open().await?;
    let (offers, _) = market(&db).await?;

    let created = db
        .create_contract(new_contract(offers.clone()), &admin())
        .await??;
    db.destroy_offer(offers[0], &owner()).await??;

    let remaining = db
        .get_all_offer_contract_relationships(RelationshipFilter::default(), &admin())
        .await?;
    assert_eq!(remaining, vec![created.relationships[1].clone()]);

    // the contract survives
    db.get_contract(created.contract.contract_id, &admin()).await??;
    Ok(())
}
