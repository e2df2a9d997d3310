use crate::{
    Failure,
    models::{
        Context, NewOfferContractRelationship, OfferContractRelationship,
        OfferContractRelationshipId, RelationshipFilter, RelationshipUpdate,
    },
};

/// Repository interface for offer/contract links.
pub trait OfferContractRelationshipRepository: super::Repository {
    /// Retrieve a relationship by id.
    ///
    /// # Returns
    ///
    /// - Ok(Ok(None)) if `relationship_id` is None; the store is not consulted
    /// - Ok(Ok(Some(relationship))) if it exists
    /// - Ok(Err(Failure::NotFound)) if it does not
    fn get_offer_contract_relationship(
        &self,
        relationship_id: Option<OfferContractRelationshipId>,
        context: &Context,
    ) -> impl Future<Output = Result<Result<Option<OfferContractRelationship>, Failure>, Self::Error>>
    + Send;

    /// The relationships matching every field set in `filter`.
    fn get_all_offer_contract_relationships(
        &self,
        filter: RelationshipFilter,
        context: &Context,
    ) -> impl Future<Output = Result<Vec<OfferContractRelationship>, Self::Error>> + Send;

    /// Every relationship that has not expired.
    fn get_unexpired_offer_contract_relationships(
        &self,
        context: &Context,
    ) -> impl Future<Output = Result<Vec<OfferContractRelationship>, Self::Error>> + Send;

    /// Link an offer to a contract. Admin only.
    fn create_offer_contract_relationship(
        &self,
        relationship: NewOfferContractRelationship,
        context: &Context,
    ) -> impl Future<Output = Result<Result<OfferContractRelationship, Failure>, Self::Error>> + Send;

    /// Apply `update` to a relationship. Admin only.
    fn update_offer_contract_relationship(
        &self,
        relationship_id: OfferContractRelationshipId,
        update: RelationshipUpdate,
        context: &Context,
    ) -> impl Future<Output = Result<Result<OfferContractRelationship, Failure>, Self::Error>> + Send;

    /// Permanently remove a relationship. Admin only.
    fn destroy_offer_contract_relationship(
        &self,
        relationship_id: OfferContractRelationshipId,
        context: &Context,
    ) -> impl Future<Output = Result<Result<(), Failure>, Self::Error>> + Send;
}
