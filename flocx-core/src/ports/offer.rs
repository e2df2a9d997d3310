use crate::{
    Failure,
    models::{Context, NewOffer, Offer, OfferId, OfferUpdate, Status},
    ports::ResourceAuthority,
};

/// Repository interface for offers.
///
/// Listing and lookup do not refuse callers; the scoped queries restrict
/// results to the caller's project unless the caller is an admin.
/// Modification is restricted to the owning project or an admin.
pub trait OfferRepository: super::Repository {
    /// Retrieve an offer by id, regardless of owner.
    fn get_offer(
        &self,
        offer_id: OfferId,
        context: &Context,
    ) -> impl Future<Output = Result<Result<Offer, Failure>, Self::Error>> + Send;

    /// Every offer in the store.
    fn get_all_offers(
        &self,
        context: &Context,
    ) -> impl Future<Output = Result<Vec<Offer>, Self::Error>> + Send;

    /// The offers owned by the caller's project.
    fn get_offers_by_project_id(
        &self,
        context: &Context,
    ) -> impl Future<Output = Result<Vec<Offer>, Self::Error>> + Send;

    /// The offers listing `resource_id`, optionally restricted to `status`.
    fn get_offers_by_resource_id(
        &self,
        resource_id: &str,
        status: Option<Status>,
        context: &Context,
    ) -> impl Future<Output = Result<Vec<Offer>, Self::Error>> + Send;

    /// The offers with the given status; non-admins only see their own.
    fn get_offers_by_status(
        &self,
        status: Status,
        context: &Context,
    ) -> impl Future<Output = Result<Vec<Offer>, Self::Error>> + Send;

    /// The offers that have not expired; non-admins only see their own.
    fn get_unexpired_offers(
        &self,
        context: &Context,
    ) -> impl Future<Output = Result<Vec<Offer>, Self::Error>> + Send;

    /// List a resource on behalf of the caller's project.
    ///
    /// # Returns
    ///
    /// - Ok(Ok(offer)) with a freshly assigned id on success
    /// - Ok(Err(Failure::NoPermission)) if `authority` denies that the caller
    ///   administers the resource
    /// - Ok(Err(Failure::Validation)) if the resource already has an
    ///   available offer
    /// - Err otherwise
    fn create_offer<A: ResourceAuthority + Sync>(
        &self,
        authority: &A,
        offer: NewOffer,
        context: &Context,
    ) -> impl Future<Output = Result<Result<Offer, Failure>, Self::Error>> + Send;

    /// Apply `update` to an offer owned by the caller (or any offer, for admins).
    fn update_offer(
        &self,
        offer_id: OfferId,
        update: OfferUpdate,
        context: &Context,
    ) -> impl Future<Output = Result<Result<Offer, Failure>, Self::Error>> + Send;

    /// Permanently remove an offer owned by the caller (or any offer, for admins).
    fn destroy_offer(
        &self,
        offer_id: OfferId,
        context: &Context,
    ) -> impl Future<Output = Result<Result<(), Failure>, Self::Error>> + Send;
}
