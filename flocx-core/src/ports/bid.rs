use crate::{
    Failure,
    models::{Bid, BidId, BidUpdate, Context, NewBid, Status},
};

/// Repository interface for bids.
///
/// Bids follow the same ownership rules as offers, but any project may
/// create one.
pub trait BidRepository: super::Repository {
    /// Retrieve a bid by id, regardless of owner.
    fn get_bid(
        &self,
        bid_id: BidId,
        context: &Context,
    ) -> impl Future<Output = Result<Result<Bid, Failure>, Self::Error>> + Send;

    /// Every bid in the store.
    fn get_all_bids(
        &self,
        context: &Context,
    ) -> impl Future<Output = Result<Vec<Bid>, Self::Error>> + Send;

    /// The bids owned by the caller's project.
    fn get_bids_by_project_id(
        &self,
        context: &Context,
    ) -> impl Future<Output = Result<Vec<Bid>, Self::Error>> + Send;

    /// The bids with the given status; non-admins only see their own.
    fn get_bids_by_status(
        &self,
        status: Status,
        context: &Context,
    ) -> impl Future<Output = Result<Vec<Bid>, Self::Error>> + Send;

    /// Every bid that has not expired.
    fn get_unexpired_bids(
        &self,
        context: &Context,
    ) -> impl Future<Output = Result<Vec<Bid>, Self::Error>> + Send;

    /// Create a bid owned by the caller's project.
    fn create_bid(
        &self,
        bid: NewBid,
        context: &Context,
    ) -> impl Future<Output = Result<Bid, Self::Error>> + Send;

    /// Apply `update` to a bid owned by the caller (or any bid, for admins).
    fn update_bid(
        &self,
        bid_id: BidId,
        update: BidUpdate,
        context: &Context,
    ) -> impl Future<Output = Result<Result<Bid, Failure>, Self::Error>> + Send;

    /// Permanently remove a bid owned by the caller (or any bid, for admins).
    fn destroy_bid(
        &self,
        bid_id: BidId,
        context: &Context,
    ) -> impl Future<Output = Result<Result<(), Failure>, Self::Error>> + Send;
}
