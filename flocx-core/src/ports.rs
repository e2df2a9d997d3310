mod authority;
mod bid;
mod contract;
mod offer;
mod relationship;

pub use authority::ResourceAuthority;
pub use bid::BidRepository;
pub use contract::ContractRepository;
pub use offer::OfferRepository;
pub use relationship::OfferContractRelationshipRepository;

/// Base trait for marketplace storage.
///
/// The associated error covers failures of the store itself (connectivity,
/// constraint violations, decoding). Refusals that follow from the marketplace
/// rules are reported separately as [`crate::Failure`], so most operations
/// return `Result<Result<T, Failure>, Self::Error>`.
pub trait Repository {
    /// Store-level error type
    type Error: std::error::Error + Send + Sync + 'static;
}

/// The "marker" trait for a store that implements every repository.
pub trait MarketRepository:
    OfferRepository + BidRepository + ContractRepository + OfferContractRelationshipRepository
{
}

impl<T> MarketRepository for T where
    T: OfferRepository + BidRepository + ContractRepository + OfferContractRelationshipRepository
{
}
