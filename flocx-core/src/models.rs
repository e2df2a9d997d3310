mod bid;
mod context;
mod contract;
mod offer;
mod relationship;
mod resource;
mod status;

pub use bid::{Bid, BidId, BidUpdate, NewBid};
pub use context::{Context, ProjectId};
pub use contract::{Contract, ContractId, ContractUpdate, CreatedContract, NewContract};
pub use offer::{NewOffer, Offer, OfferId, OfferUpdate};
pub use relationship::{
    NewOfferContractRelationship, OfferContractRelationship, OfferContractRelationshipId,
    RelationshipFilter, RelationshipUpdate,
};
pub use resource::ResourceType;
pub use status::{Status, UnknownStatus};

macro_rules! uuid_wrapper {
    ($struct: ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(
            Debug,
            Hash,
            PartialEq,
            Eq,
            Clone,
            Copy,
            serde::Serialize,
            serde::Deserialize,
            PartialOrd,
            Ord,
        )]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $struct(uuid::Uuid);

        impl $struct {
            /// Generate a fresh random id
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl From<uuid::Uuid> for $struct {
            fn from(value: uuid::Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$struct> for uuid::Uuid {
            fn from(value: $struct) -> Self {
                value.0
            }
        }

        impl TryFrom<&str> for $struct {
            type Error = <uuid::Uuid as std::str::FromStr>::Err;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Ok(Self(<uuid::Uuid as std::str::FromStr>::from_str(value)?))
            }
        }

        // Storage backends keep ids as text and decode through this impl
        impl TryFrom<String> for $struct {
            type Error = <uuid::Uuid as std::str::FromStr>::Err;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::try_from(value.as_str())
            }
        }

        impl std::str::FromStr for $struct {
            type Err = <uuid::Uuid as std::str::FromStr>::Err;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::try_from(s)
            }
        }

        impl std::ops::Deref for $struct {
            type Target = uuid::Uuid;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl std::fmt::Display for $struct {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

pub(crate) use uuid_wrapper;
