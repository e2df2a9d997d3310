use crate::models::{ContractId, OfferId, Status, uuid_wrapper};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

uuid_wrapper!(
    OfferContractRelationshipId,
    "Unique identifier for an offer/contract link"
);

/// The join row linking an offer to a contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferContractRelationship {
    /// Assigned by the repository on creation
    pub offer_contract_relationship_id: OfferContractRelationshipId,
    /// The linked offer
    pub offer_id: OfferId,
    /// The linked contract
    pub contract_id: ContractId,
    /// Current lifecycle state of the link
    pub status: Status,
    /// When the row was inserted
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the row was last changed
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl OfferContractRelationship {
    /// The entity name used in failures and logs
    pub const KIND: &'static str = "Offer_Contract_Relationship";
}

/// The caller-supplied fields of a new relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOfferContractRelationship {
    #[allow(missing_docs)]
    pub offer_id: OfferId,
    #[allow(missing_docs)]
    pub contract_id: ContractId,
    #[serde(default)]
    #[allow(missing_docs)]
    pub status: Status,
}

/// The mutable fields of a relationship.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipUpdate {
    /// New status
    #[serde(default)]
    pub status: Option<Status>,
}

/// Optional equality filters for listing relationships. An empty filter
/// matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipFilter {
    #[serde(default)]
    #[allow(missing_docs)]
    pub offer_id: Option<OfferId>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub contract_id: Option<ContractId>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub status: Option<Status>,
}
