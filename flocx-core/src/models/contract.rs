use crate::models::{BidId, OfferContractRelationship, OfferId, ProjectId, Status, uuid_wrapper};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

uuid_wrapper!(ContractId, "Unique identifier for a contract");

/// An accepted match between a bid and one or more offers.
///
/// Contracts are created by administrators only, and are linked to their
/// offers through [`OfferContractRelationship`] rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// Assigned by the repository on creation
    pub contract_id: ContractId,
    /// The tenant the contract was made for
    pub project_id: ProjectId,
    /// Current lifecycle state
    pub status: Status,
    /// Start of the contracted lease
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    /// End of the contracted lease
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
    /// Agreed price
    pub cost: f64,
    /// The bid this contract fulfils, if it is still around
    pub bid_id: Option<BidId>,
    /// When the row was inserted
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the row was last changed
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Contract {
    /// The entity name used in failures and logs
    pub const KIND: &'static str = "Contract";
}

/// The caller-supplied fields of a new contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContract {
    /// The owning tenant; the caller's project is used when omitted
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    /// Initial status
    #[serde(default)]
    pub status: Status,
    /// Start of the lease
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    /// End of the lease
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
    /// Agreed price
    pub cost: f64,
    /// The bid being fulfilled
    #[serde(default)]
    pub bid_id: Option<BidId>,
    /// The offers to link to the new contract, one relationship each
    #[serde(default)]
    pub offers: Vec<OfferId>,
}

/// The mutable fields of a contract. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractUpdate {
    /// New status
    #[serde(default)]
    pub status: Option<Status>,
    /// New lease start
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start_time: Option<OffsetDateTime>,
    /// New lease end
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end_time: Option<OffsetDateTime>,
    /// New price
    #[serde(default)]
    pub cost: Option<f64>,
}

/// The result of creating a contract: the contract row and the relationship
/// rows that were inserted alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedContract {
    /// The new contract
    #[serde(flatten)]
    pub contract: Contract,
    /// One relationship per requested offer, in request order
    pub relationships: Vec<OfferContractRelationship>,
}
