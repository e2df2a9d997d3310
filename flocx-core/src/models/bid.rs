use crate::models::{ProjectId, Status, uuid_wrapper};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

uuid_wrapper!(BidId, "Unique identifier for a bid");

/// A request to acquire resources.
///
/// Bids are independent of offers until an operator matches them into a
/// contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    /// Assigned by the repository on creation
    pub bid_id: BidId,
    /// The tenant asking for resources
    pub project_id: ProjectId,
    /// How many resources are wanted
    pub quantity: i64,
    /// Earliest acceptable start
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    /// Latest acceptable end
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
    /// Length of the wanted lease, in seconds
    pub duration: i64,
    /// Current lifecycle state
    pub status: Status,
    /// Constraints a matching resource's configuration must meet
    pub server_config_query: serde_json::Value,
    /// Price the bidder is willing to pay
    pub cost: f64,
    /// When the row was inserted
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the row was last changed
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Bid {
    /// The entity name used in failures and logs
    pub const KIND: &'static str = "Bid";
}

/// The caller-supplied fields of a new bid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBid {
    /// How many resources are wanted
    pub quantity: i64,
    /// Earliest acceptable start
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    /// Latest acceptable end
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
    /// Length of the wanted lease, in seconds
    pub duration: i64,
    /// Initial status
    #[serde(default)]
    pub status: Status,
    /// Configuration constraints
    #[serde(default)]
    pub server_config_query: serde_json::Value,
    /// Offered price
    pub cost: f64,
}

/// The mutable fields of a bid. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BidUpdate {
    #[serde(default)]
    #[allow(missing_docs)]
    pub quantity: Option<i64>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    #[allow(missing_docs)]
    pub start_time: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    #[allow(missing_docs)]
    pub end_time: Option<OffsetDateTime>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub duration: Option<i64>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub status: Option<Status>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub server_config_query: Option<serde_json::Value>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub cost: Option<f64>,
}

impl BidUpdate {
    /// An update that only changes the status
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}
