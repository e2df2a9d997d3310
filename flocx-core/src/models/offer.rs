use crate::models::{ProjectId, ResourceType, Status, uuid_wrapper};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

uuid_wrapper!(OfferId, "Unique identifier for an offer");

/// An advertisement that a resource is available for trade.
///
/// At most one offer per `resource_id` may be [`Status::Available`] at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    /// Assigned by the repository on creation
    pub offer_id: OfferId,
    /// The tenant that listed the resource
    pub project_id: ProjectId,
    /// The resource being offered, as known to its resource authority
    pub resource_id: String,
    /// The kind of resource being offered
    pub resource_type: ResourceType,
    /// Current lifecycle state
    pub status: Status,
    /// Start of the window the resource is offered for
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    /// End of the window the resource is offered for
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
    /// Free-form description of the resource's configuration
    pub server_config: serde_json::Value,
    /// Asking price for the window
    pub cost: f64,
    /// When the row was inserted
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the row was last changed
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Offer {
    /// The entity name used in failures and logs
    pub const KIND: &'static str = "Offer";
}

/// The caller-supplied fields of a new offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOffer {
    /// The resource to list
    pub resource_id: String,
    /// Defaults to [`ResourceType::IRONIC_NODE`] when omitted
    #[serde(default)]
    pub resource_type: Option<ResourceType>,
    /// Initial status
    #[serde(default)]
    pub status: Status,
    /// Start of the offered window
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    /// End of the offered window
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
    /// Free-form configuration
    #[serde(default)]
    pub server_config: serde_json::Value,
    /// Asking price
    pub cost: f64,
}

/// The mutable fields of an offer. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfferUpdate {
    /// New status
    #[serde(default)]
    pub status: Option<Status>,
    /// New window start
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start_time: Option<OffsetDateTime>,
    /// New window end
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end_time: Option<OffsetDateTime>,
    /// New configuration
    #[serde(default)]
    pub server_config: Option<serde_json::Value>,
    /// New asking price
    #[serde(default)]
    pub cost: Option<f64>,
}

impl OfferUpdate {
    /// An update that only changes the status
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}
