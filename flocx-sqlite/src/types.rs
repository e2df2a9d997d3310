//! Row types for the SQLite implementation.
//!
//! Ids, statuses and project ids are stored as text and JSON columns as text
//! through `sqlx::types::Json`. Each row type decodes a table row as stored
//! and converts into its `flocx-core` model, reporting malformed values as
//! `sqlx::Error::Decode`.

use flocx_core::models::{
    Bid, BidId, Contract, Offer, OfferContractRelationship, ProjectId, ResourceType,
};
use sqlx::types::Json;
use time::OffsetDateTime;

fn decode<T, E>(value: Result<T, E>) -> Result<T, sqlx::Error>
where
    E: std::error::Error + Send + Sync + 'static,
{
    value.map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

#[derive(sqlx::FromRow)]
pub(crate) struct OfferRow {
    pub offer_id: String,
    pub project_id: String,
    pub resource_id: String,
    pub resource_type: String,
    pub status: String,
    pub start_time: OffsetDateTime,
    pub end_time: OffsetDateTime,
    pub server_config: Json<serde_json::Value>,
    pub cost: f64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl TryFrom<OfferRow> for Offer {
    type Error = sqlx::Error;

    fn try_from(row: OfferRow) -> Result<Self, Self::Error> {
        Ok(Self {
            offer_id: decode(row.offer_id.try_into())?,
            project_id: ProjectId::from(row.project_id),
            resource_id: row.resource_id,
            resource_type: ResourceType::from(row.resource_type),
            status: decode(row.status.try_into())?,
            start_time: row.start_time,
            end_time: row.end_time,
            server_config: row.server_config.0,
            cost: row.cost,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct BidRow {
    pub bid_id: String,
    pub project_id: String,
    pub quantity: i64,
    pub start_time: OffsetDateTime,
    pub end_time: OffsetDateTime,
    pub duration: i64,
    pub status: String,
    pub server_config_query: Json<serde_json::Value>,
    pub cost: f64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl TryFrom<BidRow> for Bid {
    type Error = sqlx::Error;

    fn try_from(row: BidRow) -> Result<Self, Self::Error> {
        Ok(Self {
            bid_id: decode(row.bid_id.try_into())?,
            project_id: ProjectId::from(row.project_id),
            quantity: row.quantity,
            start_time: row.start_time,
            end_time: row.end_time,
            duration: row.duration,
            status: decode(row.status.try_into())?,
            server_config_query: row.server_config_query.0,
            cost: row.cost,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct ContractRow {
    pub contract_id: String,
    pub project_id: String,
    pub status: String,
    pub start_time: OffsetDateTime,
    pub end_time: OffsetDateTime,
    pub cost: f64,
    pub bid_id: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl TryFrom<ContractRow> for Contract {
    type Error = sqlx::Error;

    fn try_from(row: ContractRow) -> Result<Self, Self::Error> {
        Ok(Self {
            contract_id: decode(row.contract_id.try_into())?,
            project_id: ProjectId::from(row.project_id),
            status: decode(row.status.try_into())?,
            start_time: row.start_time,
            end_time: row.end_time,
            cost: row.cost,
            bid_id: decode(row.bid_id.map(BidId::try_from).transpose())?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct RelationshipRow {
    pub offer_contract_relationship_id: String,
    pub offer_id: String,
    pub contract_id: String,
    pub status: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl TryFrom<RelationshipRow> for OfferContractRelationship {
    type Error = sqlx::Error;

    fn try_from(row: RelationshipRow) -> Result<Self, Self::Error> {
        Ok(Self {
            offer_contract_relationship_id: decode(row.offer_contract_relationship_id.try_into())?,
            offer_id: decode(row.offer_id.try_into())?,
            contract_id: decode(row.contract_id.try_into())?,
            status: decode(row.status.try_into())?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Convert a batch of rows, failing on the first malformed one.
pub(crate) fn collect<R, T>(rows: Vec<R>) -> Result<Vec<T>, sqlx::Error>
where
    T: TryFrom<R, Error = sqlx::Error>,
{
    rows.into_iter().map(T::try_from).collect()
}
