#![allow(dead_code)]

use flocx_core::{
    models::{Context, NewBid, NewContract, NewOffer, OfferId, ProjectId, ResourceType, Status},
    ports::ResourceAuthority,
};
use flocx_sqlite::{Db, config::SqliteConfig};
use std::collections::HashMap;
use time::{OffsetDateTime, macros::datetime};

pub const OWNER: &str = "project-owner";
pub const OTHER: &str = "project-other";
pub const OPERATOR: &str = "project-operator";

pub const NODE: &str = "node-1";
pub const SECOND_NODE: &str = "node-2";
pub const FOREIGN_NODE: &str = "node-3";

pub const START: OffsetDateTime = datetime!(2026-03-01 00:00 UTC);
pub const END: OffsetDateTime = datetime!(2026-03-08 00:00 UTC);

/// A fresh, private in-memory marketplace.
pub async fn open() -> Result<Db, sqlx::Error> {
    Db::open(&SqliteConfig::default()).await
}

pub fn owner() -> Context {
    Context::new(OWNER)
}

pub fn other() -> Context {
    Context::new(OTHER)
}

pub fn admin() -> Context {
    Context::admin(OPERATOR)
}

/// A resource authority backed by a fixed table of resource administrators.
pub struct Inventory(HashMap<String, ProjectId>);

impl Default for Inventory {
    fn default() -> Self {
        Self(HashMap::from([
            (NODE.to_owned(), OWNER.into()),
            (SECOND_NODE.to_owned(), OWNER.into()),
            (FOREIGN_NODE.to_owned(), OTHER.into()),
        ]))
    }
}

impl ResourceAuthority for Inventory {
    async fn is_resource_admin(
        &self,
        _resource_type: &ResourceType,
        resource_id: &str,
        project_id: &ProjectId,
    ) -> bool {
        self.0
            .get(resource_id)
            .is_some_and(|admin| admin == project_id)
    }
}

pub fn new_offer(resource_id: &str) -> NewOffer {
    NewOffer {
        resource_id: resource_id.to_owned(),
        resource_type: None,
        status: Status::Available,
        start_time: START,
        end_time: END,
        server_config: serde_json::json!({ "cpu_arch": "x86_64", "memory_gb": 256 }),
        cost: 11.5,
    }
}

pub fn new_bid() -> NewBid {
    NewBid {
        quantity: 2,
        start_time: START,
        end_time: END,
        duration: 3600,
        status: Status::Available,
        server_config_query: serde_json::json!({ "cpu_arch": "x86_64" }),
        cost: 9.0,
    }
}

pub fn new_contract(offers: Vec<OfferId>) -> NewContract {
    NewContract {
        project_id: None,
        status: Status::Available,
        start_time: START,
        end_time: END,
        cost: 20.0,
        bid_id: None,
        offers,
    }
}
