//! # DDD Service
//!
//! Uncached read passthrough for DDD region codes. The DDD resource has no
//! derived lookups and no published write path in this gateway.

use crate::client::DddClient;
use crate::error::GatewayResult;
use crate::models::DirectDistanceDialing;

pub struct DddService {
    ddd: DddClient,
}

impl DddService {
    pub fn new(ddd: DddClient) -> Self {
        Self { ddd }
    }

    pub async fn get_all(&self) -> GatewayResult<Vec<DirectDistanceDialing>> {
        self.ddd.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> GatewayResult<Option<DirectDistanceDialing>> {
        self.ddd.get(id).await
    }
}
