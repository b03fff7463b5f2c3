//! Servicio de ofertas (solo lectura)

use std::sync::Arc;

use tracing::debug;

use crate::cache::{QueryCache, QueryFamily, QueryKey};
use crate::clients::{Resource, RestGateway};
use crate::dto::QueryParams;
use crate::models::Deal;
use crate::utils::errors::{require_id, AppResult};

#[derive(Clone)]
pub struct DealService {
    gateway: RestGateway,
    cache: Arc<QueryCache>,
}

impl DealService {
    pub fn new(gateway: RestGateway, cache: Arc<QueryCache>) -> Self {
        Self { gateway, cache }
    }

    pub async fn list(&self, params: &QueryParams) -> AppResult<Vec<Deal>> {
        debug!("🏷️ Listando ofertas ({})", params);
        let gateway = &self.gateway;
        let key = QueryKey::new(QueryFamily::Deals, params.to_string());
        self.cache
            .fetch(key, || async move {
                gateway
                    .list::<Deal>(Resource::Deals, params)
                    .await
                    .map(|response| response.data)
            })
            .await
    }

    pub async fn get(&self, id: &str) -> AppResult<Deal> {
        require_id(id, "Deal ID is required")?;
        let gateway = &self.gateway;
        self.cache
            .fetch(QueryKey::new(QueryFamily::SingleDeal, id), || async move {
                gateway
                    .get::<Deal>(Resource::Deals, id)
                    .await
                    .map(|response| response.data)
            })
            .await
    }
}
