//! Servicio de noticias de flota

use std::sync::Arc;

use serde::de::IgnoredAny;
use tracing::info;
use validator::Validate;

use super::notifier::Notifier;
use super::settle_mutation;
use crate::cache::{Mutation, QueryCache, QueryFamily, QueryKey};
use crate::clients::{Resource, RestGateway};
use crate::dto::{CreateFleetNewsRequest, QueryParams, UpdateFleetNewsRequest};
use crate::models::FleetNews;
use crate::utils::errors::{require_id, AppResult};

const NEWS_ID_REQUIRED: &str = "News ID is required";

#[derive(Clone)]
pub struct FleetNewsService {
    gateway: RestGateway,
    cache: Arc<QueryCache>,
    notifier: Arc<dyn Notifier>,
}

impl FleetNewsService {
    pub fn new(gateway: RestGateway, cache: Arc<QueryCache>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            gateway,
            cache,
            notifier,
        }
    }

    pub async fn list(&self, params: &QueryParams) -> AppResult<Vec<FleetNews>> {
        let gateway = &self.gateway;
        let key = QueryKey::new(QueryFamily::FleetNews, params.to_string());
        self.cache
            .fetch(key, || async move {
                gateway
                    .list::<FleetNews>(Resource::FleetNews, params)
                    .await
                    .map(|response| response.data)
            })
            .await
    }

    pub async fn create(&self, request: &CreateFleetNewsRequest) -> AppResult<FleetNews> {
        request.validate()?;
        info!("📰 Publicando noticia de flota: {}", request.title);

        let result = self
            .gateway
            .create::<_, FleetNews>(Resource::FleetNews, request)
            .await;
        settle_mutation(
            &self.cache,
            self.notifier.as_ref(),
            result,
            Mutation::CreateFleetNews,
            "Fleet news created successfully!",
            "Failed to create fleet news",
        )
        .await
    }

    pub async fn update(&self, id: &str, request: &UpdateFleetNewsRequest) -> AppResult<FleetNews> {
        require_id(id, NEWS_ID_REQUIRED)?;
        request.validate()?;
        info!("📰 Actualizando noticia de flota {}", id);

        let result = self
            .gateway
            .update::<_, FleetNews>(Resource::FleetNews, id, request)
            .await;
        settle_mutation(
            &self.cache,
            self.notifier.as_ref(),
            result,
            Mutation::UpdateFleetNews { id: id.to_string() },
            "Fleet news updated successfully!",
            "Failed to update fleet news",
        )
        .await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        require_id(id, NEWS_ID_REQUIRED)?;
        info!("🗑️ Eliminando noticia de flota {}", id);

        let result = self.gateway.remove(Resource::FleetNews, id).await;
        settle_mutation(
            &self.cache,
            self.notifier.as_ref(),
            result,
            Mutation::DeleteFleetNews { id: id.to_string() },
            "Fleet news deleted successfully!",
            "Failed to delete fleet news",
        )
        .await
        .map(|_: Option<IgnoredAny>| ())
    }
}
