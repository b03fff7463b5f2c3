//! Servicio de catálogo (taxonomías de vehículos y llantas)
//!
//! Cada recurso se cachea por recurso + parámetros. El bloque `meta` de
//! paginación se conserva tal como llega.

use std::sync::Arc;

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cache::{QueryCache, QueryFamily, QueryKey};
use crate::clients::{Resource, RestGateway};
use crate::dto::{PageMeta, QueryParams};
use crate::models::{CatalogEntry, CatalogResource};
use crate::utils::errors::AppResult;

/// Página de un recurso de catálogo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub resource_name: String,
    pub entries: Vec<CatalogEntry>,
    pub meta: Option<PageMeta>,
}

#[derive(Clone)]
pub struct CatalogService {
    gateway: RestGateway,
    cache: Arc<QueryCache>,
}

impl CatalogService {
    pub fn new(gateway: RestGateway, cache: Arc<QueryCache>) -> Self {
        Self { gateway, cache }
    }

    pub async fn list(&self, resource: CatalogResource, params: &QueryParams) -> AppResult<CatalogPage> {
        debug!("📚 Consultando catálogo {} ({})", resource, params);
        let gateway = &self.gateway;
        let key = QueryKey::new(QueryFamily::Catalog(resource), params.to_string());
        self.cache
            .fetch(key, || async move {
                gateway
                    .list::<CatalogEntry>(Resource::Catalog(resource), params)
                    .await
                    .map(|response| CatalogPage {
                        resource_name: resource.name().to_string(),
                        entries: response.data,
                        meta: response.meta,
                    })
            })
            .await
    }

    /// Etiquetas a mostrar, en el orden del backend
    pub async fn labels(&self, resource: CatalogResource, params: &QueryParams) -> AppResult<Vec<String>> {
        let page = self.list(resource, params).await?;
        Ok(page
            .entries
            .iter()
            .map(|entry| entry.label(resource))
            .collect())
    }

    /// Varios recursos en paralelo; falla si falla cualquiera
    pub async fn list_many(
        &self,
        resources: &[CatalogResource],
        params: &QueryParams,
    ) -> AppResult<Vec<CatalogPage>> {
        try_join_all(resources.iter().map(|resource| self.list(*resource, params))).await
    }
}
