//! Tarjetas de conteo del panel de administración
//!
//! Cuenta usuarios y taxonomías del catálogo con una sola ronda de consultas
//! en paralelo. Si cualquiera falla, falla el panel completo.

use std::sync::Arc;

use serde_json::Value;

use super::catalog_service::CatalogService;
use crate::cache::{QueryCache, QueryFamily, QueryKey};
use crate::clients::{Resource, RestGateway};
use crate::dto::QueryParams;
use crate::models::CatalogResource;
use crate::utils::errors::AppResult;

/// Conteos mostrados en el panel; cada uno es el largo de `data`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardCounts {
    pub users: usize,
    pub categories: usize,
    pub makes: usize,
    pub driving_types: usize,
    pub years: usize,
    pub trims: usize,
    pub models: usize,
    pub brands: usize,
}

impl DashboardCounts {
    /// Título y valor de cada tarjeta, en orden de pantalla
    pub fn cards(&self) -> [(&'static str, usize); 8] {
        [
            ("Registered Users", self.users),
            ("Categories Available", self.categories),
            ("Car Brands (Makes)", self.makes),
            ("Drive Types Available", self.driving_types),
            ("Model Years Supported", self.years),
            ("Trims Available", self.trims),
            ("Models Available", self.models),
            ("Tire Brands", self.brands),
        ]
    }
}

const COUNTED: [CatalogResource; 7] = [
    CatalogResource::Categories,
    CatalogResource::Makes,
    CatalogResource::DrivingTypes,
    CatalogResource::Years,
    CatalogResource::Trims,
    CatalogResource::Models,
    CatalogResource::Brands,
];

#[derive(Clone)]
pub struct DashboardService {
    gateway: RestGateway,
    cache: Arc<QueryCache>,
    catalog: CatalogService,
}

impl DashboardService {
    pub fn new(gateway: RestGateway, cache: Arc<QueryCache>, catalog: CatalogService) -> Self {
        Self {
            gateway,
            cache,
            catalog,
        }
    }

    pub async fn counts(&self) -> AppResult<DashboardCounts> {
        let params = QueryParams::new();
        let (pages, users) = futures::try_join!(
            self.catalog.list_many(&COUNTED, &params),
            self.users(&params)
        )?;

        let count = |resource: CatalogResource| {
            COUNTED
                .iter()
                .position(|counted| *counted == resource)
                .and_then(|index| pages.get(index))
                .map(|page| page.entries.len())
                .unwrap_or(0)
        };

        Ok(DashboardCounts {
            users,
            categories: count(CatalogResource::Categories),
            makes: count(CatalogResource::Makes),
            driving_types: count(CatalogResource::DrivingTypes),
            years: count(CatalogResource::Years),
            trims: count(CatalogResource::Trims),
            models: count(CatalogResource::Models),
            brands: count(CatalogResource::Brands),
        })
    }

    async fn users(&self, params: &QueryParams) -> AppResult<usize> {
        let gateway = &self.gateway;
        let users: Vec<Value> = self
            .cache
            .fetch(QueryKey::of(QueryFamily::Users), || async move {
                gateway
                    .list::<Value>(Resource::Users, params)
                    .await
                    .map(|response| response.data)
            })
            .await?;
        Ok(users.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::transport::{HttpRequest, HttpResponse, Transport};
    use async_trait::async_trait;
    use http::StatusCode;
    use serde_json::json;

    struct PanelTransport {
        failing: Option<&'static str>,
    }

    #[async_trait]
    impl Transport for PanelTransport {
        async fn send(&self, request: HttpRequest) -> AppResult<HttpResponse> {
            if self.failing == Some(request.path.as_str()) {
                return Ok(HttpResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: String::new(),
                });
            }
            let body = match request.path.as_str() {
                "/users" => json!({ "data": [{ "_id": "u1" }, { "_id": "u2" }, { "_id": "u3" }] }),
                "/makes" => json!({ "data": [{ "_id": "m1", "make": "Toyota" }, { "_id": "m2", "make": "Ford" }] }),
                "/driving-types" => json!({ "data": [{ "_id": "d1", "name": "AWD" }] }),
                "/years" => json!({
                    "data": [{ "_id": "y1", "year": 2024 }],
                    "meta": { "page": 1, "limit": 1, "total": 30, "totalPage": 30 }
                }),
                _ => json!({ "data": [] }),
            };
            Ok(HttpResponse {
                status: StatusCode::OK,
                body: body.to_string(),
            })
        }
    }

    fn dashboard(failing: Option<&'static str>) -> DashboardService {
        let gateway = RestGateway::new(Arc::new(PanelTransport { failing }));
        let cache = Arc::new(QueryCache::default());
        let catalog = CatalogService::new(gateway.clone(), cache.clone());
        DashboardService::new(gateway, cache, catalog)
    }

    #[tokio::test]
    async fn test_counts_use_returned_rows() {
        let counts = dashboard(None).counts().await.unwrap();
        assert_eq!(counts.users, 3);
        assert_eq!(counts.makes, 2);
        assert_eq!(counts.driving_types, 1);
        // el conteo es el largo de `data`, no `meta.total`
        assert_eq!(counts.years, 1);
        assert_eq!(counts.brands, 0);
        assert_eq!(counts.cards()[3], ("Drive Types Available", 1));
    }

    #[tokio::test]
    async fn test_one_failure_fails_the_panel() {
        let err = dashboard(Some("/driving-types")).counts().await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }
}
