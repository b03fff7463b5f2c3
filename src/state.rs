//! Shared application state
//!
//! Este módulo define el estado compartido de la consola: un gateway, una
//! cache de consultas y un notificador, compartidos por todos los servicios.

use std::sync::Arc;

use tracing::info;

use crate::cache::{QueryCache, QueryCacheConfig};
use crate::clients::{ReqwestTransport, RestGateway, Transport};
use crate::config::environment::EnvironmentConfig;
use crate::services::{
    AppointmentService, BlogService, CatalogService, DashboardService, DealService,
    FleetAppointmentService, FleetNewsService, FleetSupportService, Notifier, TireService,
    TracingNotifier,
};
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct AppState {
    pub gateway: RestGateway,
    pub cache: Arc<QueryCache>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// Estado conectado al backend configurado, con notificaciones por tracing
    pub fn from_config(config: &EnvironmentConfig) -> AppResult<Self> {
        let transport = ReqwestTransport::new(&config.api_base_url, config.http_timeout)?;
        info!(
            "✅ Consola de flota apuntando a {} (timeout {:?})",
            config.api_base_url, config.http_timeout
        );
        Ok(Self::new(
            Arc::new(transport),
            config.query_cache.clone(),
            Arc::new(TracingNotifier),
        ))
    }

    pub fn new(
        transport: Arc<dyn Transport>,
        cache_config: QueryCacheConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            gateway: RestGateway::new(transport),
            cache: Arc::new(QueryCache::new(cache_config)),
            notifier,
        }
    }

    pub fn appointments(&self) -> FleetAppointmentService {
        FleetAppointmentService::new(self.gateway.clone(), self.cache.clone(), self.notifier.clone())
    }

    pub fn support(&self) -> FleetSupportService {
        FleetSupportService::new(self.gateway.clone(), self.cache.clone(), self.notifier.clone())
    }

    pub fn news(&self) -> FleetNewsService {
        FleetNewsService::new(self.gateway.clone(), self.cache.clone(), self.notifier.clone())
    }

    pub fn deals(&self) -> DealService {
        DealService::new(self.gateway.clone(), self.cache.clone())
    }

    pub fn catalog(&self) -> CatalogService {
        CatalogService::new(self.gateway.clone(), self.cache.clone())
    }

    pub fn customer_appointments(&self) -> AppointmentService {
        AppointmentService::new(self.gateway.clone(), self.cache.clone(), self.notifier.clone())
    }

    pub fn tires(&self) -> TireService {
        TireService::new(
            self.gateway.clone(),
            self.cache.clone(),
            self.notifier.clone(),
            self.catalog(),
        )
    }

    pub fn blogs(&self) -> BlogService {
        BlogService::new(self.gateway.clone(), self.cache.clone(), self.notifier.clone())
    }

    pub fn dashboard(&self) -> DashboardService {
        DashboardService::new(self.gateway.clone(), self.cache.clone(), self.catalog())
    }
}
