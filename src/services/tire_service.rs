//! Servicio de llantas
//!
//! Alta y edición de productos de llanta. Las selecciones del formulario se
//! validan contra las taxonomías del catálogo antes de enviar nada: una marca,
//! medida o año que el catálogo no conoce es un error de campo.

use std::sync::Arc;

use serde::de::IgnoredAny;
use tracing::{debug, info};
use validator::Validate;

use super::catalog_service::CatalogService;
use super::notifier::Notifier;
use super::settle_mutation;
use crate::cache::{Mutation, QueryCache, QueryFamily, QueryKey};
use crate::clients::{Resource, RestGateway};
use crate::dto::{QueryParams, TireFormOptions, TireRequest};
use crate::models::Tire;
use crate::utils::errors::{require_id, AppError, AppResult};

const TIRE_ID_REQUIRED: &str = "Tire ID is required";

#[derive(Clone)]
pub struct TireService {
    gateway: RestGateway,
    cache: Arc<QueryCache>,
    notifier: Arc<dyn Notifier>,
    catalog: CatalogService,
}

impl TireService {
    pub fn new(
        gateway: RestGateway,
        cache: Arc<QueryCache>,
        notifier: Arc<dyn Notifier>,
        catalog: CatalogService,
    ) -> Self {
        Self {
            gateway,
            cache,
            notifier,
            catalog,
        }
    }

    pub async fn list(&self, params: &QueryParams) -> AppResult<Vec<Tire>> {
        debug!("🛞 Listando llantas ({})", params);
        let gateway = &self.gateway;
        let key = QueryKey::new(QueryFamily::Tires, params.to_string());
        self.cache
            .fetch(key, || async move {
                gateway
                    .list::<Tire>(Resource::Tires, params)
                    .await
                    .map(|response| response.data)
            })
            .await
    }

    pub async fn get(&self, id: &str) -> AppResult<Tire> {
        require_id(id, TIRE_ID_REQUIRED)?;
        let gateway = &self.gateway;
        self.cache
            .fetch(QueryKey::new(QueryFamily::SingleTire, id), || async move {
                gateway
                    .get::<Tire>(Resource::Tires, id)
                    .await
                    .map(|response| response.data)
            })
            .await
    }

    /// Opciones de todos los selectores, pedidas en paralelo
    pub async fn form_options(&self) -> AppResult<TireFormOptions> {
        let pages = self
            .catalog
            .list_many(&TireFormOptions::RESOURCES, &QueryParams::new())
            .await?;

        let mut options = TireFormOptions::default();
        for (resource, page) in TireFormOptions::RESOURCES.iter().zip(pages) {
            options.insert(*resource, page.entries);
        }
        Ok(options)
    }

    pub async fn create(&self, request: &TireRequest) -> AppResult<Tire> {
        request.validate()?;
        let options = self.form_options().await?;
        request
            .check_selections(&options)
            .map_err(AppError::Validation)?;
        info!("🛞 Creando llanta: {}", request.name);

        let result = self.gateway.create::<_, Tire>(Resource::Tires, request).await;
        settle_mutation(
            &self.cache,
            self.notifier.as_ref(),
            result,
            Mutation::CreateTire,
            "Tire created successfully",
            "Failed to create tire",
        )
        .await
    }

    /// Las selecciones vacías conservan las de la llanta actual
    pub async fn update(&self, id: &str, request: &TireRequest) -> AppResult<Tire> {
        require_id(id, TIRE_ID_REQUIRED)?;
        request.validate()?;

        let existing = self.get(id).await?;
        let mut request = request.clone();
        request.fill_from(&existing);

        let options = self.form_options().await?;
        request
            .check_selections(&options)
            .map_err(AppError::Validation)?;
        info!("🛞 Actualizando llanta {}", id);

        let result = self
            .gateway
            .update::<_, Tire>(Resource::Tires, id, &request)
            .await;
        settle_mutation(
            &self.cache,
            self.notifier.as_ref(),
            result,
            Mutation::UpdateTire { id: id.to_string() },
            "Tire updated successfully",
            "Failed to update tire",
        )
        .await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        require_id(id, TIRE_ID_REQUIRED)?;
        info!("🗑️ Eliminando llanta {}", id);

        let result = self.gateway.remove(Resource::Tires, id).await;
        settle_mutation(
            &self.cache,
            self.notifier.as_ref(),
            result,
            Mutation::DeleteTire { id: id.to_string() },
            "Tire deleted successfully",
            "Failed to delete tire",
        )
        .await
        .map(|_: Option<IgnoredAny>| ())
    }
}
