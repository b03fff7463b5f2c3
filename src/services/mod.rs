//! Services module
//!
//! Este módulo contiene la lógica de negocio de la consola: consultas en cache
//! y mutaciones que notifican e invalidan.

pub mod appointment_service;
pub mod blog_service;
pub mod catalog_service;
pub mod dashboard_service;
pub mod deal_service;
pub mod fleet_appointment_service;
pub mod fleet_news_service;
pub mod fleet_support_service;
pub mod notifier;
pub mod tire_service;

pub use appointment_service::AppointmentService;
pub use blog_service::BlogService;
pub use catalog_service::{CatalogPage, CatalogService};
pub use dashboard_service::{DashboardCounts, DashboardService};
pub use deal_service::DealService;
pub use fleet_appointment_service::FleetAppointmentService;
pub use fleet_news_service::FleetNewsService;
pub use fleet_support_service::FleetSupportService;
pub use notifier::{Notification, Notifier, RecordingNotifier, TracingNotifier};
pub use tire_service::TireService;

use tracing::{info, warn};

use crate::cache::{Mutation, QueryCache};
use crate::dto::ApiResponse;
use crate::utils::errors::AppResult;

/// Cierra una mutación: en éxito invalida y notifica, en fallo solo notifica.
///
/// Los errores de validación nunca llegan aquí.
pub(crate) async fn settle_mutation<T>(
    cache: &QueryCache,
    notifier: &dyn Notifier,
    result: AppResult<ApiResponse<T>>,
    mutation: Mutation,
    success: &str,
    failure: &str,
) -> AppResult<T> {
    match result {
        Ok(response) => {
            info!("✅ {} completada", mutation.name());
            cache.apply(&mutation).await;
            notifier.success(success);
            Ok(response.data)
        }
        Err(e) => {
            warn!("❌ {} falló: {}", mutation.name(), e);
            notifier.error(&e.user_message(failure));
            Err(e)
        }
    }
}
