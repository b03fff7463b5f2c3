//! Servicio de soporte de flota
//!
//! Cola de asignación: las mismas citas de flota, vistas con su estado
//! derivado, y la asignación del contacto de flota (`fleetRef`).

use std::sync::Arc;

use serde::de::IgnoredAny;
use tracing::{debug, info};
use validator::Validate;

use super::notifier::Notifier;
use super::settle_mutation;
use crate::cache::{Mutation, QueryCache, QueryFamily, QueryKey};
use crate::clients::{Resource, RestGateway};
use crate::dto::{AssignFleetRefBody, AssignFleetRefRequest, QueryParams};
use crate::models::{FleetAppointment, SupportRequest};
use crate::utils::errors::{require_id, AppResult};

#[derive(Clone)]
pub struct FleetSupportService {
    gateway: RestGateway,
    cache: Arc<QueryCache>,
    notifier: Arc<dyn Notifier>,
}

impl FleetSupportService {
    pub fn new(gateway: RestGateway, cache: Arc<QueryCache>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            gateway,
            cache,
            notifier,
        }
    }

    /// `GET /fleet-appointments` proyectado a solicitudes de soporte
    pub async fn list_support_requests(&self) -> AppResult<Vec<SupportRequest>> {
        debug!("📋 Listando solicitudes de soporte");
        let gateway = &self.gateway;
        let appointments: Vec<FleetAppointment> = self
            .cache
            .fetch(QueryKey::of(QueryFamily::SupportRequests), || async move {
                let params = QueryParams::new();
                gateway
                    .list::<FleetAppointment>(Resource::FleetAppointments, &params)
                    .await
                    .map(|response| response.data)
            })
            .await?;
        Ok(appointments.into_iter().map(SupportRequest::from).collect())
    }

    /// `POST /fleet-appointments/fleet-ref/:id`; reemplaza el contacto existente.
    ///
    /// Teléfono y email inválidos se rechazan sin llamada de red.
    pub async fn assign(&self, appointment_id: &str, request: &AssignFleetRefRequest) -> AppResult<()> {
        request.validate()?;
        require_id(appointment_id, "Appointment ID is required")?;
        info!("📞 Asignando contacto de flota a la cita {}", appointment_id);

        let result = self
            .gateway
            .post_at::<_, Option<IgnoredAny>>(
                Resource::FleetAppointments,
                &["fleet-ref", appointment_id],
                &AssignFleetRefBody::from(request),
            )
            .await;
        settle_mutation(
            &self.cache,
            self.notifier.as_ref(),
            result,
            Mutation::AssignFleetRef {
                id: appointment_id.to_string(),
            },
            "Fleet reference assigned",
            "Error assigning fleet reference",
        )
        .await
        .map(|_| ())
    }

    /// Valores iniciales del formulario de edición para una solicitud
    pub fn edit_form(&self, request: &SupportRequest) -> AssignFleetRefRequest {
        AssignFleetRefRequest::from_existing(request.fleet_ref())
    }
}
