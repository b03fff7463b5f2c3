//! Servicio de citas de flota
//!
//! Lecturas en cache y mutaciones (crear, actualizar, cambiar estado, borrar)
//! que notifican al operador e invalidan las consultas afectadas.

use std::sync::Arc;

use serde::de::IgnoredAny;
use tracing::{debug, info};
use validator::Validate;

use super::notifier::Notifier;
use super::settle_mutation;
use crate::cache::{Mutation, QueryCache, QueryFamily, QueryKey};
use crate::clients::{Resource, RestGateway};
use crate::dto::{
    CreateFleetAppointmentRequest, QueryParams, UpdateFleetAppointmentRequest, UpdateStatusRequest,
};
use crate::models::{AppointmentStatus, FleetAppointment};
use crate::utils::errors::{require_id, AppResult};

const APPOINTMENT_ID_REQUIRED: &str = "Appointment ID is required";
const VEHICLE_ID_REQUIRED: &str = "Vehicle ID is required";

#[derive(Clone)]
pub struct FleetAppointmentService {
    gateway: RestGateway,
    cache: Arc<QueryCache>,
    notifier: Arc<dyn Notifier>,
}

impl FleetAppointmentService {
    pub fn new(gateway: RestGateway, cache: Arc<QueryCache>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            gateway,
            cache,
            notifier,
        }
    }

    /// `GET /fleet-appointments`, en el orden del backend
    pub async fn list(&self, params: &QueryParams) -> AppResult<Vec<FleetAppointment>> {
        debug!("📋 Listando citas de flota ({})", params);
        let gateway = &self.gateway;
        let key = QueryKey::new(QueryFamily::AllFleetAppointments, params.to_string());
        self.cache
            .fetch(key, || async move {
                gateway
                    .list::<FleetAppointment>(Resource::FleetAppointments, params)
                    .await
                    .map(|response| response.data)
            })
            .await
    }

    /// `GET /fleet-appointments/:id`
    pub async fn get(&self, id: &str) -> AppResult<FleetAppointment> {
        require_id(id, APPOINTMENT_ID_REQUIRED)?;
        let gateway = &self.gateway;
        let key = QueryKey::new(QueryFamily::SingleFleetAppointment, id);
        self.cache
            .fetch(key, || async move {
                gateway
                    .get::<FleetAppointment>(Resource::FleetAppointments, id)
                    .await
                    .map(|response| response.data)
            })
            .await
    }

    /// `GET /fleet-appointments/vehicle/:vehicleId`
    pub async fn get_by_vehicle(&self, vehicle_id: &str) -> AppResult<Vec<FleetAppointment>> {
        require_id(vehicle_id, VEHICLE_ID_REQUIRED)?;
        let gateway = &self.gateway;
        let key = QueryKey::new(QueryFamily::AppointmentsByVehicle, vehicle_id);
        self.cache
            .fetch(key, || async move {
                let params = QueryParams::new();
                gateway
                    .list_at::<FleetAppointment>(
                        Resource::FleetAppointments,
                        &["vehicle", vehicle_id],
                        &params,
                    )
                    .await
                    .map(|response| response.data)
            })
            .await
    }

    /// `GET /fleet-appointments/upcoming`; la ventana de fechas la decide el backend
    pub async fn get_upcoming(&self, params: &QueryParams) -> AppResult<Vec<FleetAppointment>> {
        let gateway = &self.gateway;
        let key = QueryKey::new(QueryFamily::UpcomingFleetAppointments, params.to_string());
        self.cache
            .fetch(key, || async move {
                gateway
                    .list_at::<FleetAppointment>(Resource::FleetAppointments, &["upcoming"], params)
                    .await
                    .map(|response| response.data)
            })
            .await
    }

    /// `POST /fleet-appointments`
    pub async fn create(
        &self,
        request: &CreateFleetAppointmentRequest,
    ) -> AppResult<FleetAppointment> {
        request.validate()?;
        info!("📝 Creando cita de flota para vehículo {}", request.fleet_vehicle);

        let result = self
            .gateway
            .create::<_, FleetAppointment>(Resource::FleetAppointments, request)
            .await;
        settle_mutation(
            &self.cache,
            self.notifier.as_ref(),
            result,
            Mutation::CreateFleetAppointment,
            "Fleet appointment created successfully!",
            "Failed to create fleet appointment",
        )
        .await
    }

    /// `PATCH /fleet-appointments/:id`, solo con los campos presentes
    pub async fn update(
        &self,
        id: &str,
        request: &UpdateFleetAppointmentRequest,
    ) -> AppResult<FleetAppointment> {
        require_id(id, APPOINTMENT_ID_REQUIRED)?;
        request.validate()?;
        info!("📝 Actualizando cita de flota {}", id);

        let result = self
            .gateway
            .update::<_, FleetAppointment>(Resource::FleetAppointments, id, request)
            .await;
        settle_mutation(
            &self.cache,
            self.notifier.as_ref(),
            result,
            Mutation::UpdateFleetAppointment { id: id.to_string() },
            "Fleet appointment updated successfully!",
            "Failed to update fleet appointment",
        )
        .await
    }

    /// `PATCH /fleet-appointments/:id` con solo `{ status }`.
    ///
    /// Cualquier estado es aceptado; sin actualización optimista.
    pub async fn update_status(&self, id: &str, status: AppointmentStatus) -> AppResult<()> {
        require_id(id, APPOINTMENT_ID_REQUIRED)?;
        info!("🔄 Cambiando estado de la cita {} a {}", id, status);

        let result = self
            .gateway
            .update::<_, Option<IgnoredAny>>(
                Resource::FleetAppointments,
                id,
                &UpdateStatusRequest { status },
            )
            .await;
        settle_mutation(
            &self.cache,
            self.notifier.as_ref(),
            result,
            Mutation::UpdateAppointmentStatus { id: id.to_string() },
            "Appointment status updated successfully!",
            "Failed to update appointment status",
        )
        .await
        .map(|_| ())
    }

    /// `DELETE /fleet-appointments/:id`; permanente
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        require_id(id, APPOINTMENT_ID_REQUIRED)?;
        info!("🗑️ Eliminando cita de flota {}", id);

        let result = self.gateway.remove(Resource::FleetAppointments, id).await;
        settle_mutation(
            &self.cache,
            self.notifier.as_ref(),
            result,
            Mutation::DeleteFleetAppointment { id: id.to_string() },
            "Fleet appointment deleted successfully!",
            "Failed to delete fleet appointment",
        )
        .await
        .map(|_| ())
    }
}
