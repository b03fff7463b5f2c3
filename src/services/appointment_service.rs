//! Servicio de citas de clientes
//!
//! CRUD sobre `/appointments`. Los errores se notifican con el mensaje del
//! backend cuando lo hay.

use std::sync::Arc;

use serde::de::IgnoredAny;
use tracing::{debug, info};
use validator::Validate;

use super::notifier::Notifier;
use super::settle_mutation;
use crate::cache::{Mutation, QueryCache, QueryFamily, QueryKey};
use crate::clients::{Resource, RestGateway};
use crate::dto::{CreateAppointmentRequest, QueryParams, UpdateAppointmentRequest};
use crate::models::Appointment;
use crate::utils::errors::{require_id, validation_error, AppResult};

const APPOINTMENT_ID_REQUIRED: &str = "Appointment ID is required";

#[derive(Clone)]
pub struct AppointmentService {
    gateway: RestGateway,
    cache: Arc<QueryCache>,
    notifier: Arc<dyn Notifier>,
}

impl AppointmentService {
    pub fn new(gateway: RestGateway, cache: Arc<QueryCache>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            gateway,
            cache,
            notifier,
        }
    }

    pub async fn list(&self, params: &QueryParams) -> AppResult<Vec<Appointment>> {
        debug!("📋 Listando citas de clientes ({})", params);
        let gateway = &self.gateway;
        let key = QueryKey::new(QueryFamily::Appointments, params.to_string());
        self.cache
            .fetch(key, || async move {
                gateway
                    .list::<Appointment>(Resource::Appointments, params)
                    .await
                    .map(|response| response.data)
            })
            .await
    }

    pub async fn get(&self, id: &str) -> AppResult<Appointment> {
        require_id(id, APPOINTMENT_ID_REQUIRED)?;
        let gateway = &self.gateway;
        self.cache
            .fetch(QueryKey::new(QueryFamily::SingleAppointment, id), || async move {
                gateway
                    .get::<Appointment>(Resource::Appointments, id)
                    .await
                    .map(|response| response.data)
            })
            .await
    }

    pub async fn create(&self, request: &CreateAppointmentRequest) -> AppResult<Appointment> {
        request.validate()?;
        info!("📝 Creando cita para {} {}", request.date, request.time);

        let result = self
            .gateway
            .create::<_, Appointment>(Resource::Appointments, request)
            .await;
        settle_mutation(
            &self.cache,
            self.notifier.as_ref(),
            result,
            Mutation::CreateAppointment,
            "Appointment created successfully!",
            "Failed to create appointment",
        )
        .await
    }

    pub async fn update(&self, id: &str, request: &UpdateAppointmentRequest) -> AppResult<Appointment> {
        require_id(id, APPOINTMENT_ID_REQUIRED)?;
        if request.is_empty() {
            return Err(validation_error("fields", "Nothing to update"));
        }
        info!("📝 Actualizando cita {}", id);

        let result = self
            .gateway
            .update::<_, Appointment>(Resource::Appointments, id, request)
            .await;
        settle_mutation(
            &self.cache,
            self.notifier.as_ref(),
            result,
            Mutation::UpdateAppointment { id: id.to_string() },
            "Appointment updated successfully!",
            "Failed to update appointment",
        )
        .await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        require_id(id, APPOINTMENT_ID_REQUIRED)?;
        info!("🗑️ Eliminando cita {}", id);

        let result = self.gateway.remove(Resource::Appointments, id).await;
        settle_mutation(
            &self.cache,
            self.notifier.as_ref(),
            result,
            Mutation::DeleteAppointment { id: id.to_string() },
            "Appointment deleted successfully!",
            "Failed to delete appointment",
        )
        .await
        .map(|_: Option<IgnoredAny>| ())
    }
}
