use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::fleet_appointment::{AppointmentStatus, FleetRef};
use crate::utils::validation::{validate_email_pattern, validate_not_empty, validate_phone_required};

// Request para reservar una cita de flota
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFleetAppointmentRequest {
    #[validate(custom = "validate_not_empty")]
    pub fleet_vehicle: String,
    #[validate(custom = "validate_not_empty")]
    pub service_type: String,
    #[validate(custom = "validate_not_empty")]
    pub date: String,
    #[validate(custom = "validate_not_empty")]
    pub time: String,
    #[validate(custom = "validate_not_empty")]
    pub address: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub files: Vec<String>,
}

// Request para actualizar una cita de flota (solo los campos enviados)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFleetAppointmentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_not_empty")]
    pub service_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_not_empty")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_not_empty")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_not_empty")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
}

// Request para cambiar solo el estado
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}

/// Formulario de asignación de contacto de flota.
///
/// Se pre-carga con el `fleetRef` existente al abrir la edición.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct AssignFleetRefRequest {
    #[validate(custom = "validate_phone_required")]
    pub phone: String,
    #[validate(custom = "validate_email_pattern")]
    pub email: String,
    #[serde(default)]
    pub note: String,
}

impl AssignFleetRefRequest {
    pub fn new(phone: impl Into<String>, email: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            email: email.into(),
            note: note.into(),
        }
    }

    /// Valores iniciales del formulario de edición
    pub fn from_existing(existing: Option<&FleetRef>) -> Self {
        match existing {
            Some(fleet_ref) => Self {
                phone: fleet_ref.phone.clone(),
                email: fleet_ref.email.clone(),
                note: fleet_ref.note.clone().unwrap_or_default(),
            },
            None => Self::default(),
        }
    }

    pub fn to_fleet_ref(&self) -> FleetRef {
        FleetRef {
            phone: self.phone.trim().to_string(),
            email: self.email.clone(),
            note: Some(self.note.clone()),
        }
    }
}

/// Cuerpo enviado a `POST /fleet-appointments/fleet-ref/:id`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignFleetRefBody {
    pub fleet_ref: FleetRef,
}

impl From<&AssignFleetRefRequest> for AssignFleetRefBody {
    fn from(request: &AssignFleetRefRequest) -> Self {
        Self {
            fleet_ref: request.to_fleet_ref(),
        }
    }
}
