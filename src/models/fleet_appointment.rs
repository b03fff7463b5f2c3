//! Modelo de FleetAppointment
//!
//! Una visita de servicio programada para un vehículo de flota, con su estado
//! y el contacto de flota (`fleetRef`) asignado opcionalmente.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::vehicle::FleetVehicle;

/// Estado de la cita. Cualquier estado es alcanzable desde cualquier otro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 5] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::InProgress,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
    ];

    /// Literal exacto que usa el backend
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::InProgress => "In Progress",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }

    /// Sin guardas: siempre `true`
    pub fn can_transition_to(&self, _next: AppointmentStatus) -> bool {
        true
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Error al interpretar un literal de estado desconocido
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown appointment status '{}' (expected one of: Pending, Confirmed, In Progress, Completed, Cancelled)",
            self.0
        )
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for AppointmentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppointmentStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Contacto de flota asignado a la cita. Se reemplaza completo en cada asignación.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetRef {
    pub phone: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Cita de flota - mapea al documento `fleet-appointments` del backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetAppointment {
    #[serde(rename = "_id")]
    pub id: String,
    pub fleet_vehicle: FleetVehicle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fleet_ref: Option<FleetRef>,
    pub service_type: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub files: Vec<String>,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl FleetAppointment {
    pub fn has_fleet_ref(&self) -> bool {
        self.fleet_ref.is_some()
    }

    pub fn belongs_to_vehicle(&self, vehicle_id: &str) -> bool {
        self.fleet_vehicle.id == vehicle_id
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn vehicle(id: &str, make: &str, model: &str, plate: &str) -> FleetVehicle {
        FleetVehicle {
            id: id.to_string(),
            year: "2022".to_string(),
            make: make.to_string(),
            model: model.to_string(),
            vin: format!("VIN{id}"),
            license_plate: plate.to_string(),
            tire_size: "225/65R17".to_string(),
            note: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn appointment(id: &str, make: &str, status: AppointmentStatus) -> FleetAppointment {
        FleetAppointment {
            id: id.to_string(),
            fleet_vehicle: vehicle(&format!("veh-{id}"), make, "Model", &format!("PLT-{id}")),
            fleet_ref: None,
            service_type: "Tire Rotation".to_string(),
            date: "2025-06-01".to_string(),
            time: "09:00".to_string(),
            address: "12 Depot Road".to_string(),
            notes: String::new(),
            files: Vec::new(),
            status,
            created_at: None,
            updated_at: None,
        }
    }
}
