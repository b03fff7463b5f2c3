//! Modelo de FleetVehicle
//!
//! Snapshot del vehículo de flota tal como viene embebido en cada cita.
//! El registro de vehículos es externo; aquí solo se lee.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::catalog::CatalogValue;

/// Vehículo de flota - mapea exactamente al objeto `fleetVehicle` del backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetVehicle {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(deserialize_with = "text_or_number")]
    pub year: String,
    pub make: String,
    pub model: String,
    pub vin: String,
    pub license_plate: String,
    pub tire_size: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Algunos backends envían el año como número
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    CatalogValue::deserialize(deserializer).map(|value| value.to_string())
}

impl FleetVehicle {
    /// "2021 Toyota Tacoma"
    pub fn display_name(&self) -> String {
        [self.year.as_str(), self.make.as_str(), self.model.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ")
    }
}
