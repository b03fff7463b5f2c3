use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::utils::validation::validate_not_empty;

// Request para reservar una cita de cliente
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateAppointmentRequest {
    #[validate(custom = "validate_not_empty")]
    pub date: String,
    #[validate(custom = "validate_not_empty")]
    pub time: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

// Request para actualizar una cita de cliente (solo los campos enviados)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl UpdateAppointmentRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
