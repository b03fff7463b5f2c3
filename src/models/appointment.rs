//! Modelo de Appointment (citas de clientes del storefront)
//!
//! El backend no publica un esquema cerrado para estas citas: se conservan
//! los campos comunes y el resto se guarda tal como llega.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Appointment {
    /// Campo adicional como texto, si existe
    pub fn detail(&self, field: &str) -> Option<String> {
        match self.details.get(field)? {
            Value::String(text) => Some(text.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}
