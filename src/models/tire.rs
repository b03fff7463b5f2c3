//! Modelo de Tire
//!
//! Producto de llanta del storefront. Cada selección de taxonomía (marca,
//! modelo, año, medida...) llega como id o como documento poblado, según el
//! endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::catalog::CatalogEntry;

/// Referencia a una entrada del catálogo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogRef {
    Id(String),
    Entry(CatalogEntry),
}

impl CatalogRef {
    pub fn id(&self) -> &str {
        match self {
            CatalogRef::Id(id) => id,
            CatalogRef::Entry(entry) => &entry.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tire {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make: Option<CatalogRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<CatalogRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<CatalogRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim: Option<CatalogRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CatalogRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driving_type: Option<CatalogRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<CatalogRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<CatalogRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tire_size: Option<CatalogRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<CatalogRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<CatalogRef>,
    #[serde(default, alias = "rimDiameter", skip_serializing_if = "Option::is_none")]
    pub diameter: Option<CatalogRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<u32>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Medidas, rangos y demás campos descriptivos
    #[serde(flatten)]
    pub specs: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_refs_accept_ids_and_populated_entries() {
        let tire: Tire = serde_json::from_value(json!({
            "_id": "t1",
            "name": "Defender LTX",
            "brand": { "_id": "b1", "name": "Michelin" },
            "make": "m1",
            "rimDiameter": "d17",
            "price": 189.99,
            "stockQuantity": 12,
            "treadPattern": "Symmetric",
            "maxPSI": 50
        }))
        .unwrap();

        assert_eq!(tire.brand.as_ref().map(CatalogRef::id), Some("b1"));
        assert_eq!(tire.make.as_ref().map(CatalogRef::id), Some("m1"));
        assert_eq!(tire.diameter.as_ref().map(CatalogRef::id), Some("d17"));
        assert_eq!(tire.stock_quantity, Some(12));
        assert_eq!(tire.specs["treadPattern"], json!("Symmetric"));
        assert_eq!(tire.specs["maxPSI"], json!(50));
    }
}
