//! Taxonomías del catálogo de llantas
//!
//! Marcas, modelos, años, trims, categorías, tipos de tracción, marcas de
//! llanta y medidas.
//! Todas son de solo lectura y cada recurso nombra su etiqueta con un campo
//! distinto (`make`, `model`, `year`, `name`, `width`...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Recursos de taxonomía expuestos por el backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CatalogResource {
    Makes,
    Models,
    Years,
    Trims,
    Categories,
    DrivingTypes,
    Brands,
    TireSizes,
    VehicleTypes,
    TireWidths,
    TireRatios,
    TireDiameters,
}

impl CatalogResource {
    pub const ALL: [CatalogResource; 12] = [
        CatalogResource::Makes,
        CatalogResource::Models,
        CatalogResource::Years,
        CatalogResource::Trims,
        CatalogResource::Categories,
        CatalogResource::DrivingTypes,
        CatalogResource::Brands,
        CatalogResource::TireSizes,
        CatalogResource::VehicleTypes,
        CatalogResource::TireWidths,
        CatalogResource::TireRatios,
        CatalogResource::TireDiameters,
    ];

    /// Ruta REST del recurso
    pub fn path(&self) -> &'static str {
        match self {
            CatalogResource::Makes => "/makes",
            CatalogResource::Models => "/models",
            CatalogResource::Years => "/years",
            CatalogResource::Trims => "/trims",
            CatalogResource::Categories => "/categories",
            CatalogResource::DrivingTypes => "/driving-types",
            CatalogResource::Brands => "/brands",
            CatalogResource::TireSizes => "/tire-sizes",
            CatalogResource::VehicleTypes => "/vehicle-types",
            CatalogResource::TireWidths => "/tire-width",
            CatalogResource::TireRatios => "/tire-ratio",
            CatalogResource::TireDiameters => "/tire-diameter",
        }
    }

    pub fn name(&self) -> &'static str {
        self.path().trim_start_matches('/')
    }
}

impl fmt::Display for CatalogResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CatalogResource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CatalogResource::ALL
            .iter()
            .copied()
            .find(|resource| resource.name() == s)
            .ok_or_else(|| format!("unknown catalog resource '{}'", s))
    }
}

/// Valor de etiqueta: texto o número según el recurso
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogValue {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for CatalogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogValue::Text(text) => f.write_str(text),
            CatalogValue::Number(number) => write!(f, "{}", number),
        }
    }
}

/// Entrada de taxonomía con los campos de etiqueta conocidos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<CatalogValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make: Option<CatalogValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<CatalogValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<CatalogValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim: Option<CatalogValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tire_size: Option<CatalogValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<CatalogValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<CatalogValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<CatalogValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter: Option<CatalogValue>,
}

impl CatalogEntry {
    /// Etiqueta a mostrar según el recurso; cae a `name` y luego al id
    pub fn label(&self, resource: CatalogResource) -> String {
        let field = match resource {
            CatalogResource::Makes => &self.make,
            CatalogResource::Models => &self.model,
            CatalogResource::Years => &self.year,
            CatalogResource::Trims => &self.trim,
            CatalogResource::Categories
            | CatalogResource::DrivingTypes
            | CatalogResource::Brands => &self.name,
            CatalogResource::TireSizes => &self.tire_size,
            CatalogResource::VehicleTypes => &self.vehicle_type,
            CatalogResource::TireWidths => &self.width,
            CatalogResource::TireRatios => &self.ratio,
            CatalogResource::TireDiameters => &self.diameter,
        };

        field
            .as_ref()
            .or(self.name.as_ref())
            .map(|value| value.to_string())
            .unwrap_or_else(|| self.id.clone())
    }
}
