use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{CatalogEntry, CatalogResource, CatalogRef, Tire};
use crate::utils::validation::validate_not_empty;

/// Campos de rango de texto libre aceptados por el backend
pub const TIRE_RANGE_FIELDS: [&str; 16] = [
    "grossWeightRange",
    "gtinRange",
    "loadIndexRange",
    "mileageWarrantyRange",
    "maxAirPressureRange",
    "speedRatingRange",
    "sidewallDescriptionRange",
    "temperatureGradeRange",
    "sectionWidthRange",
    "wheelRimDiameterRange",
    "tractionGradeRange",
    "treadDepthRange",
    "treadWidthRange",
    "overallWidthRange",
    "treadwearGradeRange",
    "aspectRatioRange",
];

// Request para crear o actualizar una llanta.
// Las selecciones de catálogo van como ids; vacío = sin selección.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct TireRequest {
    #[validate(custom = "validate_not_empty")]
    pub name: String,
    pub description: String,
    pub product_line: String,
    pub unit_name: String,
    pub condition_info: String,
    pub tread_pattern: String,
    pub tire_type: String,
    pub construction_type: String,
    pub load_range: String,
    pub warranty: String,

    pub make: String,
    pub model: String,
    pub year: String,
    pub trim: String,
    pub category: String,
    pub driving_type: String,
    pub brand: String,
    pub vehicle_type: String,
    pub tire_size: String,
    pub width: String,
    pub ratio: String,
    pub diameter: String,

    #[validate(range(min = 0.0, message = "Section Width must be a positive number"))]
    pub section_width: f64,
    #[validate(range(min = 0.0, message = "Overall Diameter must be a positive number"))]
    pub overall_diameter: f64,
    #[validate(range(min = 0.0, message = "Rim Width Range must be a positive number"))]
    pub rim_width_range: f64,
    #[validate(range(min = 0.0, message = "Tread Depth must be a positive number"))]
    pub tread_depth: f64,
    #[validate(range(min = 0.0, message = "Load Index must be a positive number"))]
    pub load_index: f64,
    #[serde(rename = "maxPSI")]
    #[validate(range(min = 0.0, message = "Max PSI must be a positive number"))]
    pub max_psi: f64,
    #[validate(range(min = 0.0, message = "Load Capacity must be a positive number"))]
    pub load_capacity: f64,
    #[validate(range(min = 0.0, message = "Price must be a positive number"))]
    pub price: f64,
    #[validate(range(min = 0.0, message = "Discount Price must be a positive number"))]
    pub discount_price: f64,
    pub stock_quantity: u32,

    #[serde(flatten)]
    pub ranges: BTreeMap<String, String>,
    pub images: Vec<String>,
}

/// Una selección del formulario: campo, recurso de catálogo y si es obligatoria
struct Selection<'a> {
    field: &'static str,
    resource: CatalogResource,
    value: &'a str,
    required: Option<&'static str>,
}

impl<'a> Selection<'a> {
    fn new(
        field: &'static str,
        resource: CatalogResource,
        value: &'a str,
        required: Option<&'static str>,
    ) -> Self {
        Self {
            field,
            resource,
            value,
            required,
        }
    }
}

impl TireRequest {
    fn selections(&self) -> [Selection<'_>; 12] {
        use CatalogResource::*;
        [
            Selection::new("make", Makes, &self.make, Some("Select Make")),
            Selection::new("year", Years, &self.year, Some("Select Year")),
            Selection::new("model", Models, &self.model, Some("Select Model")),
            Selection::new("trim", Trims, &self.trim, None),
            Selection::new("category", Categories, &self.category, None),
            Selection::new("driving_type", DrivingTypes, &self.driving_type, None),
            Selection::new("tire_size", TireSizes, &self.tire_size, Some("Select Tyre Size")),
            Selection::new("brand", Brands, &self.brand, Some("Select Brand")),
            Selection::new("vehicle_type", VehicleTypes, &self.vehicle_type, None),
            Selection::new("width", TireWidths, &self.width, None),
            Selection::new("ratio", TireRatios, &self.ratio, None),
            Selection::new("diameter", TireDiameters, &self.diameter, None),
        ]
    }

    /// Cada selección debe existir en su catálogo; las obligatorias no pueden ir vacías
    pub fn check_selections(&self, options: &TireFormOptions) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for selection in self.selections() {
            let message = if selection.value.trim().is_empty() {
                selection.required
            } else if !options.contains(selection.resource, selection.value) {
                Some("Select a valid option")
            } else {
                None
            };

            if let Some(message) = message {
                let mut error = ValidationError::new("selection");
                error.message = Some(Cow::Borrowed(message));
                errors.add(selection.field, error);
            }
        }

        for key in self.ranges.keys() {
            if !TIRE_RANGE_FIELDS.contains(&key.as_str()) {
                let mut error = ValidationError::new("unknown_range");
                error.message = Some(Cow::Owned(format!("Unknown range field '{}'", key)));
                errors.add("ranges", error);
            }
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Las selecciones vacías conservan el valor de la llanta existente
    pub fn fill_from(&mut self, existing: &Tire) {
        let keep = |target: &mut String, current: &Option<CatalogRef>| {
            if target.trim().is_empty() {
                if let Some(reference) = current {
                    *target = reference.id().to_string();
                }
            }
        };
        keep(&mut self.make, &existing.make);
        keep(&mut self.model, &existing.model);
        keep(&mut self.year, &existing.year);
        keep(&mut self.trim, &existing.trim);
        keep(&mut self.category, &existing.category);
        keep(&mut self.driving_type, &existing.driving_type);
        keep(&mut self.brand, &existing.brand);
        keep(&mut self.vehicle_type, &existing.vehicle_type);
        keep(&mut self.tire_size, &existing.tire_size);
        keep(&mut self.width, &existing.width);
        keep(&mut self.ratio, &existing.ratio);
        keep(&mut self.diameter, &existing.diameter);

        if self.images.is_empty() {
            self.images = existing.images.clone();
        }
    }
}

/// Opciones de los selectores del formulario de llantas, por recurso
#[derive(Debug, Clone, Default)]
pub struct TireFormOptions {
    entries: HashMap<CatalogResource, Vec<CatalogEntry>>,
}

impl TireFormOptions {
    /// Recursos que alimentan los selectores
    pub const RESOURCES: [CatalogResource; 12] = [
        CatalogResource::Makes,
        CatalogResource::Years,
        CatalogResource::Models,
        CatalogResource::Trims,
        CatalogResource::Categories,
        CatalogResource::DrivingTypes,
        CatalogResource::TireSizes,
        CatalogResource::Brands,
        CatalogResource::VehicleTypes,
        CatalogResource::TireWidths,
        CatalogResource::TireRatios,
        CatalogResource::TireDiameters,
    ];

    pub fn insert(&mut self, resource: CatalogResource, entries: Vec<CatalogEntry>) {
        self.entries.insert(resource, entries);
    }

    pub fn contains(&self, resource: CatalogResource, id: &str) -> bool {
        self.entries
            .get(&resource)
            .map(|entries| entries.iter().any(|entry| entry.id == id))
            .unwrap_or(false)
    }

    /// Pares (id, etiqueta) en el orden del backend
    pub fn options(&self, resource: CatalogResource) -> Vec<(String, String)> {
        self.entries
            .get(&resource)
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| (entry.id.clone(), entry.label(resource)))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use serde_json::json;

    fn entry(id: &str) -> CatalogEntry {
        serde_json::from_value(json!({ "_id": id, "name": id })).unwrap()
    }

    pub fn options() -> TireFormOptions {
        let mut options = TireFormOptions::default();
        for resource in TireFormOptions::RESOURCES {
            let prefix = resource.name();
            options.insert(resource, vec![entry(&format!("{prefix}-1")), entry(&format!("{prefix}-2"))]);
        }
        options
    }

    pub fn request() -> TireRequest {
        TireRequest {
            name: "Defender LTX".to_string(),
            make: "makes-1".to_string(),
            year: "years-1".to_string(),
            model: "models-1".to_string(),
            tire_size: "tire-sizes-1".to_string(),
            brand: "brands-1".to_string(),
            price: 189.99,
            stock_quantity: 12,
            ..Default::default()
        }
    }
}
