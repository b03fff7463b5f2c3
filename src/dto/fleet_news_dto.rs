use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::validation::validate_not_empty;

// Request para publicar una noticia de flota
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFleetNewsRequest {
    #[validate(custom = "validate_not_empty")]
    pub title: String,
    #[validate(custom = "validate_not_empty")]
    pub description: String,
    #[serde(default)]
    pub badge: String,
    #[serde(default)]
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

// Request para actualizar una noticia de flota
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFleetNewsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_not_empty")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_not_empty")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
