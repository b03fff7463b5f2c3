use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::errors::{validation_error, AppResult};
use crate::utils::validation::validate_not_empty;

// Request para publicar un blog
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateBlogRequest {
    #[validate(custom = "validate_not_empty")]
    pub title: String,
    #[validate(custom = "validate_not_empty")]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CreateBlogRequest {
    /// Validación de campos más la imagen obligatoria
    pub fn check(&self) -> AppResult<()> {
        self.validate()?;
        match self.image.as_deref() {
            Some(image) if !image.trim().is_empty() => Ok(()),
            _ => Err(validation_error("image", "Blog image is required")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_image_is_required() {
        let mut request = CreateBlogRequest {
            title: "Rotating fleet tires".to_string(),
            description: "Every 5,000 miles".to_string(),
            category: "Maintenance".to_string(),
            image: None,
        };
        let err = request.check().unwrap_err();
        assert_eq!(err.field_errors()["image"], vec!["Blog image is required".to_string()]);

        request.image = Some("https://cdn.example.com/rotation.jpg".to_string());
        assert!(request.check().is_ok());

        request.title = String::new();
        assert!(request.check().unwrap_err().field_errors().contains_key("title"));
    }
}
