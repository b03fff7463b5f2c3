//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores de la consola de flota.
//! Los errores de validación se muestran en línea sobre el campo del formulario;
//! el resto se muestra como notificación transitoria.

use std::collections::BTreeMap;

use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{0}")]
    MissingIdentifier(String),

    /// `from_server`: el mensaje vino del cuerpo de la respuesta
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        from_server: bool,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Los errores de validación se detectan antes de cualquier llamada de red
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::MissingIdentifier(_))
    }

    /// Código HTTP cuando el backend respondió con un estado no-2xx
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Mensajes por campo para mostrar en línea en el formulario
    pub fn field_errors(&self) -> BTreeMap<String, Vec<String>> {
        let mut fields = BTreeMap::new();
        if let AppError::Validation(errors) = self {
            for (field, errs) in errors.field_errors() {
                let messages = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                fields.insert(field.to_string(), messages);
            }
        }
        fields
    }

    /// Mensaje legible para la notificación, con un fallback estático
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Http {
                message,
                from_server: true,
                ..
            } if !message.trim().is_empty() => message.clone(),
            AppError::MissingIdentifier(msg) => msg.clone(),
            AppError::Validation(_) => "The provided data is invalid".to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de validación
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.message = Some(message.into());

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Función helper para errores de identificador ausente
pub fn missing_identifier(message: &str) -> AppError {
    AppError::MissingIdentifier(message.to_string())
}

/// Función helper para crear errores HTTP con el mensaje del backend
pub fn http_error(status: u16, message: &str) -> AppError {
    AppError::Http {
        status,
        message: message.to_string(),
        from_server: true,
    }
}

/// Función helper para errores HTTP sin mensaje del backend
pub fn http_status_error(status: u16, fallback: &str) -> AppError {
    AppError::Http {
        status,
        message: fallback.to_string(),
        from_server: false,
    }
}

/// Función helper para crear errores de configuración
pub fn config_error(message: &str) -> AppError {
    AppError::Config(message.to_string())
}

/// Falla con identificador ausente si `id` está vacío
pub fn require_id(id: &str, message: &str) -> AppResult<()> {
    if id.trim().is_empty() {
        return Err(missing_identifier(message));
    }
    Ok(())
}
