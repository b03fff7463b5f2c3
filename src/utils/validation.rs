//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! usadas por los DTOs de formularios (`#[validate(custom = ...)]`).

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// local@dominio.tld sin espacios ni arrobas adicionales
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles");
}

fn with_message(code: &'static str, message: &'static str, value: &str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error.add_param("value".into(), &value.to_string());
    error
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(with_message("not_empty", "This field is required", value));
    }
    Ok(())
}

/// Validar teléfono requerido
pub fn validate_phone_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(with_message("required", "Phone is required", value));
    }
    Ok(())
}

/// Validar formato de email
pub fn validate_email_pattern(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(with_message("required", "Email is required", value));
    }
    if !EMAIL_PATTERN.is_match(value) {
        return Err(with_message("email", "Enter a valid email", value));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern() {
        assert!(validate_email_pattern("ops@fleet.example.com").is_ok());
        assert!(validate_email_pattern("a@b.co").is_ok());

        for bad in ["", "ops", "ops@fleet", "ops @fleet.com", "ops@@fleet.com", "@fleet.com", "ops@fleet.com "] {
            assert!(validate_email_pattern(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_email_error_messages() {
        let missing = validate_email_pattern("").unwrap_err();
        assert_eq!(missing.message.as_deref(), Some("Email is required"));

        let malformed = validate_email_pattern("nope").unwrap_err();
        assert_eq!(malformed.message.as_deref(), Some("Enter a valid email"));
    }

    #[test]
    fn test_phone_required() {
        assert!(validate_phone_required("+14123456789").is_ok());
        assert!(validate_phone_required("").is_err());
        assert!(validate_phone_required("   ").is_err());
    }

    #[test]
    fn test_not_empty() {
        assert!(validate_not_empty("Oil change").is_ok());
        assert!(validate_not_empty(" ").is_err());
    }
}
