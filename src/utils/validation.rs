//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validar formularios de sesión
//! y valores de configuración.

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

/// Longitud mínima de password aceptada por el gate de sesión
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar longitud mínima del password (en caracteres)
pub fn validate_password(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < MIN_PASSWORD_LENGTH {
        let mut error = ValidationError::new("password_length");
        error.add_param("min".into(), &MIN_PASSWORD_LENGTH);
        error.add_param("actual".into(), &len);
        error.message = Some(Cow::Borrowed("Password must be at least 8 characters long."));
        return Err(error);
    }
    Ok(())
}

/// Validar que la confirmación coincida con el password
pub fn validate_password_confirmation(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password != confirmation {
        let mut error = ValidationError::new("password_mismatch");
        error.message = Some(Cow::Borrowed("Passwords do not match."));
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor esté en un rango específico.
/// NaN no es comparable y se rechaza.
pub fn validate_range<T: PartialOrd + std::fmt::Display + serde::Serialize>(
    value: T,
    min: T,
    max: T,
) -> Result<(), ValidationError> {
    if !(value >= min && value <= max) {
        let mut error = ValidationError::new("range");
        error.add_param("min".into(), &min);
        error.add_param("max".into(), &max);
        error.add_param("actual".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar formato de coordenadas GPS (simplificado)
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&lat) {
        let mut error = ValidationError::new("latitude");
        error.add_param("value".into(), &lat);
        error.add_param("range".into(), &"-90.0 to 90.0".to_string());
        return Err(error);
    }

    if !(-180.0..=180.0).contains(&lng) {
        let mut error = ValidationError::new("longitude");
        error.add_param("value".into(), &lng);
        error.add_param("range".into(), &"-180.0 to 180.0".to_string());
        return Err(error);
    }

    Ok(())
}

/// Mensaje legible de un error de validación; cae al código si no trae mensaje
pub fn error_message(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| format!("Invalid value ({})", error.code))
}

/// Primer mensaje de error siguiendo el orden de campos dado.
///
/// `ValidationErrors` no conserva orden, así que el formulario declara el suyo
/// para que el mensaje mostrado sea determinista.
pub fn first_message(errors: &ValidationErrors, field_order: &[&'static str]) -> String {
    let fields = errors.field_errors();
    field_order
        .iter()
        .filter_map(|field| fields.get(field).and_then(|list| list.first()))
        .chain(fields.values().filter_map(|list| list.first()))
        .next()
        .map(error_message)
        .unwrap_or_else(|| "Invalid form.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("abc").is_ok());
        assert!(validate_not_empty("   ").is_err());
        assert!(validate_not_empty("").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("longenough1").is_ok());
        assert!(validate_password("12345678").is_ok());
        let error = validate_password("short").unwrap_err();
        assert_eq!(error_message(&error), "Password must be at least 8 characters long.");
    }

    #[test]
    fn test_validate_password_counts_chars() {
        // 8 caracteres, más de 8 bytes
        assert!(validate_password("ñññññññá").is_ok());
    }

    #[test]
    fn test_validate_password_confirmation() {
        assert!(validate_password_confirmation("longenough1", "longenough1").is_ok());
        let error = validate_password_confirmation("longenough1", "longenough2").unwrap_err();
        assert_eq!(error_message(&error), "Passwords do not match.");
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range(0.6, 0.0, 1.0).is_ok());
        assert!(validate_range(1.5, 0.0, 1.0).is_err());
        assert!(validate_range(-0.1, 0.0, 1.0).is_err());
        assert!(validate_range(f64::NAN, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(40.7128, -74.0060).is_ok());
        assert!(validate_coordinates(91.0, -75.0).is_err());
        assert!(validate_coordinates(45.0, -181.0).is_err());
    }

    #[test]
    fn test_first_message_follows_order() {
        let mut errors = ValidationErrors::new();
        let mut surname = ValidationError::new("length");
        surname.message = Some(Cow::Borrowed("Surname is required."));
        let mut name = ValidationError::new("length");
        name.message = Some(Cow::Borrowed("First name is required."));
        errors.add("surname", surname);
        errors.add("name", name);

        assert_eq!(first_message(&errors, &["name", "surname"]), "First name is required.");
        assert_eq!(first_message(&errors, &["surname", "name"]), "Surname is required.");
    }
}
