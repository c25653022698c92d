//! Sistema de manejo de errores
//!
//! Este módulo define los errores de la superficie HTTP y su conversión
//! a respuestas JSON. El núcleo de la flota no falla: las referencias que
//! no resuelven son `None`, no errores.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::services::session_service::SessionError;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl From<SessionError> for AppError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::Validation(msg) => AppError::BadRequest(msg),
            SessionError::RoleNotSelectable(_) => AppError::BadRequest(error.to_string()),
            SessionError::NotAuthenticated => AppError::Unauthorized(error.to_string()),
            SessionError::Forbidden { .. } => AppError::Forbidden(error.to_string()),
            SessionError::InvalidTransition { .. } => AppError::Conflict(error.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Unauthorized(msg) => {
                tracing::warn!("🔒 Unauthorized access: {}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse {
                        error: "Unauthorized".to_string(),
                        message: msg,
                        code: Some("UNAUTHORIZED".to_string()),
                    },
                )
            }

            AppError::Forbidden(msg) => {
                tracing::warn!("🚫 Forbidden access: {}", msg);
                (
                    StatusCode::FORBIDDEN,
                    ErrorResponse {
                        error: "Forbidden".to_string(),
                        message: msg,
                        code: Some("FORBIDDEN".to_string()),
                    },
                )
            }

            AppError::NotFound(msg) => {
                tracing::debug!("🔍 Resource not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: "Not Found".to_string(),
                        message: msg,
                        code: Some("NOT_FOUND".to_string()),
                    },
                )
            }

            AppError::Conflict(msg) => {
                tracing::warn!("⚠️ Conflict: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Conflict".to_string(),
                        message: msg,
                        code: Some("CONFLICT".to_string()),
                    },
                )
            }

            AppError::BadRequest(msg) => {
                tracing::debug!("⚠️ Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Bad Request".to_string(),
                        message: msg,
                        code: Some("BAD_REQUEST".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Capability, UserRole};

    #[test]
    fn test_session_error_status_codes() {
        let cases = vec![
            (SessionError::Validation("Passwords do not match.".to_string()), StatusCode::BAD_REQUEST),
            (SessionError::NotAuthenticated, StatusCode::UNAUTHORIZED),
            (
                SessionError::Forbidden { role: UserRole::Passenger, capability: Capability::PatchDriver },
                StatusCode::FORBIDDEN,
            ),
            (
                SessionError::InvalidTransition { state: "anonymous", action: "login" },
                StatusCode::CONFLICT,
            ),
            (SessionError::RoleNotSelectable(UserRole::Guest), StatusCode::BAD_REQUEST),
        ];

        for (error, expected) in cases {
            let response = AppError::from(error).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_not_found_error_message() {
        let error = not_found_error("Bus", "b99");
        assert_eq!(error.to_string(), "Not found: Bus with id 'b99' not found");
    }
}
