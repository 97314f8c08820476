//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas. Cada respuesta
//! incluye un campo `code` legible por máquina para que los
//! clientes puedan distinguir el tipo de error sin parsear texto.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => AppError::NotFound("Registro no encontrado".to_string()),
            other => AppError::Database(other.to_string()),
        }
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Validation(msg) => {
                warn!("Error de validación: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        success: false,
                        error: "Validation Error".to_string(),
                        message: msg,
                        details: None,
                        code: "VALIDATION_ERROR".to_string(),
                    },
                )
            }

            AppError::Conflict(msg) => {
                warn!("Conflicto de estado: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        success: false,
                        error: "Conflict".to_string(),
                        message: msg,
                        details: None,
                        code: "CONFLICT".to_string(),
                    },
                )
            }

            AppError::NotFound(msg) => {
                warn!("Recurso no encontrado: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        success: false,
                        error: "Not Found".to_string(),
                        message: msg,
                        details: None,
                        code: "NOT_FOUND".to_string(),
                    },
                )
            }

            AppError::Unauthorized(msg) => {
                warn!("Acceso no autorizado: {}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse {
                        success: false,
                        error: "Unauthorized".to_string(),
                        message: msg,
                        details: None,
                        code: "UNAUTHORIZED".to_string(),
                    },
                )
            }

            AppError::Forbidden(msg) => {
                warn!("Acceso prohibido: {}", msg);
                (
                    StatusCode::FORBIDDEN,
                    ErrorResponse {
                        success: false,
                        error: "Forbidden".to_string(),
                        message: msg,
                        details: None,
                        code: "FORBIDDEN".to_string(),
                    },
                )
            }

            AppError::Database(msg) => {
                error!("Error de base de datos: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        success: false,
                        error: "Database Error".to_string(),
                        message: "Ocurrió un error al acceder a la base de datos".to_string(),
                        details: Some(json!({ "sql_error": msg })),
                        code: "DB_ERROR".to_string(),
                    },
                )
            }

            AppError::Internal(msg) => {
                error!("Error interno: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        success: false,
                        error: "Internal Server Error".to_string(),
                        message: "Ocurrió un error inesperado".to_string(),
                        details: Some(json!({ "internal_error": msg })),
                        code: "INTERNAL_ERROR".to_string(),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = vec![
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (AppError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (AppError::Database("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_row_not_found_se_convierte_en_not_found() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
