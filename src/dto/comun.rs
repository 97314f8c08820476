//! Respuesta genérica de la API
//!
//! Contrato uniforme de todas las acciones: `{success, mensaje?, data}`.
//! Los errores llevan además un campo `code` legible por máquina
//! (ver utils::errors).

use serde::Serialize;

/// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mensaje: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            mensaje: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, mensaje: String) -> Self {
        Self {
            success: true,
            mensaje: Some(mensaje),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message_only(mensaje: String) -> Self {
        Self {
            success: true,
            mensaje: Some(mensaje),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_serializa_contrato() {
        let body = serde_json::to_value(ApiResponse::success(42)).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], 42);
        assert!(body.get("mensaje").is_none());
    }

    #[test]
    fn test_success_with_message() {
        let body =
            serde_json::to_value(ApiResponse::success_with_message(1, "listo".to_string()))
                .unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["mensaje"], "listo");
    }
}
