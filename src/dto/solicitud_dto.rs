//! DTOs de solicitudes de clase

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

/// Request de un coach para solicitar una clase sin asignar
#[derive(Debug, Deserialize, Validate)]
pub struct CrearSolicitudRequest {
    pub clase_id: Uuid,

    #[validate(length(max = 300))]
    pub mensaje: Option<String>,
}

/// Request del admin para aprobar una solicitud concreta de una clase
#[derive(Debug, Deserialize)]
pub struct AprobarSolicitudRequest {
    pub solicitud_id: Uuid,
}
