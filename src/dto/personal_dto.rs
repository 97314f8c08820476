//! DTOs de personal y revisión de documentos

use serde::Deserialize;
use validator::Validate;

use crate::models::personal::{RevisionEstado, TipoPersonal};

/// Request del admin para invitar a un coach o staff
#[derive(Debug, Deserialize, Validate)]
pub struct CrearInvitacionRequest {
    #[validate(email)]
    pub email: String,

    pub rol: TipoPersonal,
}

/// Filtros para el listado de personal
#[derive(Debug, Deserialize)]
pub struct PersonalFiltros {
    pub tipo: Option<TipoPersonal>,
    pub estado: Option<RevisionEstado>,
}

/// Request para rechazar a un miembro del personal
#[derive(Debug, Deserialize, Validate)]
pub struct RechazarPersonalRequest {
    #[validate(length(min = 1, max = 500))]
    pub motivo: String,
}

/// Request para rechazar un documento (el comentario es obligatorio:
/// el interesado necesita saber qué corregir antes de re-subir)
#[derive(Debug, Deserialize, Validate)]
pub struct RechazarDocumentoRequest {
    #[validate(length(min = 1, max = 500))]
    pub comentario: String,
}

/// Request para subir un documento de onboarding
#[derive(Debug, Deserialize, Validate)]
pub struct SubirDocumentoRequest {
    #[validate(length(min = 1, max = 50))]
    pub tipo_documento: String,

    /// Contenido del archivo en base64
    pub archivo_base64: String,

    #[validate(length(min = 1, max = 100))]
    pub nombre_archivo: String,
}

/// Request para designar o quitar head coach.
///
/// Al habilitar, si la disciplina propia del coach es "ambas" la
/// disciplina objetivo es un parámetro obligatorio (no hay prompt
/// interactivo del lado del servidor).
#[derive(Debug, Deserialize)]
pub struct DesignarHeadCoachRequest {
    pub es_head_coach: bool,
    pub disciplina: Option<String>,
}
