//! DTOs de clases

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::clase::ClaseEstado;

/// Request para crear una clase
#[derive(Debug, Deserialize, Validate)]
pub struct CrearClaseRequest {
    #[validate(length(max = 100))]
    pub nombre_clase: Option<String>,

    #[validate(length(max = 500))]
    pub descripcion: Option<String>,

    pub fecha_hora: DateTime<Utc>,

    /// Duración en minutos
    pub duracion: i32,

    pub salon_id: Uuid,
    pub disciplina_id: Uuid,
    pub especialidad_id: Option<Uuid>,
    pub capacidad: i32,
}

/// Request para actualizar una clase existente
#[derive(Debug, Deserialize, Validate)]
pub struct ActualizarClaseRequest {
    #[validate(length(max = 100))]
    pub nombre_clase: Option<String>,

    #[validate(length(max = 500))]
    pub descripcion: Option<String>,

    pub fecha_hora: Option<DateTime<Utc>>,
    pub duracion: Option<i32>,
    pub salon_id: Option<Uuid>,
    pub disciplina_id: Option<Uuid>,
    pub capacidad: Option<i32>,

    #[validate(length(max = 500))]
    pub notas_coach: Option<String>,

    #[validate(url)]
    pub playlist_url: Option<String>,
}

/// Request para asignar un coach directamente
#[derive(Debug, Deserialize)]
pub struct AsignarCoachRequest {
    pub coach_id: Uuid,
}

/// Filtros para el listado de clases
#[derive(Debug, Deserialize)]
pub struct ClaseFiltros {
    pub estado: Option<ClaseEstado>,
    pub salon_id: Option<Uuid>,
    pub coach_id: Option<Uuid>,
    pub desde: Option<DateTime<Utc>>,
    pub hasta: Option<DateTime<Utc>>,
}
