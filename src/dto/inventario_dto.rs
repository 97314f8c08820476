//! DTOs de inventario (salones y espacios)

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::espacio::{Espacio, EspacioEstado, TipoEquipo};

/// Request para crear un salón
#[derive(Debug, Deserialize, Validate)]
pub struct CrearSalonRequest {
    #[validate(length(min = 1, max = 100))]
    pub nombre: String,

    #[validate(length(min = 1, max = 50))]
    pub tipo: String,

    pub capacidad_maxima: i32,
}

/// Request para actualizar un salón
#[derive(Debug, Deserialize, Validate)]
pub struct ActualizarSalonRequest {
    #[validate(length(min = 1, max = 100))]
    pub nombre: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub tipo: Option<String>,

    pub capacidad_maxima: Option<i32>,
    pub activo: Option<bool>,
}

/// Request para crear un espacio dentro de un salón
#[derive(Debug, Deserialize)]
pub struct CrearEspacioRequest {
    pub salon_id: Uuid,
    pub numero: i32,
    pub tipo_equipo: TipoEquipo,
    /// Usos a partir de los cuales toca mantenimiento
    pub usos_para_mantenimiento: i32,
}

/// Request para cambiar el estado de un espacio
#[derive(Debug, Deserialize)]
pub struct ActualizarEstadoEspacioRequest {
    pub estado: EspacioEstado,
}

/// Estadísticas de un salón para el dashboard
#[derive(Debug, Serialize, serde::Deserialize)]
pub struct EstadisticasSalon {
    pub salon_id: Uuid,
    pub total_espacios: i64,
    pub disponibles: i64,
    pub ocupados: i64,
    pub en_mantenimiento: i64,
    /// Espacios al 80% o más de su umbral de usos (alerta informativa)
    pub alertas_mantenimiento: Vec<Espacio>,
}
