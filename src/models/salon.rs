//! Modelo de Salón
//!
//! Salones físicos del estudio. Cada salón es dueño de cero o más
//! espacios y su capacidad_maxima acota cuántos pueden crearse.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Salón - mapea exactamente a la tabla salones
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Salon {
    pub id: Uuid,
    pub nombre: String,
    pub tipo: String,
    pub capacidad_maxima: i32,
    pub activo: bool,
}
