//! Modelo de Clase
//!
//! Este módulo contiene el struct Clase y sus variantes para CRUD operations.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.
//!
//! Invariantes: reservas_count ≤ capacidad en todo momento; el estado solo
//! avanza desde programada (programada → cancelada | completada), sin
//! resurrección.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado de la clase - mapea al ENUM clase_estado
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "clase_estado", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ClaseEstado {
    Programada,
    Cancelada,
    Completada,
    EnCurso,
}

impl ClaseEstado {
    /// Transiciones válidas del estado (una sola dirección, sin regreso)
    pub fn puede_transicionar_a(&self, destino: ClaseEstado) -> bool {
        matches!(
            (self, destino),
            (ClaseEstado::Programada, ClaseEstado::Cancelada)
                | (ClaseEstado::Programada, ClaseEstado::EnCurso)
                | (ClaseEstado::Programada, ClaseEstado::Completada)
                | (ClaseEstado::EnCurso, ClaseEstado::Completada)
        )
    }
}

/// Clase programada - mapea exactamente a la tabla clases
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Clase {
    pub id: Uuid,
    pub nombre_clase: Option<String>,
    pub descripcion: Option<String>,
    pub fecha_hora: DateTime<Utc>,
    pub duracion: i32,
    pub salon_id: Uuid,
    pub disciplina_id: Uuid,
    pub especialidad_id: Option<Uuid>,
    pub coach_id: Option<Uuid>,
    pub capacidad: i32,
    pub reservas_count: i32,
    pub estado: ClaseEstado,
    pub notas_coach: Option<String>,
    pub playlist_url: Option<String>,
    pub asignada_por: Option<Uuid>,
    pub asignada_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Clase {
    /// Lugares aún disponibles para reservar
    pub fn lugares_disponibles(&self) -> i32 {
        (self.capacidad - self.reservas_count).max(0)
    }

    pub fn esta_llena(&self) -> bool {
        self.reservas_count >= self.capacidad
    }
}

/// Clase con los nombres de salón, disciplina y coach ya resueltos,
/// para listados y detalle.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClaseDetalle {
    pub id: Uuid,
    pub nombre_clase: Option<String>,
    pub fecha_hora: DateTime<Utc>,
    pub duracion: i32,
    pub salon_id: Uuid,
    pub nombre_salon: String,
    pub disciplina_id: Uuid,
    pub nombre_disciplina: String,
    pub coach_id: Option<Uuid>,
    pub nombre_coach: Option<String>,
    pub capacidad: i32,
    pub reservas_count: i32,
    pub estado: ClaseEstado,
}

/// Disciplina ofrecida por el estudio
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Disciplina {
    pub id: Uuid,
    pub nombre: String,
    pub activo: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transiciones_desde_programada() {
        assert!(ClaseEstado::Programada.puede_transicionar_a(ClaseEstado::Cancelada));
        assert!(ClaseEstado::Programada.puede_transicionar_a(ClaseEstado::Completada));
        assert!(ClaseEstado::Programada.puede_transicionar_a(ClaseEstado::EnCurso));
    }

    #[test]
    fn test_sin_resurreccion() {
        assert!(!ClaseEstado::Cancelada.puede_transicionar_a(ClaseEstado::Programada));
        assert!(!ClaseEstado::Completada.puede_transicionar_a(ClaseEstado::Programada));
        assert!(!ClaseEstado::Cancelada.puede_transicionar_a(ClaseEstado::Completada));
    }

    #[test]
    fn test_lugares_disponibles() {
        let mut clase = clase_de_prueba(10, 7);
        assert_eq!(clase.lugares_disponibles(), 3);
        assert!(!clase.esta_llena());

        clase.reservas_count = 10;
        assert_eq!(clase.lugares_disponibles(), 0);
        assert!(clase.esta_llena());
    }

    fn clase_de_prueba(capacidad: i32, reservas: i32) -> Clase {
        Clase {
            id: Uuid::new_v4(),
            nombre_clase: None,
            descripcion: None,
            fecha_hora: Utc::now(),
            duracion: 45,
            salon_id: Uuid::new_v4(),
            disciplina_id: Uuid::new_v4(),
            especialidad_id: None,
            coach_id: None,
            capacidad,
            reservas_count: reservas,
            estado: ClaseEstado::Programada,
            notas_coach: None,
            playlist_url: None,
            asignada_por: None,
            asignada_at: None,
            created_at: Utc::now(),
        }
    }
}
