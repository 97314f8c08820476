//! Modelo de Espacio
//!
//! Unidades de equipo reservables (bici o tapete) dentro de un salón.
//! El numero es único dentro del salón. La alerta de mantenimiento al
//! llegar al 80% del umbral de usos es informativa, nunca bloqueante.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Tipo de equipo - mapea al ENUM tipo_equipo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "tipo_equipo", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TipoEquipo {
    Bici,
    Tapete,
}

/// Estado del espacio - mapea al ENUM espacio_estado
///
/// Las transiciones son libres (cualquiera → cualquiera); no hay máquina
/// de estados vigilada para el inventario.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "espacio_estado", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EspacioEstado {
    Disponible,
    Ocupado,
    Mantenimiento,
}

/// Espacio - mapea exactamente a la tabla espacios
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Espacio {
    pub id: Uuid,
    pub salon_id: Uuid,
    pub numero: i32,
    pub tipo_equipo: TipoEquipo,
    pub estado: EspacioEstado,
    pub usos_desde_mantenimiento: i32,
    pub usos_para_mantenimiento: i32,
}

impl Espacio {
    /// Alerta de mantenimiento: se dispara al llegar al 80% del umbral.
    pub fn requiere_alerta_mantenimiento(&self) -> bool {
        alerta_mantenimiento(self.usos_desde_mantenimiento, self.usos_para_mantenimiento)
    }
}

/// Ratio de uso ≥ 80% dispara la alerta; un umbral no positivo nunca alerta.
pub fn alerta_mantenimiento(usos: i32, umbral: i32) -> bool {
    umbral > 0 && usos * 100 >= umbral * 80
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alerta_al_80_por_ciento() {
        assert!(!alerta_mantenimiento(79, 100));
        assert!(alerta_mantenimiento(80, 100));
        assert!(alerta_mantenimiento(100, 100));
        assert!(alerta_mantenimiento(150, 100));
    }

    #[test]
    fn test_alerta_con_umbral_chico() {
        // 4 de 5 usos = 80%
        assert!(!alerta_mantenimiento(3, 5));
        assert!(alerta_mantenimiento(4, 5));
    }

    #[test]
    fn test_umbral_invalido_nunca_alerta() {
        assert!(!alerta_mantenimiento(50, 0));
        assert!(!alerta_mantenimiento(50, -1));
    }
}
