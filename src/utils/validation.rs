//! Utilidades de validación
//!
//! Funciones helper de validación compartidas por los controllers.

use chrono::{DateTime, Utc};

use crate::utils::errors::AppError;

/// Validar que un entero sea positivo
pub fn validar_positivo(valor: i32, campo: &str) -> Result<(), AppError> {
    if valor <= 0 {
        return Err(AppError::Validation(format!(
            "El campo '{}' debe ser mayor que cero",
            campo
        )));
    }
    Ok(())
}

/// Validar que una fecha esté en el futuro
pub fn validar_fecha_futura(fecha: DateTime<Utc>, ahora: DateTime<Utc>) -> Result<(), AppError> {
    if fecha <= ahora {
        return Err(AppError::Validation(
            "La fecha de la clase debe estar en el futuro".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_validar_positivo() {
        assert!(validar_positivo(1, "capacidad").is_ok());
        assert!(validar_positivo(0, "capacidad").is_err());
        assert!(validar_positivo(-5, "capacidad").is_err());
    }

    #[test]
    fn test_validar_fecha_futura() {
        let ahora = Utc::now();
        assert!(validar_fecha_futura(ahora + Duration::hours(1), ahora).is_ok());
        assert!(validar_fecha_futura(ahora, ahora).is_err());
        assert!(validar_fecha_futura(ahora - Duration::hours(1), ahora).is_err());
    }
}
