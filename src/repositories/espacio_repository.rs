//! Repositorio de espacios
//!
//! Unidades de equipo. El cambio de estado es libre (cualquiera →
//! cualquiera); salir de mantenimiento reinicia el contador de usos.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::espacio::{Espacio, EspacioEstado, TipoEquipo};
use crate::utils::errors::AppError;

pub struct EspacioRepository {
    pool: PgPool,
}

impl EspacioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        salon_id: Uuid,
        numero: i32,
        tipo_equipo: TipoEquipo,
        usos_para_mantenimiento: i32,
    ) -> Result<Espacio, AppError> {
        let espacio = sqlx::query_as::<_, Espacio>(
            r#"
            INSERT INTO espacios (id, salon_id, numero, tipo_equipo, estado,
                                  usos_desde_mantenimiento, usos_para_mantenimiento)
            VALUES ($1, $2, $3, $4, 'disponible', 0, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(salon_id)
        .bind(numero)
        .bind(tipo_equipo)
        .bind(usos_para_mantenimiento)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creando espacio: {}", e)))?;

        Ok(espacio)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Espacio>, AppError> {
        let espacio = sqlx::query_as::<_, Espacio>("SELECT * FROM espacios WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error buscando espacio: {}", e)))?;

        Ok(espacio)
    }

    pub async fn numero_existe(&self, salon_id: Uuid, numero: i32) -> Result<bool, AppError> {
        let existe: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM espacios WHERE salon_id = $1 AND numero = $2)",
        )
        .bind(salon_id)
        .bind(numero)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error verificando número: {}", e)))?;

        Ok(existe.0)
    }

    pub async fn listar_por_salon(&self, salon_id: Uuid) -> Result<Vec<Espacio>, AppError> {
        let espacios = sqlx::query_as::<_, Espacio>(
            "SELECT * FROM espacios WHERE salon_id = $1 ORDER BY numero",
        )
        .bind(salon_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listando espacios: {}", e)))?;

        Ok(espacios)
    }

    /// Cambiar el estado; al salir de mantenimiento el contador vuelve a cero.
    pub async fn actualizar_estado(
        &self,
        id: Uuid,
        anterior: EspacioEstado,
        nuevo: EspacioEstado,
    ) -> Result<Espacio, AppError> {
        let reiniciar =
            anterior == EspacioEstado::Mantenimiento && nuevo != EspacioEstado::Mantenimiento;

        let espacio = sqlx::query_as::<_, Espacio>(
            r#"
            UPDATE espacios
            SET estado = $2,
                usos_desde_mantenimiento = CASE WHEN $3 THEN 0 ELSE usos_desde_mantenimiento END
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nuevo)
        .bind(reiniciar)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error actualizando espacio: {}", e)))?;

        Ok(espacio)
    }

    /// Registrar un uso terminado: suma al contador de mantenimiento y,
    /// si el espacio estaba ocupado, lo libera
    pub async fn registrar_uso(&self, id: Uuid) -> Result<Espacio, AppError> {
        let espacio = sqlx::query_as::<_, Espacio>(
            r#"
            UPDATE espacios
            SET usos_desde_mantenimiento = usos_desde_mantenimiento + 1,
                estado = CASE WHEN estado = 'ocupado' THEN 'disponible' ELSE estado END
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error registrando uso: {}", e)))?;

        Ok(espacio)
    }

    /// Conteos por estado para el dashboard
    pub async fn contar_por_estado(
        &self,
        salon_id: Uuid,
    ) -> Result<(i64, i64, i64, i64), AppError> {
        let fila: (i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE estado = 'disponible'),
                   COUNT(*) FILTER (WHERE estado = 'ocupado'),
                   COUNT(*) FILTER (WHERE estado = 'mantenimiento')
            FROM espacios
            WHERE salon_id = $1
            "#,
        )
        .bind(salon_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error contando por estado: {}", e)))?;

        Ok(fila)
    }
}
