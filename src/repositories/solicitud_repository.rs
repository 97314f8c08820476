//! Repositorio de solicitudes de clase
//!
//! Aprobar una solicitud asigna al coach en la clase y rechaza al resto
//! de solicitudes pendientes de esa clase, todo en una transacción.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::solicitud::{Solicitud, SolicitudDetalle};
use crate::utils::errors::AppError;

pub struct SolicitudRepository {
    pool: PgPool,
}

impl SolicitudRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        clase_id: Uuid,
        coach_id: Uuid,
        mensaje: Option<String>,
    ) -> Result<Solicitud, AppError> {
        let solicitud = sqlx::query_as::<_, Solicitud>(
            r#"
            INSERT INTO solicitudes_clase (id, clase_id, coach_id, mensaje, estado, created_at)
            VALUES ($1, $2, $3, $4, 'pendiente', $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(clase_id)
        .bind(coach_id)
        .bind(mensaje)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creando solicitud: {}", e)))?;

        Ok(solicitud)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Solicitud>, AppError> {
        let solicitud =
            sqlx::query_as::<_, Solicitud>("SELECT * FROM solicitudes_clase WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AppError::Database(format!("Error buscando solicitud: {}", e)))?;

        Ok(solicitud)
    }

    /// ¿El coach ya tiene una solicitud pendiente para esta clase?
    pub async fn pendiente_existente(
        &self,
        clase_id: Uuid,
        coach_id: Uuid,
    ) -> Result<bool, AppError> {
        let existe: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM solicitudes_clase
                WHERE clase_id = $1 AND coach_id = $2 AND estado = 'pendiente'
            )
            "#,
        )
        .bind(clase_id)
        .bind(coach_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error verificando solicitud: {}", e)))?;

        Ok(existe.0)
    }

    /// Retiro de la propia solicitud mientras sigue pendiente.
    /// Devuelve filas afectadas: 0 = no era suya o ya estaba resuelta.
    pub async fn cancelar(&self, solicitud_id: Uuid, coach_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            "DELETE FROM solicitudes_clase WHERE id = $1 AND coach_id = $2 AND estado = 'pendiente'",
        )
        .bind(solicitud_id)
        .bind(coach_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error cancelando solicitud: {}", e)))?;

        Ok(result.rows_affected())
    }

    /// Aprobar una solicitud: marca aprobado, asigna coach en la clase
    /// (solo si sigue sin coach y programada) y rechaza las solicitudes
    /// hermanas. Devuelve la solicitud aprobada y los coach_id rechazados
    /// para notificarlos; None si la clase ya no estaba disponible.
    pub async fn aprobar(
        &self,
        clase_id: Uuid,
        solicitud_id: Uuid,
        admin_id: Uuid,
    ) -> Result<Option<(Solicitud, Vec<Uuid>)>, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Error abriendo transacción: {}", e)))?;

        let ahora = Utc::now();

        let aprobada = sqlx::query_as::<_, Solicitud>(
            r#"
            UPDATE solicitudes_clase
            SET estado = 'aprobado', resuelta_at = $3
            WHERE id = $1 AND clase_id = $2 AND estado = 'pendiente'
            RETURNING *
            "#,
        )
        .bind(solicitud_id)
        .bind(clase_id)
        .bind(ahora)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::Database(format!("Error aprobando solicitud: {}", e)))?;

        let Some(aprobada) = aprobada else {
            tx.rollback()
                .await
                .map_err(|e| AppError::Database(format!("Error en rollback: {}", e)))?;
            return Ok(None);
        };

        let asignada = sqlx::query(
            r#"
            UPDATE clases
            SET coach_id = $2, asignada_por = $3, asignada_at = $4
            WHERE id = $1 AND coach_id IS NULL AND estado = 'programada'
            "#,
        )
        .bind(clase_id)
        .bind(aprobada.coach_id)
        .bind(admin_id)
        .bind(ahora)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::Database(format!("Error asignando coach: {}", e)))?;

        if asignada.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| AppError::Database(format!("Error en rollback: {}", e)))?;
            return Ok(None);
        }

        let rechazados: Vec<(Uuid,)> = sqlx::query_as(
            r#"
            UPDATE solicitudes_clase
            SET estado = 'rechazado', resuelta_at = $2
            WHERE clase_id = $1 AND estado = 'pendiente'
            RETURNING coach_id
            "#,
        )
        .bind(clase_id)
        .bind(ahora)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::Database(format!("Error rechazando solicitudes: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| AppError::Database(format!("Error en commit: {}", e)))?;

        Ok(Some((aprobada, rechazados.into_iter().map(|(id,)| id).collect())))
    }

    pub async fn listar_por_clase(&self, clase_id: Uuid) -> Result<Vec<SolicitudDetalle>, AppError> {
        let solicitudes = sqlx::query_as::<_, SolicitudDetalle>(
            r#"
            SELECT sc.id, sc.clase_id, sc.coach_id, p.nombre_completo AS nombre_coach,
                   sc.mensaje, sc.estado,
                   c.fecha_hora AS fecha_hora_clase, d.nombre AS nombre_disciplina,
                   sc.created_at
            FROM solicitudes_clase sc
            JOIN perfiles p ON p.id = sc.coach_id
            JOIN clases c ON c.id = sc.clase_id
            JOIN disciplinas d ON d.id = c.disciplina_id
            WHERE sc.clase_id = $1
            ORDER BY sc.created_at ASC
            "#,
        )
        .bind(clase_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listando solicitudes: {}", e)))?;

        Ok(solicitudes)
    }

    pub async fn listar_por_coach(&self, coach_id: Uuid) -> Result<Vec<SolicitudDetalle>, AppError> {
        let solicitudes = sqlx::query_as::<_, SolicitudDetalle>(
            r#"
            SELECT sc.id, sc.clase_id, sc.coach_id, p.nombre_completo AS nombre_coach,
                   sc.mensaje, sc.estado,
                   c.fecha_hora AS fecha_hora_clase, d.nombre AS nombre_disciplina,
                   sc.created_at
            FROM solicitudes_clase sc
            JOIN perfiles p ON p.id = sc.coach_id
            JOIN clases c ON c.id = sc.clase_id
            JOIN disciplinas d ON d.id = c.disciplina_id
            WHERE sc.coach_id = $1
            ORDER BY sc.created_at DESC
            "#,
        )
        .bind(coach_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listando solicitudes del coach: {}", e)))?;

        Ok(solicitudes)
    }
}
