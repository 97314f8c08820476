//! Repositorio de notificaciones

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::notificacion::Notificacion;
use crate::utils::errors::AppError;

pub struct NotificacionRepository {
    pool: PgPool,
}

impl NotificacionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        destinatario_id: Uuid,
        tipo: String,
        titulo: String,
        mensaje: String,
        url_accion: Option<String>,
    ) -> Result<Notificacion, AppError> {
        let notificacion = sqlx::query_as::<_, Notificacion>(
            r#"
            INSERT INTO notificaciones (id, destinatario_id, tipo, titulo, mensaje, leida,
                                        url_accion, created_at)
            VALUES ($1, $2, $3, $4, $5, FALSE, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(destinatario_id)
        .bind(tipo)
        .bind(titulo)
        .bind(mensaje)
        .bind(url_accion)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creando notificación: {}", e)))?;

        Ok(notificacion)
    }

    pub async fn listar(&self, destinatario_id: Uuid) -> Result<Vec<Notificacion>, AppError> {
        let notificaciones = sqlx::query_as::<_, Notificacion>(
            r#"
            SELECT * FROM notificaciones
            WHERE destinatario_id = $1
            ORDER BY created_at DESC
            LIMIT 100
            "#,
        )
        .bind(destinatario_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listando notificaciones: {}", e)))?;

        Ok(notificaciones)
    }

    /// Marcar leída; condicionada al destinatario para que nadie marque
    /// notificaciones ajenas.
    pub async fn marcar_leida(&self, id: Uuid, destinatario_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE notificaciones SET leida = TRUE WHERE id = $1 AND destinatario_id = $2",
        )
        .bind(id)
        .bind(destinatario_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error marcando notificación: {}", e)))?;

        Ok(result.rows_affected())
    }

    pub async fn marcar_todas_leidas(&self, destinatario_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE notificaciones SET leida = TRUE WHERE destinatario_id = $1 AND leida = FALSE",
        )
        .bind(destinatario_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error marcando notificaciones: {}", e)))?;

        Ok(result.rows_affected())
    }

    pub async fn contar_no_leidas(&self, destinatario_id: Uuid) -> Result<i64, AppError> {
        let cuenta: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM notificaciones WHERE destinatario_id = $1 AND leida = FALSE",
        )
        .bind(destinatario_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error contando notificaciones: {}", e)))?;

        Ok(cuenta.0)
    }
}
