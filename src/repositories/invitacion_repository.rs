//! Repositorio de invitaciones de onboarding

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::invitacion::Invitacion;
use crate::models::personal::TipoPersonal;
use crate::utils::errors::AppError;

pub struct InvitacionRepository {
    pool: PgPool,
}

impl InvitacionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        email: String,
        rol: TipoPersonal,
        token: String,
        expira_at: DateTime<Utc>,
    ) -> Result<Invitacion, AppError> {
        let invitacion = sqlx::query_as::<_, Invitacion>(
            r#"
            INSERT INTO invitaciones (id, email, rol, token, estado, expira_at, created_at)
            VALUES ($1, $2, $3, $4, 'pendiente', $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(rol)
        .bind(token)
        .bind(expira_at)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creando invitación: {}", e)))?;

        Ok(invitacion)
    }

    pub async fn find_by_token(&self, token: &str) -> Result<Option<Invitacion>, AppError> {
        let invitacion =
            sqlx::query_as::<_, Invitacion>("SELECT * FROM invitaciones WHERE token = $1")
                .bind(token)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| AppError::Database(format!("Error buscando invitación: {}", e)))?;

        Ok(invitacion)
    }

    /// Marcar aceptada; condicional a seguir pendiente para que un token
    /// no pueda consumirse dos veces.
    pub async fn marcar_aceptada(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE invitaciones SET estado = 'aceptada' WHERE id = $1 AND estado = 'pendiente'",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error aceptando invitación: {}", e)))?;

        Ok(result.rows_affected())
    }

    pub async fn marcar_expirada(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE invitaciones SET estado = 'expirada' WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error expirando invitación: {}", e)))?;

        Ok(())
    }

    pub async fn listar(&self) -> Result<Vec<Invitacion>, AppError> {
        let invitaciones = sqlx::query_as::<_, Invitacion>(
            "SELECT * FROM invitaciones ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listando invitaciones: {}", e)))?;

        Ok(invitaciones)
    }
}
