//! Repositorio de perfiles de autenticación

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::perfil::{Perfil, Rol};
use crate::utils::errors::AppError;

pub struct PerfilRepository {
    pool: PgPool,
}

impl PerfilRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        email: String,
        password_hash: String,
        nombre_completo: String,
        rol: Rol,
    ) -> Result<Perfil, AppError> {
        let perfil = sqlx::query_as::<_, Perfil>(
            r#"
            INSERT INTO perfiles (id, email, password_hash, nombre_completo, rol,
                                  email_confirmado, activo, created_at)
            VALUES ($1, $2, $3, $4, $5, FALSE, FALSE, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .bind(nombre_completo)
        .bind(rol)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creando perfil: {}", e)))?;

        Ok(perfil)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Perfil>, AppError> {
        let perfil = sqlx::query_as::<_, Perfil>("SELECT * FROM perfiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error buscando perfil: {}", e)))?;

        Ok(perfil)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Perfil>, AppError> {
        let perfil = sqlx::query_as::<_, Perfil>("SELECT * FROM perfiles WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error buscando perfil: {}", e)))?;

        Ok(perfil)
    }

    pub async fn email_existe(&self, email: &str) -> Result<bool, AppError> {
        let existe: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM perfiles WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::Database(format!("Error verificando email: {}", e)))?;

        Ok(existe.0)
    }

    /// Activar la cuenta (al aprobar al personal asociado)
    pub async fn activar(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE perfiles SET activo = TRUE, email_confirmado = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error activando perfil: {}", e)))?;

        Ok(())
    }

    pub async fn desactivar(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE perfiles SET activo = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error desactivando perfil: {}", e)))?;

        Ok(())
    }
}
