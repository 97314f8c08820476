//! Servicio de almacenamiento de archivos
//!
//! Persiste firmas y documentos del onboarding en disco y devuelve la
//! URL pública con la que se guardan en la base. El contenido llega en
//! base64 desde el cliente.

use base64::Engine;
use tracing::info;
use uuid::Uuid;

use crate::config::environment::EnvironmentConfig;
use crate::utils::errors::AppError;

pub struct AlmacenamientoService {
    storage_dir: String,
    public_base_url: String,
}

impl AlmacenamientoService {
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self {
            storage_dir: config.storage_dir.clone(),
            public_base_url: config.public_base_url.clone(),
        }
    }

    /// Guardar un archivo en base64; devuelve la URL pública.
    pub async fn guardar_base64(
        &self,
        carpeta: &str,
        nombre_archivo: &str,
        contenido_base64: &str,
    ) -> Result<String, AppError> {
        // Los data-URLs llegan con prefijo "data:...;base64,"
        let datos = contenido_base64
            .rsplit_once(',')
            .map(|(_, d)| d)
            .unwrap_or(contenido_base64);

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(datos.trim())
            .map_err(|e| AppError::Validation(format!("Archivo base64 inválido: {}", e)))?;

        if bytes.is_empty() {
            return Err(AppError::Validation("El archivo está vacío".to_string()));
        }

        let nombre_unico = format!("{}_{}", Uuid::new_v4(), sanitizar_nombre(nombre_archivo));
        let dir = format!("{}/{}", self.storage_dir, carpeta);

        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::Internal(format!("Error creando directorio: {}", e)))?;

        let ruta = format!("{}/{}", dir, nombre_unico);
        tokio::fs::write(&ruta, &bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Error guardando archivo: {}", e)))?;

        info!("📄 Archivo guardado: {} ({} bytes)", ruta, bytes.len());

        Ok(format!("{}/{}/{}", self.public_base_url, carpeta, nombre_unico))
    }

    /// Guardar la firma capturada durante el onboarding
    pub async fn guardar_firma(
        &self,
        personal_id: Uuid,
        firma_base64: &str,
    ) -> Result<String, AppError> {
        let nombre = format!("firma_{}.png", personal_id);
        self.guardar_base64("firmas", &nombre, firma_base64).await
    }
}

/// Dejar solo caracteres seguros para nombre de archivo
fn sanitizar_nombre(nombre: &str) -> String {
    nombre
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitizar_nombre() {
        assert_eq!(sanitizar_nombre("contrato firmado.pdf"), "contrato_firmado.pdf");
        assert_eq!(sanitizar_nombre("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitizar_nombre("ine-2024_v2.jpg"), "ine-2024_v2.jpg");
    }
}
