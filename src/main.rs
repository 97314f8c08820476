use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use studio_backend::cache;
use studio_backend::cache::redis_client::RedisClient;
use studio_backend::config::environment::EnvironmentConfig;
use studio_backend::database::DatabaseConnection;
use studio_backend::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use studio_backend::routes;
use studio_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    info!("🏋️ Studio Backend - Gestión del estudio");
    info!("========================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();

    // Inicializar Redis (cache + pub/sub de notificaciones)
    let redis_url =
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());

    let redis_config = cache::CacheConfig {
        redis_url,
        default_ttl: 300,
        max_connections: 10,
    };

    let redis_client = match RedisClient::new(redis_config).await {
        Ok(client) => {
            info!("✅ Redis conectado exitosamente");
            client
        }
        Err(e) => {
            error!("❌ Error conectando a Redis: {}", e);
            return Err(anyhow::anyhow!("Error de Redis: {}", e));
        }
    };

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    // En desarrollo sin CORS_ORIGINS se permite cualquier origen
    let cors = if config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let app_state = AppState::new(pool, config, redis_client);

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .merge(routes::create_api_router(app_state))
        .layer(cors);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🔐 Auth:");
    info!("   POST /api/auth/login - Login");
    info!("   GET  /api/auth/me - Perfil actual");
    info!("📅 Clases:");
    info!("   GET  /api/clases - Listar clases (filtros por query)");
    info!("   POST /api/clases - Crear clase (admin)");
    info!("   POST /api/clases/:id/coach - Asignar coach (admin)");
    info!("   POST /api/clases/:id/solicitudes/aprobar - Aprobar solicitud (admin)");
    info!("🎟️ Reservas:");
    info!("   POST /api/reservas - Reservar (o entrar a lista de espera)");
    info!("   POST /api/reservas/:id/cancelar - Cancelar reserva");
    info!("🙋 Solicitudes:");
    info!("   POST /api/solicitudes - Solicitar clase (coach)");
    info!("🏢 Inventario:");
    info!("   GET  /api/inventario/salones/:id/estadisticas - Dashboard de salón");
    info!("👥 Personal:");
    info!("   POST /api/personal/invitaciones - Invitar coach/staff (admin)");
    info!("   POST /api/personal/:id/aprobar - Aprobar expediente (admin)");
    info!("📋 Onboarding:");
    info!("   GET  /api/onboarding/validar-token - Validar invitación");
    info!("   POST /api/onboarding/crear-cuenta - Crear cuenta");
    info!("   POST /api/onboarding/finalizar - Finalizar onboarding");
    info!("🔔 Notificaciones:");
    info!("   GET  /api/notificaciones - Listar propias");

    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
