//! Tests del contrato HTTP: guards de rol, errores y sesión JWT.
//! No requieren base de datos ni Redis.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Router};
use tower::ServiceExt;
use uuid::Uuid;

use studio_backend::middleware::auth::{
    admin_only_middleware, coach_only_middleware, staff_access_middleware, AuthenticatedUser,
};
use studio_backend::models::perfil::Rol;
use studio_backend::utils::errors::AppError;
use studio_backend::utils::jwt::{generate_token, verify_token, JwtConfig};

fn usuario(rol: Rol) -> AuthenticatedUser {
    AuthenticatedUser {
        perfil_id: Uuid::new_v4(),
        rol,
        nombre_completo: "Usuario de Prueba".to_string(),
    }
}

async fn status_de(app: Router) -> StatusCode {
    let response = app
        .oneshot(
            Request::builder()
                .uri("/recurso")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    response.status()
}

/// Router mínimo protegido por el guard de admin, con el usuario ya
/// autenticado inyectado como extension
fn app_admin(user: AuthenticatedUser) -> Router {
    Router::new()
        .route("/recurso", get(|| async { "ok" }))
        .layer(middleware::from_fn(admin_only_middleware))
        .layer(Extension(user))
}

fn app_coach(user: AuthenticatedUser) -> Router {
    Router::new()
        .route("/recurso", get(|| async { "ok" }))
        .layer(middleware::from_fn(coach_only_middleware))
        .layer(Extension(user))
}

fn app_staff(user: AuthenticatedUser) -> Router {
    Router::new()
        .route("/recurso", get(|| async { "ok" }))
        .layer(middleware::from_fn(staff_access_middleware))
        .layer(Extension(user))
}

#[tokio::test]
async fn test_guard_admin_permite_admin() {
    assert_eq!(status_de(app_admin(usuario(Rol::Admin))).await, StatusCode::OK);
}

#[tokio::test]
async fn test_guard_admin_rechaza_otros_roles_con_403() {
    for rol in [Rol::Coach, Rol::Staff, Rol::Cliente] {
        assert_eq!(
            status_de(app_admin(usuario(rol))).await,
            StatusCode::FORBIDDEN
        );
    }
}

#[tokio::test]
async fn test_guard_coach_solo_acepta_coaches() {
    assert_eq!(status_de(app_coach(usuario(Rol::Coach))).await, StatusCode::OK);
    assert_eq!(
        status_de(app_coach(usuario(Rol::Admin))).await,
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn test_guard_staff_rechaza_clientes() {
    for rol in [Rol::Admin, Rol::Coach, Rol::Staff] {
        assert_eq!(status_de(app_staff(usuario(rol))).await, StatusCode::OK);
    }

    assert_eq!(
        status_de(app_staff(usuario(Rol::Cliente))).await,
        StatusCode::FORBIDDEN
    );
}

#[tokio::test]
async fn test_error_conflict_lleva_code_legible() {
    let response = AppError::Conflict("la clase ya tiene coach".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "CONFLICT");
    assert_eq!(body["message"], "la clase ya tiene coach");
}

#[tokio::test]
async fn test_error_database_no_filtra_sql_en_message() {
    let response = AppError::Database("syntax error at or near".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["code"], "DB_ERROR");
    // El detalle técnico va en details, nunca en el mensaje al cliente
    assert!(!body["message"].as_str().unwrap().contains("syntax error"));
}

#[test]
fn test_sesion_jwt_ida_y_vuelta() {
    let config = JwtConfig {
        secret: "secreto-de-integracion".to_string(),
        expiration: 900,
    };
    let perfil_id = Uuid::new_v4();

    let token = generate_token(perfil_id, Rol::Staff.as_str(), &config).unwrap();
    let claims = verify_token(&token, &config).unwrap();

    assert_eq!(claims.sub, perfil_id.to_string());
    assert_eq!(claims.rol, "staff");
}

#[test]
fn test_token_manipulado_se_rechaza() {
    let config = JwtConfig {
        secret: "secreto-de-integracion".to_string(),
        expiration: 900,
    };

    let token = generate_token(Uuid::new_v4(), "cliente", &config).unwrap();
    let mut alterado = token.clone();
    alterado.pop();

    assert!(verify_token(&alterado, &config).is_err());
}
