//! Composición de rutas
//!
//! Dos superficies: endpoints públicos (login y onboarding) y el resto
//! detrás del middleware de autenticación JWT. Los guards de rol se
//! aplican dentro de cada router.

pub mod auth_routes;
pub mod clase_routes;
pub mod inventario_routes;
pub mod notificacion_routes;
pub mod onboarding_routes;
pub mod personal_routes;
pub mod reserva_routes;
pub mod solicitud_routes;

use axum::{middleware, Router};

use crate::middleware::auth::auth_middleware;
use crate::state::AppState;

pub fn create_api_router(state: AppState) -> Router {
    let protegidas = Router::new()
        .merge(Router::new().nest("/auth", auth_routes::create_auth_protected_router()))
        .nest("/clases", clase_routes::create_clase_router())
        .nest("/reservas", reserva_routes::create_reserva_router())
        .nest("/solicitudes", solicitud_routes::create_solicitud_router())
        .nest("/inventario", inventario_routes::create_inventario_router())
        .nest("/personal", personal_routes::create_personal_router())
        .nest(
            "/notificaciones",
            notificacion_routes::create_notificacion_router(),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let publicas = Router::new()
        .nest("/auth", auth_routes::create_auth_router())
        .nest("/onboarding", onboarding_routes::create_onboarding_router());

    Router::new()
        .nest("/api", publicas.merge(protegidas))
        .with_state(state)
}
