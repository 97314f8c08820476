//! Tests de integración contra Postgres y Redis reales.
//!
//! Requieren DATABASE_URL (con las migraciones aplicadas) y REDIS_URL;
//! por eso van marcados con #[ignore] y se corren aparte:
//!
//!     cargo test --test db_tests -- --ignored
//!
//! Cada test crea sus propios datos (emails y salones únicos) para poder
//! correr contra una base compartida sin pisarse entre sí.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use studio_backend::cache::{CacheConfig, RedisClient};
use studio_backend::config::environment::EnvironmentConfig;
use studio_backend::controllers::clase_controller::ClaseController;
use studio_backend::controllers::inventario_controller::InventarioController;
use studio_backend::controllers::onboarding_controller::OnboardingController;
use studio_backend::controllers::personal_controller::PersonalController;
use studio_backend::controllers::reserva_controller::ReservaController;
use studio_backend::dto::inventario_dto::CrearEspacioRequest;
use studio_backend::dto::onboarding_dto::FinalizarRequest;
use studio_backend::dto::reserva_dto::{CancelarReservaRequest, CrearReservaRequest};
use studio_backend::middleware::auth::AuthenticatedUser;
use studio_backend::models::clase::Clase;
use studio_backend::models::espacio::{Espacio, TipoEquipo};
use studio_backend::models::perfil::{Perfil, Rol};
use studio_backend::models::personal::{RevisionEstado, TipoPersonal};
use studio_backend::models::salon::Salon;
use studio_backend::repositories::clase_repository::ClaseRepository;
use studio_backend::repositories::documento_repository::DocumentoRepository;
use studio_backend::repositories::espacio_repository::EspacioRepository;
use studio_backend::repositories::invitacion_repository::InvitacionRepository;
use studio_backend::repositories::perfil_repository::PerfilRepository;
use studio_backend::repositories::personal_repository::PersonalRepository;
use studio_backend::repositories::reserva_repository::{IntentoReserva, ReservaRepository};
use studio_backend::repositories::salon_repository::SalonRepository;
use studio_backend::utils::errors::AppError;

async fn pool() -> PgPool {
    PgPool::connect(&std::env::var("DATABASE_URL").expect("DATABASE_URL no definida"))
        .await
        .expect("conexión a Postgres")
}

async fn redis() -> RedisClient {
    let url =
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    RedisClient::new(CacheConfig {
        redis_url: url,
        default_ttl: 60,
        max_connections: 2,
    })
    .await
    .expect("conexión a Redis")
}

fn config_pruebas() -> EnvironmentConfig {
    EnvironmentConfig {
        environment: "test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        jwt_secret: "secreto-de-pruebas".to_string(),
        jwt_expiration: 900,
        cors_origins: vec![],
        storage_dir: std::env::temp_dir()
            .join("studio-pruebas")
            .to_string_lossy()
            .into_owned(),
        public_base_url: "http://localhost/archivos".to_string(),
        ventana_cancelacion_horas: 2,
        invitacion_vigencia_horas: 24,
    }
}

async fn perfil_nuevo(pool: &PgPool, rol: Rol) -> Perfil {
    PerfilRepository::new(pool.clone())
        .create(
            format!("{}@pruebas.mx", Uuid::new_v4()),
            "$2b$12$hashdeprueba".to_string(),
            "Perfil de Prueba".to_string(),
            rol,
        )
        .await
        .unwrap()
}

fn sesion(perfil: &Perfil) -> AuthenticatedUser {
    AuthenticatedUser {
        perfil_id: perfil.id,
        rol: perfil.rol,
        nombre_completo: perfil.nombre_completo.clone(),
    }
}

async fn salon_nuevo(pool: &PgPool, capacidad_maxima: i32) -> Salon {
    SalonRepository::new(pool.clone())
        .create(
            format!("Salón {}", Uuid::new_v4()),
            "spinning".to_string(),
            capacidad_maxima,
        )
        .await
        .unwrap()
}

async fn espacio_nuevo(pool: &PgPool, salon_id: Uuid, numero: i32) -> Espacio {
    EspacioRepository::new(pool.clone())
        .create(salon_id, numero, TipoEquipo::Bici, 50)
        .await
        .unwrap()
}

async fn clase_programada(pool: &PgPool, salon_id: Uuid, capacidad: i32) -> Clase {
    let repo = ClaseRepository::new(pool.clone());
    let disciplina = repo
        .listar_disciplinas()
        .await
        .unwrap()
        .into_iter()
        .next()
        .expect("disciplinas sembradas por la migración");

    repo.create(
        Some("Clase de prueba".to_string()),
        None,
        Utc::now() + Duration::days(1),
        50,
        salon_id,
        disciplina.id,
        None,
        capacidad,
    )
    .await
    .unwrap()
}

fn conflicto(err: AppError) -> String {
    match err {
        AppError::Conflict(m) => m,
        other => panic!("se esperaba Conflict, llegó {:?}", other),
    }
}

#[tokio::test]
#[ignore]
async fn test_eliminar_clase_con_reservas_reporta_el_conteo() {
    let pool = pool().await;
    let redis = redis().await;

    let salon = salon_nuevo(&pool, 10).await;
    let clase = clase_programada(&pool, salon.id, 5).await;
    let cliente = perfil_nuevo(&pool, Rol::Cliente).await;

    let reservas = ReservaRepository::new(pool.clone());
    assert!(matches!(
        reservas.crear_confirmada(clase.id, cliente.id, None).await.unwrap(),
        IntentoReserva::Confirmada(_)
    ));

    let controller = ClaseController::new(pool.clone(), redis);
    let mensaje = conflicto(controller.eliminar(clase.id).await.unwrap_err());
    assert!(mensaje.contains("1 reserva"), "mensaje: {}", mensaje);
}

#[tokio::test]
#[ignore]
async fn test_numero_de_espacio_duplicado_en_el_salon() {
    let pool = pool().await;
    let redis = redis().await;

    let salon = salon_nuevo(&pool, 10).await;
    let controller = InventarioController::new(pool.clone(), redis);

    controller
        .crear_espacio(CrearEspacioRequest {
            salon_id: salon.id,
            numero: 1,
            tipo_equipo: TipoEquipo::Bici,
            usos_para_mantenimiento: 50,
        })
        .await
        .unwrap();

    let err = controller
        .crear_espacio(CrearEspacioRequest {
            salon_id: salon.id,
            numero: 1,
            tipo_equipo: TipoEquipo::Bici,
            usos_para_mantenimiento: 50,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)), "llegó {:?}", err);
}

#[tokio::test]
#[ignore]
async fn test_aprobar_personal_bloqueado_por_documento_sin_aprobar() {
    let pool = pool().await;
    let redis = redis().await;
    let config = config_pruebas();

    let perfil = perfil_nuevo(&pool, Rol::Coach).await;
    let personal_repo = PersonalRepository::new(pool.clone());
    let personal = personal_repo
        .create(perfil.id, TipoPersonal::Coach, perfil.email.clone())
        .await
        .unwrap();
    personal_repo
        .finalizar_onboarding(personal.id, Utc::now())
        .await
        .unwrap();

    let documentos = DocumentoRepository::new(pool.clone());
    let documento = documentos
        .create(personal.id, "identificacion".to_string(), "http://x/ine.pdf".to_string())
        .await
        .unwrap();

    let controller = PersonalController::new(pool.clone(), redis, &config);

    // Con el documento todavía pendiente la aprobación se rechaza
    let mensaje = conflicto(controller.aprobar_personal(personal.id).await.unwrap_err());
    assert!(mensaje.contains("documentos"), "mensaje: {}", mensaje);

    // Aprobado el documento, el expediente sí pasa
    documentos.aprobar(documento.id).await.unwrap();
    let aprobado = controller.aprobar_personal(personal.id).await.unwrap();
    assert_eq!(aprobado.data.unwrap().estado, RevisionEstado::Aprobado);
}

#[tokio::test]
#[ignore]
async fn test_clase_llena_manda_a_lista_de_espera_y_avisa_al_liberar() {
    let pool = pool().await;
    let redis = redis().await;

    let salon = salon_nuevo(&pool, 10).await;
    let clase = clase_programada(&pool, salon.id, 1).await;

    let cliente_a = perfil_nuevo(&pool, Rol::Cliente).await;
    let cliente_b = perfil_nuevo(&pool, Rol::Cliente).await;

    let controller = ReservaController::new(pool.clone(), redis, 2);

    // A toma el único lugar
    let resultado_a = controller
        .crear(&sesion(&cliente_a), CrearReservaRequest { clase_id: clase.id, espacio_id: None })
        .await
        .unwrap()
        .data
        .unwrap();
    assert!(!resultado_a.en_lista_espera);
    let reserva_a = resultado_a.reserva.unwrap();

    // B cae a la lista de espera
    let resultado_b = controller
        .crear(&sesion(&cliente_b), CrearReservaRequest { clase_id: clase.id, espacio_id: None })
        .await
        .unwrap()
        .data
        .unwrap();
    assert!(resultado_b.en_lista_espera);
    assert!(resultado_b.reserva.is_none());

    // A cancela: se libera el lugar y B queda notificado
    let cancelacion = controller
        .cancelar(reserva_a.id, &sesion(&cliente_a), CancelarReservaRequest { razon: None })
        .await
        .unwrap()
        .data
        .unwrap();
    assert!(!cancelacion.cancelacion_tardia);

    let reservas = ReservaRepository::new(pool.clone());
    assert!(reservas.primera_sin_notificar(clase.id).await.unwrap().is_none());

    // El lugar se gana reservando por el camino normal
    let relevo = controller
        .crear(&sesion(&cliente_b), CrearReservaRequest { clase_id: clase.id, espacio_id: None })
        .await
        .unwrap()
        .data
        .unwrap();
    assert!(!relevo.en_lista_espera);
    assert!(relevo.reserva.is_some());
}

#[tokio::test]
#[ignore]
async fn test_asignacion_directa_no_pisa_al_coach_ya_asignado() {
    let pool = pool().await;
    let redis = redis().await;

    let salon = salon_nuevo(&pool, 10).await;
    let clase = clase_programada(&pool, salon.id, 5).await;

    let admin = perfil_nuevo(&pool, Rol::Admin).await;
    let coach_1 = perfil_nuevo(&pool, Rol::Coach).await;
    let coach_2 = perfil_nuevo(&pool, Rol::Coach).await;

    let controller = ClaseController::new(pool.clone(), redis);

    let asignada = controller
        .asignar_coach_directo(clase.id, coach_1.id, admin.id)
        .await
        .unwrap()
        .data
        .unwrap();
    assert_eq!(asignada.coach_id, Some(coach_1.id));

    let mensaje = conflicto(
        controller
            .asignar_coach_directo(clase.id, coach_2.id, admin.id)
            .await
            .unwrap_err(),
    );
    assert!(mensaje.contains("ya tiene"), "mensaje: {}", mensaje);

    // El primer coach sigue en su lugar
    let clase = ClaseRepository::new(pool.clone())
        .find_by_id(clase.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(clase.coach_id, Some(coach_1.id));
}

#[tokio::test]
#[ignore]
async fn test_espacio_se_reclama_una_sola_vez() {
    let pool = pool().await;

    let salon = salon_nuevo(&pool, 10).await;
    let espacio = espacio_nuevo(&pool, salon.id, 1).await;
    let clase = clase_programada(&pool, salon.id, 5).await;

    let cliente_a = perfil_nuevo(&pool, Rol::Cliente).await;
    let cliente_b = perfil_nuevo(&pool, Rol::Cliente).await;

    let reservas = ReservaRepository::new(pool.clone());

    assert!(matches!(
        reservas
            .crear_confirmada(clase.id, cliente_a.id, Some(espacio.id))
            .await
            .unwrap(),
        IntentoReserva::Confirmada(_)
    ));

    // El mismo espacio con cupo de sobra: el segundo intento pierde
    assert!(matches!(
        reservas
            .crear_confirmada(clase.id, cliente_b.id, Some(espacio.id))
            .await
            .unwrap(),
        IntentoReserva::EspacioOcupado
    ));

    // La transacción perdedora no dejó rastro: ni reserva ni lugar ocupado
    assert!(!reservas.tiene_confirmada(clase.id, cliente_b.id).await.unwrap());
    let clase = ClaseRepository::new(pool.clone())
        .find_by_id(clase.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(clase.reservas_count, 1);
}

#[tokio::test]
#[ignore]
async fn test_finalizar_rechaza_tipo_de_personal_equivocado() {
    let pool = pool().await;
    let config = config_pruebas();

    let email = format!("{}@pruebas.mx", Uuid::new_v4());
    let invitacion = InvitacionRepository::new(pool.clone())
        .create(
            email.clone(),
            TipoPersonal::Coach,
            Uuid::new_v4().simple().to_string(),
            Utc::now() + Duration::hours(24),
        )
        .await
        .unwrap();

    let perfil = perfil_nuevo(&pool, Rol::Coach).await;
    let personal = PersonalRepository::new(pool.clone())
        .create(perfil.id, TipoPersonal::Coach, email)
        .await
        .unwrap();

    let controller = OnboardingController::new(pool.clone(), &config);
    let err = controller
        .finalizar(FinalizarRequest {
            personal_id: personal.id,
            tipo_personal: TipoPersonal::Staff,
            firma_base64: "aG9sYQ==".to_string(),
            token: invitacion.token,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)), "llegó {:?}", err);
}
