//! Repositorios
//!
//! Acceso tipado a la base de datos, un repositorio por agregado.

pub mod clase_repository;
pub mod documento_repository;
pub mod espacio_repository;
pub mod invitacion_repository;
pub mod notificacion_repository;
pub mod perfil_repository;
pub mod personal_repository;
pub mod reserva_repository;
pub mod salon_repository;
pub mod solicitud_repository;
