//! Backend del estudio: clases, reservas, inventario y onboarding de
//! personal sobre Axum + PostgreSQL, con Redis como cache y canal de
//! notificaciones.

pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
