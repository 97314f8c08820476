//! Middleware
//!
//! Autenticación, guards de rol y CORS.

pub mod auth;
pub mod cors;
