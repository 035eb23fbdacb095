//! Middleware del sistema
//!
//! Autenticación JWT, control de roles y CORS.

pub mod auth;
pub mod cors;

pub use auth::*;
pub use cors::*;
