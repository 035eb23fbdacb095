//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL (ver `migrations/`).

pub mod alert;
pub mod media;
pub mod person;
pub mod user;
pub mod vehicle;
