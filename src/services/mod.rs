//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: la
//! sincronización vehículo → avis de recherche, los reportes PDF,
//! el almacenamiento de archivos y la autenticación.

pub mod auth_service;
pub mod media_storage;
pub mod report_service;
pub mod status_sync_service;

pub use auth_service::AuthService;
pub use media_storage::{MediaStorage, MediaUpload};
pub use report_service::{ReportKind, ReportPeople, ReportService};
pub use status_sync_service::{StatusSynchronizer, SyncOutcome};
