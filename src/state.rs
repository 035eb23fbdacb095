//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::{
    AlertRepository, AlertStore, MediaRepository, MediaStore, MemoryAlertStore, MemoryMediaStore,
    MemoryPersonStore, MemoryUserStore, MemoryVehicleStore, PersonRepository, PersonStore,
    UserRepository, UserStore, VehicleRepository, VehicleStore,
};
use crate::services::{AuthService, MediaStorage, ReportService, StatusSynchronizer};
use crate::utils::jwt::JwtConfig;

/// Colecciones persistentes del registro
#[derive(Clone)]
pub struct Stores {
    pub vehicles: Arc<dyn VehicleStore>,
    pub alerts: Arc<dyn AlertStore>,
    pub people: Arc<dyn PersonStore>,
    pub media: Arc<dyn MediaStore>,
    pub users: Arc<dyn UserStore>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            vehicles: Arc::new(MemoryVehicleStore::new()),
            alerts: Arc::new(MemoryAlertStore::new()),
            people: Arc::new(MemoryPersonStore::new()),
            media: Arc::new(MemoryMediaStore::new()),
            users: Arc::new(MemoryUserStore::new()),
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            vehicles: Arc::new(VehicleRepository::new(pool.clone())),
            alerts: Arc::new(AlertRepository::new(pool.clone())),
            people: Arc::new(PersonRepository::new(pool.clone())),
            media: Arc::new(MediaRepository::new(pool.clone())),
            users: Arc::new(UserRepository::new(pool)),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub jwt: JwtConfig,
    pub vehicles: Arc<dyn VehicleStore>,
    pub alerts: Arc<dyn AlertStore>,
    pub people: Arc<dyn PersonStore>,
    pub media: Arc<dyn MediaStore>,
    pub users: Arc<dyn UserStore>,
    pub synchronizer: StatusSynchronizer,
    pub auth: AuthService,
    pub media_storage: MediaStorage,
    pub reports: ReportService,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, stores: Stores) -> Self {
        let jwt = JwtConfig::from(&config);
        let media_storage = MediaStorage::new(config.media_dir.clone(), config.max_upload_bytes);

        Self {
            synchronizer: StatusSynchronizer::new(stores.alerts.clone()),
            auth: AuthService::new(stores.users.clone(), jwt.clone()),
            config: Arc::new(config),
            jwt,
            vehicles: stores.vehicles,
            alerts: stores.alerts,
            people: stores.people,
            media: stores.media,
            users: stores.users,
            media_storage,
            reports: ReportService::new(),
        }
    }

    /// Estado con todas las colecciones en memoria (desarrollo y tests)
    pub fn in_memory(config: EnvironmentConfig) -> Self {
        Self::new(config, Stores::in_memory())
    }

    pub fn postgres(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self::new(config, Stores::postgres(pool))
    }
}
