//! Repositorios del registro
//!
//! Cada colección se expone como un trait de persistencia con dos
//! implementaciones: PostgreSQL (sqlx) y memoria (desarrollo y tests).

pub mod alert_repository;
pub mod media_repository;
pub mod memory;
pub mod person_repository;
pub mod user_repository;
pub mod vehicle_repository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    alert::{AlertDeclaration, AlertFilters, AlertRecovery, DeclarationUpsert, SearchAlert, SearchStatus},
    media::Media,
    person::{Person, PersonFilters},
    user::User,
    vehicle::{Vehicle, VehicleFilters},
};
use crate::utils::errors::AppResult;

pub use alert_repository::AlertRepository;
pub use media_repository::MediaRepository;
pub use memory::{MemoryAlertStore, MemoryMediaStore, MemoryPersonStore, MemoryUserStore, MemoryVehicleStore};
pub use person_repository::PersonRepository;
pub use user_repository::UserRepository;
pub use vehicle_repository::VehicleRepository;

/// Registro de vehículos.
///
/// Placa y número de serie son únicos: `insert` / `update` devuelven
/// `AppError::Conflict` si otro vehículo ya los usa.
#[async_trait]
pub trait VehicleStore: Send + Sync {
    async fn insert(&self, vehicle: &Vehicle) -> AppResult<Vehicle>;

    /// Reemplaza el documento completo (sin tocar `created_at`)
    async fn update(&self, vehicle: &Vehicle) -> AppResult<Vehicle>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>>;

    async fn find_by_plate(&self, plate_number: &str) -> AppResult<Option<Vehicle>>;

    async fn find_by_serial(&self, serial_number: &str) -> AppResult<Option<Vehicle>>;

    async fn list(&self, filters: &VehicleFilters) -> AppResult<Vec<Vehicle>>;

    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Registro de avis de recherche.
///
/// Como máximo un avis por vehículo. Las transiciones de estado son
/// lectura-modificación-escritura atómicas.
#[async_trait]
pub trait AlertStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SearchAlert>>;

    async fn find_by_vehicle(&self, vehicle_id: Uuid) -> AppResult<Option<SearchAlert>>;

    async fn list(&self, filters: &AlertFilters) -> AppResult<Vec<SearchAlert>>;

    /// Crea el avis activo, reactiva uno cerrado, o no hace nada si ya está activo
    async fn upsert_declaration(&self, declaration: &AlertDeclaration) -> AppResult<DeclarationUpsert>;

    /// active → found. `None` si el vehículo no tiene avis activo.
    async fn mark_found(&self, vehicle_id: Uuid, recovery: &AlertRecovery) -> AppResult<Option<SearchAlert>>;

    /// active → abandoned. `None` si el vehículo no tiene avis activo.
    async fn mark_abandoned(&self, vehicle_id: Uuid) -> AppResult<Option<SearchAlert>>;

    /// Copia la nueva placa del vehículo a su avis. `None` si no tiene avis
    /// o la placa ya coincide.
    async fn refresh_plate(&self, vehicle_id: Uuid, plate_number: &str) -> AppResult<Option<SearchAlert>>;

    /// Cambio manual de estado (super-admin). `found` copia `recovery`;
    /// `active` borra los datos de recuperación.
    async fn set_status(
        &self,
        id: Uuid,
        status: SearchStatus,
        recovery: Option<&AlertRecovery>,
    ) -> AppResult<Option<SearchAlert>>;

    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Fichero de personas. `national_id` es único.
#[async_trait]
pub trait PersonStore: Send + Sync {
    async fn insert(&self, person: &Person) -> AppResult<Person>;

    async fn update(&self, person: &Person) -> AppResult<Person>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Person>>;

    async fn find_by_national_id(&self, national_id: &str) -> AppResult<Option<Person>>;

    /// Ordenado por `national_id`
    async fn list(&self, filters: &PersonFilters) -> AppResult<Vec<Person>>;

    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Metadatos de los archivos subidos
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn insert(&self, media: &Media) -> AppResult<Media>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Media>>;

    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Usuarios del back-office. `email` es único.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: &User) -> AppResult<User>;

    async fn update(&self, user: &User) -> AppResult<User>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn list(&self) -> AppResult<Vec<User>>;

    async fn count(&self) -> AppResult<i64>;

    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
