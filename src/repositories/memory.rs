//! Repositorios en memoria
//!
//! Mismo contrato que los repositorios PostgreSQL (unicidad, orden de los
//! listados, transiciones atómicas) sobre `RwLock<HashMap>`. Se usan con
//! `STORAGE_BACKEND=memory` y en los tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::alert::{
    AlertDeclaration, AlertFilters, AlertRecovery, DeclarationUpsert, SearchAlert, SearchStatus,
};
use crate::models::media::Media;
use crate::models::person::{Person, PersonFilters};
use crate::models::user::User;
use crate::models::vehicle::{page_bounds, Vehicle, VehicleFilters};
use crate::repositories::{AlertStore, MediaStore, PersonStore, UserStore, VehicleStore};
use crate::utils::errors::{AppError, AppResult};

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn paginate<T>(items: Vec<T>, limit: Option<i64>, offset: Option<i64>) -> Vec<T> {
    let (limit, offset) = page_bounds(limit, offset);
    items
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect()
}

// ==================== VEHÍCULOS ====================

#[derive(Default)]
pub struct MemoryVehicleStore {
    vehicles: RwLock<HashMap<Uuid, Vehicle>>,
}

impl MemoryVehicleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_vehicle_unique(vehicles: &HashMap<Uuid, Vehicle>, vehicle: &Vehicle) -> AppResult<()> {
    let clash = vehicles.values().any(|other| {
        other.id != vehicle.id
            && (other.plate_number == vehicle.plate_number || other.serial_number == vehicle.serial_number)
    });

    if clash {
        return Err(AppError::Conflict(
            "Ya existe un vehículo con esa placa o número de serie".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl VehicleStore for MemoryVehicleStore {
    async fn insert(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let mut vehicles = self.vehicles.write().await;
        check_vehicle_unique(&vehicles, vehicle)?;
        vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle.clone())
    }

    async fn update(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let mut vehicles = self.vehicles.write().await;
        check_vehicle_unique(&vehicles, vehicle)?;

        let stored = vehicles
            .get_mut(&vehicle.id)
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;
        let created_at = stored.created_at;
        *stored = vehicle.clone();
        stored.created_at = created_at;

        Ok(stored.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        Ok(self.vehicles.read().await.get(&id).cloned())
    }

    async fn find_by_plate(&self, plate_number: &str) -> AppResult<Option<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        Ok(vehicles.values().find(|v| v.plate_number == plate_number).cloned())
    }

    async fn find_by_serial(&self, serial_number: &str) -> AppResult<Option<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        Ok(vehicles.values().find(|v| v.serial_number == serial_number).cloned())
    }

    async fn list(&self, filters: &VehicleFilters) -> AppResult<Vec<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        let mut matching: Vec<Vehicle> = vehicles
            .values()
            .filter(|v| filters.status.map_or(true, |s| v.status == s))
            .filter(|v| filters.plate.as_deref().map_or(true, |p| contains_ignore_case(&v.plate_number, p)))
            .filter(|v| filters.brand.as_deref().map_or(true, |b| contains_ignore_case(&v.brand, b)))
            .filter(|v| filters.owner_id.map_or(true, |o| v.owner_id == Some(o)))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(paginate(matching, filters.limit, filters.offset))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.vehicles.write().await.remove(&id).is_some())
    }
}

// ==================== AVIS DE RECHERCHE ====================

#[derive(Default)]
pub struct MemoryAlertStore {
    alerts: RwLock<HashMap<Uuid, SearchAlert>>,
}

impl MemoryAlertStore {
    pub fn new() -> Self {
        Self::default()
    }
}

// Índice parcial: una sola placa activa
fn check_active_plate_unique(alerts: &HashMap<Uuid, SearchAlert>, vehicle_id: Uuid, plate: &str) -> AppResult<()> {
    let clash = alerts.values().any(|a| {
        a.vehicle_id != vehicle_id && a.search_status == SearchStatus::Active && a.plate_number == plate
    });

    if clash {
        return Err(AppError::Conflict(
            "Ya existe un avis de recherche activo para esa placa".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl AlertStore for MemoryAlertStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SearchAlert>> {
        Ok(self.alerts.read().await.get(&id).cloned())
    }

    async fn find_by_vehicle(&self, vehicle_id: Uuid) -> AppResult<Option<SearchAlert>> {
        let alerts = self.alerts.read().await;
        Ok(alerts.values().find(|a| a.vehicle_id == vehicle_id).cloned())
    }

    async fn list(&self, filters: &AlertFilters) -> AppResult<Vec<SearchAlert>> {
        let alerts = self.alerts.read().await;
        let mut matching: Vec<SearchAlert> = alerts
            .values()
            .filter(|a| filters.status.map_or(true, |s| a.search_status == s))
            .filter(|a| filters.plate.as_deref().map_or(true, |p| contains_ignore_case(&a.plate_number, p)))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(paginate(matching, filters.limit, filters.offset))
    }

    async fn upsert_declaration(&self, declaration: &AlertDeclaration) -> AppResult<DeclarationUpsert> {
        // Lectura y escritura bajo el mismo write lock
        let mut alerts = self.alerts.write().await;

        let existing = alerts
            .values()
            .find(|a| a.vehicle_id == declaration.vehicle_id)
            .map(|a| (a.id, a.search_status));

        match existing {
            Some((_, SearchStatus::Active)) => Ok(DeclarationUpsert::AlreadyActive),
            Some((id, _)) => {
                check_active_plate_unique(&alerts, declaration.vehicle_id, &declaration.plate_number)?;
                let alert = alerts
                    .get_mut(&id)
                    .ok_or_else(|| AppError::Internal("Avis desaparecido durante la reactivación".to_string()))?;
                declaration.reapply_to(alert);
                Ok(DeclarationUpsert::Reactivated(alert.clone()))
            }
            None => {
                check_active_plate_unique(&alerts, declaration.vehicle_id, &declaration.plate_number)?;
                let alert = declaration.clone().into_alert();
                alerts.insert(alert.id, alert.clone());
                Ok(DeclarationUpsert::Created(alert))
            }
        }
    }

    async fn mark_found(&self, vehicle_id: Uuid, recovery: &AlertRecovery) -> AppResult<Option<SearchAlert>> {
        let mut alerts = self.alerts.write().await;
        let alert = alerts
            .values_mut()
            .find(|a| a.vehicle_id == vehicle_id && a.search_status == SearchStatus::Active);

        Ok(alert.map(|alert| {
            recovery.apply_to(alert);
            alert.clone()
        }))
    }

    async fn mark_abandoned(&self, vehicle_id: Uuid) -> AppResult<Option<SearchAlert>> {
        let mut alerts = self.alerts.write().await;
        let alert = alerts
            .values_mut()
            .find(|a| a.vehicle_id == vehicle_id && a.search_status == SearchStatus::Active);

        Ok(alert.map(|alert| {
            alert.search_status = SearchStatus::Abandoned;
            alert.updated_at = Utc::now();
            alert.clone()
        }))
    }

    async fn refresh_plate(&self, vehicle_id: Uuid, plate_number: &str) -> AppResult<Option<SearchAlert>> {
        let mut alerts = self.alerts.write().await;

        let (id, status) = match alerts
            .values()
            .find(|a| a.vehicle_id == vehicle_id && a.plate_number != plate_number)
        {
            Some(alert) => (alert.id, alert.search_status),
            None => return Ok(None),
        };
        if status == SearchStatus::Active {
            check_active_plate_unique(&alerts, vehicle_id, plate_number)?;
        }

        Ok(alerts.get_mut(&id).map(|alert| {
            alert.plate_number = plate_number.to_string();
            alert.updated_at = Utc::now();
            alert.clone()
        }))
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: SearchStatus,
        recovery: Option<&AlertRecovery>,
    ) -> AppResult<Option<SearchAlert>> {
        let mut alerts = self.alerts.write().await;

        let (vehicle_id, plate) = match alerts.get(&id) {
            Some(alert) => (alert.vehicle_id, alert.plate_number.clone()),
            None => return Ok(None),
        };
        if status == SearchStatus::Active {
            check_active_plate_unique(&alerts, vehicle_id, &plate)?;
        }

        Ok(alerts.get_mut(&id).map(|alert| {
            match (status, recovery) {
                (SearchStatus::Found, Some(recovery)) => recovery.apply_to(alert),
                (SearchStatus::Active, _) => {
                    alert.recovery_date = None;
                    alert.recovery_place = None;
                    alert.recovered_by = None;
                    alert.recovery_circumstances = None;
                }
                _ => {}
            }
            alert.search_status = status;
            alert.updated_at = Utc::now();
            alert.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.alerts.write().await.remove(&id).is_some())
    }
}

// ==================== PERSONAS ====================

#[derive(Default)]
pub struct MemoryPersonStore {
    people: RwLock<HashMap<Uuid, Person>>,
}

impl MemoryPersonStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_person_unique(people: &HashMap<Uuid, Person>, person: &Person) -> AppResult<()> {
    if people
        .values()
        .any(|p| p.id != person.id && p.national_id == person.national_id)
    {
        return Err(AppError::Conflict(
            "Ya existe una persona con ese número de identidad".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl PersonStore for MemoryPersonStore {
    async fn insert(&self, person: &Person) -> AppResult<Person> {
        let mut people = self.people.write().await;
        check_person_unique(&people, person)?;
        people.insert(person.id, person.clone());
        Ok(person.clone())
    }

    async fn update(&self, person: &Person) -> AppResult<Person> {
        let mut people = self.people.write().await;
        check_person_unique(&people, person)?;

        let stored = people
            .get_mut(&person.id)
            .ok_or_else(|| AppError::NotFound("Persona no encontrada".to_string()))?;
        let created_at = stored.created_at;
        *stored = person.clone();
        stored.created_at = created_at;

        Ok(stored.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Person>> {
        Ok(self.people.read().await.get(&id).cloned())
    }

    async fn find_by_national_id(&self, national_id: &str) -> AppResult<Option<Person>> {
        let people = self.people.read().await;
        Ok(people.values().find(|p| p.national_id == national_id).cloned())
    }

    async fn list(&self, filters: &PersonFilters) -> AppResult<Vec<Person>> {
        let people = self.people.read().await;
        let mut matching: Vec<Person> = people
            .values()
            .filter(|p| {
                filters
                    .national_id
                    .as_deref()
                    .map_or(true, |n| contains_ignore_case(&p.national_id, n))
            })
            .filter(|p| filters.is_wanted.map_or(true, |w| p.is_wanted == w))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.national_id.cmp(&b.national_id));

        Ok(paginate(matching, filters.limit, filters.offset))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.people.write().await.remove(&id).is_some())
    }
}

// ==================== MEDIA ====================

#[derive(Default)]
pub struct MemoryMediaStore {
    media: RwLock<HashMap<Uuid, Media>>,
}

impl MemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MediaStore for MemoryMediaStore {
    async fn insert(&self, media: &Media) -> AppResult<Media> {
        self.media.write().await.insert(media.id, media.clone());
        Ok(media.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Media>> {
        Ok(self.media.read().await.get(&id).cloned())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.media.write().await.remove(&id).is_some())
    }
}

// ==================== USUARIOS ====================

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_user_unique(users: &HashMap<Uuid, User>, user: &User) -> AppResult<()> {
    if users
        .values()
        .any(|u| u.id != user.id && u.email.eq_ignore_ascii_case(&user.email))
    {
        return Err(AppError::Conflict("Ya existe un usuario con ese email".to_string()));
    }
    Ok(())
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: &User) -> AppResult<User> {
        let mut users = self.users.write().await;
        check_user_unique(&users, user)?;
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let mut users = self.users.write().await;
        check_user_unique(&users, user)?;

        let stored = users
            .get_mut(&user.id)
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;
        let created_at = stored.created_at;
        *stored = user.clone();
        stored.created_at = created_at;

        Ok(stored.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email.eq_ignore_ascii_case(email)).cloned())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(users)
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.users.read().await.len() as i64)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.users.write().await.remove(&id).is_some())
    }
}
