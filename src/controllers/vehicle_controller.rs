use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::dto::vehicle_dto::{AppendHistoryRequest, VehicleRequest, VehicleWriteResponse};
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::vehicle::{
    ChangeHistoryEntry, ChangeType, Vehicle, VehicleFilters, VehicleStatus, DEFAULT_CURRENCY,
};
use crate::repositories::{AlertStore, PersonStore, VehicleStore};
use crate::services::StatusSynchronizer;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, validation_error, AppResult};
use crate::utils::validation::normalize_plate;

pub struct VehicleController {
    vehicles: Arc<dyn VehicleStore>,
    alerts: Arc<dyn AlertStore>,
    people: Arc<dyn PersonStore>,
    synchronizer: StatusSynchronizer,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            vehicles: state.vehicles.clone(),
            alerts: state.alerts.clone(),
            people: state.people.clone(),
            synchronizer: state.synchronizer.clone(),
        }
    }

    pub async fn list(&self, filters: VehicleFilters) -> AppResult<Vec<Vehicle>> {
        self.vehicles.list(&filters).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Vehicle> {
        self.vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: VehicleRequest,
    ) -> AppResult<ApiResponse<VehicleWriteResponse>> {
        actor.require_writer()?;
        request.check()?;
        self.ensure_owner_exists(request.owner_id, "owner_id").await?;

        let now = Utc::now();
        let mut vehicle = build_vehicle(Uuid::new_v4(), request, now);
        apply_system_fields(&mut vehicle, None, actor, now);

        let saved = self.vehicles.insert(&vehicle).await?;
        tracing::info!("✅ Vehículo {} registrado ({})", saved.plate_number, saved.status.label());

        let alert_sync = self.synchronizer.synchronize(&saved, None, actor).await?;

        Ok(ApiResponse::success_with_message(
            VehicleWriteResponse { vehicle: saved, alert_sync },
            "Vehículo registrado exitosamente",
        ))
    }

    /// Reemplaza el documento; el historial existente se conserva tal cual
    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: VehicleRequest,
    ) -> AppResult<ApiResponse<VehicleWriteResponse>> {
        actor.require_writer()?;
        request.check()?;

        let previous = self.get_by_id(id).await?;
        self.ensure_owner_exists(request.owner_id, "owner_id").await?;

        let now = Utc::now();
        let mut vehicle = build_vehicle(id, request, now);
        vehicle.created_at = previous.created_at;
        vehicle.change_history = previous.change_history.clone();
        apply_system_fields(&mut vehicle, Some(&previous), actor, now);

        let saved = self.vehicles.update(&vehicle).await?;
        if saved.status != previous.status {
            tracing::info!(
                "🔄 Vehículo {}: {} → {}",
                saved.plate_number,
                previous.status.label(),
                saved.status.label()
            );
        }

        let alert_sync = self.synchronizer.synchronize(&saved, Some(&previous), actor).await?;

        Ok(ApiResponse::success_with_message(
            VehicleWriteResponse { vehicle: saved, alert_sync },
            "Vehículo actualizado exitosamente",
        ))
    }

    /// Añade una entrada al historial y aplica su efecto (placa o propietario)
    pub async fn append_history(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: AppendHistoryRequest,
    ) -> AppResult<ApiResponse<VehicleWriteResponse>> {
        actor.require_writer()?;
        request.check()?;

        let previous = self.get_by_id(id).await?;
        let mut vehicle = previous.clone();
        let now = Utc::now();

        let mut entry = ChangeHistoryEntry {
            change_type: request.change_type,
            change_date: request.change_date,
            previous_plate: None,
            new_plate: None,
            previous_owner_id: None,
            new_owner_id: None,
            reason: request.reason.filter(|r| !r.trim().is_empty()),
            entered_by: actor.user_id,
            entered_at: now,
        };

        match request.change_type {
            ChangeType::PlateChange => {
                let new_plate = request
                    .new_plate
                    .as_deref()
                    .map(normalize_plate)
                    .ok_or_else(|| validation_error("new_plate", "Nouvelle immatriculation requise"))?;
                if let Some(declared) = request.previous_plate.as_deref().map(normalize_plate) {
                    if declared != vehicle.plate_number {
                        return Err(validation_error(
                            "previous_plate",
                            "L'ancienne immatriculation ne correspond pas au véhicule",
                        ));
                    }
                }
                entry.previous_plate = Some(vehicle.plate_number.clone());
                entry.new_plate = Some(new_plate.clone());
                vehicle.plate_number = new_plate;
            }
            ChangeType::OwnershipChange => {
                let new_owner_id = request
                    .new_owner_id
                    .ok_or_else(|| validation_error("new_owner_id", "Nouveau propriétaire requis"))?;
                self.ensure_owner_exists(Some(new_owner_id), "new_owner_id").await?;
                entry.previous_owner_id = request.previous_owner_id.or(vehicle.owner_id);
                entry.new_owner_id = Some(new_owner_id);
                vehicle.owner_id = Some(new_owner_id);
            }
        }

        vehicle.change_history.push(entry);
        vehicle.updated_at = now;

        let saved = self.vehicles.update(&vehicle).await?;
        tracing::info!(
            "📝 Vehículo {}: {} (entrada #{})",
            saved.plate_number,
            request.change_type.label(),
            saved.change_history.len()
        );

        let alert_sync = self.synchronizer.synchronize(&saved, Some(&previous), actor).await?;

        Ok(ApiResponse::success_with_message(
            VehicleWriteResponse { vehicle: saved, alert_sync },
            "Historial actualizado exitosamente",
        ))
    }

    /// Borra el vehículo y su avis de recherche
    pub async fn delete(&self, actor: &AuthenticatedUser, id: Uuid) -> AppResult<()> {
        actor.require_super_admin()?;

        if let Some(alert) = self.alerts.find_by_vehicle(id).await? {
            self.alerts.delete(alert.id).await?;
        }

        if !self.vehicles.delete(id).await? {
            return Err(not_found_error("Vehicle", &id.to_string()));
        }

        tracing::info!("🗑️ Vehículo {} eliminado por {}", id, actor.email);
        Ok(())
    }

    async fn ensure_owner_exists(&self, owner_id: Option<Uuid>, field: &'static str) -> AppResult<()> {
        if let Some(owner_id) = owner_id {
            if self.people.find_by_id(owner_id).await?.is_none() {
                return Err(validation_error(field, "Le propriétaire indiqué n'existe pas"));
            }
        }
        Ok(())
    }
}

fn build_vehicle(id: Uuid, request: VehicleRequest, now: DateTime<Utc>) -> Vehicle {
    Vehicle {
        id,
        plate_number: normalize_plate(&request.plate_number),
        serial_number: request.serial_number.trim().to_uppercase(),
        vehicle_type: request.vehicle_type,
        brand: request.brand.trim().to_string(),
        model: request.model.trim().to_string(),
        year: request.year,
        color: request.color,
        fuel_type: request.fuel_type,
        engine_displacement_cc: request.engine_displacement_cc,
        engine_number: request.engine_number,
        weight_kg: request.weight_kg,
        purchase_date: request.purchase_date,
        origin_country: request.origin_country,
        purchase_price: request.purchase_price,
        currency: request
            .currency
            .map(|c| c.trim().to_uppercase())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        owner_id: request.owner_id,
        registration_date: request.registration_date.unwrap_or(now),
        internal_notes: request.internal_notes,
        status: request.status,
        theft_info: request.theft_info,
        recovery_info: request.recovery_info,
        change_history: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

/// Campos que rellena el sistema según el estado y el documento anterior.
///
/// - `active`: sin información de robo ni de recuperación.
/// - `stolen`: la recuperación anterior queda obsoleta; `filed_at` se fija
///   al entrar en `stolen` y se conserva en las ediciones siguientes.
/// - `recovered`: `recovered_by` toma el usuario actual si falta.
fn apply_system_fields(
    vehicle: &mut Vehicle,
    previous: Option<&Vehicle>,
    actor: &AuthenticatedUser,
    now: DateTime<Utc>,
) {
    let previous_status = previous.map(|p| p.status);

    match vehicle.status {
        VehicleStatus::Active => {
            vehicle.theft_info = None;
            vehicle.recovery_info = None;
        }
        VehicleStatus::Stolen => {
            vehicle.recovery_info = None;
        }
        VehicleStatus::Recovered => {}
    }

    let entering_stolen =
        vehicle.status == VehicleStatus::Stolen && previous_status != Some(VehicleStatus::Stolen);
    let first_filed_at = if entering_stolen {
        None
    } else {
        previous
            .and_then(|p| p.theft_info.as_ref())
            .and_then(|theft| theft.filed_at)
    };

    if let Some(theft) = vehicle.theft_info.as_mut() {
        theft.filed_by = Some(actor.user_id);
        theft.filed_at = Some(first_filed_at.unwrap_or(now));
    }

    let previous_recoverer = previous
        .and_then(|p| p.recovery_info.as_ref())
        .and_then(|recovery| recovery.recovered_by);

    if let Some(recovery) = vehicle.recovery_info.as_mut() {
        recovery.recovered_by = recovery
            .recovered_by
            .or(previous_recoverer)
            .or(Some(actor.user_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::UserRole;
    use crate::models::vehicle::{RecoveryInfo, TheftInfo, VehicleType};
    use chrono::NaiveDate;

    fn actor() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: Uuid::new_v4(),
            email: "agent@police.ci".to_string(),
            role: UserRole::Officer,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn vehicle(status: VehicleStatus) -> Vehicle {
        let now = Utc::now();
        Vehicle {
            id: Uuid::new_v4(),
            plate_number: "AB-123-CD".to_string(),
            serial_number: "1HGCM82633A004352".to_string(),
            vehicle_type: VehicleType::Car,
            brand: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2018,
            color: None,
            fuel_type: None,
            engine_displacement_cc: None,
            engine_number: None,
            weight_kg: None,
            purchase_date: None,
            origin_country: None,
            purchase_price: None,
            currency: DEFAULT_CURRENCY.to_string(),
            owner_id: None,
            registration_date: now,
            internal_notes: None,
            status,
            theft_info: None,
            recovery_info: None,
            change_history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_theft_filing_is_stamped() {
        let actor = actor();
        let mut v = vehicle(VehicleStatus::Stolen);
        v.theft_info = Some(TheftInfo::new(date(2024, 1, 10), "Abidjan"));
        v.recovery_info = Some(RecoveryInfo::new(date(2024, 2, 1)));

        let now = Utc::now();
        apply_system_fields(&mut v, None, &actor, now);

        let theft = v.theft_info.as_ref().unwrap();
        assert_eq!(theft.filed_by, Some(actor.user_id));
        assert_eq!(theft.filed_at, Some(now));
        assert!(v.recovery_info.is_none());
    }

    #[test]
    fn test_filed_at_kept_on_later_edits() {
        let actor = actor();
        let first = Utc::now() - chrono::Duration::days(3);
        let mut previous = vehicle(VehicleStatus::Stolen);
        let mut theft = TheftInfo::new(date(2024, 1, 10), "Abidjan");
        theft.filed_at = Some(first);
        previous.theft_info = Some(theft);

        let mut edited = previous.clone();
        edited.theft_info.as_mut().unwrap().filed_at = None;
        edited.status = VehicleStatus::Recovered;
        edited.recovery_info = Some(RecoveryInfo::new(date(2024, 2, 1)));

        apply_system_fields(&mut edited, Some(&previous), &actor, Utc::now());

        assert_eq!(edited.theft_info.as_ref().unwrap().filed_at, Some(first));
        assert_eq!(edited.recovery_info.as_ref().unwrap().recovered_by, Some(actor.user_id));
    }

    #[test]
    fn test_back_to_active_clears_theft_and_recovery() {
        let actor = actor();
        let mut previous = vehicle(VehicleStatus::Recovered);
        previous.theft_info = Some(TheftInfo::new(date(2024, 1, 10), "Abidjan"));
        previous.recovery_info = Some(RecoveryInfo::new(date(2024, 2, 1)));

        let mut edited = previous.clone();
        edited.status = VehicleStatus::Active;
        apply_system_fields(&mut edited, Some(&previous), &actor, Utc::now());

        assert!(edited.theft_info.is_none());
        assert!(edited.recovery_info.is_none());
    }
}
