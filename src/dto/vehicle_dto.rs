use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::dto::collect_errors;
use crate::models::vehicle::{
    ChangeType, FuelType, RecoveryInfo, TheftInfo, Vehicle, VehicleColor, VehicleStatus, VehicleType,
};
use crate::services::SyncOutcome;
use crate::utils::validation::{
    validate_not_future, validate_plate_number, validate_serial_number, validate_vehicle_year,
};

/// Documento de vehículo para crear (POST) o reemplazar (PUT).
/// El historial de cambios no se acepta aquí.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VehicleRequest {
    pub plate_number: String,
    pub serial_number: String,
    pub vehicle_type: VehicleType,
    #[validate(length(min = 1, max = 100))]
    pub brand: String,
    #[validate(length(min = 1, max = 100))]
    pub model: String,
    pub year: i32,
    pub color: Option<VehicleColor>,
    pub fuel_type: Option<FuelType>,
    #[validate(range(min = 1, max = 20000))]
    pub engine_displacement_cc: Option<i32>,
    #[validate(length(max = 50))]
    pub engine_number: Option<String>,
    pub weight_kg: Option<Decimal>,
    pub purchase_date: Option<NaiveDate>,
    #[validate(length(max = 100))]
    pub origin_country: Option<String>,
    pub purchase_price: Option<Decimal>,
    #[validate(length(equal = 3))]
    pub currency: Option<String>,
    pub owner_id: Option<Uuid>,
    pub registration_date: Option<DateTime<Utc>>,
    #[validate(length(max = 5000))]
    pub internal_notes: Option<String>,
    #[serde(default)]
    pub status: VehicleStatus,
    #[validate]
    pub theft_info: Option<TheftInfo>,
    #[validate]
    pub recovery_info: Option<RecoveryInfo>,
}

impl VehicleRequest {
    /// Validación completa: derive + formato de placa/VIN, año y coherencia del estado
    pub fn check(&self) -> Result<(), ValidationErrors> {
        let mut extra = Vec::new();

        if let Err(e) = validate_plate_number(&self.plate_number) {
            extra.push(("plate_number", e));
        }
        if let Err(e) = validate_serial_number(&self.serial_number) {
            extra.push(("serial_number", e));
        }
        if let Err(e) = validate_vehicle_year(self.year) {
            extra.push(("year", e));
        }
        if let Some(date) = self.purchase_date {
            if let Err(e) = validate_not_future(date) {
                extra.push(("purchase_date", e));
            }
        }
        if self.weight_kg.is_some_and(|w| w <= Decimal::ZERO) {
            extra.push(("weight_kg", positive_error()));
        }
        if self.purchase_price.is_some_and(|p| p < Decimal::ZERO) {
            extra.push(("purchase_price", positive_error()));
        }
        if self.status == VehicleStatus::Stolen && self.theft_info.is_none() {
            extra.push(("theft_info", required_error("Un véhicule volé doit avoir des informations de vol")));
        }
        if self.status == VehicleStatus::Recovered && self.recovery_info.is_none() {
            extra.push((
                "recovery_info",
                required_error("Un véhicule retrouvé doit avoir des informations de récupération"),
            ));
        }
        if let Some(theft) = &self.theft_info {
            if let Err(e) = validate_not_future(theft.theft_date) {
                extra.push(("theft_date", e));
            }
        }
        if let Some(recovery) = &self.recovery_info {
            if let Err(e) = validate_not_future(recovery.recovery_date) {
                extra.push(("recovery_date", e));
            }
        }

        collect_errors(self.validate(), extra)
    }
}

/// Nueva entrada del historial (`POST /api/vehicles/:id/history`)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AppendHistoryRequest {
    pub change_type: ChangeType,
    pub change_date: NaiveDate,
    pub previous_plate: Option<String>,
    pub new_plate: Option<String>,
    pub previous_owner_id: Option<Uuid>,
    pub new_owner_id: Option<Uuid>,
    #[validate(length(max = 2000))]
    pub reason: Option<String>,
}

impl AppendHistoryRequest {
    pub fn check(&self) -> Result<(), ValidationErrors> {
        let mut extra = Vec::new();

        if let Err(e) = validate_not_future(self.change_date) {
            extra.push(("change_date", e));
        }
        match self.change_type {
            ChangeType::PlateChange => match &self.new_plate {
                Some(plate) => {
                    if let Err(e) = validate_plate_number(plate) {
                        extra.push(("new_plate", e));
                    }
                }
                None => extra.push(("new_plate", required_error("Nouvelle immatriculation requise"))),
            },
            ChangeType::OwnershipChange => {
                if self.new_owner_id.is_none() {
                    extra.push(("new_owner_id", required_error("Nouveau propriétaire requis")));
                }
            }
        }

        collect_errors(self.validate(), extra)
    }
}

/// Resultado de una escritura: el vehículo y su efecto sobre los avis
#[derive(Debug, Serialize)]
pub struct VehicleWriteResponse {
    pub vehicle: Vehicle,
    pub alert_sync: Vec<SyncOutcome>,
}

fn required_error(message: &'static str) -> validator::ValidationError {
    let mut error = validator::ValidationError::new("required");
    error.message = Some(message.into());
    error
}

fn positive_error() -> validator::ValidationError {
    let mut error = validator::ValidationError::new("range");
    error.message = Some("La valeur doit être positive".into());
    error
}
