//! Modelo de Vehicle
//!
//! Este módulo contiene el registro de vehículos: identidad, atributos
//! descriptivos, estado, información de robo / recuperación y el
//! historial de cambios (placa, propietario).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::Type;
use uuid::Uuid;
use validator::Validate;

/// Estado del vehículo - mapea al ENUM vehicle_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "vehicle_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Active,
    Stolen,
    Recovered,
}

impl VehicleStatus {
    pub fn label(&self) -> &'static str {
        match self {
            VehicleStatus::Active => "Actif",
            VehicleStatus::Stolen => "Volé",
            VehicleStatus::Recovered => "Retrouvé",
        }
    }
}

impl Default for VehicleStatus {
    fn default() -> Self {
        VehicleStatus::Active
    }
}

/// Tipo de vehículo - mapea al ENUM vehicle_type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "vehicle_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Car,
    Motorcycle,
    Truck,
    Bus,
    Van,
    Other,
}

impl VehicleType {
    pub fn label(&self) -> &'static str {
        match self {
            VehicleType::Car => "Voiture",
            VehicleType::Motorcycle => "Moto",
            VehicleType::Truck => "Camion",
            VehicleType::Bus => "Bus",
            VehicleType::Van => "Camionnette",
            VehicleType::Other => "Autre",
        }
    }
}

/// Color principal - mapea al ENUM vehicle_color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "vehicle_color", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleColor {
    White,
    Black,
    Silver,
    Gray,
    Red,
    Blue,
    Green,
    Yellow,
    Orange,
    Brown,
    Other,
}

impl VehicleColor {
    pub fn label(&self) -> &'static str {
        match self {
            VehicleColor::White => "Blanc",
            VehicleColor::Black => "Noir",
            VehicleColor::Silver => "Argent",
            VehicleColor::Gray => "Gris",
            VehicleColor::Red => "Rouge",
            VehicleColor::Blue => "Bleu",
            VehicleColor::Green => "Vert",
            VehicleColor::Yellow => "Jaune",
            VehicleColor::Orange => "Orange",
            VehicleColor::Brown => "Marron",
            VehicleColor::Other => "Autre",
        }
    }
}

/// Tipo de combustible - mapea al ENUM fuel_type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "fuel_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Gasoline,
    Diesel,
    Electric,
    Hybrid,
    Lpg,
    Other,
}

impl FuelType {
    pub fn label(&self) -> &'static str {
        match self {
            FuelType::Gasoline => "Essence",
            FuelType::Diesel => "Diesel",
            FuelType::Electric => "Électrique",
            FuelType::Hybrid => "Hybride",
            FuelType::Lpg => "GPL",
            FuelType::Other => "Autre",
        }
    }
}

/// Información de robo. `filed_by` y `filed_at` los rellena el sistema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TheftInfo {
    pub theft_date: NaiveDate,
    #[validate(length(min = 2, max = 255))]
    pub place: String,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(min = 2, max = 150))]
    pub declarant_name: Option<String>,
    #[validate(length(min = 6, max = 30))]
    pub declarant_phone: Option<String>,
    #[validate(email)]
    pub declarant_email: Option<String>,
    #[validate(length(max = 5000))]
    pub circumstances: Option<String>,
    #[serde(default)]
    pub filed_by: Option<Uuid>,
    #[serde(default)]
    pub filed_at: Option<DateTime<Utc>>,
}

impl TheftInfo {
    pub fn new(theft_date: NaiveDate, place: impl Into<String>) -> Self {
        Self {
            theft_date,
            place: place.into(),
            city: None,
            declarant_name: None,
            declarant_phone: None,
            declarant_email: None,
            circumstances: None,
            filed_by: None,
            filed_at: None,
        }
    }
}

/// Estado del vehículo al ser recuperado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryCondition {
    Good,
    Damaged,
    Stripped,
    Destroyed,
}

impl RecoveryCondition {
    pub fn label(&self) -> &'static str {
        match self {
            RecoveryCondition::Good => "Bon état",
            RecoveryCondition::Damaged => "Endommagé",
            RecoveryCondition::Stripped => "Désossé",
            RecoveryCondition::Destroyed => "Détruit",
        }
    }
}

/// Información de recuperación. `recovered_by` toma el usuario actual si falta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RecoveryInfo {
    pub recovery_date: NaiveDate,
    #[validate(length(min = 2, max = 255))]
    pub place: Option<String>,
    pub condition: Option<RecoveryCondition>,
    #[serde(default)]
    pub recovered_by: Option<Uuid>,
    #[validate(length(max = 5000))]
    pub circumstances: Option<String>,
}

impl RecoveryInfo {
    pub fn new(recovery_date: NaiveDate) -> Self {
        Self {
            recovery_date,
            place: None,
            condition: None,
            recovered_by: None,
            circumstances: None,
        }
    }
}

/// Tipo de cambio en el historial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    PlateChange,
    OwnershipChange,
}

impl ChangeType {
    pub fn label(&self) -> &'static str {
        match self {
            ChangeType::PlateChange => "Changement d'immatriculation",
            ChangeType::OwnershipChange => "Changement de propriétaire",
        }
    }
}

/// Entrada del historial de cambios (solo se añaden, nunca se editan)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeHistoryEntry {
    pub change_type: ChangeType,
    pub change_date: NaiveDate,
    pub previous_plate: Option<String>,
    pub new_plate: Option<String>,
    pub previous_owner_id: Option<Uuid>,
    pub new_owner_id: Option<Uuid>,
    pub reason: Option<String>,
    pub entered_by: Uuid,
    pub entered_at: DateTime<Utc>,
}

/// Vehicle principal del registro
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: Uuid,
    pub plate_number: String,
    pub serial_number: String,
    pub vehicle_type: VehicleType,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub color: Option<VehicleColor>,
    pub fuel_type: Option<FuelType>,
    pub engine_displacement_cc: Option<i32>,
    pub engine_number: Option<String>,
    pub weight_kg: Option<Decimal>,
    pub purchase_date: Option<NaiveDate>,
    pub origin_country: Option<String>,
    pub purchase_price: Option<Decimal>,
    pub currency: String,
    pub owner_id: Option<Uuid>,
    pub registration_date: DateTime<Utc>,
    pub internal_notes: Option<String>,
    pub status: VehicleStatus,
    pub theft_info: Option<TheftInfo>,
    pub recovery_info: Option<RecoveryInfo>,
    pub change_history: Vec<ChangeHistoryEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// Entrada del historial por índice (base 0)
    pub fn history_entry(&self, index: usize) -> Option<&ChangeHistoryEntry> {
        self.change_history.get(index)
    }
}

/// Moneda por defecto de los precios de compra
pub const DEFAULT_CURRENCY: &str = "XOF";

/// Filtros para búsqueda de vehículos
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleFilters {
    pub status: Option<VehicleStatus>,
    pub plate: Option<String>,
    pub brand: Option<String>,
    pub owner_id: Option<Uuid>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Límite por defecto y máximo de los listados
pub const DEFAULT_PAGE_SIZE: i64 = 50;
pub const MAX_PAGE_SIZE: i64 = 500;

/// Normaliza (limit, offset) de un listado
pub fn page_bounds(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = offset.unwrap_or(0).max(0);
    (limit, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theft_info_accepts_minimal_payload() {
        let info: TheftInfo =
            serde_json::from_str(r#"{"theft_date":"2024-01-10","place":"Abidjan"}"#).unwrap();
        assert_eq!(info, TheftInfo::new(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(), "Abidjan"));
        assert!(info.validate().is_ok());
    }

    #[test]
    fn test_theft_info_rejects_bad_email() {
        let mut info = TheftInfo::new(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(), "Abidjan");
        info.declarant_email = Some("not-an-email".into());
        assert!(info.validate().is_err());
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(serde_json::to_string(&VehicleStatus::Stolen).unwrap(), "\"stolen\"");
        let status: VehicleStatus = serde_json::from_str("\"recovered\"").unwrap();
        assert_eq!(status, VehicleStatus::Recovered);
    }

    #[test]
    fn test_page_bounds() {
        assert_eq!(page_bounds(None, None), (DEFAULT_PAGE_SIZE, 0));
        assert_eq!(page_bounds(Some(0), Some(-5)), (1, 0));
        assert_eq!(page_bounds(Some(10_000), Some(20)), (MAX_PAGE_SIZE, 20));
    }

    #[test]
    fn test_change_type_serde() {
        let kind: ChangeType = serde_json::from_str("\"plate_change\"").unwrap();
        assert_eq!(kind, ChangeType::PlateChange);
    }
}
