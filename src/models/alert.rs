//! Modelo de SearchAlert (avis de recherche)
//!
//! Proyección desnormalizada de un vehículo robado. Se mantiene sincronizada
//! con el estado del vehículo desde `services::status_sync_service`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use crate::models::vehicle::{RecoveryInfo, TheftInfo, Vehicle, VehicleColor, VehicleType};

/// Estado de la búsqueda - mapea al ENUM search_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "search_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SearchStatus {
    Active,
    Found,
    Abandoned,
}

impl SearchStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SearchStatus::Active => "Recherche active",
            SearchStatus::Found => "Véhicule retrouvé",
            SearchStatus::Abandoned => "Recherche abandonnée",
        }
    }
}

/// Avis de recherche - mapea a la tabla alerts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SearchAlert {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub plate_number: String,
    pub serial_number: String,
    pub vehicle_type: VehicleType,
    pub brand: String,
    pub model: String,
    pub color: Option<VehicleColor>,
    pub theft_date: NaiveDate,
    pub city: Option<String>,
    pub theft_place: String,
    pub declarant_name: Option<String>,
    pub declarant_phone: Option<String>,
    pub declarant_email: Option<String>,
    pub circumstances: Option<String>,
    pub registered_by: Uuid,
    pub search_status: SearchStatus,
    pub recovery_date: Option<NaiveDate>,
    pub recovery_place: Option<String>,
    pub recovered_by: Option<Uuid>,
    pub recovery_circumstances: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Datos copiados del vehículo al declarar (o re-declarar) el robo
#[derive(Debug, Clone, PartialEq)]
pub struct AlertDeclaration {
    pub vehicle_id: Uuid,
    pub plate_number: String,
    pub serial_number: String,
    pub vehicle_type: VehicleType,
    pub brand: String,
    pub model: String,
    pub color: Option<VehicleColor>,
    pub theft_date: NaiveDate,
    pub city: Option<String>,
    pub theft_place: String,
    pub declarant_name: Option<String>,
    pub declarant_phone: Option<String>,
    pub declarant_email: Option<String>,
    pub circumstances: Option<String>,
    pub registered_by: Uuid,
}

impl AlertDeclaration {
    pub fn from_vehicle(vehicle: &Vehicle, theft: &TheftInfo, registered_by: Uuid) -> Self {
        Self {
            vehicle_id: vehicle.id,
            plate_number: vehicle.plate_number.clone(),
            serial_number: vehicle.serial_number.clone(),
            vehicle_type: vehicle.vehicle_type,
            brand: vehicle.brand.clone(),
            model: vehicle.model.clone(),
            color: vehicle.color,
            theft_date: theft.theft_date,
            city: theft.city.clone(),
            theft_place: theft.place.clone(),
            declarant_name: theft.declarant_name.clone(),
            declarant_phone: theft.declarant_phone.clone(),
            declarant_email: theft.declarant_email.clone(),
            circumstances: theft.circumstances.clone(),
            registered_by,
        }
    }

    /// Nuevo avis de recherche activo
    pub fn into_alert(self) -> SearchAlert {
        let now = Utc::now();
        SearchAlert {
            id: Uuid::new_v4(),
            vehicle_id: self.vehicle_id,
            plate_number: self.plate_number,
            serial_number: self.serial_number,
            vehicle_type: self.vehicle_type,
            brand: self.brand,
            model: self.model,
            color: self.color,
            theft_date: self.theft_date,
            city: self.city,
            theft_place: self.theft_place,
            declarant_name: self.declarant_name,
            declarant_phone: self.declarant_phone,
            declarant_email: self.declarant_email,
            circumstances: self.circumstances,
            registered_by: self.registered_by,
            search_status: SearchStatus::Active,
            recovery_date: None,
            recovery_place: None,
            recovered_by: None,
            recovery_circumstances: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reactivar un avis existente con los datos de la nueva declaración
    pub fn reapply_to(&self, alert: &mut SearchAlert) {
        alert.plate_number = self.plate_number.clone();
        alert.serial_number = self.serial_number.clone();
        alert.vehicle_type = self.vehicle_type;
        alert.brand = self.brand.clone();
        alert.model = self.model.clone();
        alert.color = self.color;
        alert.theft_date = self.theft_date;
        alert.city = self.city.clone();
        alert.theft_place = self.theft_place.clone();
        alert.declarant_name = self.declarant_name.clone();
        alert.declarant_phone = self.declarant_phone.clone();
        alert.declarant_email = self.declarant_email.clone();
        alert.circumstances = self.circumstances.clone();
        alert.registered_by = self.registered_by;
        alert.search_status = SearchStatus::Active;
        alert.recovery_date = None;
        alert.recovery_place = None;
        alert.recovered_by = None;
        alert.recovery_circumstances = None;
        alert.updated_at = Utc::now();
    }
}

/// Datos de recuperación copiados al avis encontrado
#[derive(Debug, Clone, PartialEq)]
pub struct AlertRecovery {
    pub recovery_date: NaiveDate,
    pub recovery_place: Option<String>,
    pub recovered_by: Option<Uuid>,
    pub recovery_circumstances: Option<String>,
}

impl From<&RecoveryInfo> for AlertRecovery {
    fn from(info: &RecoveryInfo) -> Self {
        Self {
            recovery_date: info.recovery_date,
            recovery_place: info.place.clone(),
            recovered_by: info.recovered_by,
            recovery_circumstances: info.circumstances.clone(),
        }
    }
}

impl AlertRecovery {
    pub fn apply_to(&self, alert: &mut SearchAlert) {
        alert.search_status = SearchStatus::Found;
        alert.recovery_date = Some(self.recovery_date);
        alert.recovery_place = self.recovery_place.clone();
        alert.recovered_by = self.recovered_by;
        alert.recovery_circumstances = self.recovery_circumstances.clone();
        alert.updated_at = Utc::now();
    }
}

/// Resultado del upsert atómico de una declaración de robo
#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationUpsert {
    Created(SearchAlert),
    Reactivated(SearchAlert),
    AlreadyActive,
}

/// Filtros para el listado de avis
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertFilters {
    pub status: Option<SearchStatus>,
    pub plate: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
