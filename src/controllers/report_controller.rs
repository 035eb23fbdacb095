use std::sync::Arc;

use uuid::Uuid;

use crate::models::person::Person;
use crate::models::vehicle::Vehicle;
use crate::repositories::{PersonStore, VehicleStore};
use crate::services::{ReportKind, ReportPeople, ReportService};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

/// PDF listo para descargar
#[derive(Debug)]
pub struct ReportFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

pub struct ReportController {
    vehicles: Arc<dyn VehicleStore>,
    people: Arc<dyn PersonStore>,
    reports: ReportService,
}

impl ReportController {
    pub fn new(state: &AppState) -> Self {
        Self {
            vehicles: state.vehicles.clone(),
            people: state.people.clone(),
            reports: state.reports.clone(),
        }
    }

    pub async fn vehicle_sheet(&self, vehicle_id: &str) -> AppResult<ReportFile> {
        let vehicle = self.load_vehicle(vehicle_id).await?;
        let owner = self.load_person(vehicle.owner_id).await?;
        let people = ReportPeople {
            owner: owner.as_ref(),
            ..Default::default()
        };

        let bytes = self.reports.vehicle_sheet(&vehicle, &people)?;
        Ok(self.file(ReportKind::VehicleSheet, &vehicle, bytes))
    }

    pub async fn theft_declaration(&self, vehicle_id: &str) -> AppResult<ReportFile> {
        let vehicle = self.load_vehicle(vehicle_id).await?;
        if vehicle.theft_info.is_none() {
            return Err(AppError::NotFound(
                "Aucune déclaration de vol pour ce véhicule".to_string(),
            ));
        }
        let owner = self.load_person(vehicle.owner_id).await?;
        let people = ReportPeople {
            owner: owner.as_ref(),
            ..Default::default()
        };

        let bytes = self.reports.theft_declaration(&vehicle, &people)?;
        Ok(self.file(ReportKind::TheftDeclaration, &vehicle, bytes))
    }

    /// `index` llega tal cual de la URL (base 0)
    pub async fn history_entry(&self, vehicle_id: &str, index: &str) -> AppResult<ReportFile> {
        let index = parse_index(index)?;
        let vehicle = self.load_vehicle(vehicle_id).await?;
        let entry = vehicle.history_entry(index).ok_or_else(|| {
            AppError::NotFound("Entrée d'historique introuvable".to_string())
        })?;

        let previous_owner = self.load_person(entry.previous_owner_id).await?;
        let new_owner = self.load_person(entry.new_owner_id).await?;
        let people = ReportPeople {
            owner: None,
            previous_owner: previous_owner.as_ref(),
            new_owner: new_owner.as_ref(),
        };

        let bytes = self.reports.history_entry(&vehicle, index, &people)?;
        Ok(self.file(ReportKind::HistoryEntry(index), &vehicle, bytes))
    }

    async fn load_vehicle(&self, vehicle_id: &str) -> AppResult<Vehicle> {
        let id = Uuid::parse_str(vehicle_id.trim())
            .map_err(|_| AppError::BadRequest("Identifiant de véhicule invalide".to_string()))?;

        self.vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Véhicule introuvable".to_string()))
    }

    async fn load_person(&self, id: Option<Uuid>) -> AppResult<Option<Person>> {
        match id {
            Some(id) => self.people.find_by_id(id).await,
            None => Ok(None),
        }
    }

    fn file(&self, kind: ReportKind, vehicle: &Vehicle, bytes: Vec<u8>) -> ReportFile {
        let filename = kind.filename(&vehicle.plate_number);
        tracing::info!("📄 {} generado ({} bytes)", filename, bytes.len());
        ReportFile { filename, bytes }
    }
}

/// Índice del historial: entero no negativo
pub fn parse_index(raw: &str) -> AppResult<usize> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| AppError::BadRequest("Index d'historique invalide".to_string()))
}
