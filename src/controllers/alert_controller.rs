use std::sync::Arc;

use uuid::Uuid;

use crate::dto::alert_dto::UpdateAlertStatusRequest;
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::alert::{AlertFilters, AlertRecovery, SearchAlert, SearchStatus};
use crate::models::vehicle::VehicleStatus;
use crate::repositories::{AlertStore, VehicleStore};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct AlertController {
    alerts: Arc<dyn AlertStore>,
    vehicles: Arc<dyn VehicleStore>,
}

impl AlertController {
    pub fn new(state: &AppState) -> Self {
        Self {
            alerts: state.alerts.clone(),
            vehicles: state.vehicles.clone(),
        }
    }

    pub async fn list(&self, filters: AlertFilters) -> AppResult<Vec<SearchAlert>> {
        self.alerts.list(&filters).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<SearchAlert> {
        self.alerts
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Alert", &id.to_string()))
    }

    /// Corrección manual del estado. Debe ser coherente con el vehículo:
    /// `active` exige un vehículo robado y `found` una recuperación
    /// registrada, cuyos datos se copian al avis. Si no, 409.
    pub async fn update_status(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: UpdateAlertStatusRequest,
    ) -> AppResult<ApiResponse<SearchAlert>> {
        actor.require_super_admin()?;

        let current = self.get_by_id(id).await?;
        let vehicle = self.vehicles.find_by_id(current.vehicle_id).await?;

        let recovery = match request.search_status {
            SearchStatus::Active => {
                if vehicle.as_ref().map(|v| v.status) != Some(VehicleStatus::Stolen) {
                    return Err(AppError::Conflict(
                        "Solo un vehículo robado puede tener un avis activo".to_string(),
                    ));
                }
                None
            }
            SearchStatus::Found => {
                let info = vehicle
                    .as_ref()
                    .and_then(|v| v.recovery_info.as_ref())
                    .ok_or_else(|| {
                        AppError::Conflict("El vehículo no tiene recuperación registrada".to_string())
                    })?;
                let mut recovery = AlertRecovery::from(info);
                recovery.recovered_by = recovery.recovered_by.or(Some(actor.user_id));
                Some(recovery)
            }
            SearchStatus::Abandoned => None,
        };

        let alert = self
            .alerts
            .set_status(id, request.search_status, recovery.as_ref())
            .await?
            .ok_or_else(|| not_found_error("Alert", &id.to_string()))?;

        tracing::info!(
            "🚨 Avis {} ({}) → {} por {}",
            alert.id,
            alert.plate_number,
            alert.search_status.label(),
            actor.email
        );

        Ok(ApiResponse::success_with_message(alert, "Estado del avis actualizado"))
    }

    pub async fn delete(&self, actor: &AuthenticatedUser, id: Uuid) -> AppResult<()> {
        actor.require_super_admin()?;

        if !self.alerts.delete(id).await? {
            return Err(not_found_error("Alert", &id.to_string()));
        }

        tracing::info!("🗑️ Avis {} eliminado por {}", id, actor.email);
        Ok(())
    }
}
