//! Sincronizador de estado vehículo → avis de recherche
//!
//! Se ejecuta después de cada escritura de un vehículo, en la misma
//! request, y mantiene el registro de avis coherente con el estado:
//!
//! - A: el vehículo entra en `stolen` con `theft_info` → avis activo
//!   (creado, reactivado o ya activo).
//! - B: aparece `recovery_info` → el avis activo pasa a `found`.
//! - C: `stolen` → `active` sin recuperación → el avis activo pasa a `abandoned`.
//!
//! Un cambio de placa se copia antes al avis del vehículo, de modo que el
//! avis activo nunca retiene la placa anterior.
//!
//! Nunca modifica el vehículo. Los errores del registro de avis se propagan.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::middleware::auth::AuthenticatedUser;
use crate::models::alert::{AlertDeclaration, AlertRecovery, DeclarationUpsert};
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::repositories::AlertStore;
use crate::utils::errors::AppResult;

/// Efecto de una escritura de vehículo sobre el registro de avis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SyncOutcome {
    AlertPlateRefreshed { alert_id: Uuid },
    AlertCreated { alert_id: Uuid },
    AlertReactivated { alert_id: Uuid },
    AlertAlreadyActive,
    AlertFound { alert_id: Uuid },
    RecoveryWithoutActiveAlert,
    AlertAbandoned { alert_id: Uuid },
    WithdrawalWithoutActiveAlert,
}

#[derive(Clone)]
pub struct StatusSynchronizer {
    alerts: Arc<dyn AlertStore>,
}

impl StatusSynchronizer {
    pub fn new(alerts: Arc<dyn AlertStore>) -> Self {
        Self { alerts }
    }

    /// Reacciona a la escritura `previous` → `current` hecha por `actor`.
    /// `previous` es `None` en la creación.
    pub async fn synchronize(
        &self,
        current: &Vehicle,
        previous: Option<&Vehicle>,
        actor: &AuthenticatedUser,
    ) -> AppResult<Vec<SyncOutcome>> {
        let mut outcomes = Vec::new();

        if let Some(outcome) = self.on_plate_changed(current, previous).await? {
            outcomes.push(outcome);
        }
        if let Some(outcome) = self.on_theft_declared(current, previous, actor).await? {
            outcomes.push(outcome);
        }
        if let Some(outcome) = self.on_recovery_recorded(current, previous, actor).await? {
            outcomes.push(outcome);
        }
        if let Some(outcome) = self.on_theft_withdrawn(current, previous).await? {
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    async fn on_plate_changed(
        &self,
        current: &Vehicle,
        previous: Option<&Vehicle>,
    ) -> AppResult<Option<SyncOutcome>> {
        let changed = previous.is_some_and(|p| p.plate_number != current.plate_number);
        if !changed {
            return Ok(None);
        }

        let refreshed = self
            .alerts
            .refresh_plate(current.id, &current.plate_number)
            .await?;

        Ok(refreshed.map(|alert| {
            tracing::info!(
                "🔁 Avis de recherche {} pasa a la placa {}",
                alert.id,
                alert.plate_number
            );
            SyncOutcome::AlertPlateRefreshed { alert_id: alert.id }
        }))
    }

    async fn on_theft_declared(
        &self,
        current: &Vehicle,
        previous: Option<&Vehicle>,
        actor: &AuthenticatedUser,
    ) -> AppResult<Option<SyncOutcome>> {
        let was_stolen = previous.is_some_and(|p| p.status == VehicleStatus::Stolen);
        let theft = match (&current.theft_info, current.status) {
            (Some(theft), VehicleStatus::Stolen) if !was_stolen => theft,
            _ => return Ok(None),
        };

        let declaration = AlertDeclaration::from_vehicle(current, theft, actor.user_id);

        let outcome = match self.alerts.upsert_declaration(&declaration).await? {
            DeclarationUpsert::Created(alert) => {
                tracing::info!(
                    "🚨 Avis de recherche {} creado para {} (vehículo {})",
                    alert.id,
                    alert.plate_number,
                    current.id
                );
                SyncOutcome::AlertCreated { alert_id: alert.id }
            }
            DeclarationUpsert::Reactivated(alert) => {
                tracing::info!(
                    "🔁 Avis de recherche {} reactivado para {}",
                    alert.id,
                    alert.plate_number
                );
                SyncOutcome::AlertReactivated { alert_id: alert.id }
            }
            DeclarationUpsert::AlreadyActive => {
                tracing::debug!("ℹ️ Avis ya activo para vehículo {}", current.id);
                SyncOutcome::AlertAlreadyActive
            }
        };

        Ok(Some(outcome))
    }

    async fn on_recovery_recorded(
        &self,
        current: &Vehicle,
        previous: Option<&Vehicle>,
        actor: &AuthenticatedUser,
    ) -> AppResult<Option<SyncOutcome>> {
        let had_recovery = previous.is_some_and(|p| p.recovery_info.is_some());
        let recovery_info = match &current.recovery_info {
            Some(info) if !had_recovery => info,
            _ => return Ok(None),
        };

        let mut recovery = AlertRecovery::from(recovery_info);
        recovery.recovered_by = recovery.recovered_by.or(Some(actor.user_id));

        let outcome = match self.alerts.mark_found(current.id, &recovery).await? {
            Some(alert) => {
                tracing::info!(
                    "✅ Avis de recherche {} cerrado: {} recuperado el {}",
                    alert.id,
                    alert.plate_number,
                    recovery.recovery_date
                );
                SyncOutcome::AlertFound { alert_id: alert.id }
            }
            None => {
                tracing::warn!(
                    "⚠️ Recuperación de {} sin avis de recherche activo",
                    current.plate_number
                );
                SyncOutcome::RecoveryWithoutActiveAlert
            }
        };

        Ok(Some(outcome))
    }

    async fn on_theft_withdrawn(
        &self,
        current: &Vehicle,
        previous: Option<&Vehicle>,
    ) -> AppResult<Option<SyncOutcome>> {
        let withdrawn = previous.is_some_and(|p| p.status == VehicleStatus::Stolen)
            && current.status == VehicleStatus::Active;
        if !withdrawn {
            return Ok(None);
        }

        let outcome = match self.alerts.mark_abandoned(current.id).await? {
            Some(alert) => {
                tracing::info!(
                    "🛑 Avis de recherche {} abandonado ({} vuelve a activo)",
                    alert.id,
                    alert.plate_number
                );
                SyncOutcome::AlertAbandoned { alert_id: alert.id }
            }
            None => {
                tracing::warn!(
                    "⚠️ Retirada de declaración de {} sin avis activo",
                    current.plate_number
                );
                SyncOutcome::WithdrawalWithoutActiveAlert
            }
        };

        Ok(Some(outcome))
    }
}
