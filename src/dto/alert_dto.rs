use serde::Deserialize;

use crate::models::alert::SearchStatus;

/// Cambio manual del estado de un avis (super-admin)
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAlertStatusRequest {
    pub search_status: SearchStatus,
}
