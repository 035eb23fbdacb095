use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::alert::{
    AlertDeclaration, AlertFilters, AlertRecovery, DeclarationUpsert, SearchAlert, SearchStatus,
};
use crate::models::vehicle::page_bounds;
use crate::repositories::AlertStore;
use crate::utils::errors::{map_unique_violation, AppError, AppResult};

// RETURNING * más la marca de inserción (xmax = 0 solo en filas recién insertadas)
#[derive(Debug, FromRow)]
struct UpsertedAlert {
    #[sqlx(flatten)]
    alert: SearchAlert,
    inserted: bool,
}

fn duplicate_active_alert() -> AppError {
    AppError::Conflict("Ya existe un avis de recherche activo para esa placa".to_string())
}

pub struct AlertRepository {
    pool: PgPool,
}

impl AlertRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AlertStore for AlertRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SearchAlert>> {
        let alert = sqlx::query_as::<_, SearchAlert>("SELECT * FROM alerts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(alert)
    }

    async fn find_by_vehicle(&self, vehicle_id: Uuid) -> AppResult<Option<SearchAlert>> {
        let alert = sqlx::query_as::<_, SearchAlert>("SELECT * FROM alerts WHERE vehicle_id = $1 LIMIT 1")
            .bind(vehicle_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(alert)
    }

    async fn list(&self, filters: &AlertFilters) -> AppResult<Vec<SearchAlert>> {
        let (limit, offset) = page_bounds(filters.limit, filters.offset);

        let alerts = sqlx::query_as::<_, SearchAlert>(
            r#"
            SELECT * FROM alerts
            WHERE ($1::search_status IS NULL OR search_status = $1)
              AND ($2::text IS NULL OR plate_number ILIKE '%' || $2 || '%')
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filters.status)
        .bind(filters.plate.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(alerts)
    }

    async fn upsert_declaration(&self, declaration: &AlertDeclaration) -> AppResult<DeclarationUpsert> {
        // Un único INSERT .. ON CONFLICT: sin ventana entre la lectura y la escritura
        let upserted = sqlx::query_as::<_, UpsertedAlert>(
            r#"
            INSERT INTO alerts (
                id, vehicle_id, plate_number, serial_number, vehicle_type, brand, model, color,
                theft_date, city, theft_place, declarant_name, declarant_phone, declarant_email,
                circumstances, registered_by, search_status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                    'active', NOW(), NOW())
            ON CONFLICT (vehicle_id) DO UPDATE
            SET plate_number = EXCLUDED.plate_number,
                serial_number = EXCLUDED.serial_number,
                vehicle_type = EXCLUDED.vehicle_type,
                brand = EXCLUDED.brand,
                model = EXCLUDED.model,
                color = EXCLUDED.color,
                theft_date = EXCLUDED.theft_date,
                city = EXCLUDED.city,
                theft_place = EXCLUDED.theft_place,
                declarant_name = EXCLUDED.declarant_name,
                declarant_phone = EXCLUDED.declarant_phone,
                declarant_email = EXCLUDED.declarant_email,
                circumstances = EXCLUDED.circumstances,
                registered_by = EXCLUDED.registered_by,
                search_status = 'active',
                recovery_date = NULL,
                recovery_place = NULL,
                recovered_by = NULL,
                recovery_circumstances = NULL,
                updated_at = NOW()
            WHERE alerts.search_status <> 'active'
            RETURNING *, (xmax = 0) AS inserted
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(declaration.vehicle_id)
        .bind(&declaration.plate_number)
        .bind(&declaration.serial_number)
        .bind(declaration.vehicle_type)
        .bind(&declaration.brand)
        .bind(&declaration.model)
        .bind(declaration.color)
        .bind(declaration.theft_date)
        .bind(&declaration.city)
        .bind(&declaration.theft_place)
        .bind(&declaration.declarant_name)
        .bind(&declaration.declarant_phone)
        .bind(&declaration.declarant_email)
        .bind(&declaration.circumstances)
        .bind(declaration.registered_by)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, duplicate_active_alert))?;

        Ok(match upserted {
            Some(UpsertedAlert { alert, inserted: true }) => DeclarationUpsert::Created(alert),
            Some(UpsertedAlert { alert, inserted: false }) => DeclarationUpsert::Reactivated(alert),
            None => DeclarationUpsert::AlreadyActive,
        })
    }

    async fn mark_found(&self, vehicle_id: Uuid, recovery: &AlertRecovery) -> AppResult<Option<SearchAlert>> {
        let alert = sqlx::query_as::<_, SearchAlert>(
            r#"
            UPDATE alerts
            SET search_status = 'found',
                recovery_date = $2,
                recovery_place = $3,
                recovered_by = $4,
                recovery_circumstances = $5,
                updated_at = NOW()
            WHERE vehicle_id = $1 AND search_status = 'active'
            RETURNING *
            "#,
        )
        .bind(vehicle_id)
        .bind(recovery.recovery_date)
        .bind(&recovery.recovery_place)
        .bind(recovery.recovered_by)
        .bind(&recovery.recovery_circumstances)
        .fetch_optional(&self.pool)
        .await?;

        Ok(alert)
    }

    async fn mark_abandoned(&self, vehicle_id: Uuid) -> AppResult<Option<SearchAlert>> {
        let alert = sqlx::query_as::<_, SearchAlert>(
            r#"
            UPDATE alerts
            SET search_status = 'abandoned', updated_at = NOW()
            WHERE vehicle_id = $1 AND search_status = 'active'
            RETURNING *
            "#,
        )
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(alert)
    }

    async fn refresh_plate(&self, vehicle_id: Uuid, plate_number: &str) -> AppResult<Option<SearchAlert>> {
        let alert = sqlx::query_as::<_, SearchAlert>(
            r#"
            UPDATE alerts
            SET plate_number = $2, updated_at = NOW()
            WHERE vehicle_id = $1 AND plate_number <> $2
            RETURNING *
            "#,
        )
        .bind(vehicle_id)
        .bind(plate_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, duplicate_active_alert))?;

        Ok(alert)
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: SearchStatus,
        recovery: Option<&AlertRecovery>,
    ) -> AppResult<Option<SearchAlert>> {
        let alert = sqlx::query_as::<_, SearchAlert>(
            r#"
            UPDATE alerts
            SET search_status = $2,
                recovery_date = CASE
                    WHEN $2 = 'found' THEN $3::date
                    WHEN $2 = 'active' THEN NULL
                    ELSE recovery_date END,
                recovery_place = CASE
                    WHEN $2 = 'found' THEN $4::text
                    WHEN $2 = 'active' THEN NULL
                    ELSE recovery_place END,
                recovered_by = CASE
                    WHEN $2 = 'found' THEN $5::uuid
                    WHEN $2 = 'active' THEN NULL
                    ELSE recovered_by END,
                recovery_circumstances = CASE
                    WHEN $2 = 'found' THEN $6::text
                    WHEN $2 = 'active' THEN NULL
                    ELSE recovery_circumstances END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(recovery.map(|r| r.recovery_date))
        .bind(recovery.and_then(|r| r.recovery_place.clone()))
        .bind(recovery.and_then(|r| r.recovered_by))
        .bind(recovery.and_then(|r| r.recovery_circumstances.clone()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, duplicate_active_alert))?;

        Ok(alert)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM alerts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
