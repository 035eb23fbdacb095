use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::vehicle::{
    page_bounds, ChangeHistoryEntry, FuelType, RecoveryInfo, TheftInfo, Vehicle, VehicleColor,
    VehicleFilters, VehicleStatus, VehicleType,
};
use crate::repositories::VehicleStore;
use crate::utils::errors::{map_unique_violation, AppError, AppResult};

// Fila tal como vive en la tabla vehicles (sub-documentos en JSONB)
#[derive(Debug, FromRow)]
struct VehicleRow {
    id: Uuid,
    plate_number: String,
    serial_number: String,
    vehicle_type: VehicleType,
    brand: String,
    model: String,
    year: i32,
    color: Option<VehicleColor>,
    fuel_type: Option<FuelType>,
    engine_displacement_cc: Option<i32>,
    engine_number: Option<String>,
    weight_kg: Option<Decimal>,
    purchase_date: Option<NaiveDate>,
    origin_country: Option<String>,
    purchase_price: Option<Decimal>,
    currency: String,
    owner_id: Option<Uuid>,
    registration_date: DateTime<Utc>,
    internal_notes: Option<String>,
    status: VehicleStatus,
    theft_info: Option<Json<TheftInfo>>,
    recovery_info: Option<Json<RecoveryInfo>>,
    change_history: Json<Vec<ChangeHistoryEntry>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<VehicleRow> for Vehicle {
    fn from(row: VehicleRow) -> Self {
        Self {
            id: row.id,
            plate_number: row.plate_number,
            serial_number: row.serial_number,
            vehicle_type: row.vehicle_type,
            brand: row.brand,
            model: row.model,
            year: row.year,
            color: row.color,
            fuel_type: row.fuel_type,
            engine_displacement_cc: row.engine_displacement_cc,
            engine_number: row.engine_number,
            weight_kg: row.weight_kg,
            purchase_date: row.purchase_date,
            origin_country: row.origin_country,
            purchase_price: row.purchase_price,
            currency: row.currency,
            owner_id: row.owner_id,
            registration_date: row.registration_date,
            internal_notes: row.internal_notes,
            status: row.status,
            theft_info: row.theft_info.map(|j| j.0),
            recovery_info: row.recovery_info.map(|j| j.0),
            change_history: row.change_history.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const INSERT_VEHICLE: &str = r#"
    INSERT INTO vehicles (
        id, plate_number, serial_number, vehicle_type, brand, model, year, color,
        fuel_type, engine_displacement_cc, engine_number, weight_kg, purchase_date,
        origin_country, purchase_price, currency, owner_id, registration_date,
        internal_notes, status, theft_info, recovery_info, change_history,
        created_at, updated_at
    )
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
            $17, $18, $19, $20, $21, $22, $23, $24, $25)
    RETURNING *
"#;

const UPDATE_VEHICLE: &str = r#"
    UPDATE vehicles
    SET plate_number = $2, serial_number = $3, vehicle_type = $4, brand = $5, model = $6,
        year = $7, color = $8, fuel_type = $9, engine_displacement_cc = $10,
        engine_number = $11, weight_kg = $12, purchase_date = $13, origin_country = $14,
        purchase_price = $15, currency = $16, owner_id = $17, registration_date = $18,
        internal_notes = $19, status = $20, theft_info = $21, recovery_info = $22,
        change_history = $23, updated_at = $24
    WHERE id = $1
    RETURNING *
"#;

// Parámetros $1..$23 comunes a INSERT y UPDATE; las marcas de tiempo las añade cada consulta
fn bind_vehicle<'q>(sql: &'q str, vehicle: &Vehicle) -> QueryAs<'q, Postgres, VehicleRow, PgArguments> {
    sqlx::query_as::<_, VehicleRow>(sql)
        .bind(vehicle.id)
        .bind(vehicle.plate_number.clone())
        .bind(vehicle.serial_number.clone())
        .bind(vehicle.vehicle_type)
        .bind(vehicle.brand.clone())
        .bind(vehicle.model.clone())
        .bind(vehicle.year)
        .bind(vehicle.color)
        .bind(vehicle.fuel_type)
        .bind(vehicle.engine_displacement_cc)
        .bind(vehicle.engine_number.clone())
        .bind(vehicle.weight_kg)
        .bind(vehicle.purchase_date)
        .bind(vehicle.origin_country.clone())
        .bind(vehicle.purchase_price)
        .bind(vehicle.currency.clone())
        .bind(vehicle.owner_id)
        .bind(vehicle.registration_date)
        .bind(vehicle.internal_notes.clone())
        .bind(vehicle.status)
        .bind(vehicle.theft_info.clone().map(Json))
        .bind(vehicle.recovery_info.clone().map(Json))
        .bind(Json(vehicle.change_history.clone()))
}

fn duplicate_vehicle() -> AppError {
    AppError::Conflict("Ya existe un vehículo con esa placa o número de serie".to_string())
}

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleStore for VehicleRepository {
    async fn insert(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let row = bind_vehicle(INSERT_VEHICLE, vehicle)
            .bind(vehicle.created_at)
            .bind(vehicle.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, duplicate_vehicle))?;

        Ok(row.into())
    }

    async fn update(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let row = bind_vehicle(UPDATE_VEHICLE, vehicle)
            .bind(vehicle.updated_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, duplicate_vehicle))?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Vehicle::from))
    }

    async fn find_by_plate(&self, plate_number: &str) -> AppResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>("SELECT * FROM vehicles WHERE plate_number = $1")
            .bind(plate_number)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Vehicle::from))
    }

    async fn find_by_serial(&self, serial_number: &str) -> AppResult<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>("SELECT * FROM vehicles WHERE serial_number = $1")
            .bind(serial_number)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Vehicle::from))
    }

    async fn list(&self, filters: &VehicleFilters) -> AppResult<Vec<Vehicle>> {
        let (limit, offset) = page_bounds(filters.limit, filters.offset);

        let rows = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT * FROM vehicles
            WHERE ($1::vehicle_status IS NULL OR status = $1)
              AND ($2::text IS NULL OR plate_number ILIKE '%' || $2 || '%')
              AND ($3::text IS NULL OR brand ILIKE '%' || $3 || '%')
              AND ($4::uuid IS NULL OR owner_id = $4)
            ORDER BY created_at DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(filters.status)
        .bind(filters.plate.as_deref())
        .bind(filters.brand.as_deref())
        .bind(filters.owner_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Vehicle::from).collect())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
