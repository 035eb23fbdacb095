//! Modelo de Person
//!
//! Fichero de personas e información de identificación.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Sexo declarado - mapea al ENUM person_sex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "person_sex")]
pub enum Sex {
    M,
    F,
    X,
}

/// Estado de la persona - mapea al ENUM person_status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "person_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PersonStatus {
    Active,
    Detained,
    Wanted,
    Released,
}

impl Default for PersonStatus {
    fn default() -> Self {
        PersonStatus::Active
    }
}

/// Person - mapea exactamente a la tabla people
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Person {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub birth_place: Option<String>,
    pub sex: Option<Sex>,
    pub nationality: Option<String>,
    pub national_id: String,
    pub passport_number: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub photo_id: Option<Uuid>,
    pub is_wanted: bool,
    pub status: PersonStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Filtros para búsqueda de personas
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonFilters {
    pub national_id: Option<String>,
    pub is_wanted: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
